//! 符号列をUTF-8に変換するセッション。

use crate::convert::{Iso2022Jp3Converter, KanjiConverter, OpenError};
use crate::eight::code::{Options, Profile};
use crate::eight::decode::Decoder;
use crate::eight::output::{Output, Sink};
use crate::eight::render::Renderer;

/// デコードがどこまで進んだか。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// 符号列の終わりまでデコードした。
    Complete,

    /// 出力先の容量が足りず、途中でデコードを打ち切った。
    Truncated,
}

/// [`Session::decode`]の結果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct Decoded {
    /// 出力先に書き込んだバイト数。
    pub written: usize,

    /// デコードがどこまで進んだか。
    pub status: Status,

    /// 変換サービスが失敗して読み捨てた漢字の並びの数。
    pub skipped_runs: usize,
}

impl Decoded {
    /// 出力先の容量が足りずにデコードを打ち切った場合に`true`を返す。
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.status == Status::Truncated
    }
}

/// 符号列をUTF-8に変換するセッション。
///
/// 初期状態と漢字の変換サービスを保持し、何度でもデコードに使用できる。
/// 符号の指示・呼び出し状態はデコードの度に初期状態に戻り、前回のデコードから引き継がれることはない。
///
/// 変換サービスを排他的に所有するため、複数のスレッドから同時にデコードする場合は
/// スレッドごとにセッションを開く必要がある。
#[derive(Debug)]
pub struct Session<C = Iso2022Jp3Converter> {
    options: Options,
    renderer: Renderer<C>,
}

impl Session {
    /// `profile`の初期状態で符号列をデコードするセッションを開く。
    ///
    /// 漢字の変換サービスを初期化できない場合はエラーを返す。
    pub fn open(profile: Profile) -> Result<Session, OpenError> {
        let converter = Iso2022Jp3Converter::new()?;
        log::debug!("session opened: {:?}", profile);
        Ok(Session::open_with(profile.options(), converter))
    }
}

impl<C: KanjiConverter> Session<C> {
    /// 初期状態`options`と変換サービス`converter`でセッションを開く。
    pub fn open_with(options: Options, converter: C) -> Session<C> {
        Session {
            options,
            renderer: Renderer::new(converter),
        }
    }

    /// セッションの初期状態を返す。
    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// セッションを閉じ、変換サービスを解放する。
    #[inline]
    pub fn close(self) {
        log::debug!("session closed");
    }

    /// `src`をデコードし、UTF-8を`dst`の先頭から書き込む。
    ///
    /// `dst`の長さを超えて書き込むことはない。描画単位（1文字や追加記号の1項目）が
    /// `dst`に収まらなくなった時点でデコードを打ち切り、[`Status::Truncated`]を返す。
    /// 書き込んだ内容は常に正しいUTF-8であり、容量の制限がない場合の出力の先頭部分と一致する。
    pub fn decode(&mut self, src: &[u8], dst: &mut [u8]) -> Decoded {
        let mut out = Output::new(dst);
        let status = self.run(src, &mut out);

        Decoded {
            written: out.len(),
            status,
            skipped_runs: self.renderer.take_skipped_runs(),
        }
    }

    /// `src`を容量の制限なくデコードし、`String`として返す。
    ///
    /// 変換サービスが失敗した漢字の並びは読み捨てられる。
    pub fn decode_to_string(&mut self, src: &[u8]) -> String {
        // 制御符号を除けば大抵はUTF-8の方が長い
        let mut out = Vec::with_capacity(src.len() * 3 / 2);
        let status = self.run(src, &mut out);
        debug_assert_eq!(status, Status::Complete);

        let skipped_runs = self.renderer.take_skipped_runs();
        if skipped_runs > 0 {
            log::debug!("{} kanji runs skipped", skipped_runs);
        }

        // 描画単位は常に正しいUTF-8として書き込まれる
        String::from_utf8(out).unwrap_or_else(|e| {
            debug_assert!(false, "decoded text is not UTF-8: {}", e);
            String::new()
        })
    }

    fn run<S: Sink + ?Sized>(&mut self, src: &[u8], out: &mut S) -> Status {
        let mut decoder = Decoder::new(src, &self.options, &mut self.renderer);
        match decoder.run(out) {
            Ok(()) => Status::Complete,
            Err(e) => {
                log::debug!("{}: {} bytes left undecoded", e, decoder.as_bytes().len());
                Status::Truncated
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConvertError;
    use crate::eight::code::{Designator, GraphicSet};
    use assert_matches::assert_matches;
    use hex_literal::hex;

    struct Failing;

    impl KanjiConverter for Failing {
        fn convert(&mut self, _: &[u8], _: &mut String) -> Result<(), ConvertError> {
            Err(ConvertError::OddLength)
        }
    }

    #[test]
    fn test_open() {
        let session = Session::open(Profile::Arib).unwrap();
        assert_eq!(session.options(), &Options::ARIB);
        session.close();

        let session = Session::open(Profile::Abnt).unwrap();
        assert_eq!(session.options(), &Options::ABNT);
        session.close();
    }

    #[test]
    fn test_decode() {
        let mut session = Session::open(Profile::Arib).unwrap();
        let mut buf = [0; 64];
        let decoded = session.decode(&hex!("34 41 3B 7A CE 0E 41 42 43"), &mut buf);
        assert_eq!(
            decoded,
            Decoded {
                written: 6 + 3 + 3,
                status: Status::Complete,
                skipped_runs: 0,
            }
        );
        assert_eq!(&buf[..decoded.written], "漢字のABC".as_bytes());
    }

    #[test]
    fn test_decode_truncated() {
        let mut session = Session::open(Profile::Arib).unwrap();
        let mut buf = [0xFF; 8];
        let decoded = session.decode(&hex!("34 41 3B 7A CE"), &mut buf);
        assert!(decoded.is_truncated());
        assert_eq!(decoded.written, 6);
        assert_eq!(&buf[..6], "漢字".as_bytes());
        assert_eq!(buf[6..], [0xFF, 0xFF]);

        let decoded = session.decode(&hex!("34 41"), &mut []);
        assert_matches!(
            decoded,
            Decoded {
                written: 0,
                status: Status::Truncated,
                ..
            }
        );
    }

    #[test]
    fn test_decode_skipped_runs() {
        let mut session = Session::open_with(Options::ARIB, Failing);
        let mut buf = [0; 16];
        let decoded = session.decode(&hex!("34 41 3B 7A CE 0E 41 0F 34 41"), &mut buf);
        assert_eq!(decoded.skipped_runs, 2);
        assert_eq!(decoded.status, Status::Complete);
        assert_eq!(&buf[..decoded.written], "のA".as_bytes());

        assert_eq!(session.decode_to_string(&hex!("CE 34 41")), "の");
    }

    #[test]
    fn test_decode_custom_options() {
        let options = Options {
            graphic_sets: [
                GraphicSet::Alnum,
                GraphicSet::Kanji,
                GraphicSet::Hira,
                GraphicSet::Kata,
            ],
            gl: Designator::G0,
            gr: Designator::G1,
        };
        let mut session = Session::open_with(options, Iso2022Jp3Converter::new().unwrap());
        assert_eq!(session.decode_to_string(&hex!("41 B4 C1 42")), "A漢B");
    }

    #[test]
    fn test_decode_to_string() {
        let mut session = Session::open(Profile::Arib).unwrap();
        // 2バイト目のない末尾の符号は出力しない
        let src = hex!("34 41 3B 7A CE 0E 41 0F 20 7A 21 34");
        let s = session.decode_to_string(&src);
        assert_eq!(s, "漢字のA \u{26CC}");

        let mut buf = [0; 64];
        let decoded = session.decode(&src, &mut buf);
        assert_eq!(decoded.status, Status::Complete);
        assert_eq!(&buf[..decoded.written], s.as_bytes());
    }

    #[test]
    fn test_decode_is_stateless() {
        let mut session = Session::open(Profile::Arib).unwrap();
        // LS1は次のデコードに引き継がれない
        assert_eq!(session.decode_to_string(&hex!("0E 41")), "A");
        assert_eq!(session.decode_to_string(&hex!("34 41")), "漢");
    }
}
