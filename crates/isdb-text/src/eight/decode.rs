//! 8単位符号のデコード。

use crate::convert::KanjiConverter;

use super::code::{GraphicCode, Options, Side};
use super::control;
use super::cursor::Cursor;
use super::output::{Full, Sink};
use super::render::Renderer;
use super::select::{SelectionState, Step};

/// ARIB STD-B24の8単位符号をデコードする。
///
/// 符号の指示・呼び出し状態は`Decoder`ごとに[`Options`]から初期化される。
#[derive(Debug)]
pub(crate) struct Decoder<'a, 'r, C> {
    cursor: Cursor<'a>,
    state: SelectionState,
    renderer: &'r mut Renderer<C>,
}

impl<'a, 'r, C: KanjiConverter> Decoder<'a, 'r, C> {
    /// `opts`に従い`bytes`をデコードする`Decoder`を生成する。
    #[inline]
    pub fn new(bytes: &'a [u8], opts: &Options, renderer: &'r mut Renderer<C>) -> Self {
        Decoder {
            cursor: Cursor::new(bytes),
            state: SelectionState::new(opts),
            renderer,
        }
    }

    /// `Decoder`で未処理の部分をスライスとして返す。
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.cursor.as_bytes()
    }

    /// 符号列の終わりまでデコードし、結果を`out`に追記する。
    ///
    /// `out`に描画単位を書き込めなくなった時点で[`Full`]を返す。
    /// それまでに書き込んだ内容はそのまま残る。
    pub fn run<S: Sink + ?Sized>(&mut self, out: &mut S) -> Result<(), Full> {
        loop {
            if !self.consume_selections() {
                return Ok(());
            }

            let Some(c) = self.cursor.read_byte() else {
                return Ok(());
            };
            match c {
                // SP | APD
                0x20 | 0x0A => out.push(&[c])?,

                // GL: 0x21..=0x7E
                0x21..=0x7E => self.render(Side::Gl, c, out)?,

                // GR: 0xA1..=0xFE
                0xA1..=0xFE => self.render(Side::Gr, c, out)?,

                // C0・C1
                _ => {
                    control::skip(c, &mut self.cursor);
                }
            }
        }
    }

    /// 呼び出しと指示を読めるだけ読み進める。
    ///
    /// 符号列が終了した場合は`false`を返す。
    fn consume_selections(&mut self) -> bool {
        loop {
            match self.state.try_consume(&mut self.cursor) {
                Step::Consumed(_) => {}
                Step::NotRecognized => return true,
                Step::EndOfInput => return false,
            }
        }
    }

    fn render<S: Sink + ?Sized>(&mut self, side: Side, c: u8, out: &mut S) -> Result<(), Full> {
        let Some(c1) = GraphicCode::new(c) else {
            return Ok(());
        };
        let (set, shift) = self.state.resolve(side);
        self.renderer
            .render(set, side, shift, c1, &mut self.cursor, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Iso2022Jp3Converter;
    use crate::eight::output::Output;
    use hex_literal::hex;

    fn decode(opts: &Options, bytes: &[u8]) -> String {
        let mut renderer = Renderer::new(Iso2022Jp3Converter::new().unwrap());
        let mut decoder = Decoder::new(bytes, opts, &mut renderer);
        let mut out = Vec::new();
        decoder.run(&mut out).unwrap();
        assert!(decoder.as_bytes().is_empty());
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_decode_arib() {
        let opts = Options::ARIB;
        // 漢字
        assert_eq!(decode(&opts, &hex!("34 41 3B 7A")), "漢字");
        // あい
        assert_eq!(decode(&opts, &hex!("A2 A4")), "あい");
        // LS1で英数
        assert_eq!(decode(&opts, b"\x0EHello, world!"), "Hello, world!");
        // LS1・LS0
        assert_eq!(decode(&opts, &hex!("0E 41 0F 34 41 0E 42")), "A漢B");
        // SP・APD
        assert_eq!(decode(&opts, &hex!("A2 20 A4 0A")), "あ い\n");
    }

    #[test]
    fn test_decode_single_shift() {
        let opts = Options::ARIB;
        // SS2で平仮名、続けて漢字
        assert_eq!(decode(&opts, &hex!("19 22 34 41")), "あ漢");
        // SS3で片仮名
        assert_eq!(decode(&opts, &hex!("1D 22 A2")), "アあ");
        // GRには作用せず、次のGLの符号に作用する
        assert_eq!(decode(&opts, &hex!("1D A2 22")), "あア");
    }

    #[test]
    fn test_decode_designation() {
        let opts = Options::ARIB;
        // G1に片仮名を指示してLS1
        assert_eq!(decode(&opts, &hex!("1B 29 31 0E 22 24")), "アイ");
        // G0に追加記号を指示
        assert_eq!(decode(&opts, &hex!("1B 24 3B 7A 21 7E 7D")), "\u{26CC}\u{325B}");
        // 90区48点は運用上未定義
        assert_eq!(decode(&opts, &hex!("1B 24 3B 7A 50")), "\u{FFFD}");
        // DRCSが指示された符号集合は描画しない
        assert_eq!(decode(&opts, &hex!("1B 28 20 41 21 0E 41")), "A");
        // LS3RでGRに片仮名
        assert_eq!(decode(&opts, &hex!("1B 7C A2")), "ア");
    }

    #[test]
    fn test_decode_controls() {
        let opts = Options::ARIB;
        // COL・CSI・TIME・MACROのパラメータは描画しない
        assert_eq!(
            decode(
                &opts,
                &hex!("0E 41 90 20 48 42 9B 31 3B 32 20 53 43 9D 29 31 40 44 95 40 41 95 4F 45")
            ),
            "ABCDE"
        );
        // パラメータを持たない制御符号
        assert_eq!(decode(&opts, &hex!("0E 41 0C 89 8A 42")), "AB");
        // パラメータの途中で終わる
        assert_eq!(decode(&opts, &hex!("0E 41 9B 31")), "A");
    }

    #[test]
    fn test_decode_end_of_input() {
        let opts = Options::ARIB;
        assert_eq!(decode(&opts, &[]), "");
        assert_eq!(decode(&opts, &hex!("0E 41 1B")), "A");
        assert_eq!(decode(&opts, &hex!("0E 41 1B 24 29")), "A");
        assert_eq!(decode(&opts, &hex!("A2 34")), "あ");
    }

    #[test]
    fn test_decode_abnt() {
        let opts = Options::ABNT;
        assert_eq!(decode(&opts, b"Ol\xE1, Brasil"), "Olá, Brasil");
        // G2に特殊文字を指示してSS2
        assert_eq!(decode(&opts, &hex!("1B 2A 4C 19 21 41")), "♪A");
        // G2・G3は未指示
        assert_eq!(decode(&opts, &hex!("19 21 1D 22 41")), "A");
    }

    #[test]
    fn test_decode_truncated_output() {
        let mut renderer = Renderer::new(Iso2022Jp3Converter::new().unwrap());
        let mut buf = [0; 5];
        let mut out = Output::new(&mut buf);
        let bytes = hex!("34 41 3B 7A");
        let mut decoder = Decoder::new(&bytes, &Options::ARIB, &mut renderer);
        assert_eq!(decoder.run(&mut out), Err(Full));
        assert_eq!(out.as_bytes(), "漢".as_bytes());
    }
}
