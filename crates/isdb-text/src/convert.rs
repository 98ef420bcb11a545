//! JIS漢字をUTF-8に変換する外部サービスとの境界。
//!
//! 8単位符号の漢字系符号集合は、ISO-2022-JP-3相当の指示を前置した2バイト符号列として
//! [`KanjiConverter`]に渡される。既定の実装は[`Iso2022Jp3Converter`]で、
//! JIS X 0208は`encoding_rs`のISO-2022-JPデコーダ、JIS X 0213は組み込みの表で変換する。

mod jisx0213;

use arrayvec::ArrayVec;
use encoding_rs::ISO_2022_JP;
use thiserror::Error;

use crate::eight::code::{GraphicCode, GraphicSet};

/// 1回の変換要求に含める2バイト符号の最大数。
pub const MAX_KANJI_RUN: usize = 1024;

/// 指示の最大長（`ESC $ ( Q`）。
const MAX_DESIGNATION_LEN: usize = 4;

/// 変換サービスを初期化できなかった。
#[derive(Debug, Error)]
pub enum OpenError {
    /// 変換サービスが利用できない。
    #[error("kanji conversion is unavailable: {0}")]
    Unavailable(&'static str),
}

/// 変換サービスが符号列を変換できなかった。
///
/// デコード中に発生した場合はその符号列のみを読み捨て、処理を続ける。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// 未知の指示で始まる符号列。
    #[error("unknown designation: {0:02X?}")]
    UnknownDesignation(Vec<u8>),

    /// 2バイト符号の途中で符号列が終わっている。
    #[error("odd length of double-byte codes")]
    OddLength,
}

/// 漢字の符号列がステージングバッファの上限に達した。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("kanji run reached the maximum length")]
pub struct RunFull;

/// JIS漢字をUTF-8に変換するサービス。
///
/// 1つの実装を同時に複数のデコードから使用することはできない。
pub trait KanjiConverter {
    /// ISO-2022-JP-3相当の指示で始まる2バイト符号列`src`を変換し、`dst`に追記する。
    ///
    /// 変換表にない符号は[`U+FFFD REPLACEMENT CHARACTER`][char::REPLACEMENT_CHARACTER]とする。
    fn convert(&mut self, src: &[u8], dst: &mut String) -> Result<(), ConvertError>;
}

impl<C: KanjiConverter + ?Sized> KanjiConverter for &mut C {
    #[inline]
    fn convert(&mut self, src: &[u8], dst: &mut String) -> Result<(), ConvertError> {
        (**self).convert(src, dst)
    }
}

impl<C: KanjiConverter + ?Sized> KanjiConverter for Box<C> {
    #[inline]
    fn convert(&mut self, src: &[u8], dst: &mut String) -> Result<(), ConvertError> {
        (**self).convert(src, dst)
    }
}

/// `set`の符号列に前置するISO-2022-JP-3相当の指示を返す。
pub fn designation(set: GraphicSet) -> Option<&'static [u8]> {
    match set {
        GraphicSet::Kanji => Some(b"\x1B\x24\x42"),
        GraphicSet::JisKanjiPlane1 => Some(b"\x1B\x24\x28\x51"),
        GraphicSet::JisKanjiPlane2 => Some(b"\x1B\x24\x28\x50"),
        _ => None,
    }
}

/// 変換サービスにまとめて渡す、同じ符号集合の漢字の並び。
///
/// 容量は指示と[`MAX_KANJI_RUN`]文字分で固定されており、それを超えて追加することはできない。
#[derive(Debug, Clone)]
pub struct KanjiRun {
    buf: ArrayVec<u8, { MAX_DESIGNATION_LEN + MAX_KANJI_RUN * 2 }>,
    chars: usize,
}

impl KanjiRun {
    /// `set`の指示から始まる空の並びを生成する。
    ///
    /// `set`が漢字系の符号集合でない場合は`None`を返す。
    pub fn new(set: GraphicSet) -> Option<KanjiRun> {
        let mut buf = ArrayVec::new();
        buf.try_extend_from_slice(designation(set)?).ok()?;
        Some(KanjiRun { buf, chars: 0 })
    }

    /// 2バイト符号を1文字追加する。
    pub fn push(&mut self, c1: GraphicCode, c2: GraphicCode) -> Result<(), RunFull> {
        if self.is_full() {
            return Err(RunFull);
        }
        self.buf
            .try_extend_from_slice(&[c1.get(), c2.get()])
            .map_err(|_| RunFull)?;
        self.chars += 1;
        Ok(())
    }

    /// 追加した文字数を返す。
    #[inline]
    pub fn len(&self) -> usize {
        self.chars
    }

    /// 1文字も追加していない場合に`true`を返す。
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars == 0
    }

    /// これ以上文字を追加できない場合に`true`を返す。
    #[inline]
    pub fn is_full(&self) -> bool {
        self.chars >= MAX_KANJI_RUN
    }

    /// 指示を含む符号列全体を返す。
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

/// JIS X 0208で未定義だが、デコーダが機種依存文字に変換してしまう区か。
///
/// 13区はNEC特殊文字、89区～92区はIBM拡張文字に当たる。
#[inline]
fn is_vendor_row(c1: u8) -> bool {
    matches!(c1, 0x2D | 0x79..=0x7C)
}

/// ISO-2022-JP-3相当の[`KanjiConverter`]の実装。
///
/// JIS X 0208は`encoding_rs`のISO-2022-JPデコーダで、JIS X 0213の第1面・第2面は組み込みの表で変換する。
#[derive(Debug, Default)]
pub struct Iso2022Jp3Converter {
    buf: Vec<u8>,
}

impl Iso2022Jp3Converter {
    /// 変換サービスを初期化する。
    ///
    /// デコーダが既知の漢字を変換できない場合はエラーを返す。
    pub fn new() -> Result<Iso2022Jp3Converter, OpenError> {
        let mut converter = Iso2022Jp3Converter {
            buf: Vec::with_capacity(3 + MAX_KANJI_RUN * 2 + 3),
        };

        // 亜
        let mut probe = String::new();
        match converter.convert(b"\x1B\x24\x42\x30\x21", &mut probe) {
            Ok(()) if probe == "\u{4E9C}" => Ok(converter),
            _ => Err(OpenError::Unavailable("ISO-2022-JP decoder")),
        }
    }

    fn convert_jis0208(&mut self, mut codes: &[u8], dst: &mut String) {
        while !codes.is_empty() {
            let n = codes
                .chunks_exact(2)
                .position(|pair| is_vendor_row(pair[0]))
                .unwrap_or(codes.len() / 2);
            let (mapped, rest) = codes.split_at(n * 2);
            if !mapped.is_empty() {
                self.decode_iso2022jp(mapped, dst);
            }

            codes = match rest {
                [c1, c2, rest @ ..] => {
                    log::trace!("kanji outside JIS X 0208: {:02X} {:02X}", c1, c2);
                    dst.push(char::REPLACEMENT_CHARACTER);
                    rest
                }
                _ => rest,
            };
        }
    }

    fn decode_iso2022jp(&mut self, codes: &[u8], dst: &mut String) {
        self.buf.clear();
        self.buf.extend_from_slice(b"\x1B\x24\x42");
        self.buf.extend_from_slice(codes);
        self.buf.extend_from_slice(b"\x1B\x28\x42");

        let (decoded, had_errors) = ISO_2022_JP.decode_without_bom_handling(&self.buf);
        if had_errors {
            log::trace!("unmapped kanji in {:02X?}", codes);
        }
        dst.push_str(&decoded);
    }
}

impl KanjiConverter for Iso2022Jp3Converter {
    fn convert(&mut self, src: &[u8], dst: &mut String) -> Result<(), ConvertError> {
        let (lookup, codes): (fn(u8, u8) -> Option<jisx0213::JisChar>, _) = match src {
            [0x1B, 0x24, 0x42, codes @ ..] => {
                if codes.len() % 2 != 0 {
                    return Err(ConvertError::OddLength);
                }
                self.convert_jis0208(codes, dst);
                return Ok(());
            }
            [0x1B, 0x24, 0x28, 0x51, codes @ ..] => (jisx0213::plane1, codes),
            [0x1B, 0x24, 0x28, 0x50, codes @ ..] => (jisx0213::plane2, codes),
            _ => {
                let len = src.len().min(MAX_DESIGNATION_LEN);
                return Err(ConvertError::UnknownDesignation(src[..len].to_vec()));
            }
        };
        if codes.len() % 2 != 0 {
            return Err(ConvertError::OddLength);
        }

        for pair in codes.chunks_exact(2) {
            let row = pair[0].wrapping_sub(0x20);
            let cell = pair[1].wrapping_sub(0x20);
            match lookup(row, cell) {
                Some(c) => c.push_to(dst),
                None => {
                    log::trace!("unmapped kanji: {:02X?}", pair);
                    dst.push(char::REPLACEMENT_CHARACTER);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn code(b: u8) -> GraphicCode {
        GraphicCode::new(b).unwrap()
    }

    #[test]
    fn test_designation() {
        assert_eq!(designation(GraphicSet::Kanji), Some(&b"\x1B$B"[..]));
        assert_eq!(designation(GraphicSet::JisKanjiPlane1), Some(&b"\x1B$(Q"[..]));
        assert_eq!(designation(GraphicSet::JisKanjiPlane2), Some(&b"\x1B$(P"[..]));
        assert_eq!(designation(GraphicSet::ExtraSymbols), None);
        assert_eq!(designation(GraphicSet::Alnum), None);
    }

    #[test]
    fn test_kanji_run() {
        assert!(KanjiRun::new(GraphicSet::Hira).is_none());

        let mut run = KanjiRun::new(GraphicSet::JisKanjiPlane1).unwrap();
        assert!(run.is_empty());
        run.push(code(0x30), code(0x21)).unwrap();
        run.push(code(0xB0), code(0xA2)).unwrap();
        assert_eq!(run.len(), 2);
        assert_eq!(run.as_bytes(), b"\x1B\x24\x28\x51\x30\x21\x30\x22");
    }

    #[test]
    fn test_kanji_run_full() {
        let mut run = KanjiRun::new(GraphicSet::JisKanjiPlane2).unwrap();
        for _ in 0..MAX_KANJI_RUN {
            run.push(code(0x21), code(0x21)).unwrap();
        }
        assert!(run.is_full());
        assert_eq!(run.push(code(0x21), code(0x21)), Err(RunFull));
        assert_eq!(run.len(), MAX_KANJI_RUN);
        assert_eq!(run.as_bytes().len(), 4 + MAX_KANJI_RUN * 2);
    }

    fn convert(src: &[u8]) -> String {
        let mut converter = Iso2022Jp3Converter::new().unwrap();
        let mut s = String::new();
        converter.convert(src, &mut s).unwrap();
        s
    }

    #[test]
    fn test_iso2022jp3_converter() {
        let mut converter = Iso2022Jp3Converter::new().unwrap();

        let mut s = String::new();
        // 漢字
        converter.convert(b"\x1B\x24\x42\x34\x41\x3B\x7A", &mut s).unwrap();
        assert_eq!(s, "漢字");

        // JIS X 0213第1面
        converter.convert(b"\x1B\x24\x28\x51\x30\x21", &mut s).unwrap();
        assert_eq!(s, "漢字亜");

        // JIS X 0213第2面
        converter.convert(b"\x1B\x24\x28\x50\x21\x21\x21\x22", &mut s).unwrap();
        assert_eq!(s, "漢字亜\u{20089}\u{4E02}");
    }

    #[test]
    fn test_jis0208_vendor_rows() {
        // 89区～92区はJIS X 0208では未定義
        assert_eq!(convert(b"\x1B$B\x79\x21"), "\u{FFFD}");
        assert_eq!(convert(b"\x1B$B\x7C\x7E"), "\u{FFFD}");
        // 13区も同様
        assert_eq!(convert(b"\x1B$B\x2D\x21"), "\u{FFFD}");
        // 前後の漢字はそのまま変換する
        assert_eq!(convert(b"\x1B$B\x34\x41\x79\x21\x3B\x7A"), "漢\u{FFFD}字");
        assert_eq!(convert(b"\x1B$B\x79\x21\x2D\x21"), "\u{FFFD}\u{FFFD}");
        // 割り当てのない区点
        assert_eq!(convert(b"\x1B$B\x29\x21"), "\u{FFFD}");
    }

    #[test]
    fn test_jis0213_planes() {
        // 第1面の89区1点はJIS X 0208の機種依存文字と異なる
        assert_eq!(convert(b"\x1B$(Q\x79\x21"), "硃");
        assert_eq!(convert(b"\x1B$(Q\x34\x41\x79\x21"), "漢硃");
        // 結合文字列
        assert_eq!(convert(b"\x1B$(Q\x24\x77"), "か\u{309A}");
        // 第2面の1区1点
        assert_eq!(convert(b"\x1B$(P\x21\x21"), "\u{20089}");
        // 第2面の文字が割り当てられていない区
        assert_eq!(convert(b"\x1B$(P\x22\x21"), "\u{FFFD}");
        // 図形文字でない符号
        assert_eq!(convert(b"\x1B$(Q\x7F\x21\x21\x20"), "\u{FFFD}\u{FFFD}");
    }

    #[test]
    fn test_iso2022jp3_converter_error() {
        let mut converter = Iso2022Jp3Converter::new().unwrap();
        let mut s = String::new();

        assert_matches!(
            converter.convert(b"\x1B\x28\x42\x30\x21", &mut s),
            Err(ConvertError::UnknownDesignation(d)) if d == b"\x1B\x28\x42\x30"
        );
        assert_matches!(
            converter.convert(b"\x1B\x24\x42\x30", &mut s),
            Err(ConvertError::OddLength)
        );
        assert_matches!(
            converter.convert(b"\x1B\x24\x28\x50\x21", &mut s),
            Err(ConvertError::OddLength)
        );
        assert_eq!(s, "");
    }
}
