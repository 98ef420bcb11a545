//! 符号の指示と文字符号集合。

use std::fmt;

/// 図形領域の符号で、`0x21..=0x7E`の範囲のみ保持する。
///
/// GRから呼び出された符号は最上位ビットを落としてから保持する。
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GraphicCode(u8);

impl GraphicCode {
    /// GLまたはGRの図形領域にある`b`から`GraphicCode`を生成する。
    ///
    /// `b`が`0x21..=0x7E`、`0xA1..=0xFE`のいずれの範囲にもない場合は`None`を返す。
    #[inline]
    pub fn new(b: u8) -> Option<GraphicCode> {
        match b {
            0x21..=0x7E | 0xA1..=0xFE => Some(GraphicCode(b & 0x7F)),
            _ => None,
        }
    }

    /// 符号を`0x21..=0x7E`の範囲に制限された`u8`で返す。
    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// 区点として見た場合の区または点（`1..=94`）を返す。
    #[inline]
    pub fn position(self) -> u8 {
        self.0 - 0x20
    }

    /// 94文字の表に対する添字（`0..=93`）を返す。
    #[inline]
    pub fn index(self) -> usize {
        (self.0 - 0x21) as usize
    }
}

impl fmt::Debug for GraphicCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("0x")?;
        fmt::UpperHex::fmt(&self.0, f)
    }
}

/// 符号の指示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Designator {
    /// G0に対する指示。
    G0 = 0,
    /// G1に対する指示。
    G1 = 1,
    /// G2に対する指示。
    G2 = 2,
    /// G3に対する指示。
    G3 = 3,
}

impl Designator {
    /// 符号の指示における中間符号（`0x28..=0x2B`）から`Designator`を得る。
    #[inline]
    pub fn from_intermediate(b: u8) -> Option<Designator> {
        match b {
            0x28 => Some(Designator::G0),
            0x29 => Some(Designator::G1),
            0x2A => Some(Designator::G2),
            0x2B => Some(Designator::G3),
            _ => None,
        }
    }
}

/// 文字符号集合。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GraphicSet {
    /// 漢字、2バイト符号。
    Kanji,
    /// 英数、1バイト符号。
    Alnum,
    /// 平仮名、1バイト符号。
    Hira,
    /// 片仮名、1バイト符号。
    Kata,
    /// プロポーショナル英数、1バイト符号。
    PropAlnum,
    /// プロポーショナル平仮名、1バイト符号。
    PropHira,
    /// プロポーショナル片仮名、1バイト符号。
    PropKata,
    /// JIS X 0201 片仮名、1バイト符号。
    JisXKata,
    /// JIS互換漢字1面、2バイト符号。
    JisKanjiPlane1,
    /// JIS互換漢字2面、2バイト符号。
    JisKanjiPlane2,
    /// 追加記号、2バイト符号。
    ExtraSymbols,
    /// ABNT NBR 15606-1のラテン拡張、1バイト符号。
    LatinExtension,
    /// ABNT NBR 15606-1の特殊文字、1バイト符号。
    Special,
    /// 未指示。DRCSやモザイクなど対応しない符号集合もこれになる。
    Unset,
}

impl GraphicSet {
    /// 1バイトGセットの終端符号から符号集合を得る。
    ///
    /// 対応しない終端符号は[`GraphicSet::Unset`]になる。
    pub fn from_1byte_final(f: u8) -> GraphicSet {
        match f {
            0x4A => GraphicSet::Alnum,
            0x30 => GraphicSet::Hira,
            0x31 => GraphicSet::Kata,
            0x36 => GraphicSet::PropAlnum,
            0x37 => GraphicSet::PropHira,
            0x38 => GraphicSet::PropKata,
            0x49 => GraphicSet::JisXKata,
            0x4B => GraphicSet::LatinExtension,
            0x4C => GraphicSet::Special,
            // モザイクA～Dは非対応
            _ => GraphicSet::Unset,
        }
    }

    /// 2バイトGセットの終端符号から符号集合を得る。
    ///
    /// 対応しない終端符号は[`GraphicSet::Unset`]になる。
    pub fn from_2byte_final(f: u8) -> GraphicSet {
        match f {
            0x42 => GraphicSet::Kanji,
            0x39 => GraphicSet::JisKanjiPlane1,
            0x3A => GraphicSet::JisKanjiPlane2,
            0x3B => GraphicSet::ExtraSymbols,
            _ => GraphicSet::Unset,
        }
    }

    /// 1文字が2バイトで表される符号集合かどうかを返す。
    #[inline]
    pub fn is_double_byte(self) -> bool {
        matches!(
            self,
            GraphicSet::Kanji
                | GraphicSet::JisKanjiPlane1
                | GraphicSet::JisKanjiPlane2
                | GraphicSet::ExtraSymbols
        )
    }
}

/// 図形文字を呼び出した領域。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// GL（`0x21..=0x7E`）。
    Gl,
    /// GR（`0xA1..=0xFE`）。
    Gr,
}

impl Side {
    /// `b`がこの領域の図形文字であるかどうかを返す。
    #[inline]
    pub fn contains(self, b: u8) -> bool {
        match self {
            Side::Gl => matches!(b, 0x21..=0x7E),
            Side::Gr => matches!(b, 0xA1..=0xFE),
        }
    }
}

/// 符号集合がどのように呼び出されたか。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shift {
    /// 次に変更されるまで有効な呼び出し。
    Locking,
    /// 直後の1文字のみ有効な呼び出し。
    Single,
}

/// 符号列の規格。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// ARIB STD-B24（日本）。
    #[default]
    Arib,
    /// ABNT NBR 15606-1（ブラジル）。
    Abnt,
}

impl Profile {
    /// この規格における初期状態を返す。
    #[inline]
    pub fn options(self) -> Options {
        match self {
            Profile::Arib => Options::ARIB,
            Profile::Abnt => Options::ABNT,
        }
    }
}

/// 8単位符号をデコードする際のオプション。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// 初期状態でG0～G3に指示する符号集合。
    pub graphic_sets: [GraphicSet; 4],

    /// 初期状態でGLに呼び出す符号集合。
    pub gl: Designator,

    /// 初期状態でGRに呼び出す符号集合。
    pub gr: Designator,
}

impl Options {
    /// ARIB STD-B24の符号列をデコードする際のオプション。
    pub const ARIB: Options = Options {
        graphic_sets: [
            GraphicSet::Kanji,
            GraphicSet::Alnum,
            GraphicSet::Hira,
            GraphicSet::Kata,
        ],
        gl: Designator::G0,
        gr: Designator::G2,
    };

    /// ABNT NBR 15606-1の符号列をデコードする際のオプション。
    pub const ABNT: Options = Options {
        graphic_sets: [
            GraphicSet::Alnum,
            GraphicSet::LatinExtension,
            GraphicSet::Unset,
            GraphicSet::Unset,
        ],
        gl: Designator::G0,
        gr: Designator::G1,
    };
}

impl Default for Options {
    fn default() -> Self {
        Options::ARIB
    }
}

impl From<Profile> for Options {
    #[inline]
    fn from(profile: Profile) -> Options {
        profile.options()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphic_code() {
        assert_eq!(GraphicCode::new(0x20), None);
        assert_eq!(GraphicCode::new(0x7F), None);
        assert_eq!(GraphicCode::new(0xA0), None);
        assert_eq!(GraphicCode::new(0xFF), None);

        let c = GraphicCode::new(0x21).unwrap();
        assert_eq!((c.get(), c.position(), c.index()), (0x21, 1, 0));
        let c = GraphicCode::new(0xFE).unwrap();
        assert_eq!((c.get(), c.position(), c.index()), (0x7E, 94, 93));
        assert_eq!(GraphicCode::new(0xB0), GraphicCode::new(0x30));
    }

    #[test]
    fn test_final_bytes() {
        assert_eq!(GraphicSet::from_1byte_final(0x4A), GraphicSet::Alnum);
        assert_eq!(GraphicSet::from_1byte_final(0x49), GraphicSet::JisXKata);
        assert_eq!(GraphicSet::from_1byte_final(0x4B), GraphicSet::LatinExtension);
        assert_eq!(GraphicSet::from_1byte_final(0x4C), GraphicSet::Special);
        for mosaic in 0x32..=0x35 {
            assert_eq!(GraphicSet::from_1byte_final(mosaic), GraphicSet::Unset);
        }
        assert_eq!(GraphicSet::from_1byte_final(0x42), GraphicSet::Unset);

        assert_eq!(GraphicSet::from_2byte_final(0x42), GraphicSet::Kanji);
        assert_eq!(GraphicSet::from_2byte_final(0x39), GraphicSet::JisKanjiPlane1);
        assert_eq!(GraphicSet::from_2byte_final(0x3A), GraphicSet::JisKanjiPlane2);
        assert_eq!(GraphicSet::from_2byte_final(0x3B), GraphicSet::ExtraSymbols);
        assert_eq!(GraphicSet::from_2byte_final(0x4A), GraphicSet::Unset);
    }

    #[test]
    fn test_profile_options() {
        let arib = Profile::Arib.options();
        assert_eq!(arib.gl, Designator::G0);
        assert_eq!(arib.gr, Designator::G2);
        assert_eq!(arib.graphic_sets[0], GraphicSet::Kanji);
        assert_eq!(arib.graphic_sets[1], GraphicSet::Alnum);
        assert_eq!(arib.graphic_sets[2], GraphicSet::Hira);
        assert_eq!(arib.graphic_sets[3], GraphicSet::Kata);

        let abnt = Options::from(Profile::Abnt);
        assert_eq!(abnt.gl, Designator::G0);
        assert_eq!(abnt.gr, Designator::G1);
        assert_eq!(abnt.graphic_sets[0], GraphicSet::Alnum);
        assert_eq!(abnt.graphic_sets[1], GraphicSet::LatinExtension);
    }

    #[test]
    fn test_side() {
        assert!(Side::Gl.contains(0x21));
        assert!(!Side::Gl.contains(0xA1));
        assert!(Side::Gr.contains(0xFE));
        assert!(!Side::Gr.contains(0x7E));
    }
}
