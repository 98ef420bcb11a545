//! 符号の呼び出しと指示を解釈する状態機械。

use super::code::{Designator, GraphicSet, Options, Shift, Side};
use super::cursor::Cursor;

/// [`SelectionState::try_consume`]の結果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// 呼び出しまたは指示を解釈し、内包するバイト数だけ読み進めた。
    Consumed(usize),

    /// 次の符号は呼び出しでも指示でもない。カーソルは読み進めていない。
    NotRecognized,

    /// 符号列が終了した。途中で途切れたエスケープシーケンスは読み捨てられている。
    EndOfInput,
}

/// G0～G3に指示された符号集合と、GL・GRへの呼び出し状態。
///
/// デコードの度に[`Options`]から初期化され、呼び出しを跨いで引き継がれることはない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    /// G0～G3に指示された符号集合。
    pub graphic_sets: [GraphicSet; 4],
    /// GLに呼び出されている符号集合。
    pub gl: Designator,
    /// GRに呼び出されている符号集合。
    pub gr: Designator,
    /// 次の1文字に限りGLへ呼び出される符号集合。
    pub single_shift: Option<Designator>,
}

impl SelectionState {
    /// `opts`を初期状態とする`SelectionState`を生成する。
    #[inline]
    pub fn new(opts: &Options) -> SelectionState {
        SelectionState {
            graphic_sets: opts.graphic_sets,
            gl: opts.gl,
            gr: opts.gr,
            single_shift: None,
        }
    }

    /// `g`に指示されている符号集合を返す。
    #[inline]
    pub fn get(&self, g: Designator) -> GraphicSet {
        self.graphic_sets[g as usize]
    }

    /// 符号の指示。
    #[inline]
    fn designate(&mut self, g: Designator, set: GraphicSet) {
        self.graphic_sets[g as usize] = set;
    }

    /// `side`に呼び出されている符号集合を得る。
    ///
    /// GLに単一シフトが保留されている場合はそちらを優先し、保留を解除する。
    /// GRには単一シフトは作用しない。
    pub fn resolve(&mut self, side: Side) -> (GraphicSet, Shift) {
        match side {
            Side::Gl => match self.single_shift.take() {
                Some(g) => (self.get(g), Shift::Single),
                None => (self.get(self.gl), Shift::Locking),
            },
            Side::Gr => (self.get(self.gr), Shift::Locking),
        }
    }

    /// カーソル位置にある呼び出しまたは指示を1つ解釈する。
    pub fn try_consume(&mut self, cursor: &mut Cursor) -> Step {
        match cursor.peek() {
            None => Step::EndOfInput,

            // LS0
            Some(0x0F) => {
                cursor.skip(1);
                self.gl = Designator::G0;
                Step::Consumed(1)
            }
            // LS1
            Some(0x0E) => {
                cursor.skip(1);
                self.gl = Designator::G1;
                Step::Consumed(1)
            }
            // SS2
            Some(0x19) => {
                cursor.skip(1);
                self.single_shift = Some(Designator::G2);
                Step::Consumed(1)
            }
            // SS3
            Some(0x1D) => {
                cursor.skip(1);
                self.single_shift = Some(Designator::G3);
                Step::Consumed(1)
            }
            // ESC
            Some(0x1B) => self.read_esc(cursor),

            Some(_) => Step::NotRecognized,
        }
    }

    /// エスケープシーケンスを読み取る。
    fn read_esc(&mut self, cursor: &mut Cursor) -> Step {
        fn invoke_to_gl(this: &mut SelectionState, cursor: &mut Cursor, g: Designator) -> Step {
            this.gl = g;
            Step::Consumed(cursor.skip(2))
        }
        fn invoke_to_gr(this: &mut SelectionState, cursor: &mut Cursor, g: Designator) -> Step {
            this.gr = g;
            Step::Consumed(cursor.skip(2))
        }
        fn designate(
            this: &mut SelectionState,
            cursor: &mut Cursor,
            read: usize,
            g: Designator,
            set: GraphicSet,
        ) -> Step {
            if set == GraphicSet::Unset {
                log::trace!("unsupported designation: {:02X?}", &cursor.as_bytes()[..read]);
            }
            this.designate(g, set);
            Step::Consumed(cursor.skip(read))
        }

        match *cursor.as_bytes() {
            // 符号の呼び出し

            // LS2
            [0x1B, 0x6E, ..] => invoke_to_gl(self, cursor, Designator::G2),
            // LS3
            [0x1B, 0x6F, ..] => invoke_to_gl(self, cursor, Designator::G3),
            // LS1R
            [0x1B, 0x7E, ..] => invoke_to_gr(self, cursor, Designator::G1),
            // LS2R
            [0x1B, 0x7D, ..] => invoke_to_gr(self, cursor, Designator::G2),
            // LS3R
            [0x1B, 0x7C, ..] => invoke_to_gr(self, cursor, Designator::G3),

            // 符号の指示

            // 1バイトDRCS：非対応のため未指示とする
            [0x1B, g @ 0x28..=0x2B, 0x20, _, ..] => {
                let g = designator(g);
                designate(self, cursor, 4, g, GraphicSet::Unset)
            }
            // 1バイトGセット
            [0x1B, g @ 0x28..=0x2B, f, ..] if f != 0x20 => {
                let g = designator(g);
                designate(self, cursor, 3, g, GraphicSet::from_1byte_final(f))
            }

            // 2バイトDRCS：非対応のため未指示とする
            [0x1B, 0x24, g @ 0x28..=0x2B, 0x20, _, ..] => {
                let g = designator(g);
                designate(self, cursor, 5, g, GraphicSet::Unset)
            }
            // 2バイトGセット（G1～G3、または明示的なG0）
            [0x1B, 0x24, g @ 0x28..=0x2B, f, ..] if f != 0x20 => {
                let g = designator(g);
                designate(self, cursor, 4, g, GraphicSet::from_2byte_final(f))
            }
            // 2バイトGセット（G0）
            [0x1B, 0x24, f, ..] if !matches!(f, 0x28..=0x2B) => {
                designate(self, cursor, 3, Designator::G0, GraphicSet::from_2byte_final(f))
            }

            // ここまでに一致しない指示は符号列の終端で途切れている
            [0x1B] | [0x1B, 0x28..=0x2B, ..] | [0x1B, 0x24, ..] => {
                log::trace!("truncated escape sequence: {:02X?}", cursor.as_bytes());
                cursor.skip_to_end();
                Step::EndOfInput
            }

            // 不明なエスケープは2バイトを読み捨てる
            [0x1B, _, ..] => {
                log::trace!("unknown escape sequence: {:02X?}", &cursor.as_bytes()[..2]);
                Step::Consumed(cursor.skip(2))
            }

            _ => Step::NotRecognized,
        }
    }
}

/// パターンで`0x28..=0x2B`と分かっている中間符号から`Designator`を得る。
#[inline]
fn designator(g: u8) -> Designator {
    Designator::from_intermediate(g).unwrap_or(Designator::G0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eight::code::Profile;
    use assert_matches::assert_matches;

    fn arib() -> SelectionState {
        SelectionState::new(&Profile::Arib.options())
    }

    /// `bytes`を解釈しきるまで`try_consume`を繰り返し、最後の結果を返す。
    fn consume_all(state: &mut SelectionState, bytes: &[u8]) -> (Step, usize) {
        let mut cursor = Cursor::new(bytes);
        loop {
            match state.try_consume(&mut cursor) {
                Step::Consumed(n) => assert!(n > 0),
                step => return (step, cursor.position()),
            }
        }
    }

    #[test]
    fn test_locking_shift() {
        let mut state = arib();
        assert_eq!(consume_all(&mut state, b"\x0E"), (Step::EndOfInput, 1));
        assert_eq!(state.gl, Designator::G1);
        assert_eq!(consume_all(&mut state, b"\x0F"), (Step::EndOfInput, 1));
        assert_eq!(state.gl, Designator::G0);

        assert_eq!(consume_all(&mut state, b"\x1B\x6E"), (Step::EndOfInput, 2));
        assert_eq!(state.gl, Designator::G2);
        assert_eq!(consume_all(&mut state, b"\x1B\x6F"), (Step::EndOfInput, 2));
        assert_eq!(state.gl, Designator::G3);

        assert_eq!(consume_all(&mut state, b"\x1B\x7E"), (Step::EndOfInput, 2));
        assert_eq!(state.gr, Designator::G1);
        assert_eq!(consume_all(&mut state, b"\x1B\x7D"), (Step::EndOfInput, 2));
        assert_eq!(state.gr, Designator::G2);
        assert_eq!(consume_all(&mut state, b"\x1B\x7C"), (Step::EndOfInput, 2));
        assert_eq!(state.gr, Designator::G3);
    }

    #[test]
    fn test_single_shift() {
        let mut state = arib();
        assert_eq!(consume_all(&mut state, b"\x19"), (Step::EndOfInput, 1));
        assert_eq!(state.single_shift, Some(Designator::G2));
        assert_eq!(consume_all(&mut state, b"\x1D"), (Step::EndOfInput, 1));
        assert_eq!(state.single_shift, Some(Designator::G3));

        assert_eq!(state.resolve(Side::Gr), (GraphicSet::Hira, Shift::Locking));
        assert_eq!(state.single_shift, Some(Designator::G3));
        assert_eq!(state.resolve(Side::Gl), (GraphicSet::Kata, Shift::Single));
        assert_eq!(state.resolve(Side::Gl), (GraphicSet::Kanji, Shift::Locking));
    }

    #[test]
    fn test_designate_1byte() {
        let mut state = arib();
        assert_eq!(consume_all(&mut state, b"\x1B\x28\x4A"), (Step::EndOfInput, 3));
        assert_eq!(state.get(Designator::G0), GraphicSet::Alnum);
        assert_eq!(consume_all(&mut state, b"\x1B\x29\x49"), (Step::EndOfInput, 3));
        assert_eq!(state.get(Designator::G1), GraphicSet::JisXKata);
        assert_eq!(consume_all(&mut state, b"\x1B\x2A\x31"), (Step::EndOfInput, 3));
        assert_eq!(state.get(Designator::G2), GraphicSet::Kata);
        assert_eq!(consume_all(&mut state, b"\x1B\x2B\x4B"), (Step::EndOfInput, 3));
        assert_eq!(state.get(Designator::G3), GraphicSet::LatinExtension);

        // モザイクは非対応
        assert_eq!(consume_all(&mut state, b"\x1B\x2B\x32"), (Step::EndOfInput, 3));
        assert_eq!(state.get(Designator::G3), GraphicSet::Unset);
    }

    #[test]
    fn test_designate_2byte() {
        let mut state = SelectionState::new(&Profile::Abnt.options());
        assert_eq!(consume_all(&mut state, b"\x1B\x24\x42"), (Step::EndOfInput, 3));
        assert_eq!(state.get(Designator::G0), GraphicSet::Kanji);
        assert_eq!(consume_all(&mut state, b"\x1B\x24\x29\x39"), (Step::EndOfInput, 4));
        assert_eq!(state.get(Designator::G1), GraphicSet::JisKanjiPlane1);
        assert_eq!(consume_all(&mut state, b"\x1B\x24\x2A\x3A"), (Step::EndOfInput, 4));
        assert_eq!(state.get(Designator::G2), GraphicSet::JisKanjiPlane2);
        assert_eq!(consume_all(&mut state, b"\x1B\x24\x2B\x3B"), (Step::EndOfInput, 4));
        assert_eq!(state.get(Designator::G3), GraphicSet::ExtraSymbols);
        assert_eq!(consume_all(&mut state, b"\x1B\x24\x28\x3B"), (Step::EndOfInput, 4));
        assert_eq!(state.get(Designator::G0), GraphicSet::ExtraSymbols);

        assert_eq!(consume_all(&mut state, b"\x1B\x24\x7A"), (Step::EndOfInput, 3));
        assert_eq!(state.get(Designator::G0), GraphicSet::Unset);
    }

    #[test]
    fn test_designate_drcs() {
        let mut state = arib();
        assert_eq!(consume_all(&mut state, b"\x1B\x29\x20\x41"), (Step::EndOfInput, 4));
        assert_eq!(state.get(Designator::G1), GraphicSet::Unset);
        assert_eq!(consume_all(&mut state, b"\x1B\x24\x28\x20\x40"), (Step::EndOfInput, 5));
        assert_eq!(state.get(Designator::G0), GraphicSet::Unset);
        assert_eq!(consume_all(&mut state, b"\x1B\x24\x2A\x20\x40"), (Step::EndOfInput, 5));
        assert_eq!(state.get(Designator::G2), GraphicSet::Unset);
        assert_eq!(state.get(Designator::G3), GraphicSet::Kata);
    }

    #[test]
    fn test_not_recognized() {
        let mut state = arib();
        let mut cursor = Cursor::new(b"\x0E\x41");
        assert_eq!(state.try_consume(&mut cursor), Step::Consumed(1));
        assert_eq!(state.try_consume(&mut cursor), Step::NotRecognized);
        assert_eq!(state.try_consume(&mut cursor), Step::NotRecognized);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_truncated() {
        for bytes in [
            &b"\x1B"[..],
            b"\x1B\x28",
            b"\x1B\x29\x20",
            b"\x1B\x24",
            b"\x1B\x24\x29",
            b"\x1B\x24\x29\x20",
        ] {
            let mut state = arib();
            let (step, pos) = consume_all(&mut state, bytes);
            assert_eq!(step, Step::EndOfInput);
            assert_eq!(pos, bytes.len());
            assert_eq!(state, arib(), "{:02X?}", bytes);
        }
    }

    #[test]
    fn test_unknown_escape() {
        let mut state = arib();
        let mut cursor = Cursor::new(b"\x1B\x40\x21");
        assert_matches!(state.try_consume(&mut cursor), Step::Consumed(2));
        assert_eq!(cursor.as_bytes(), b"\x21");
        assert_eq!(state, arib());
    }

    #[test]
    fn test_idempotent_designation() {
        let mut once = arib();
        consume_all(&mut once, b"\x1B\x24\x29\x42");
        let mut twice = arib();
        consume_all(&mut twice, b"\x1B\x24\x29\x42\x1B\x24\x29\x42");
        assert_eq!(once, twice);
    }
}
