//! 符号集合と図形符号からUTF-8への変換。

use crate::convert::{KanjiConverter, KanjiRun};

use super::code::{GraphicCode, GraphicSet, Shift, Side};
use super::cursor::Cursor;
use super::output::{Full, Sink};
use super::table;

const REPLACEMENT_STR: &str = "\u{FFFD}";

/// 英数集合の`0x7E`の代わりに出力するオーバーライン（U+203E）。
const OVERLINE: &str = "\u{203E}";

/// 漢字の区のうち追加記号として扱う範囲か。
#[inline]
fn is_extra_symbols_row(c1: GraphicCode) -> bool {
    matches!(c1.position(), 90..=94)
}

/// 符号集合に従い図形文字を出力する。
///
/// 漢字系の符号集合は[`KanjiConverter`]に委譲する。
#[derive(Debug)]
pub(crate) struct Renderer<C> {
    converter: C,
    buf: String,
    skipped_runs: usize,
}

impl<C: KanjiConverter> Renderer<C> {
    /// `converter`で漢字を変換する`Renderer`を生成する。
    pub fn new(converter: C) -> Renderer<C> {
        Renderer {
            converter,
            buf: String::new(),
            skipped_runs: 0,
        }
    }

    /// 前回の呼び出し以降、変換サービスが失敗して読み捨てた漢字の並びの数を返す。
    #[inline]
    pub fn take_skipped_runs(&mut self) -> usize {
        std::mem::take(&mut self.skipped_runs)
    }

    /// `side`に`shift`で呼び出された`set`の図形符号`c1`を出力する。
    ///
    /// 2バイト符号集合の場合は`cursor`から2バイト目以降を読み進める。
    pub fn render<S: Sink + ?Sized>(
        &mut self,
        set: GraphicSet,
        side: Side,
        shift: Shift,
        c1: GraphicCode,
        cursor: &mut Cursor,
        out: &mut S,
    ) -> Result<(), Full> {
        if set.is_double_byte() {
            let Some(c2) = read_second(cursor) else {
                return Ok(());
            };
            return match set {
                GraphicSet::ExtraSymbols => {
                    push_str(out, table::extra_symbol(c1.position(), c2.position()))
                }
                _ => self.render_kanji(set, side, shift, (c1, c2), cursor, out),
            };
        }

        match set {
            GraphicSet::Alnum | GraphicSet::PropAlnum => match c1.get() {
                0x7E => out.push_str(OVERLINE),
                _ => match table::alnum(c1) {
                    Some(b) => out.push(&[b]),
                    None => out.push_str(REPLACEMENT_STR),
                },
            },
            GraphicSet::Hira | GraphicSet::PropHira => push_char(out, table::hira(c1)),
            GraphicSet::Kata | GraphicSet::PropKata => push_char(out, table::kata(c1)),
            GraphicSet::JisXKata => push_char(out, table::jis_x_kata(c1)),
            GraphicSet::LatinExtension => push_str(out, table::latin_extension(c1)),
            GraphicSet::Special => push_str(out, table::special(c1)),

            // 2バイト符号集合は処理済み
            GraphicSet::Kanji
            | GraphicSet::JisKanjiPlane1
            | GraphicSet::JisKanjiPlane2
            | GraphicSet::ExtraSymbols => Ok(()),

            GraphicSet::Unset => {
                log::trace!("graphic code {:?} to unset graphic set", c1);
                Ok(())
            }
        }
    }

    fn render_kanji<S: Sink + ?Sized>(
        &mut self,
        set: GraphicSet,
        side: Side,
        shift: Shift,
        (c1, c2): (GraphicCode, GraphicCode),
        cursor: &mut Cursor,
        out: &mut S,
    ) -> Result<(), Full> {
        // 漢字集合の90区～94区は追加記号
        if set == GraphicSet::Kanji && is_extra_symbols_row(c1) {
            return push_str(out, table::extra_symbol(c1.position(), c2.position()));
        }

        let Some(mut run) = KanjiRun::new(set) else {
            return Ok(());
        };
        if run.push(c1, c2).is_err() {
            return Ok(());
        }

        // ロッキングシフトで呼び出されている間は同じ領域の漢字をまとめて変換する
        if shift == Shift::Locking {
            while !run.is_full() {
                let (c1, c2) = match *cursor.as_bytes() {
                    [c1, c2, ..] if side.contains(c1) && side.contains(c2) => {
                        match (GraphicCode::new(c1), GraphicCode::new(c2)) {
                            (Some(c1), Some(c2)) => (c1, c2),
                            _ => break,
                        }
                    }
                    _ => break,
                };
                if set == GraphicSet::Kanji && is_extra_symbols_row(c1) {
                    break;
                }
                if run.push(c1, c2).is_err() {
                    break;
                }
                cursor.skip(2);
            }
        }

        self.flush(&run, out)
    }

    /// 漢字の並びを変換サービスに渡し、1文字ずつ出力する。
    fn flush<S: Sink + ?Sized>(&mut self, run: &KanjiRun, out: &mut S) -> Result<(), Full> {
        self.buf.clear();
        if let Err(e) = self.converter.convert(run.as_bytes(), &mut self.buf) {
            log::debug!("skipped {} kanji: {}", run.len(), e);
            self.skipped_runs += 1;
            return Ok(());
        }

        for c in self.buf.chars() {
            out.push_char(c)?;
        }
        Ok(())
    }
}

/// 2バイト符号の2バイト目を読み進める。
///
/// 図形符号でない場合は1文字分を読み捨てたものとして`None`を返す。
fn read_second(cursor: &mut Cursor) -> Option<GraphicCode> {
    let b = cursor.read_byte()?;
    let c2 = GraphicCode::new(b);
    if c2.is_none() {
        log::trace!("invalid second byte of double-byte code: {:02X}", b);
    }
    c2
}

#[inline]
fn push_char<S: Sink + ?Sized>(out: &mut S, c: Option<char>) -> Result<(), Full> {
    out.push_char(c.unwrap_or(char::REPLACEMENT_CHARACTER))
}

#[inline]
fn push_str<S: Sink + ?Sized>(out: &mut S, s: Option<&str>) -> Result<(), Full> {
    out.push_str(s.unwrap_or(REPLACEMENT_STR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{ConvertError, Iso2022Jp3Converter};

    /// 受け取った符号列を記録し、文字数分の`〓`を返す変換サービス。
    #[derive(Debug, Default)]
    struct Recorder {
        requests: Vec<Vec<u8>>,
        fail: bool,
    }

    impl KanjiConverter for Recorder {
        fn convert(&mut self, src: &[u8], dst: &mut String) -> Result<(), ConvertError> {
            self.requests.push(src.to_vec());
            if self.fail {
                return Err(ConvertError::OddLength);
            }
            let designation = if src[2] == 0x28 { 4 } else { 3 };
            for _ in 0..(src.len() - designation) / 2 {
                dst.push('〓');
            }
            Ok(())
        }
    }

    fn render(
        renderer: &mut Renderer<impl KanjiConverter>,
        set: GraphicSet,
        side: Side,
        shift: Shift,
        bytes: &[u8],
    ) -> (String, usize) {
        let mut cursor = Cursor::new(&bytes[1..]);
        let mut out = Vec::new();
        let c1 = GraphicCode::new(bytes[0]).unwrap();
        renderer
            .render(set, side, shift, c1, &mut cursor, &mut out)
            .unwrap();
        (String::from_utf8(out).unwrap(), cursor.position())
    }

    #[test]
    fn test_render_alnum() {
        let mut r = Renderer::new(Recorder::default());
        let gl = Side::Gl;
        let locking = Shift::Locking;
        assert_eq!(render(&mut r, GraphicSet::Alnum, gl, locking, b"A"), ("A".into(), 0));
        assert_eq!(render(&mut r, GraphicSet::PropAlnum, gl, locking, b"z"), ("z".into(), 0));
        assert_eq!(
            render(&mut r, GraphicSet::Alnum, gl, locking, b"~"),
            ("\u{203E}".into(), 0)
        );
        assert_eq!(
            render(&mut r, GraphicSet::Alnum, Side::Gr, locking, b"\xFE"),
            ("\u{203E}".into(), 0)
        );
    }

    #[test]
    fn test_render_kana() {
        let mut r = Renderer::new(Recorder::default());
        let gr = Side::Gr;
        let locking = Shift::Locking;
        assert_eq!(render(&mut r, GraphicSet::Hira, gr, locking, b"\xA2"), ("あ".into(), 0));
        assert_eq!(render(&mut r, GraphicSet::PropKata, gr, locking, b"\xA2"), ("ア".into(), 0));
        assert_eq!(render(&mut r, GraphicSet::JisXKata, gr, locking, b"\xB1"), ("ｱ".into(), 0));
        assert_eq!(
            render(&mut r, GraphicSet::JisXKata, gr, locking, b"\xE0"),
            ("\u{FFFD}".into(), 0)
        );
    }

    #[test]
    fn test_render_extra_symbols() {
        let mut r = Renderer::new(Recorder::default());
        let gl = Side::Gl;
        let locking = Shift::Locking;
        // 90区7点は未定義
        assert_eq!(
            render(&mut r, GraphicSet::ExtraSymbols, gl, locking, b"\x7A\x27"),
            ("\u{FFFD}".into(), 1)
        );
        // 94区93点
        assert_eq!(
            render(&mut r, GraphicSet::ExtraSymbols, gl, locking, b"\x7E\x7D"),
            ("\u{325B}".into(), 1)
        );
        // 漢字集合の90区～94区
        assert_eq!(
            render(&mut r, GraphicSet::Kanji, gl, locking, b"\x7A\x21"),
            ("\u{26CC}".into(), 1)
        );
        // 追加記号集合の85区は変換サービスを使わず表から変換
        assert_eq!(
            render(&mut r, GraphicSet::ExtraSymbols, gl, locking, b"\x75\x21"),
            ("\u{3402}".into(), 1)
        );
        assert!(r.converter.requests.is_empty());
        // 漢字集合の85区は変換サービスに渡す
        let (_, pos) = render(&mut r, GraphicSet::Kanji, gl, locking, b"\x75\x21");
        assert_eq!(pos, 1);
        assert_eq!(r.converter.requests, [b"\x1B\x24\x42\x75\x21"]);
    }

    #[test]
    fn test_render_kanji_run() {
        let mut r = Renderer::new(Recorder::default());
        let (s, pos) = render(
            &mut r,
            GraphicSet::Kanji,
            Side::Gl,
            Shift::Locking,
            b"\x34\x41\x3B\x7A\x30\x21\xA1\xA2",
        );
        assert_eq!((s.as_str(), pos), ("〓〓〓", 5));
        assert_eq!(r.converter.requests, [b"\x1B\x24\x42\x34\x41\x3B\x7A\x30\x21"]);
    }

    #[test]
    fn test_render_kanji_run_stops() {
        let mut r = Renderer::new(Recorder::default());
        // 追加記号の区で止まる
        let (s, pos) = render(
            &mut r,
            GraphicSet::Kanji,
            Side::Gr,
            Shift::Locking,
            b"\xB4\xC1\xFA\xA1",
        );
        assert_eq!((s.as_str(), pos), ("〓", 1));

        // 単一シフトでは1文字のみ
        let (s, pos) = render(
            &mut r,
            GraphicSet::JisKanjiPlane1,
            Side::Gl,
            Shift::Single,
            b"\x30\x21\x30\x22",
        );
        assert_eq!((s.as_str(), pos), ("〓", 1));

        // 漢字以外の符号集合では追加記号の区でも止まらない
        let (s, pos) = render(
            &mut r,
            GraphicSet::JisKanjiPlane2,
            Side::Gl,
            Shift::Locking,
            b"\x21\x21\x7A\x21",
        );
        assert_eq!((s.as_str(), pos), ("〓〓", 3));

        assert_eq!(
            r.converter.requests,
            [
                &b"\x1B\x24\x42\x34\x41"[..],
                &b"\x1B\x24\x28\x51\x30\x21"[..],
                &b"\x1B\x24\x28\x50\x21\x21\x7A\x21"[..],
            ]
        );
    }

    #[test]
    fn test_render_kanji_run_limit() {
        let mut r = Renderer::new(Recorder::default());
        let bytes = vec![0x30; 2 * 1500];
        let (s, pos) = render(&mut r, GraphicSet::Kanji, Side::Gl, Shift::Locking, &bytes);
        assert_eq!(s.chars().count(), crate::convert::MAX_KANJI_RUN);
        assert_eq!(pos, 2 * crate::convert::MAX_KANJI_RUN - 1);
        assert_eq!(r.converter.requests.len(), 1);
    }

    #[test]
    fn test_render_kanji_failure() {
        let mut r = Renderer::new(Recorder {
            fail: true,
            ..Default::default()
        });
        let (s, pos) = render(&mut r, GraphicSet::Kanji, Side::Gl, Shift::Locking, b"\x30\x21");
        assert_eq!((s.as_str(), pos), ("", 1));
        assert_eq!(r.take_skipped_runs(), 1);
        assert_eq!(r.take_skipped_runs(), 0);
    }

    #[test]
    fn test_render_kanji_converter() {
        let mut r = Renderer::new(Iso2022Jp3Converter::new().unwrap());
        let (s, _) = render(&mut r, GraphicSet::Kanji, Side::Gl, Shift::Locking, b"\x34\x41\x3B\x7A");
        assert_eq!(s, "漢字");
    }

    #[test]
    fn test_render_truncated_second_byte() {
        let mut r = Renderer::new(Recorder::default());
        assert_eq!(render(&mut r, GraphicSet::Kanji, Side::Gl, Shift::Locking, b"\x30"), ("".into(), 0));
        assert_eq!(
            render(&mut r, GraphicSet::ExtraSymbols, Side::Gl, Shift::Locking, b"\x7A"),
            ("".into(), 0)
        );
        assert!(r.converter.requests.is_empty());
    }

    #[test]
    fn test_render_abnt() {
        let mut r = Renderer::new(Recorder::default());
        let gr = Side::Gr;
        let locking = Shift::Locking;
        assert_eq!(render(&mut r, GraphicSet::LatinExtension, gr, locking, b"\xE9"), ("é".into(), 0));
        assert_eq!(render(&mut r, GraphicSet::Special, gr, locking, b"\xA1"), ("♪".into(), 0));
        assert_eq!(
            render(&mut r, GraphicSet::Special, gr, locking, b"\xA2"),
            ("\u{FFFD}".into(), 0)
        );
        assert_eq!(render(&mut r, GraphicSet::Unset, gr, locking, b"\xA2"), ("".into(), 0));
    }
}
