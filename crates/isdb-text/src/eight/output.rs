//! デコード結果の出力先。

use thiserror::Error;

/// 出力先の容量が足りず、描画単位を書き込めなかった。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("output buffer is full")]
pub struct Full;

/// デコードした描画単位を追記する先。
///
/// 描画単位（1文字分のUTF-8や追加記号の1項目）は常に丸ごと書き込まれるか、
/// 一切書き込まれないかのいずれかである。
pub trait Sink {
    /// `unit`を丸ごと追記する。
    ///
    /// 容量が足りない場合は何も書き込まずに[`Full`]を返す。
    fn push(&mut self, unit: &[u8]) -> Result<(), Full>;

    /// `c`をUTF-8として追記する。
    #[inline]
    fn push_char(&mut self, c: char) -> Result<(), Full> {
        let mut buf = [0; 4];
        self.push(c.encode_utf8(&mut buf).as_bytes())
    }

    /// `s`を1つの描画単位として追記する。
    #[inline]
    fn push_str(&mut self, s: &str) -> Result<(), Full> {
        self.push(s.as_bytes())
    }
}

/// 呼び出し元が確保した固定長のバッファに書き込む出力先。
///
/// 書き込み位置がバッファの長さを超えることはない。
#[derive(Debug)]
pub struct Output<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Output<'a> {
    /// `buf`の先頭から書き込む`Output`を生成する。
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Output<'a> {
        Output { buf, pos: 0 }
    }

    /// 書き込んだバイト数を返す。
    #[inline]
    pub fn len(&self) -> usize {
        self.pos
    }

    /// 何も書き込んでいない場合に`true`を返す。
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// 残りの容量を返す。
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// 書き込んだ部分をスライスとして返す。
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}

impl Sink for Output<'_> {
    fn push(&mut self, unit: &[u8]) -> Result<(), Full> {
        let end = self.pos + unit.len();
        let Some(dst) = self.buf.get_mut(self.pos..end) else {
            return Err(Full);
        };
        dst.copy_from_slice(unit);
        self.pos = end;
        Ok(())
    }
}

/// 容量の制限なく追記する出力先。
impl Sink for Vec<u8> {
    #[inline]
    fn push(&mut self, unit: &[u8]) -> Result<(), Full> {
        self.extend_from_slice(unit);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_push() {
        let mut buf = [0; 5];
        let mut out = Output::new(&mut buf);
        assert!(out.is_empty());
        assert_eq!(out.push(b"ab"), Ok(()));
        assert_eq!(out.push_char('あ'), Ok(()));
        assert_eq!(out.len(), 5);
        assert_eq!(out.remaining(), 0);
        assert_eq!(out.push(b""), Ok(()));
        assert_eq!(out.push(b"c"), Err(Full));
        assert_eq!(out.as_bytes(), "abあ".as_bytes());
    }

    #[test]
    fn test_output_unit_is_atomic() {
        let mut buf = [0xFF; 4];
        let mut out = Output::new(&mut buf);
        assert_eq!(out.push(b"a"), Ok(()));
        assert_eq!(out.push_str("[HV]"), Err(Full));
        assert_eq!(out.as_bytes(), b"a");
        assert_eq!(buf, [b'a', 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_vec_sink() {
        let mut out = Vec::new();
        assert_eq!(out.push_str("漢字"), Ok(()));
        assert_eq!(Sink::push(&mut out, b"\n"), Ok(()));
        assert_eq!(out, "漢字\n".as_bytes());
    }
}
