//! 入力符号列のカーソル。

use std::slice;

/// 入力符号列を前方にのみ読み進めるカーソル。
///
/// 一度読み進めた位置に戻ることはできない。
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    len: usize,
    iter: slice::Iter<'a, u8>,
}

impl<'a> Cursor<'a> {
    /// `bytes`の先頭を指すカーソルを生成する。
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Cursor<'a> {
        Cursor {
            len: bytes.len(),
            iter: bytes.iter(),
        }
    }

    /// 未処理の部分をスライスとして返す。
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.iter.as_slice()
    }

    /// 先頭から読み進めたバイト数を返す。
    #[inline]
    pub fn position(&self) -> usize {
        self.len - self.iter.len()
    }

    /// 未処理の符号が残っていない場合に`true`を返す。
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.iter.len() == 0
    }

    /// 読み進めずに次の符号を得る。
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.as_bytes().first().copied()
    }

    /// 次の符号を読み進める。
    #[inline]
    pub fn read_byte(&mut self) -> Option<u8> {
        self.iter.next().copied()
    }

    /// 最大`n`個の符号を読み飛ばし、実際に読み飛ばした数を返す。
    #[inline]
    pub fn skip(&mut self, n: usize) -> usize {
        let n = n.min(self.iter.len());
        if n > 0 {
            let _ = self.iter.nth(n - 1);
        }
        n
    }

    /// 残りの符号をすべて読み飛ばし、読み飛ばした数を返す。
    #[inline]
    pub fn skip_to_end(&mut self) -> usize {
        self.skip(self.iter.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor() {
        let mut cursor = Cursor::new(b"\x01\x02\x03\x04");
        assert_eq!(cursor.peek(), Some(0x01));
        assert_eq!(cursor.read_byte(), Some(0x01));
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.skip(2), 2);
        assert_eq!(cursor.as_bytes(), b"\x04");
        assert_eq!(cursor.skip(5), 1);
        assert!(cursor.is_empty());
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.read_byte(), None);
        assert_eq!(cursor.skip(1), 0);
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_cursor_skip_to_end() {
        let mut cursor = Cursor::new(b"abc");
        assert_eq!(cursor.skip(0), 0);
        assert_eq!(cursor.skip_to_end(), 3);
        assert_eq!(cursor.skip_to_end(), 0);
        assert_eq!(cursor.position(), 3);
    }
}
