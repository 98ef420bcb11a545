//! 描画しない制御符号のパラメータの読み飛ばし。

use super::cursor::Cursor;

/// 制御符号`opcode`に続くパラメータを読み飛ばし、読み飛ばしたバイト数を返す。
///
/// `opcode`自体は読み進められているものとする。
/// パラメータの途中で符号列が終わった場合は残りをすべて読み飛ばす。
pub fn skip(opcode: u8, cursor: &mut Cursor) -> usize {
    match opcode {
        // PAPF
        0x16 => cursor.skip(1),
        // APS
        0x1C => cursor.skip(2),

        // SZX | FLC | POL | WMM | HLC | RPC
        0x8B | 0x91 | 0x93 | 0x94 | 0x97 | 0x98 => cursor.skip(1),

        // COL | CDC
        0x90 | 0x92 => match cursor.read_byte() {
            Some(0x20) => 1 + cursor.skip(1),
            Some(_) => 1,
            None => 0,
        },

        // TIME
        0x9D => match cursor.read_byte() {
            Some(0x20 | 0x28) => 1 + cursor.skip(1),
            Some(0x29) => 1 + skip_through(cursor, |b| matches!(b, 0x40..=0x42)),
            Some(_) => 1,
            None => 0,
        },

        // MACRO
        0x95 => {
            let bytes = cursor.as_bytes();
            match memchr::memchr(0x95, bytes) {
                Some(pos) => cursor.skip(pos + 2),
                None => cursor.skip_to_end(),
            }
        }

        // CSI
        0x9B => skip_through(cursor, |b| matches!(b, 0x40..=0x6F)),

        _ => {
            log::trace!("control code without parameters: {:02X}", opcode);
            0
        }
    }
}

/// `is_final`を満たすバイトまで（そのバイトを含めて）読み飛ばす。
fn skip_through(cursor: &mut Cursor, is_final: impl Fn(u8) -> bool) -> usize {
    let bytes = cursor.as_bytes();
    match bytes.iter().position(|&b| is_final(b)) {
        Some(pos) => cursor.skip(pos + 1),
        None => cursor.skip_to_end(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn skipped(opcode: u8, params: &[u8]) -> (usize, &[u8]) {
        let mut cursor = Cursor::new(params);
        let n = skip(opcode, &mut cursor);
        assert_eq!(n, cursor.position());
        (n, cursor.as_bytes())
    }

    #[test]
    fn test_fixed_params() {
        assert_eq!(skipped(0x16, &hex!("41 42")), (1, &hex!("42")[..]));
        assert_eq!(skipped(0x1C, &hex!("41 42 43")), (2, &hex!("43")[..]));
        for opcode in [0x8B, 0x91, 0x93, 0x94, 0x97, 0x98] {
            assert_eq!(skipped(opcode, &hex!("41 42")), (1, &hex!("42")[..]));
        }
    }

    #[test]
    fn test_no_params() {
        for opcode in [0x00, 0x07, 0x0C, 0x80, 0x89, 0x8A, 0x99] {
            assert_eq!(skipped(opcode, &hex!("41")), (0, &hex!("41")[..]));
        }
    }

    #[test]
    fn test_color() {
        assert_eq!(skipped(0x90, &hex!("48 41")), (1, &hex!("41")[..]));
        assert_eq!(skipped(0x90, &hex!("20 48 41")), (2, &hex!("41")[..]));
        assert_eq!(skipped(0x92, &hex!("20 40 41")), (2, &hex!("41")[..]));
        assert_eq!(skipped(0x90, &hex!("20")), (1, &[][..]));
        assert_eq!(skipped(0x90, &[]), (0, &[][..]));
    }

    #[test]
    fn test_time() {
        assert_eq!(skipped(0x9D, &hex!("20 4A 41")), (2, &hex!("41")[..]));
        assert_eq!(skipped(0x9D, &hex!("28 40 41")), (2, &hex!("41")[..]));
        assert_eq!(skipped(0x9D, &hex!("29 31 32 41 41")), (4, &hex!("41")[..]));
        assert_eq!(skipped(0x9D, &hex!("29 31 32")), (3, &[][..]));
        assert_eq!(skipped(0x9D, &hex!("30 41")), (1, &hex!("41")[..]));
    }

    #[test]
    fn test_macro() {
        assert_eq!(skipped(0x95, &hex!("40 1B 28 4A 95 4F 41")), (6, &hex!("41")[..]));
        assert_eq!(skipped(0x95, &hex!("40 95")), (2, &[][..]));
        assert_eq!(skipped(0x95, &hex!("40 41 42")), (3, &[][..]));
    }

    #[test]
    fn test_csi() {
        assert_eq!(skipped(0x9B, &hex!("31 3B 32 20 53 41")), (5, &hex!("41")[..]));
        assert_eq!(skipped(0x9B, &hex!("20 6F")), (2, &[][..]));
        assert_eq!(skipped(0x9B, &hex!("31 32")), (2, &[][..]));
    }
}
