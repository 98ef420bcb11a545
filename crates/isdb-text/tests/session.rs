use assert_matches::assert_matches;
use hex_literal::hex;

use isdb_text::eight::cursor::Cursor;
use isdb_text::eight::select::{SelectionState, Step};
use isdb_text::{Decoded, Designator, GraphicSet, Options, Profile, Session, Status};

fn open(profile: Profile) -> Session {
    let _ = env_logger::builder().is_test(true).try_init();
    Session::open(profile).unwrap()
}

fn decode(session: &mut Session, src: &[u8]) -> Vec<u8> {
    let mut buf = vec![0; src.len() * 8 + 16];
    let decoded = session.decode(src, &mut buf);
    assert_eq!(decoded.status, Status::Complete);
    buf.truncate(decoded.written);
    buf
}

/// 再現可能な疑似乱数列。
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }

    fn bytes(&mut self, len: usize) -> Vec<u8> {
        // 制御符号が多すぎると何も出力されないため、図形文字を多めに混ぜる
        const CONTROLS: &[u8] = &[
            0x0A, 0x0E, 0x0F, 0x19, 0x1B, 0x1D, 0x20, 0x24, 0x28, 0x29, 0x2A, 0x2B, 0x90, 0x9B,
            0x9D,
        ];
        (0..len)
            .map(|_| match self.below(4) {
                0 => CONTROLS[self.below(CONTROLS.len())],
                1 => self.next() as u8,
                2 => 0x21 + self.below(94) as u8,
                _ => 0xA1 + self.below(94) as u8,
            })
            .collect()
    }
}

#[test]
fn test_default_state() {
    let state = SelectionState::new(&Profile::Arib.options());
    assert_eq!(state.gl, Designator::G0);
    assert_eq!(state.gr, Designator::G2);
    assert_eq!(state.get(Designator::G0), GraphicSet::Kanji);
    assert_eq!(state.get(Designator::G1), GraphicSet::Alnum);
    assert_eq!(state.get(Designator::G2), GraphicSet::Hira);
    assert_eq!(state.get(Designator::G3), GraphicSet::Kata);
    assert_eq!(state.single_shift, None);

    let state = SelectionState::new(&Profile::Abnt.options());
    assert_eq!(state.gl, Designator::G0);
    assert_eq!(state.gr, Designator::G1);
    assert_eq!(state.get(Designator::G0), GraphicSet::Alnum);
    assert_eq!(state.get(Designator::G1), GraphicSet::LatinExtension);
}

#[test]
fn test_deterministic() {
    let mut rng = XorShift(0x2545_F491_4F6C_DD1D);
    for _ in 0..64 {
        let n = rng.below(256);
        let src = rng.bytes(n);
        let mut a = open(Profile::Arib);
        let mut b = open(Profile::Arib);
        assert_eq!(decode(&mut a, &src), decode(&mut b, &src));
        assert_eq!(a.decode_to_string(&src), b.decode_to_string(&src));
    }
}

#[test]
fn test_ascii_round_trip() {
    let mut session = open(Profile::Arib);
    let ascii: Vec<u8> = (0x21..0x7E).collect();

    let mut src = vec![0x0E];
    src.extend_from_slice(&ascii);
    assert_eq!(decode(&mut session, &src), ascii);

    let mut session = open(Profile::Abnt);
    assert_eq!(decode(&mut session, &ascii), ascii);
}

#[test]
fn test_overline() {
    let mut session = open(Profile::Arib);
    assert_eq!(decode(&mut session, &hex!("0E 7E")), hex!("E2 80 BE"));
    assert_eq!(decode(&mut session, &hex!("0E 41 7E 42")), hex!("41 E2 80 BE 42"));

    // プロポーショナル英数も同様
    assert_eq!(decode(&mut session, &hex!("1B 28 36 7E")), hex!("E2 80 BE"));
}

#[test]
fn test_lone_trailing_escape() {
    let mut session = open(Profile::Arib);
    let mut buf = [0; 16];
    assert_eq!(
        session.decode(&hex!("0E 41 42 1B"), &mut buf),
        Decoded {
            written: 2,
            status: Status::Complete,
            skipped_runs: 0,
        }
    );
    assert_eq!(&buf[..2], b"AB");

    assert_matches!(
        session.decode(&hex!("1B"), &mut buf),
        Decoded {
            written: 0,
            status: Status::Complete,
            ..
        }
    );
}

#[test]
fn test_truncation_prefix() {
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
    let mut session = open(Profile::Arib);

    for _ in 0..256 {
        let n = 1 + rng.below(128);
        let src = rng.bytes(n);
        let full = decode(&mut session, &src);
        assert_eq!(session.decode_to_string(&src).as_bytes(), full);

        let capacity = rng.below(full.len() + 1);
        let mut buf = vec![0xFF; capacity + 8];
        let decoded = session.decode(&src, &mut buf[..capacity]);

        assert!(decoded.written <= capacity);
        assert_eq!(&buf[..decoded.written], &full[..decoded.written]);
        assert!(std::str::from_utf8(&buf[..decoded.written]).is_ok());
        assert!(buf[capacity..].iter().all(|&b| b == 0xFF));
        if capacity < full.len() {
            assert_eq!(decoded.status, Status::Truncated);
        } else {
            assert_eq!(decoded.status, Status::Complete);
            assert_eq!(decoded.written, full.len());
        }
    }
}

#[test]
fn test_unmapped_extra_symbols() {
    let mut session = open(Profile::Arib);
    let replacement = "\u{FFFD}".as_bytes();

    // 漢字集合の90区7点
    assert_eq!(decode(&mut session, &hex!("7A 27")), replacement);
    assert_eq!(
        decode(&mut session, &hex!("34 41 7A 27 34 41")),
        "漢\u{FFFD}漢".as_bytes()
    );
    // 追加記号集合の90区7点
    assert_eq!(decode(&mut session, &hex!("1B 24 3B 7A 27")), replacement);
    // 90区の運用上未定義の範囲
    for cell in (45..=63).chain(66..=84) {
        assert_eq!(decode(&mut session, &[0x7A, 0x20 + cell]), replacement);
    }
}

#[test]
fn test_idempotent_reselection() {
    let once = hex!("1B 29 31");
    let twice = hex!("1B 29 31 1B 29 31");

    let opts = Options::ARIB;
    let mut a = SelectionState::new(&opts);
    let mut cursor = Cursor::new(&once);
    assert_eq!(a.try_consume(&mut cursor), Step::Consumed(3));

    let mut b = SelectionState::new(&opts);
    let mut cursor = Cursor::new(&twice);
    assert_eq!(b.try_consume(&mut cursor), Step::Consumed(3));
    assert_eq!(b, a);
    assert_eq!(b.try_consume(&mut cursor), Step::Consumed(3));
    assert_eq!(b, a);
    assert_eq!(b.try_consume(&mut cursor), Step::EndOfInput);

    let mut session = open(Profile::Arib);
    assert_eq!(
        decode(&mut session, &hex!("1B 29 31 0E 22 24")),
        decode(&mut session, &hex!("1B 29 31 1B 29 31 0E 22 24")),
    );
    assert_eq!(
        decode(&mut session, &hex!("1B 24 29 42 0E 34 41")),
        decode(&mut session, &hex!("1B 24 29 42 1B 24 29 42 0E 34 41")),
    );
}

#[test]
fn test_kanji() {
    let mut session = open(Profile::Arib);
    assert_eq!(decode(&mut session, &hex!("34 41 3B 7A")), "漢字".as_bytes());

    // GRに漢字を呼び出す
    assert_eq!(
        decode(&mut session, &hex!("1B 7E 1B 24 29 42 B4 C1 BB FA")),
        "漢字".as_bytes()
    );

    // 長い漢字の並び
    let src: Vec<u8> = hex!("34 41 3B 7A").repeat(1500);
    assert_eq!(decode(&mut session, &src), "漢字".repeat(1500).as_bytes());
}

#[test]
fn test_jis_kanji_planes() {
    let mut session = open(Profile::Arib);
    // JIS X 0213第1面の89区1点
    assert_eq!(session.decode_to_string(&hex!("1B 24 39 79 21")), "硃");
    // 漢字集合の89区はJIS X 0208で未定義
    assert_eq!(session.decode_to_string(&hex!("34 41 79 21")), "漢\u{FFFD}");
    // JIS X 0213第2面の1区1点
    assert_eq!(session.decode_to_string(&hex!("1B 24 3A 21 21")), "\u{20089}");
}

#[test]
fn test_abnt() {
    let mut session = open(Profile::Abnt);
    assert_eq!(
        session.decode_to_string(b"Programa\xE7\xE3o"),
        "Programação"
    );
    assert_eq!(
        session.decode_to_string(&hex!("1B 2A 4C 19 21 20 1D 41")),
        "♪ "
    );
    assert_eq!(session.decode_to_string(&hex!("A4 41")), "€A");
}
