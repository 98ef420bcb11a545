//! 8単位符号の図形文字を UTF-8 に変換するための静的な表。
//!
//! 表はすべて読み取り専用で、実行時に書き換えられることはない。
//! 漢字系の符号集合（JIS X 0208/0213）は[`crate::convert`]に委譲するためここには含まない。

use super::code::GraphicCode;

/// 囲み文字の追加記号を選ぶ。
///
/// `unicode-squared-cjk`が有効な場合はEnclosed Alphanumeric Supplement・
/// Enclosed Ideographic Supplementの文字を、無効な場合は括弧で囲んだ文字列を用いる。
#[cfg(not(feature = "unicode-squared-cjk"))]
macro_rules! squared {
    ($fallback:literal, $unicode:literal) => {
        $fallback
    };
}

#[cfg(feature = "unicode-squared-cjk")]
macro_rules! squared {
    ($fallback:literal, $unicode:literal) => {
        $unicode
    };
}

/// 英数集合の図形文字。`0x7E`はプロファイルにより別の文字に置き換えられる。
pub(super) static ALNUM: &[u8; 94] = b"!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

/// 平仮名集合。`0x74..=0x76`は未定義のため全角空白とする。
pub(super) static HIRA: [char; 94] = [
    'ぁ', 'あ', 'ぃ', 'い', 'ぅ', 'う', 'ぇ', 'え',
    'ぉ', 'お', 'か', 'が', 'き', 'ぎ', 'く', 'ぐ',
    'け', 'げ', 'こ', 'ご', 'さ', 'ざ', 'し', 'じ',
    'す', 'ず', 'せ', 'ぜ', 'そ', 'ぞ', 'た', 'だ',
    'ち', 'ぢ', 'っ', 'つ', 'づ', 'て', 'で', 'と',
    'ど', 'な', 'に', 'ぬ', 'ね', 'の', 'は', 'ば',
    'ぱ', 'ひ', 'び', 'ぴ', 'ふ', 'ぶ', 'ぷ', 'へ',
    'べ', 'ぺ', 'ほ', 'ぼ', 'ぽ', 'ま', 'み', 'む',
    'め', 'も', 'ゃ', 'や', 'ゅ', 'ゆ', 'ょ', 'よ',
    'ら', 'り', 'る', 'れ', 'ろ', 'ゎ', 'わ', 'ゐ',
    'ゑ', 'を', 'ん', '　', '　', '　', 'ゝ', 'ゞ',
    'ー', '。', '「', '」', '、', '・',
];

/// 片仮名集合。
pub(super) static KATA: [char; 94] = [
    'ァ', 'ア', 'ィ', 'イ', 'ゥ', 'ウ', 'ェ', 'エ',
    'ォ', 'オ', 'カ', 'ガ', 'キ', 'ギ', 'ク', 'グ',
    'ケ', 'ゲ', 'コ', 'ゴ', 'サ', 'ザ', 'シ', 'ジ',
    'ス', 'ズ', 'セ', 'ゼ', 'ソ', 'ゾ', 'タ', 'ダ',
    'チ', 'ヂ', 'ッ', 'ツ', 'ヅ', 'テ', 'デ', 'ト',
    'ド', 'ナ', 'ニ', 'ヌ', 'ネ', 'ノ', 'ハ', 'バ',
    'パ', 'ヒ', 'ビ', 'ピ', 'フ', 'ブ', 'プ', 'ヘ',
    'ベ', 'ペ', 'ホ', 'ボ', 'ポ', 'マ', 'ミ', 'ム',
    'メ', 'モ', 'ャ', 'ヤ', 'ュ', 'ユ', 'ョ', 'ヨ',
    'ラ', 'リ', 'ル', 'レ', 'ロ', 'ヮ', 'ワ', 'ヰ',
    'ヱ', 'ヲ', 'ン', 'ヴ', 'ヵ', 'ヶ', 'ヽ', 'ヾ',
    'ー', '。', '「', '」', '、', '・',
];

/// JIS X 0201 片仮名集合（半角片仮名）。
pub(super) static JIS_X_KATA: [char; 63] = [
    '｡', '｢', '｣', '､', '･', 'ｦ', 'ｧ', 'ｨ',
    'ｩ', 'ｪ', 'ｫ', 'ｬ', 'ｭ', 'ｮ', 'ｯ', 'ｰ',
    'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ',
    'ｹ', 'ｺ', 'ｻ', 'ｼ', 'ｽ', 'ｾ', 'ｿ', 'ﾀ',
    'ﾁ', 'ﾂ', 'ﾃ', 'ﾄ', 'ﾅ', 'ﾆ', 'ﾇ', 'ﾈ',
    'ﾉ', 'ﾊ', 'ﾋ', 'ﾌ', 'ﾍ', 'ﾎ', 'ﾏ', 'ﾐ',
    'ﾑ', 'ﾒ', 'ﾓ', 'ﾔ', 'ﾕ', 'ﾖ', 'ﾗ', 'ﾘ',
    'ﾙ', 'ﾚ', 'ﾛ', 'ﾜ', 'ﾝ', 'ﾞ', 'ﾟ',
];

/// 追加記号（90区～94区）。
pub(super) static EXTRA_SYMBOLS_90: [[Option<&str>; 94]; 5] = [
    // 90区
    [
        Some("⛌"), Some("⛍"), Some("❗"), Some("⛏"), Some("⛐"), Some("⛑"),
        None, Some("⛒"), Some("⛕"), Some("⛓"), Some("⛔"), None,
        None, None, None, Some("\u{1F17F}"), Some("\u{1F18A}"), None,
        None, Some("⛖"), Some("⛗"), Some("⛘"), Some("⛙"), Some("⛚"),
        Some("⛛"), Some("⛜"), Some("⛝"), Some("⛞"), Some("⛟"), Some("⛠"),
        Some("⛡"), Some("⭕"), Some("㉈"), Some("㉉"), Some("㉊"), Some("㉋"),
        Some("㉌"), Some("㉍"), Some("㉎"), Some("㉏"), None, None,
        None, None, Some("⒑"), Some("⒒"), Some("⒓"),
        Some(squared!("[HV]", "\u{1F14A}")),
        Some(squared!("[SD]", "\u{1F14C}")),
        Some(squared!("[P]", "\u{1F13F}")),
        Some(squared!("[W]", "\u{1F146}")),
        Some(squared!("[MV]", "\u{1F14B}")),
        Some(squared!("[手]", "\u{1F210}")),
        Some(squared!("[字]", "\u{1F211}")),
        Some(squared!("[双]", "\u{1F212}")),
        Some(squared!("[デ]", "\u{1F213}")),
        Some(squared!("[S]", "\u{1F142}")),
        Some(squared!("[二]", "\u{1F214}")),
        Some(squared!("[多]", "\u{1F215}")),
        Some(squared!("[解]", "\u{1F216}")),
        Some(squared!("[SS]", "\u{1F14D}")),
        Some(squared!("[B]", "\u{1F131}")),
        Some(squared!("[N]", "\u{1F13D}")),
        Some("⬛"), Some("⬤"),
        Some(squared!("[天]", "\u{1F217}")),
        Some(squared!("[交]", "\u{1F218}")),
        Some(squared!("[映]", "\u{1F219}")),
        Some(squared!("[無]", "\u{1F21A}")),
        Some(squared!("[料]", "\u{1F21B}")),
        Some("⚿"),
        Some(squared!("[前]", "\u{1F21C}")),
        Some(squared!("[後]", "\u{1F21D}")),
        Some(squared!("[再]", "\u{1F21E}")),
        Some(squared!("[新]", "\u{1F21F}")),
        Some(squared!("[初]", "\u{1F220}")),
        Some(squared!("[終]", "\u{1F221}")),
        Some(squared!("[生]", "\u{1F222}")),
        Some(squared!("[販]", "\u{1F223}")),
        Some(squared!("[声]", "\u{1F224}")),
        Some(squared!("[吹]", "\u{1F225}")),
        Some(squared!("[PPV]", "\u{1F14E}")),
        Some("㊙"),
        Some(squared!("ほか", "\u{1F200}")),
        None, None, None, None, None, None,
        None, None, None, None,
    ],
    // 91区
    [
        Some("⛣"), Some("⭖"), Some("⭗"), Some("⭘"), Some("⭙"), Some("☓"),
        Some("㊋"), Some("〒"), Some("⛨"), Some("㉆"), Some("㉅"), Some("⛩"),
        Some("卍"), Some("⛪"), Some("⛫"), Some("⛬"), Some("♨"), Some("⛭"),
        Some("⛮"), Some("⛯"), Some("⚓"), Some("✈"), Some("⛰"), Some("⛱"),
        Some("⛲"), Some("⛳"), Some("⛴"), Some("⛵"), Some("\u{1F157}"), Some("Ⓓ"),
        Some("Ⓢ"), Some("⛶"), Some("\u{1F15F}"), Some("\u{1F18B}"), Some("\u{1F18D}"), Some("\u{1F18C}"),
        Some("\u{1F179}"), Some("⛷"), Some("⛸"), Some("⛹"), Some("⛺"), Some("\u{1F17B}"),
        Some("☎"), Some("⛻"), Some("⛼"), Some("⛽"), Some("⛾"), Some("\u{1F17C}"),
        Some("⛿"), None, None, None, None, None,
        None, None, None, None, None, None,
        None, None, None, None, None, None,
        None, None, None, None, None, None,
        None, None, None, None, None, None,
        None, None, None, None, None, None,
        None, None, None, None, None, None,
        None, None, None, None,
    ],
    // 92区
    [
        Some("➡"), Some("⬅"), Some("⬆"), Some("⬇"), Some("⬯"), Some("⬮"),
        Some("年"), Some("月"), Some("日"), Some("円"), Some("㎡"), Some("㎥"),
        Some("㎝"), Some("㎠"), Some("㎤"),
        Some(squared!("0.", "\u{1F100}")),
        Some("⒈"), Some("⒉"), Some("⒊"), Some("⒋"), Some("⒌"), Some("⒍"),
        Some("⒎"), Some("⒏"), Some("⒐"), Some("\u{E290}"), Some("\u{E291}"), Some("\u{E292}"),
        Some("\u{E293}"), Some("\u{E294}"), Some("\u{E295}"),
        Some(squared!("0,", "\u{1F101}")),
        Some(squared!("1,", "\u{1F102}")),
        Some(squared!("2,", "\u{1F103}")),
        Some(squared!("3,", "\u{1F104}")),
        Some(squared!("4,", "\u{1F105}")),
        Some(squared!("5,", "\u{1F106}")),
        Some(squared!("6,", "\u{1F107}")),
        Some(squared!("7,", "\u{1F108}")),
        Some(squared!("8,", "\u{1F109}")),
        Some(squared!("9,", "\u{1F10A}")),
        Some("㈳"), Some("㈶"), Some("㈲"), Some("㈱"), Some("㈹"), Some("㉄"),
        Some("▶"), Some("◀"), Some("〖"), Some("〗"), Some("⟐"), Some("²"),
        Some("³"), Some("\u{1F12D}"), Some("\u{E2A5}"), Some("\u{E2A6}"), Some("\u{E2A7}"), Some("\u{E2A8}"),
        Some("\u{E2A9}"), Some("\u{E2AA}"), Some("\u{E2AB}"), Some("\u{E2AC}"), Some("\u{E2AD}"), Some("\u{E2AE}"),
        Some("\u{E2AF}"), Some("\u{E2B0}"), Some("\u{E2B1}"), Some("\u{E2B2}"), Some("\u{E2B3}"), Some("\u{E2B4}"),
        Some("\u{E2B5}"), Some("\u{E2B6}"), Some("\u{E2B7}"), Some("\u{E2B8}"), Some("\u{E2B9}"), Some("\u{E2BA}"),
        Some("\u{E2BB}"), Some("\u{E2BC}"), Some("\u{E2BD}"), Some("\u{E2BE}"), Some("\u{E2BF}"), Some("\u{E2C0}"),
        Some("\u{E2C1}"), Some("\u{E2C2}"), Some("\u{1F12C}"), Some("\u{1F12B}"), Some("㉇"),
        Some(squared!("DJ", "\u{1F190}")),
        Some(squared!("[演]", "\u{1F226}")),
        Some("℻"), None, None, None,
    ],
    // 93区
    [
        Some("㈪"), Some("㈫"), Some("㈬"), Some("㈭"), Some("㈮"), Some("㈯"),
        Some("㈰"), Some("㈷"), Some("㍾"), Some("㍽"), Some("㍼"), Some("㍻"),
        Some("№"), Some("℡"), Some("〶"), Some("⚾"),
        Some(squared!("[本]", "\u{1F240}")),
        Some(squared!("[三]", "\u{1F241}")),
        Some(squared!("[二]", "\u{1F242}")),
        Some(squared!("[安]", "\u{1F243}")),
        Some(squared!("[点]", "\u{1F244}")),
        Some(squared!("[打]", "\u{1F245}")),
        Some(squared!("[盗]", "\u{1F246}")),
        Some(squared!("[勝]", "\u{1F247}")),
        Some(squared!("[敗]", "\u{1F248}")),
        Some(squared!("[S]", "\u{1F12A}")),
        Some(squared!("[投]", "\u{1F227}")),
        Some(squared!("[捕]", "\u{1F228}")),
        Some(squared!("[一]", "\u{1F229}")),
        Some(squared!("[二]", "\u{1F214}")),
        Some(squared!("[三]", "\u{1F22A}")),
        Some(squared!("[遊]", "\u{1F22B}")),
        Some(squared!("[左]", "\u{1F22C}")),
        Some(squared!("[中]", "\u{1F22D}")),
        Some(squared!("[右]", "\u{1F22E}")),
        Some(squared!("[指]", "\u{1F22F}")),
        Some(squared!("[走]", "\u{1F230}")),
        Some(squared!("[打]", "\u{1F231}")),
        Some("ℓ"), Some("㎏"), Some("㎐"), Some("㏊"), Some("㎞"), Some("㎢"),
        Some("㍱"), None, None, Some("½"), Some("↉"), Some("⅓"),
        Some("⅔"), Some("¼"), Some("¾"), Some("⅕"), Some("⅖"), Some("⅗"),
        Some("⅘"), Some("⅙"), Some("⅚"), Some("⅐"), Some("⅛"), Some("⅑"),
        Some("⅒"), Some("☀"), Some("☁"), Some("☂"), Some("⛄"), Some("☖"),
        Some("☗"), Some("⛉"), Some("⛊"), Some("♦"), Some("♥"), Some("♣"),
        Some("♠"), Some("⛋"), Some("☉"), Some("‼"), Some("⁉"), Some("⛅"),
        Some("☔"), Some("⛆"), Some("☃"), Some("⛇"), Some("☇"), Some("⛈"),
        None, Some("⚞"), Some("⚟"), Some("♬"), Some("☎"), None,
        None, None,
    ],
    // 94区
    [
        Some("Ⅰ"), Some("Ⅱ"), Some("Ⅲ"), Some("Ⅳ"), Some("Ⅴ"), Some("Ⅵ"),
        Some("Ⅶ"), Some("Ⅷ"), Some("Ⅸ"), Some("Ⅹ"), Some("Ⅺ"), Some("Ⅻ"),
        Some("⑰"), Some("⑱"), Some("⑲"), Some("⑳"), Some("⑴"), Some("⑵"),
        Some("⑶"), Some("⑷"), Some("⑸"), Some("⑹"), Some("⑺"), Some("⑻"),
        Some("⑼"), Some("⑽"), Some("⑾"), Some("⑿"), Some("㉑"), Some("㉒"),
        Some("㉓"), Some("㉔"),
        Some(squared!("(A)", "\u{1F110}")),
        Some(squared!("(B)", "\u{1F111}")),
        Some(squared!("(C)", "\u{1F112}")),
        Some(squared!("(D)", "\u{1F113}")),
        Some(squared!("(E)", "\u{1F114}")),
        Some(squared!("(F)", "\u{1F115}")),
        Some(squared!("(G)", "\u{1F116}")),
        Some(squared!("(H)", "\u{1F117}")),
        Some(squared!("(I)", "\u{1F118}")),
        Some(squared!("(J)", "\u{1F119}")),
        Some(squared!("(K)", "\u{1F11A}")),
        Some(squared!("(L)", "\u{1F11B}")),
        Some(squared!("(M)", "\u{1F11C}")),
        Some(squared!("(N)", "\u{1F11D}")),
        Some(squared!("(O)", "\u{1F11E}")),
        Some(squared!("(P)", "\u{1F11F}")),
        Some(squared!("(Q)", "\u{1F120}")),
        Some(squared!("(R)", "\u{1F121}")),
        Some(squared!("(S)", "\u{1F122}")),
        Some(squared!("(T)", "\u{1F123}")),
        Some(squared!("(U)", "\u{1F124}")),
        Some(squared!("(V)", "\u{1F125}")),
        Some(squared!("(W)", "\u{1F126}")),
        Some(squared!("(X)", "\u{1F127}")),
        Some(squared!("(Y)", "\u{1F128}")),
        Some(squared!("(Z)", "\u{1F129}")),
        Some("㉕"), Some("㉖"), Some("㉗"), Some("㉘"), Some("㉙"), Some("㉚"),
        Some("①"), Some("②"), Some("③"), Some("④"), Some("⑤"), Some("⑥"),
        Some("⑦"), Some("⑧"), Some("⑨"), Some("⑩"), Some("⑪"), Some("⑫"),
        Some("⑬"), Some("⑭"), Some("⑮"), Some("⑯"), Some("❶"), Some("❷"),
        Some("❸"), Some("❹"), Some("❺"), Some("❻"), Some("❼"), Some("❽"),
        Some("❾"), Some("❿"), Some("⓫"), Some("⓬"), Some("㉛"), None,
    ],
];

/// 追加漢字（85区～86区）。
pub(super) static EXTRA_KANJI_85: [[Option<&str>; 94]; 2] = [
    // 85区
    [
        Some("㐂"), Some("\u{20158}"), Some("份"), Some("仿"), Some("侚"), Some("俉"),
        Some("傜"), Some("儞"), Some("冼"), Some("㔟"), Some("匇"), Some("卡"),
        Some("卬"), Some("詹"), Some("\u{20BB7}"), Some("呍"), Some("咖"), Some("咜"),
        Some("咩"), Some("唎"), Some("啊"), Some("噲"), Some("囤"), Some("圳"),
        Some("圴"), Some("塚"), Some("墀"), Some("姤"), Some("娣"), Some("婕"),
        Some("寬"), Some("﨑"), Some("㟢"), Some("庬"), Some("弴"), Some("彅"),
        Some("德"), Some("怗"), Some("恵"), Some("愰"), Some("昤"), Some("曈"),
        Some("曙"), Some("曺"), Some("曻"), Some("桒"), Some("鿄"), Some("椑"),
        Some("椻"), Some("橅"), Some("檑"), Some("櫛"), Some("\u{233CC}"), Some("\u{233FE}"),
        Some("\u{235C4}"), Some("毱"), Some("泠"), Some("洮"), Some("海"), Some("涿"),
        Some("淊"), Some("淸"), Some("渚"), Some("潞"), Some("濹"), Some("灤"),
        Some("𤋮"), Some("\u{242EE}"), Some("煇"), Some("燁"), Some("爀"), Some("玟"),
        Some("玨"), Some("珉"), Some("珖"), Some("琛"), Some("琡"), Some("琢"),
        Some("琦"), Some("琪"), Some("琬"), Some("琹"), Some("瑋"), Some("㻚"),
        Some("畵"), Some("疁"), Some("睲"), Some("䂓"), Some("磈"), Some("磠"),
        Some("祇"), Some("禮"), Some("鿆"), Some("䄃"),
    ],
    // 86区
    [
        Some("鿅"), Some("秚"), Some("稞"), Some("筿"), Some("簱"), Some("䉤"),
        Some("綋"), Some("羡"), Some("脘"), Some("脺"), Some("舘"), Some("芮"),
        Some("葛"), Some("蓜"), Some("蓬"), Some("蕙"), Some("藎"), Some("蝕"),
        Some("蟬"), Some("蠋"), Some("裵"), Some("角"), Some("諶"), Some("跎"),
        Some("辻"), Some("迶"), Some("郝"), Some("鄧"), Some("鄭"), Some("醲"),
        Some("鈳"), Some("銈"), Some("錡"), Some("鍈"), Some("閒"), Some("雞"),
        Some("餃"), Some("饀"), Some("髙"), Some("鯖"), Some("鷗"), Some("麴"),
        Some("麵"), None, None, None, None, None,
        None, None, None, None, None, None,
        None, None, None, None, None, None,
        None, None, None, None, None, None,
        None, None, None, None, None, None,
        None, None, None, None, None, None,
        None, None, None, None, None, None,
        None, None, None, None, None, None,
        None, None, None, None,
    ],
];

/// ABNT NBR 15606-1のラテン拡張集合。
pub(super) static LATIN_EXTENSION: [&str; 94] = [
    "¡", "¢", "£", "€", "¥", "Š", "§", "š",
    "©", "ª", "«", "¬", "­", "®", "¯", "°",
    "±", "²", "³", "Ž", "µ", "¶", "·", "ž",
    "¹", "º", "»", "Œ", "œ", "Ÿ", "¿", "À",
    "Á", "Â", "Ã", "Ä", "Å", "Æ", "Ç", "È",
    "É", "Ê", "Ë", "Ì", "Í", "Î", "Ï", "Ð",
    "Ñ", "Ò", "Ó", "Ô", "Õ", "Ö", "×", "Ø",
    "Ù", "Ú", "Û", "Ü", "Ý", "Þ", "ß", "à",
    "á", "â", "ã", "ä", "å", "æ", "ç", "è",
    "é", "ê", "ë", "ì", "í", "î", "ï", "ð",
    "ñ", "ò", "ó", "ô", "õ", "ö", "÷", "ø",
    "ù", "ú", "û", "ü", "ý", "þ",
];

/// ABNT NBR 15606-1の特殊文字集合（`0x21`）。
pub(super) static SPECIAL_1: [&str; 1] = [
    "♪",
];

/// ABNT NBR 15606-1の特殊文字集合（`0x30..=0x37`）。
pub(super) static SPECIAL_2: [&str; 8] = [
    "¤", "¦", "¨", "´", "¸", "¼", "½", "¾",
];

/// ABNT NBR 15606-1の特殊文字集合（`0x40..=0x4B`）。
pub(super) static SPECIAL_3: [&str; 12] = [
    "…", "▮", "‘", "’", "“", "”", "•", "™",
    "⅛", "⅜", "⅝", "⅞",
];

/// 英数集合の文字を得る。
#[inline]
pub(super) fn alnum(c: GraphicCode) -> Option<u8> {
    ALNUM.get(c.index()).copied()
}

/// 平仮名集合の文字を得る。
#[inline]
pub(super) fn hira(c: GraphicCode) -> Option<char> {
    HIRA.get(c.index()).copied()
}

/// 片仮名集合の文字を得る。
#[inline]
pub(super) fn kata(c: GraphicCode) -> Option<char> {
    KATA.get(c.index()).copied()
}

/// JIS X 0201 片仮名集合の文字を得る。`0x60`以降は未定義。
#[inline]
pub(super) fn jis_x_kata(c: GraphicCode) -> Option<char> {
    JIS_X_KATA.get(c.index()).copied()
}

/// 追加記号・追加漢字を区点から得る。
///
/// 90区の45～63点と66～84点はARIB STD-B3の運用により常に未定義として扱う。
pub(super) fn extra_symbol(row: u8, cell: u8) -> Option<&'static str> {
    let index = usize::from(cell).checked_sub(1)?;
    let table: &[[Option<&str>; 94]] = match row {
        90 if matches!(cell, 45..=63 | 66..=84) => return None,
        90..=94 => &EXTRA_SYMBOLS_90[usize::from(row - 90)..],
        85..=86 => &EXTRA_KANJI_85[usize::from(row - 85)..],
        _ => return None,
    };
    table.first()?.get(index).copied().flatten()
}

/// ラテン拡張集合の文字を得る。
#[inline]
pub(super) fn latin_extension(c: GraphicCode) -> Option<&'static str> {
    LATIN_EXTENSION.get(c.index()).copied()
}

/// 特殊文字集合の文字を得る。
pub(super) fn special(c: GraphicCode) -> Option<&'static str> {
    match c.get() {
        0x21 => SPECIAL_1.first().copied(),
        b @ 0x30..=0x37 => SPECIAL_2.get(usize::from(b - 0x30)).copied(),
        b @ 0x40..=0x4B => SPECIAL_3.get(usize::from(b - 0x40)).copied(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(b: u8) -> GraphicCode {
        GraphicCode::new(b).unwrap()
    }

    #[test]
    fn test_single_byte_tables() {
        assert_eq!(alnum(code(0x21)), Some(b'!'));
        assert_eq!(alnum(code(0x5C)), Some(b'\\'));
        assert_eq!(alnum(code(0x7E)), Some(b'~'));

        assert_eq!(hira(code(0x21)), Some('ぁ'));
        assert_eq!(hira(code(0x7E)), Some('・'));
        assert_eq!(kata(code(0x22)), Some('ア'));
        assert_eq!(kata(code(0x74)), Some('ヴ'));

        assert_eq!(jis_x_kata(code(0x21)), Some('｡'));
        assert_eq!(jis_x_kata(code(0x5F)), Some('ﾟ'));
        assert_eq!(jis_x_kata(code(0x60)), None);
        assert_eq!(jis_x_kata(code(0x7E)), None);
    }

    #[test]
    fn test_extra_symbol() {
        assert_eq!(extra_symbol(90, 1), Some("\u{26CC}"));
        assert_eq!(extra_symbol(90, 7), None);
        assert_eq!(extra_symbol(90, 64), Some("\u{2B1B}"));
        assert_eq!(extra_symbol(94, 93), Some("\u{325B}"));
        assert_eq!(extra_symbol(94, 94), None);
        assert_eq!(extra_symbol(85, 1), Some("\u{3402}"));
        assert_eq!(extra_symbol(86, 94), None);

        // 範囲外の区点
        assert_eq!(extra_symbol(90, 0), None);
        assert_eq!(extra_symbol(90, 95), None);
        assert_eq!(extra_symbol(84, 1), None);
        assert_eq!(extra_symbol(87, 1), None);
        assert_eq!(extra_symbol(95, 1), None);
    }

    #[test]
    #[cfg(not(feature = "unicode-squared-cjk"))]
    fn test_squared_fallback() {
        assert_eq!(extra_symbol(92, 16), Some("0."));
        assert_eq!(extra_symbol(90, 84), None);
        assert_eq!(extra_symbol(93, 17), Some("[本]"));
        assert_eq!(EXTRA_SYMBOLS_90[0][47], Some("[HV]"));
    }

    #[test]
    #[cfg(feature = "unicode-squared-cjk")]
    fn test_squared_unicode() {
        assert_eq!(extra_symbol(92, 16), Some("\u{1F100}"));
        assert_eq!(extra_symbol(90, 84), None);
        assert_eq!(extra_symbol(93, 17), Some("\u{1F240}"));
        assert_eq!(EXTRA_SYMBOLS_90[0][47], Some("\u{1F14A}"));
    }

    #[test]
    fn test_extra_symbol_b3_restriction() {
        for cell in (45..=63).chain(66..=84) {
            assert_eq!(extra_symbol(90, cell), None, "cell {}", cell);
        }
        assert!(extra_symbol(90, 44).is_none());
        assert!(extra_symbol(90, 65).is_some());
        assert!(extra_symbol(91, 45).is_some());
    }

    #[test]
    fn test_abnt_tables() {
        assert_eq!(latin_extension(code(0x21)), Some("¡"));
        assert_eq!(latin_extension(code(0x24)), Some("€"));
        assert_eq!(latin_extension(code(0x7E)), Some("þ"));

        assert_eq!(special(code(0x21)), Some("♪"));
        assert_eq!(special(code(0x30)), Some("¤"));
        assert_eq!(special(code(0x37)), Some("¾"));
        assert_eq!(special(code(0x40)), Some("…"));
        assert_eq!(special(code(0x4B)), Some("⅞"));
        assert_eq!(special(code(0x22)), None);
        assert_eq!(special(code(0x38)), None);
        assert_eq!(special(code(0x4C)), None);
    }
}
