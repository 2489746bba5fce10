//! Per-character byte breakdown.

use super::label::Charset;
use super::text;
use encoding_rs::{REPLACEMENT, UTF_16BE, UTF_16LE};
use std::fmt;

/// Characters sampled from the start of the input.
pub const DEFAULT_SAMPLE_CHARS: usize = 50;
/// Characters listed before the report is cut off.
pub const DEFAULT_MAX_ENTRIES: usize = 15;

const FULL_WIDTH_SPACE: char = '\u{3000}';

/// One listed character and its bytes in the target charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterEntry {
    pub character: char,
    /// `None` when the character has no representation in the target.
    pub bytes: Option<Vec<u8>>,
}

impl CharacterEntry {
    pub fn is_encodable(&self) -> bool {
        self.bytes.is_some()
    }

    /// Bytes as upper-case hex octets, e.g. `D6 D0`.
    pub fn hex(&self) -> Option<String> {
        self.bytes.as_deref().map(to_hex)
    }
}

/// Byte breakdown of the leading characters of a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterEncodingReport {
    pub charset: Charset,
    pub entries: Vec<CharacterEntry>,
    /// More characters followed the last listed one.
    pub truncated: bool,
}

impl CharacterEncodingReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn unencodable_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_encodable()).count()
    }
}

impl fmt::Display for CharacterEncodingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for entry in &self.entries {
            if !first {
                f.write_str("\n")?;
            }
            first = false;
            match entry.hex() {
                Some(hex) => write!(f, "'{}' -> [{}]", entry.character, hex)?,
                None => write!(f, "'{}' -> [cannot encode as {}]", entry.character, self.charset)?,
            }
        }
        if self.truncated {
            if !first {
                f.write_str("\n")?;
            }
            f.write_str("... (more characters)")?;
        }
        Ok(())
    }
}

/// List the bytes of each visible character among the first `sample_chars`
/// characters of `text`, stopping after `max_entries`.
///
/// Whitespace is skipped except for the full-width space. Characters the
/// target cannot represent are recorded, not treated as failures.
pub fn describe_characters(
    text: &str,
    charset: Charset,
    sample_chars: usize,
    max_entries: usize,
) -> CharacterEncodingReport {
    let mut report = CharacterEncodingReport {
        charset,
        entries: Vec::new(),
        truncated: false,
    };

    if text::is_blank(text) {
        return report;
    }

    for ch in text.chars().take(sample_chars) {
        if report.entries.len() >= max_entries {
            report.truncated = true;
            break;
        }
        if text::is_blank_char(ch) && ch != FULL_WIDTH_SPACE {
            continue;
        }
        report.entries.push(CharacterEntry {
            character: ch,
            bytes: encode_char(ch, charset),
        });
    }

    report
}

/// Encode a single character, `None` if the charset cannot represent it.
///
/// A character only counts as encodable when its bytes decode back to the
/// same character; best-fit mappings such as `¥` to Shift_JIS `5C` are
/// rejected.
pub fn encode_char(ch: char, charset: Charset) -> Option<Vec<u8>> {
    let encoding = charset.encoding();

    // encoding_rs encodes UTF-16 and replacement output as UTF-8.
    if encoding == UTF_16LE || encoding == UTF_16BE {
        let mut units = [0u16; 2];
        let bytes = ch
            .encode_utf16(&mut units)
            .iter()
            .flat_map(|unit| {
                if encoding == UTF_16LE {
                    unit.to_le_bytes()
                } else {
                    unit.to_be_bytes()
                }
            })
            .collect();
        return Some(bytes);
    }
    if encoding == REPLACEMENT {
        return None;
    }

    if charset == Charset::Gb2312 {
        if let Some(&(_, code)) = GB2312_REMAPPED.iter().find(|(gb2312, _)| *gb2312 == ch) {
            return Some(code.to_vec());
        }
        if GB2312_REMAPPED.iter().any(|(_, code)| gbk_char(code) == Some(ch)) {
            return None;
        }
    }

    let mut buf = [0u8; 4];
    let (bytes, _, had_errors) = encoding.encode(ch.encode_utf8(&mut buf));
    if had_errors {
        return None;
    }
    if charset == Charset::Gb2312 && !is_gb2312(&bytes) {
        return None;
    }
    let (decoded, malformed) = encoding.decode_without_bom_handling(&bytes);
    if malformed || decoded.chars().ne(std::iter::once(ch)) {
        return None;
    }
    Some(bytes.into_owned())
}

/// Decode bytes produced by [`encode_char`] for `charset`.
pub fn decode_encoded(bytes: &[u8], charset: Charset) -> (String, bool) {
    let (decoded, had_errors) = charset.encoding().decode_without_bom_handling(bytes);
    if charset != Charset::Gb2312 {
        return (decoded.into_owned(), had_errors);
    }
    let text = decoded.chars().map(gb2312_from_gbk_char).collect();
    (text, had_errors)
}

/// GB2312 cells whose character differs from the GBK decoding of the same
/// bytes. GBK reads `A1 A4` as U+00B7 and `A1 AA` as U+2014.
const GB2312_REMAPPED: [(char, [u8; 2]); 2] = [
    ('\u{30FB}', [0xA1, 0xA4]),
    ('\u{2015}', [0xA1, 0xAA]),
];

fn gbk_char(code: &[u8; 2]) -> Option<char> {
    let (decoded, _) = encoding_rs::GBK.decode_without_bom_handling(code);
    decoded.chars().next()
}

/// Map a character decoded with the GBK tables onto its GB2312 meaning.
pub(crate) fn gb2312_from_gbk_char(ch: char) -> char {
    match ch {
        '\u{00B7}' => '\u{30FB}',
        '\u{2014}' => '\u{2015}',
        other => other,
    }
}

/// GBK output restricted to the cells GB2312 assigns.
fn is_gb2312(bytes: &[u8]) -> bool {
    match *bytes {
        [single] => single < 0x80,
        [lead, trail @ 0xA1..=0xFE] => match lead {
            0xA1 | 0xA3 => true,
            0xA2 => matches!(trail, 0xB1..=0xE2 | 0xE5..=0xEE | 0xF1..=0xFC),
            0xA4 => trail <= 0xF3,
            0xA5 => trail <= 0xF6,
            0xA6 => matches!(trail, 0xA1..=0xB8 | 0xC1..=0xD8),
            0xA7 => matches!(trail, 0xA1..=0xC1 | 0xD1..=0xF1),
            0xA8 => matches!(trail, 0xA1..=0xBA | 0xC5..=0xE9),
            0xA9 => matches!(trail, 0xA4..=0xEF),
            // Level 2 hanzi end at D7 F9
            0xD7 => trail <= 0xF9,
            0xB0..=0xF7 => true,
            _ => false,
        },
        _ => false,
    }
}

pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn describe(text: &str, charset: Charset) -> CharacterEncodingReport {
        describe_characters(text, charset, DEFAULT_SAMPLE_CHARS, DEFAULT_MAX_ENTRIES)
    }

    #[test]
    fn test_chinese_in_gbk() {
        let report = describe("中文", Charset::Gbk);
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].hex().as_deref(), Some("D6 D0"));
        assert_eq!(report.entries[1].hex().as_deref(), Some("CE C4"));
        assert!(!report.truncated);
        assert_eq!(report.to_string(), "'中' -> [D6 D0]\n'文' -> [CE C4]");
    }

    #[test]
    fn test_japanese_in_shift_jis() {
        // SHIFT-JIS encoding of "日本語"
        let report = describe("日本語", Charset::ShiftJis);
        let hex: Vec<_> = report.entries.iter().filter_map(|e| e.hex()).collect();
        assert_eq!(hex, vec!["93 FA", "96 7B", "8C EA"]);
    }

    #[test]
    fn test_emoji_is_unencodable_in_gbk() {
        let report = describe("a😀b", Charset::Gbk);
        assert_eq!(report.entries.len(), 3);
        assert!(report.entries[0].is_encodable());
        assert!(!report.entries[1].is_encodable());
        assert!(report.entries[2].is_encodable());
        assert_eq!(report.unencodable_count(), 1);
        assert!(report.to_string().contains("'😀' -> [cannot encode as GBK]"));
    }

    #[test]
    fn test_whitespace_skipped_but_full_width_space_kept() {
        let report = describe("a b\u{3000}c\n", Charset::ShiftJis);
        let chars: String = report.entries.iter().map(|e| e.character).collect();
        assert_eq!(chars, "ab\u{3000}c");
        assert_eq!(report.entries[2].hex().as_deref(), Some("81 40"));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(describe("  \n\t", Charset::Utf8).is_empty());
        assert_eq!(describe("", Charset::Utf8).to_string(), "");
    }

    #[test]
    fn test_truncation_marker() {
        let text = "abcdefghijklmnopqrstuvwxyz";
        let report = describe(text, Charset::Utf8);
        assert_eq!(report.entries.len(), 15);
        assert!(report.truncated);
        assert!(report.to_string().ends_with("\n... (more characters)"));

        let exact = describe("abcdefghijklmno", Charset::Utf8);
        assert_eq!(exact.entries.len(), 15);
        assert!(!exact.truncated);
    }

    #[test]
    fn test_only_first_fifty_characters_sampled() {
        let text = format!("{}xyz", " ".repeat(50));
        assert!(describe(&text, Charset::Utf8).is_empty());
    }

    #[test]
    fn test_gb2312_repertoire() {
        // Traditional characters are in GBK but not GB2312.
        assert!(encode_char('語', Charset::Gbk).is_some());
        assert_eq!(encode_char('語', Charset::Gb2312), None);
        assert_eq!(encode_char('中', Charset::Gb2312), Some(vec![0xD6, 0xD0]));
        // GBK maps the euro sign to a single 0x80 byte.
        assert_eq!(encode_char('€', Charset::Gbk), Some(vec![0x80]));
        assert_eq!(encode_char('€', Charset::Gb2312), None);
    }

    #[test]
    fn test_utf16_and_replacement() {
        let le = Charset::Other(UTF_16LE);
        assert_eq!(encode_char('A', le), Some(vec![0x41, 0x00]));
        assert_eq!(encode_char('😀', Charset::Other(UTF_16BE)), Some(vec![0xD8, 0x3D, 0xDE, 0x00]));
        assert_eq!(encode_char('A', Charset::Other(REPLACEMENT)), None);
    }

    #[test]
    fn test_best_fit_mappings_are_unencodable() {
        assert_eq!(encode_char('¥', Charset::ShiftJis), None);
        assert_eq!(encode_char('‾', Charset::ShiftJis), None);
        assert_eq!(encode_char('−', Charset::ShiftJis), None);
        assert_eq!(encode_char('－', Charset::ShiftJis), Some(vec![0x81, 0x7C]));
        assert_eq!(encode_char('\\', Charset::ShiftJis), Some(vec![0x5C]));
        assert_eq!(encode_char('\u{E78D}', Charset::Gbk), None);
        assert_eq!(encode_char('\u{E78D}', Charset::Gb2312), None);
    }

    #[test]
    fn test_every_target_round_trips() {
        for charset in Charset::TARGETS {
            for ch in (0..=0xFFFFu32).filter_map(char::from_u32) {
                if let Some(bytes) = encode_char(ch, charset) {
                    let (decoded, had_errors) = decode_encoded(&bytes, charset);
                    assert!(!had_errors, "{} {:?}", charset, ch);
                    assert_eq!(decoded, ch.to_string(), "{} {:?} -> {}", charset, ch, to_hex(&bytes));
                }
            }
        }
    }

    #[test]
    fn test_gb2312_rejects_gbk_additions() {
        for ch in ['ɑ', '︵', '·', '—', 'ⅰ'] {
            assert!(encode_char(ch, Charset::Gbk).is_some(), "{:?}", ch);
            assert_eq!(encode_char(ch, Charset::Gb2312), None, "{:?}", ch);
        }
    }

    #[test]
    fn test_gb2312_own_punctuation() {
        assert_eq!(encode_char('・', Charset::Gb2312), Some(vec![0xA1, 0xA4]));
        assert_eq!(encode_char('―', Charset::Gb2312), Some(vec![0xA1, 0xAA]));
        assert_eq!(decode_encoded(&[0xA1, 0xA4, 0xA1, 0xAA], Charset::Gb2312).0, "・―");
        // Greek, pinyin and box drawing cells that GB2312 does assign
        assert_eq!(encode_char('α', Charset::Gb2312), Some(vec![0xA6, 0xC1]));
        assert_eq!(encode_char('ā', Charset::Gb2312), Some(vec![0xA8, 0xA1]));
        assert_eq!(encode_char('─', Charset::Gb2312), Some(vec![0xA9, 0xA4]));
    }

    #[test]
    fn test_information_separators_skipped() {
        assert!(describe("\u{1C}\u{1F}", Charset::Utf8).is_empty());
        let report = describe("a\u{1E}b", Charset::Utf8);
        let chars: String = report.entries.iter().map(|e| e.character).collect();
        assert_eq!(chars, "ab");
    }

    proptest! {
        #[test]
        fn prop_entries_bounded_and_ordered(text in "\\PC{0,80}") {
            let report = describe(&text, Charset::Utf8);
            prop_assert!(report.entries.len() <= DEFAULT_MAX_ENTRIES);

            let expected: Vec<char> = text
                .chars()
                .take(DEFAULT_SAMPLE_CHARS)
                .filter(|&c| !text::is_blank_char(c) || c == FULL_WIDTH_SPACE)
                .take(DEFAULT_MAX_ENTRIES)
                .collect();
            let actual: Vec<char> = report.entries.iter().map(|e| e.character).collect();
            if text::is_blank(&text) {
                prop_assert!(actual.is_empty());
            } else {
                prop_assert_eq!(actual, expected);
            }
        }

        #[test]
        fn prop_utf8_always_encodable(ch in any::<char>()) {
            let bytes = encode_char(ch, Charset::Utf8).unwrap();
            prop_assert_eq!(String::from_utf8(bytes).unwrap(), ch.to_string());
        }

        #[test]
        fn prop_encodable_bytes_decode_to_same_char(ch in any::<char>(), index in 0usize..4) {
            let charset = Charset::TARGETS[index];
            if let Some(bytes) = encode_char(ch, charset) {
                let (decoded, had_errors) = decode_encoded(&bytes, charset);
                prop_assert!(!had_errors);
                prop_assert_eq!(decoded, ch.to_string());
            }
        }

        #[test]
        fn prop_common_cjk_encodable(code in 0x4E00u32..=0x9FA5) {
            let ch = char::from_u32(code).unwrap();
            prop_assert!(encode_char(ch, Charset::Gbk).is_some());
        }
    }
}
