//! Whitespace rules shared by detection, reports and conversion.

/// Whitespace as far as "nothing to inspect" is concerned.
///
/// Adds the information separators U+001C..U+001F to Unicode `White_Space`;
/// they separate records in pasted data and carry no visible text.
pub fn is_blank_char(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '\u{1C}'..='\u{1F}')
}

/// `text` has no visible characters.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(is_blank_char)
}

/// `text` without leading and trailing blank characters.
pub fn trim_blank(text: &str) -> &str {
    text.trim_matches(is_blank_char)
}
