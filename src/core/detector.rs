//! Source encoding detection.
//!
//! The statistical detector (chardetng) is asked first; when it has nothing
//! to go on, a code point scan decides, and UTF-8 is the final fallback.

use super::label::Charset;
use super::text;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use thiserror::Error;
use tracing::debug;

/// Why the statistical detector produced no usable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DetectionUnavailable {
    /// Input carries no non-ASCII bytes to score.
    #[error("no non-ASCII bytes to score")]
    Inconclusive,
    #[error("detector reported no candidate encoding")]
    NoCandidate,
}

/// Detect the encoding of pasted text.
///
/// Whitespace-only input is UTF-8 without consulting the detector.
pub fn detect(text: &str) -> Charset {
    detect_with(text, guess_name)
}

/// Detect the encoding of raw bytes, e.g. a file read from disk.
pub fn detect_bytes(bytes: &[u8]) -> Charset {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        debug!("BOM found: {}", encoding.name());
        return Charset::from_encoding(encoding);
    }
    match guess_name(bytes) {
        Ok(name) => normalize_detected_name(name),
        Err(reason) => {
            debug!("byte detection unavailable ({}), assuming UTF-8", reason);
            Charset::Utf8
        }
    }
}

/// Map a detector-reported name onto a charset.
///
/// Names mentioning `shift`/`sjis` become Shift_JIS, anything with `gb`
/// becomes GBK, the rest pass through lower-cased.
pub fn normalize_detected_name(name: &str) -> Charset {
    let detected = name.to_ascii_lowercase();
    if detected.contains("shift") || detected.contains("sjis") {
        Charset::ShiftJis
    } else if detected.contains("gb") {
        Charset::Gbk
    } else {
        Charset::from_label(&detected).unwrap_or(Charset::Utf8)
    }
}

pub(crate) fn detect_with<F>(text: &str, guess_name: F) -> Charset
where
    F: FnOnce(&[u8]) -> Result<&'static str, DetectionUnavailable>,
{
    if text::is_blank(text) {
        return Charset::Utf8;
    }

    match guess_name(text.as_bytes()) {
        Ok(name) => {
            let charset = normalize_detected_name(name);
            debug!("detector reported {}, using {}", name, charset);
            return charset;
        }
        Err(reason) => debug!("detector unavailable: {}", reason),
    }

    if let Some(ch) = text.chars().find(|&ch| is_wide_or_cjk(ch)) {
        debug!("found {:?}, treating input as UTF-8", ch);
    }
    Charset::Utf8
}

/// Full-width forms or CJK unified ideographs.
fn is_wide_or_cjk(ch: char) -> bool {
    ch as u32 > 0xFF00 || ('\u{4E00}'..='\u{9FFF}').contains(&ch)
}

fn guess_name(bytes: &[u8]) -> Result<&'static str, DetectionUnavailable> {
    if bytes.is_empty() {
        return Err(DetectionUnavailable::NoCandidate);
    }
    if bytes.is_ascii() {
        return Err(DetectionUnavailable::Inconclusive);
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    Ok(detector.guess(None, true).name())
}
