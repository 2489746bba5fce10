//! Byte-level helpers for loading snippets from disk and saving output.
//!
//! Uses encoding_rs for decoding and the per-character encoder from
//! `core::report` for output, so saved bytes match what the report shows.

use crate::core::detector;
use crate::core::error::InspectError;
use crate::core::label::{Charset, EncodingLabel};
use crate::core::report::{encode_char, gb2312_from_gbk_char};
use encoding_rs::REPLACEMENT;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Byte written for characters the target cannot represent.
const UNENCODABLE_BYTE: u8 = b'?';

/// Text decoded from raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub charset: Charset,
    /// Malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Text encoded into a target charset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    pub bytes: Vec<u8>,
    pub charset: Charset,
    /// Characters written as `?`.
    pub unencodable: usize,
}

/// Decode bytes using the selected label, detecting when it is auto-detect.
///
/// A byte order mark overrides the label.
pub fn decode_bytes(data: &[u8], label: EncodingLabel) -> DecodedText {
    let charset = label
        .charset()
        .unwrap_or_else(|| detector::detect_bytes(data));
    let (decoded, used, had_errors) = charset.encoding().decode(data);
    let charset = if used == charset.encoding() {
        charset
    } else {
        Charset::from_encoding(used)
    };
    let text = if charset == Charset::Gb2312 {
        decoded.chars().map(gb2312_from_gbk_char).collect()
    } else {
        decoded.into_owned()
    };
    DecodedText {
        text,
        charset,
        had_errors,
    }
}

/// Encode text character by character into the target charset.
pub fn encode_text(text: &str, charset: Charset) -> EncodedText {
    let mut bytes = Vec::with_capacity(text.len());
    let mut unencodable = 0;
    for ch in text.chars() {
        match encode_char(ch, charset) {
            Some(encoded) => bytes.extend_from_slice(&encoded),
            None => {
                bytes.push(UNENCODABLE_BYTE);
                unencodable += 1;
            }
        }
    }
    EncodedText {
        bytes,
        charset,
        unencodable,
    }
}

/// Read a small file and decode it with the selected label.
pub fn read_file_as_text(
    path: &Path,
    label: EncodingLabel,
    max_bytes: u64,
) -> Result<DecodedText, InspectError> {
    let read_err = |source| InspectError::Read {
        path: path.to_path_buf(),
        source,
    };

    let size = fs::metadata(path).map_err(read_err)?.len();
    if size > max_bytes {
        return Err(InspectError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            limit: max_bytes,
        });
    }

    let data = fs::read(path).map_err(read_err)?;
    let decoded = decode_bytes(&data, label);
    if decoded.had_errors {
        warn!("{} contained bytes invalid in {}", path.display(), decoded.charset);
    }
    info!("Loaded {} ({} bytes, {})", path.display(), size, decoded.charset);
    Ok(decoded)
}

/// Write text to a file in the target charset's byte form.
pub fn write_encoded(path: &Path, text: &str, charset: Charset) -> Result<EncodedText, InspectError> {
    if charset.encoding() == REPLACEMENT {
        return Err(InspectError::Unexpected(format!(
            "{} cannot be used as a target encoding",
            charset
        )));
    }
    let encoded = encode_text(text, charset);
    fs::write(path, &encoded.bytes).map_err(|source| InspectError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "Saved {} ({} bytes, {})",
        path.display(),
        encoded.bytes.len(),
        charset
    );
    Ok(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passthrough() {
        let decoded = decode_bytes(b"Hello, World!", EncodingLabel::Utf8);
        assert_eq!(decoded.text, "Hello, World!");
        assert_eq!(decoded.charset, Charset::Utf8);
        assert!(!decoded.had_errors);
    }

    #[test]
    fn test_shift_jis_decoding() {
        // SHIFT-JIS encoding of "日本語"
        let data: &[u8] = &[0x93, 0xFA, 0x96, 0x7B, 0x8C, 0xEA];
        let decoded = decode_bytes(data, EncodingLabel::ShiftJis);
        assert_eq!(decoded.text, "日本語");
        assert_eq!(decoded.charset, Charset::ShiftJis);
    }

    #[test]
    fn test_gb2312_label_keeps_identity() {
        let decoded = decode_bytes(&[0xD6, 0xD0, 0xCE, 0xC4], EncodingLabel::Gb2312);
        assert_eq!(decoded.text, "中文");
        assert_eq!(decoded.charset, Charset::Gb2312);
    }

    #[test]
    fn test_gb2312_middle_dot_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dots.txt");

        let encoded = write_encoded(&path, "中・文―", Charset::Gb2312).unwrap();
        assert_eq!(encoded.unencodable, 0);
        assert_eq!(&encoded.bytes[2..4], &[0xA1, 0xA4]);

        let decoded = read_file_as_text(&path, EncodingLabel::Gb2312, 1024).unwrap();
        assert_eq!(decoded.text, "中・文―");
        // The same bytes read as GBK are the middle dot and em dash
        let decoded = read_file_as_text(&path, EncodingLabel::Gbk, 1024).unwrap();
        assert_eq!(decoded.text, "中·文—");
    }

    #[test]
    fn test_shift_jis_yen_written_as_placeholder() {
        let encoded = encode_text("¥100", Charset::ShiftJis);
        assert_eq!(encoded.bytes, b"?100".to_vec());
        assert_eq!(encoded.unencodable, 1);
    }

    #[test]
    fn test_bom_overrides_label() {
        let decoded = decode_bytes(&[0xEF, 0xBB, 0xBF, b'h', b'i'], EncodingLabel::ShiftJis);
        assert_eq!(decoded.text, "hi");
        assert_eq!(decoded.charset, Charset::Utf8);
    }

    #[test]
    fn test_invalid_bytes_flagged() {
        let decoded = decode_bytes(&[b'a', 0x80, 0x81], EncodingLabel::Utf8);
        assert!(decoded.had_errors);
    }

    #[test]
    fn test_encode_text_replaces_unencodable() {
        let encoded = encode_text("中😀", Charset::Gbk);
        assert_eq!(encoded.bytes, vec![0xD6, 0xD0, b'?']);
        assert_eq!(encoded.unencodable, 1);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");

        let encoded = write_encoded(&path, "日本語テキスト", Charset::ShiftJis).unwrap();
        assert_eq!(encoded.unencodable, 0);

        let decoded = read_file_as_text(&path, EncodingLabel::ShiftJis, 1024).unwrap();
        assert_eq!(decoded.text, "日本語テキスト");
    }

    #[test]
    fn test_file_too_large() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        std::fs::write(&path, vec![b'a'; 64]).unwrap();

        let err = read_file_as_text(&path, EncodingLabel::AutoDetect, 16).unwrap_err();
        assert!(matches!(err, InspectError::FileTooLarge { size: 64, limit: 16, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = read_file_as_text(Path::new("/no/such/file.txt"), EncodingLabel::Utf8, 1024)
            .unwrap_err();
        assert!(matches!(err, InspectError::Read { .. }));
    }
}
