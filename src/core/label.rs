//! Encoding labels.
//!
//! `EncodingLabel` is what the user picks (including auto-detect), `Charset`
//! is what a label or the detector resolves to.

use encoding_rs::{Encoding, GBK, SHIFT_JIS, UTF_8};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source encoding as selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EncodingLabel {
    #[default]
    #[serde(rename = "auto")]
    AutoDetect,
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "gbk")]
    Gbk,
    #[serde(rename = "gb2312")]
    Gb2312,
    #[serde(rename = "shift_jis")]
    ShiftJis,
}

impl EncodingLabel {
    /// Labels in the order they are offered to the user.
    pub const ALL: [EncodingLabel; 5] = [
        EncodingLabel::AutoDetect,
        EncodingLabel::Utf8,
        EncodingLabel::Gbk,
        EncodingLabel::ShiftJis,
        EncodingLabel::Gb2312,
    ];

    /// The concrete encoding behind this label, `None` for auto-detect.
    pub fn charset(self) -> Option<Charset> {
        match self {
            EncodingLabel::AutoDetect => None,
            EncodingLabel::Utf8 => Some(Charset::Utf8),
            EncodingLabel::Gbk => Some(Charset::Gbk),
            EncodingLabel::Gb2312 => Some(Charset::Gb2312),
            EncodingLabel::ShiftJis => Some(Charset::ShiftJis),
        }
    }

    pub fn is_auto(self) -> bool {
        self == EncodingLabel::AutoDetect
    }
}

impl fmt::Display for EncodingLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.charset() {
            Some(charset) => write!(f, "{}", charset),
            None => f.write_str("Auto-detect"),
        }
    }
}

impl FromStr for EncodingLabel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if matches!(key.as_str(), "auto" | "auto-detect" | "autodetect") {
            return Ok(EncodingLabel::AutoDetect);
        }
        match Charset::from_label(&key) {
            Some(Charset::Utf8) => Ok(EncodingLabel::Utf8),
            Some(Charset::Gbk) => Ok(EncodingLabel::Gbk),
            Some(Charset::Gb2312) => Ok(EncodingLabel::Gb2312),
            Some(Charset::ShiftJis) => Ok(EncodingLabel::ShiftJis),
            _ => Err(UnknownLabel(s.to_string())),
        }
    }
}

/// Label that names no selectable encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown encoding label: {0}")]
pub struct UnknownLabel(pub String);

/// A resolved, concrete encoding.
///
/// GB2312 shares the GBK tables but only accepts the GB2312 repertoire.
/// Anything the detector reports outside the four named encodings is kept
/// as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Charset {
    Utf8,
    Gbk,
    Gb2312,
    ShiftJis,
    Other(&'static Encoding),
}

impl Charset {
    /// Targets offered by the convert buttons.
    pub const TARGETS: [Charset; 4] = [Charset::Utf8, Charset::Gbk, Charset::Gb2312, Charset::ShiftJis];

    /// Resolve a label such as `"Shift-JIS"`, `"sjis"` or `"euc-jp"`.
    pub fn from_label(label: &str) -> Option<Charset> {
        let key = label.trim().to_ascii_lowercase();
        match key.as_str() {
            "utf-8" | "utf8" => Some(Charset::Utf8),
            "gbk" | "cp936" => Some(Charset::Gbk),
            "gb2312" | "gb_2312" => Some(Charset::Gb2312),
            "shift_jis" | "shift-jis" | "sjis" | "shiftjis" => Some(Charset::ShiftJis),
            _ => Encoding::for_label(key.as_bytes()).map(Charset::from_encoding),
        }
    }

    pub fn from_encoding(encoding: &'static Encoding) -> Charset {
        if encoding == UTF_8 {
            Charset::Utf8
        } else if encoding == GBK {
            Charset::Gbk
        } else if encoding == SHIFT_JIS {
            Charset::ShiftJis
        } else {
            Charset::Other(encoding)
        }
    }

    /// The encoding_rs codec used for this charset.
    pub fn encoding(self) -> &'static Encoding {
        match self {
            Charset::Utf8 => UTF_8,
            Charset::Gbk | Charset::Gb2312 => GBK,
            Charset::ShiftJis => SHIFT_JIS,
            Charset::Other(encoding) => encoding,
        }
    }

    /// Lower-case name, e.g. `shift_jis` or `euc-jp`.
    pub fn name(self) -> String {
        match self {
            Charset::Utf8 => "utf-8".to_string(),
            Charset::Gbk => "gbk".to_string(),
            Charset::Gb2312 => "gb2312".to_string(),
            Charset::ShiftJis => "shift_jis".to_string(),
            Charset::Other(encoding) => encoding.name().to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_ascii_uppercase())
    }
}

impl From<Charset> for String {
    fn from(charset: Charset) -> Self {
        charset.name()
    }
}

impl TryFrom<String> for Charset {
    type Error = UnknownLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Charset::from_label(&value).ok_or(UnknownLabel(value))
    }
}
