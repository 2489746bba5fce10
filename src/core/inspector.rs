//! Encoding inspector: detection, character breakdown and display conversion.
//!
//! Conversion here is "echo and validate": the text is returned unchanged
//! together with the characters the target cannot represent. Producing the
//! target's bytes is left to `utils::encoding`.

use super::detector;
use super::error::InspectError;
use super::label::{Charset, EncodingLabel};
use super::report::{self, CharacterEncodingReport};
use super::text;
use encoding_rs::REPLACEMENT;
use tracing::debug;

/// Limits applied when listing characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectorOptions {
    pub sample_chars: usize,
    pub max_entries: usize,
}

impl Default for InspectorOptions {
    fn default() -> Self {
        Self {
            sample_chars: report::DEFAULT_SAMPLE_CHARS,
            max_entries: report::DEFAULT_MAX_ENTRIES,
        }
    }
}

/// How a conversion turned out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    SameEncoding,
    Converted { unencodable: Vec<char> },
}

/// Result of a display conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub text: String,
    pub source: Charset,
    pub target: Charset,
    pub outcome: ConversionOutcome,
}

impl ConversionResult {
    pub fn is_same_encoding(&self) -> bool {
        self.outcome == ConversionOutcome::SameEncoding
    }

    pub fn unencodable_count(&self) -> usize {
        match &self.outcome {
            ConversionOutcome::SameEncoding => 0,
            ConversionOutcome::Converted { unencodable } => unencodable.len(),
        }
    }

    /// One or two lines describing the conversion.
    pub fn notice(&self) -> String {
        match &self.outcome {
            ConversionOutcome::SameEncoding => {
                format!("Source and target encoding are the same ({})", self.target)
            }
            ConversionOutcome::Converted { unencodable } if unencodable.is_empty() => {
                format!("Converted from {} to {}", self.source, self.target)
            }
            ConversionOutcome::Converted { unencodable } => format!(
                "Converted from {} to {}\nWarning: {} characters cannot be encoded in {}",
                self.source,
                self.target,
                unencodable.len(),
                self.target
            ),
        }
    }
}

/// Stateless front door to detection, description and conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodingInspector {
    options: InspectorOptions,
}

impl EncodingInspector {
    pub fn new(options: InspectorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> InspectorOptions {
        self.options
    }

    pub fn detect(&self, text: &str) -> Charset {
        detector::detect(text)
    }

    /// Resolve a user selection, detecting when it is auto-detect.
    pub fn resolve(&self, label: EncodingLabel, text: &str) -> Charset {
        label.charset().unwrap_or_else(|| self.detect(text))
    }

    pub fn describe_characters(&self, text: &str, target: Charset) -> CharacterEncodingReport {
        report::describe_characters(text, target, self.options.sample_chars, self.options.max_entries)
    }

    /// Validate that `text` can be shown in `target` and echo it back.
    pub fn convert(
        &self,
        text: &str,
        source: EncodingLabel,
        target: Charset,
    ) -> Result<ConversionResult, InspectError> {
        if text::is_blank(text) {
            return Err(InspectError::EmptyInput);
        }
        if target.encoding() == REPLACEMENT {
            return Err(InspectError::Unexpected(format!(
                "{} cannot be used as a target encoding",
                target
            )));
        }

        let source = self.resolve(source, text);
        if source == target {
            return Ok(ConversionResult {
                text: text.to_string(),
                source,
                target,
                outcome: ConversionOutcome::SameEncoding,
            });
        }

        let unencodable: Vec<char> = text
            .chars()
            .filter(|&ch| report::encode_char(ch, target).is_none())
            .collect();
        debug!(
            "convert {} -> {}: {} unencodable characters",
            source,
            target,
            unencodable.len()
        );

        Ok(ConversionResult {
            text: text.to_string(),
            source,
            target,
            outcome: ConversionOutcome::Converted { unencodable },
        })
    }
}
