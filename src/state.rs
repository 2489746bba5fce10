//! Application state driven by user actions.
//!
//! The window owns one `AppState` and feeds it `Action`s; every derived view
//! (character info, output, notices) is recomputed from the current text and
//! selection by the stateless inspector.

use crate::config::Config;
use crate::core::error::InspectError;
use crate::core::inspector::EncodingInspector;
use crate::core::label::{Charset, EncodingLabel};
use crate::core::text;
use crate::utils::encoding;
use std::path::PathBuf;
use tracing::{info, warn};

const RULE_WIDTH: usize = 50;

/// Something the user did.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    TextChanged(String),
    SourceSelected(EncodingLabel),
    Convert(Charset),
    Clear,
    CopyOutput,
    /// Outcome of a clipboard write requested via `take_clipboard_request`,
    /// with the failure reason on error.
    ClipboardResult(Result<(), String>),
    LoadFile(PathBuf),
    SaveOutput(PathBuf),
    /// Save was requested while there is no output to write.
    SaveUnavailable,
}

/// Message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Info(m) | Notice::Warning(m) | Notice::Error(m) => m,
        }
    }
}

/// Result panel contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputView {
    pub text: String,
    pub target: Charset,
    pub info: String,
}

pub struct AppState {
    inspector: EncodingInspector,
    max_file_bytes: u64,
    auto_copy: bool,

    input: String,
    source: EncodingLabel,

    input_info: String,
    output: Option<OutputView>,
    notice: Option<Notice>,
    clipboard_request: Option<String>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            inspector: EncodingInspector::new(config.inspector_options()),
            max_file_bytes: config.max_file_bytes,
            auto_copy: config.auto_copy,
            input: String::new(),
            source: config.default_source,
            input_info: String::new(),
            output: None,
            notice: None,
            clipboard_request: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn source(&self) -> EncodingLabel {
        self.source
    }

    pub fn input_info(&self) -> &str {
        &self.input_info
    }

    pub fn output(&self) -> Option<&OutputView> {
        self.output.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Text the window should place on the clipboard, if any.
    pub fn take_clipboard_request(&mut self) -> Option<String> {
        self.clipboard_request.take()
    }

    pub fn dispatch(&mut self, action: Action) {
        self.notice = None;
        match action {
            Action::TextChanged(text) => {
                self.input = text;
                self.refresh_input_info();
            }
            Action::SourceSelected(label) => {
                self.source = label;
                self.refresh_input_info();
            }
            Action::Convert(target) => self.convert(target),
            Action::Clear => {
                self.input.clear();
                self.input_info.clear();
                self.output = None;
                self.clipboard_request = None;
                self.notice = Some(Notice::Info("All content cleared".to_string()));
            }
            Action::CopyOutput => match self.output.as_ref().filter(|o| !text::is_blank(&o.text)) {
                Some(output) => self.clipboard_request = Some(output.text.clone()),
                None => self.notice = Some(Notice::Warning("No output text to copy".to_string())),
            },
            Action::ClipboardResult(Ok(())) => {
                self.notice = Some(Notice::Info("Output copied to clipboard".to_string()));
            }
            Action::ClipboardResult(Err(reason)) => {
                self.notice = Some(Notice::Error(format!("Could not copy to clipboard: {}", reason)));
            }
            Action::LoadFile(path) => self.load_file(path),
            Action::SaveOutput(path) => self.save_output(path),
            Action::SaveUnavailable => self.warn_no_output_to_save(),
        }
    }

    /// Whether there is converted output that `SaveOutput` would write.
    pub fn can_save(&self) -> bool {
        self.output.is_some()
    }

    fn refresh_input_info(&mut self) {
        let text = text::trim_blank(&self.input);
        if text.is_empty() {
            self.input_info.clear();
            return;
        }

        let (header, charset) = match self.source.charset() {
            Some(charset) => ("Selected encoding", charset),
            None => ("Detected encoding", self.inspector.detect(text)),
        };
        let report = self.inspector.describe_characters(text, charset);
        self.input_info = format!("{}: {}\n{}\n{}", header, charset, rule(), report);
    }

    fn convert(&mut self, target: Charset) {
        let text = text::trim_blank(&self.input);
        let result = match self.inspector.convert(text, self.source, target) {
            Ok(result) => result,
            Err(e) => {
                self.notice = Some(match e {
                    InspectError::EmptyInput => Notice::Warning(e.to_string()),
                    e => Notice::Error(format!("Conversion failed: {}", e)),
                });
                return;
            }
        };

        let report = self.inspector.describe_characters(&result.text, target);
        let info = format!("Target encoding: {}\n{}\n{}\n{}", target, result.notice(), rule(), report);
        info!(
            "Converted {} characters from {} to {}",
            result.text.chars().count(),
            result.source,
            target
        );

        self.notice = Some(if result.is_same_encoding() {
            Notice::Info(format!(
                "Source and target encoding are the same ({}); showing original text",
                target
            ))
        } else {
            Notice::Info(format!("Text converted to {}", target))
        });
        if self.auto_copy {
            self.clipboard_request = Some(result.text.clone());
        }
        self.output = Some(OutputView {
            text: result.text,
            target,
            info,
        });
    }

    fn load_file(&mut self, path: PathBuf) {
        match encoding::read_file_as_text(&path, self.source, self.max_file_bytes) {
            Ok(decoded) => {
                self.input = decoded.text;
                self.refresh_input_info();
                self.notice = Some(if decoded.had_errors {
                    Notice::Warning(format!(
                        "Loaded {} as {}; some bytes were invalid and replaced",
                        path.display(),
                        decoded.charset
                    ))
                } else {
                    Notice::Info(format!("Loaded {} as {}", path.display(), decoded.charset))
                });
            }
            Err(e) => {
                warn!("{}", e);
                self.notice = Some(Notice::Error(e.to_string()));
            }
        }
    }

    fn save_output(&mut self, path: PathBuf) {
        let Some(output) = self.output.as_ref() else {
            self.warn_no_output_to_save();
            return;
        };

        self.notice = Some(match encoding::write_encoded(&path, &output.text, output.target) {
            Ok(encoded) if encoded.unencodable > 0 => Notice::Warning(format!(
                "Saved {} bytes as {}; {} characters written as '?'",
                encoded.bytes.len(),
                encoded.charset,
                encoded.unencodable
            )),
            Ok(encoded) => Notice::Info(format!(
                "Saved {} bytes as {}",
                encoded.bytes.len(),
                encoded.charset
            )),
            Err(e) => {
                warn!("{}", e);
                Notice::Error(e.to_string())
            }
        });
    }

    fn warn_no_output_to_save(&mut self) {
        self.notice = Some(Notice::Warning("No output text to save".to_string()));
    }
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}
