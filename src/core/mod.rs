//! Core inspection logic: labels, detection, character reports and conversion.

pub mod detector;
pub mod error;
pub mod inspector;
pub mod label;
pub mod report;
pub mod text;

pub use detector::{detect, detect_bytes};
pub use error::InspectError;
pub use inspector::{ConversionOutcome, ConversionResult, EncodingInspector, InspectorOptions};
pub use label::{Charset, EncodingLabel};
pub use report::{describe_characters, CharacterEncodingReport, CharacterEntry};
