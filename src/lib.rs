//! Encoding Inspector - detect the source encoding of pasted text and show how
//! each character is represented in UTF-8, GBK/GB2312 or Shift_JIS.
//!
//! The library holds the stateless inspection core plus the application state
//! the desktop window drives; the window itself lives in the binary.

pub mod config;
pub mod core;
pub mod state;
pub mod utils;

pub use crate::core::{
    describe_characters, detect, detect_bytes, Charset, ConversionResult, EncodingInspector,
    EncodingLabel, InspectError,
};
