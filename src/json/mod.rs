//! Snapshot JSON parsing and error handling

pub mod diagnostics;
pub mod parser;

pub use diagnostics::{JsonError, JsonSyntaxError};
pub use parser::{parse_json, parse_json_file, read_json_input};
