//! Snapshot JSON parsing with error handling

use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::json::diagnostics::{JsonError, JsonSyntaxError};

/// Parse JSON content into a typed value with nice error messages
pub fn parse_json<T: DeserializeOwned>(content: &str, filename: &str) -> Result<T, JsonError> {
    serde_json::from_str(content)
        .map_err(|e| JsonError::Syntax(JsonSyntaxError::from_serde_error(&e, content, filename)))
}

/// Parse JSON from a file path
pub fn parse_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, JsonError> {
    let filename = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| JsonError::Io {
        path: filename.clone(),
        source,
    })?;
    parse_json(&content, &filename)
}

/// Parse JSON from a file path, or stdin when the path is `-`
///
/// Blank input yields `None`.
pub fn read_json_input<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, JsonError> {
    let (content, filename) = if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|source| JsonError::Io {
                path: "<stdin>".to_string(),
                source,
            })?;
        (content, "<stdin>".to_string())
    } else {
        let filename = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| JsonError::Io {
            path: filename.clone(),
            source,
        })?;
        (content, filename)
    };

    if content.trim().is_empty() {
        return Ok(None);
    }
    parse_json(&content, &filename).map(Some)
}
