//! # Document Loading
//!
//! Reads schema and UI schema documents from disk. Both JSON and YAML
//! are accepted; either way the result is a `serde_json::Value`, which
//! is what every other part of the engine consumes.

use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use formwork_core::FormworkError;

/// Error loading a schema or UI schema document from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// Path of the document.
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file contents could not be parsed.
    #[error("failed to parse '{path}': {reason}")]
    Parse {
        /// Path of the document.
        path: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The file extension identifies no supported format.
    #[error("unsupported document extension for '{path}'; expected .json, .yaml, or .yml")]
    UnsupportedExtension {
        /// Path of the document.
        path: String,
    },
}

impl From<LoadError> for FormworkError {
    fn from(err: LoadError) -> Self {
        FormworkError::DocumentLoad(err.to_string())
    }
}

/// Load a JSON or YAML document as a `serde_json::Value`, dispatching on
/// the file extension.
pub fn load_value(path: &Path) -> Result<Value, LoadError> {
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&text).map_err(|err| LoadError::Parse {
            path: display,
            reason: err.to_string(),
        }),
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text).map_err(|err| LoadError::Parse {
            path: display,
            reason: err.to_string(),
        }),
        _ => Err(LoadError::UnsupportedExtension { path: display }),
    }
}
