//! Language file reading.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reported by the language loader.
#[derive(Debug, Error)]
pub enum LanguageError {
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Invalid language code: '{0}'")]
    InvalidCode(String),

    #[error("Language directory is not set")]
    DirectoryNotSet,

    #[error("Language is not set")]
    LanguageNotSet,

    #[error("Invalid language file name: '{0}'")]
    InvalidFile(String),

    #[error("Language file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read language file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse language file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Language file {0} is not a key-value object")]
    NotAMapping(PathBuf),
}

/// Read a language file and return its top-level object.
///
/// The path must name an existing regular file whose content is a JSON object.
pub(crate) fn read_pack_file(path: &Path) -> Result<Map<String, Value>, LanguageError> {
    if !path.is_file() {
        return Err(LanguageError::FileNotFound(path.to_path_buf()));
    }

    let raw = std::fs::read_to_string(path).map_err(|source| LanguageError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_pack(&raw, path)
}

fn parse_pack(raw: &str, path: &Path) -> Result<Map<String, Value>, LanguageError> {
    let value: Value = serde_json::from_str(raw).map_err(|source| LanguageError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(LanguageError::NotAMapping(path.to_path_buf())),
    }
}
