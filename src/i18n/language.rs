//! Language loader: selected language pack plus merged parameters.

use crate::config::Config;
use crate::i18n::pack::{read_pack_file, LanguageError};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// File loaded implicitly whenever a language is selected.
pub const COMMON_FILE: &str = "common.json";

/// Flat-file language loader.
///
/// Holds the language pack directory, the currently selected language code and
/// every key/value pair merged from the files loaded so far. Later loads
/// overwrite earlier keys on collision.
#[derive(Debug, Clone, Default)]
pub struct Language {
    /// Root of the language pack, holding one subdirectory per language code
    directory: Option<PathBuf>,

    /// Currently selected language code (e.g., "en", "tr")
    current: Option<String>,

    /// Key/value pairs merged from every file loaded so far
    params: HashMap<String, Value>,
}

impl Language {
    /// Create an empty loader with no directory and no language selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader rooted at `directory`.
    ///
    /// # Returns
    /// * `Ok(Language)` if the directory exists
    /// * `Err(LanguageError::NotADirectory)` otherwise
    pub fn with_directory(directory: impl AsRef<Path>) -> Result<Self, LanguageError> {
        let mut language = Self::new();
        language.set_directory(directory)?;
        Ok(language)
    }

    /// Create a loader from configuration: sets the pack directory and selects
    /// the default language.
    ///
    /// # Arguments
    /// * `config` - Supplies `language_dir` and `default_language`
    ///
    /// # Returns
    /// * `Ok(Language)` with the default language's `common.json` merged in
    /// * `Err` if the directory or the language subdirectory is missing
    pub fn from_config(config: &Config) -> Result<Self, LanguageError> {
        let mut language = Self::with_directory(&config.language_dir)?;
        language.set_language(&config.default_language)?;
        Ok(language)
    }

    // ==================== Directory ====================

    /// Set the language pack directory.
    ///
    /// Fails if `directory` does not exist or is not a directory; the previous
    /// directory is kept in that case.
    pub fn set_directory(&mut self, directory: impl AsRef<Path>) -> Result<(), LanguageError> {
        let directory = directory.as_ref();
        if !directory.is_dir() {
            return Err(LanguageError::NotADirectory(directory.to_path_buf()));
        }

        debug!("Language directory set to {}", directory.display());
        self.directory = Some(directory.to_path_buf());
        Ok(())
    }

    /// Get the language pack directory, if one has been set.
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    // ==================== Language ====================

    /// Select a language and load its `common.json`.
    ///
    /// Succeeds when `<directory>/<code>` is an existing directory. The outcome
    /// of the implicit common-file load does not affect the result.
    ///
    /// # Arguments
    /// * `code` - A single directory name under the pack directory. Nested
    ///   codes such as `en/gb`, empty codes and `.`/`..` are rejected with
    ///   `LanguageError::InvalidCode`, even when the subdirectory exists.
    ///
    /// # Returns
    /// * `Ok(())` if the language was selected
    /// * `Err(LanguageError::DirectoryNotSet)` if no pack directory is set
    /// * `Err(LanguageError::NotADirectory)` if the subdirectory is missing
    pub fn set_language(&mut self, code: &str) -> Result<(), LanguageError> {
        if !is_valid_code(code) {
            return Err(LanguageError::InvalidCode(code.to_string()));
        }

        let directory = self.directory.as_ref().ok_or(LanguageError::DirectoryNotSet)?;
        let language_dir = directory.join(code);
        if !language_dir.is_dir() {
            return Err(LanguageError::NotADirectory(language_dir));
        }

        self.current = Some(code.to_string());
        info!("Language set to '{}'", code);

        if let Err(e) = self.load(COMMON_FILE) {
            debug!("No common file loaded for '{}': {}", code, e);
        }

        Ok(())
    }

    /// Get the selected language code, if any.
    pub fn language(&self) -> Option<&str> {
        self.current.as_deref()
    }

    // ==================== Loading ====================

    /// Load `<directory>/<language>/<filename>` and merge its entries.
    ///
    /// # Errors
    /// * `DirectoryNotSet` / `LanguageNotSet` if the loader is not configured
    /// * `InvalidFile` if `filename` is absolute or steps outside the language
    ///   directory
    /// * `FileNotFound` if the path is missing or not a regular file
    /// * `Io`, `Parse` if the file cannot be read or is not valid JSON
    /// * `NotAMapping` if the top-level value is not an object
    pub fn load(&mut self, filename: &str) -> Result<(), LanguageError> {
        let path = self.resolve(filename)?;
        let entries = read_pack_file(&path)?;

        debug!("Loaded {} keys from {}", entries.len(), path.display());
        self.params.extend(entries);
        Ok(())
    }

    fn resolve(&self, filename: &str) -> Result<PathBuf, LanguageError> {
        if !is_valid_filename(filename) {
            return Err(LanguageError::InvalidFile(filename.to_string()));
        }

        let directory = self.directory.as_ref().ok_or(LanguageError::DirectoryNotSet)?;
        let code = self.current.as_ref().ok_or(LanguageError::LanguageNotSet)?;
        Ok(directory.join(code).join(filename))
    }

    // ==================== Lookup ====================

    /// Get the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Get the value stored under `key` if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Number of loaded keys.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no keys have been loaded.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// A file name stays inside the language directory: relative, made only of
/// plain components.
fn is_valid_filename(filename: &str) -> bool {
    let path = Path::new(filename);
    path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)))
}

/// A language code names a single directory entry: non-empty, no separators,
/// not a relative component.
fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code != "."
        && code != ".."
        && !code.contains(['/', '\\'])
}
