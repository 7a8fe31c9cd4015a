//! Internationalization (i18n) module for flat-file language packs.
//!
//! A language pack is a directory per language code holding JSON files, each
//! a flat object of key/value pairs:
//!
//! ```text
//! languages/
//!   en/
//!     common.json
//!     account.json
//!   es/
//!     common.json
//! ```
//!
//! # Architecture
//!
//! - `language`: the `Language` loader, tracking the selected directory and code
//!   and the parameters merged from loaded files
//! - `pack`: reading and validating a single language file
//!
//! # Example
//!
//! ```rust,ignore
//! use basic_libs::i18n::Language;
//!
//! let mut language = Language::new();
//! language.set_directory("languages")?;
//! language.set_language("en")?; // also loads en/common.json
//! language.load("account.json")?;
//!
//! let greeting = language.get_str("welcome");
//! ```

mod language;
mod pack;

pub use language::{Language, COMMON_FILE};
pub use pack::LanguageError;
