//! Presentation-layer helpers for web applications.
//!
//! - `document`: HTML `<head>` metadata builder
//! - `i18n`: flat-file language packs
//! - `http_client`: thin HTTP client wrapper
//! - `config`: environment configuration shared by the components

pub mod config;
pub mod document;
pub mod http_client;
pub mod i18n;
