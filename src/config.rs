use std::path::PathBuf;

/// Default user agent sent by `HttpClient` when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("basic-libs/", env!("CARGO_PKG_VERSION"));

/// Runtime settings shared by the components, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    // HTTP client
    /// `User-Agent` header sent with every request (`USER_AGENT`)
    pub user_agent: String,
    /// Whole-request timeout in seconds (`HTTP_TIMEOUT_SECS`)
    pub http_timeout_secs: u64,

    // Language packs
    /// Directory holding one subdirectory per language code (`LANGUAGE_DIR`)
    pub language_dir: PathBuf,
    /// Language selected at startup (`DEFAULT_LANGUAGE`)
    pub default_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http_timeout_secs: 30,
            language_dir: PathBuf::from("languages"),
            default_language: "en".to_string(),
        }
    }
}

impl Config {
    /// Build configuration from the process environment.
    ///
    /// Every variable is optional; unset or unparseable values fall back to
    /// the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            // HTTP client
            user_agent: std::env::var("USER_AGENT").unwrap_or(defaults.user_agent),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.http_timeout_secs),

            // Language packs
            language_dir: std::env::var("LANGUAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.language_dir),
            default_language: std::env::var("DEFAULT_LANGUAGE")
                .unwrap_or(defaults.default_language),
        }
    }
}
