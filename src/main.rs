use anyhow::{Context, Result};
use basic_libs::{config::Config, document::Document, http_client::HttpClient, i18n::Language};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("basic_libs=info".parse()?),
        )
        .init();

    let config = Config::from_env();

    // Step 1: Language pack (optional, the head renders without it)
    let language = load_language(&config);

    // Step 2: Document head
    let document = build_document(&language);
    println!("{}", document.render());

    // Step 3: Optional fetch
    if let Some(url) = std::env::args().nth(1) {
        let client = HttpClient::from_config(&config).context("Failed to create HTTP client")?;
        info!("Fetching {} as {}", url, client.user_agent());

        let no_params: &[(&str, &str)] = &[];
        match client.get(&url, no_params).await {
            Ok(body) => println!("{}", body),
            Err(e) => warn!("{}", e.to_json_envelope()),
        }
    }

    Ok(())
}

/// Load the configured language pack, falling back to an empty one.
fn load_language(config: &Config) -> Language {
    match Language::from_config(config) {
        Ok(language) => {
            info!("Loaded {} language keys", language.len());
            language
        }
        Err(e) => {
            warn!(
                "Failed to load language '{}' from {}: {}; continuing without translations",
                config.default_language,
                config.language_dir.display(),
                e
            );
            Language::new()
        }
    }
}

/// Fill a document from the `title`, `description` and `keywords` language keys.
fn build_document(language: &Language) -> Document {
    let mut document = Document::new();
    document.add_meta_attributes([("charset", "utf-8")]);

    if let Some(title) = language.get_str("title") {
        document.set_title(title);
    }
    if let Some(description) = language.get_str("description") {
        document.set_description(description);
    }

    // Keywords may be given as a list or as a single string
    match language.get("keywords") {
        Some(serde_json::Value::Array(items)) => {
            let words: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
            document.set_keywords(words);
        }
        Some(serde_json::Value::String(keywords)) => document.set_keywords(keywords.as_str()),
        _ => {}
    }

    document
}
