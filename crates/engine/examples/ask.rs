//! Ask a question against the sample course catalog.
//!
//! Requires `ANTHROPIC_API_KEY` (or a `lectern.toml` with `api_key`).
//!
//! ```sh
//! cargo run -p lectern-engine --example ask -- "What is covered in lesson 1 of Building RAG Systems?"
//! ```

use std::sync::Arc;

use lectern_config::AppConfig;
use lectern_core::Error;
use lectern_engine::RagEngine;
use lectern_providers::AnthropicGeneration;
use lectern_session::InMemorySessions;
use lectern_tools::StaticCatalog;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().map_err(|e| Error::Config {
        message: e.to_string(),
    })?;
    let api_key = config.api_key.clone().ok_or_else(|| Error::Config {
        message: "no API key configured".into(),
    })?;

    let mut backend = AnthropicGeneration::new(api_key, config.model.clone())
        .with_max_tokens(config.max_tokens)
        .with_temperature(config.temperature);
    if let Some(base_url) = &config.base_url {
        backend = backend.with_base_url(base_url.clone());
    }
    let backend = Arc::new(backend);
    let store = Arc::new(StaticCatalog::sample());
    let tools = Arc::new(lectern_tools::registry(store.clone(), config.max_results));
    let sessions = Arc::new(InMemorySessions::new(config.max_history));

    let engine = RagEngine::new(backend, tools, store, sessions, config.max_rounds);

    let question = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "What courses are available?".to_string());

    let result = engine.query(&question, None).await?;
    println!("{}", result.answer);
    if !result.sources.is_empty() {
        println!("\nSources:");
        for source in &result.sources {
            if let Some(text) = source.0["text"].as_str() {
                match source.0["link"].as_str() {
                    Some(link) => println!("  - {text} ({link})"),
                    None => println!("  - {text}"),
                }
            }
        }
    }

    Ok(())
}
