pub mod compatible;
pub mod http_client;
pub mod scrub;
pub mod traits;

pub use compatible::OpenAiCompatibleProvider;
pub use http_client::{build_provider_client, build_provider_client_with_timeout};
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
pub use traits::Provider;

use crate::config::LlmConfig;

/// Build the configured completion backend.
pub fn create_provider(config: &LlmConfig) -> anyhow::Result<Box<dyn Provider>> {
    let api_key = config
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty());
    if api_key.is_none() {
        anyhow::bail!("LLM API key not set. Set LLM_API_KEY or llm.api_key in config.toml.");
    }

    Ok(Box::new(OpenAiCompatibleProvider::new(
        "llm",
        &config.base_url,
        api_key,
    )))
}
