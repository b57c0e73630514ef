use crate::config::{AiConfig, ProviderConfig};
use crate::error::RecipeError;
use crate::providers::{GoogleProvider, LlmProvider, OpenAIProvider, ProviderError};
use std::time::Duration;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn LlmProvider>, RecipeError> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(RecipeError::ProviderSetup(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        let setup =
            |e: ProviderError| RecipeError::ProviderSetup(format!("{}: {}", provider_name, e));

        match provider_name {
            "google" => Ok(Box::new(GoogleProvider::new(config, timeout).map_err(setup)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config, timeout).map_err(setup)?)),
            _ => Err(RecipeError::ProviderSetup(format!(
                "Unknown provider: {}",
                provider_name
            ))),
        }
    }

    /// Get the default provider from configuration
    pub fn get_default_provider(config: &AiConfig) -> Result<Box<dyn LlmProvider>, RecipeError> {
        let provider_name = &config.default_provider;
        Self::create(
            provider_name,
            &config.provider_config(provider_name),
            Duration::from_secs(config.timeout),
        )
    }

    /// Environment variable holding the API key for a provider
    pub fn credential_env_var(provider_name: &str) -> &'static str {
        match provider_name {
            "openai" => "OPENAI_API_KEY",
            _ => "GEMINI_API_KEY",
        }
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["google", "openai"]
    }
}
