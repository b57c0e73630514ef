use log::{debug, error, info};

use crate::config::AiConfig;
use crate::error::RecipeError;
use crate::prompt::build_prompt;
use crate::providers::{LlmProvider, ProviderFactory};
use crate::reply::{classify, Classification};

/// A query that passed validation, with its prompt ready to send
#[derive(Clone)]
pub struct PreparedRequest {
    prompt: String,
    api_key: String,
}

impl PreparedRequest {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Looks up recipes through one language-model provider.
///
/// Every call makes at most one backend request. Nothing is cached and
/// failed requests are not retried.
pub struct RecipeFinder {
    provider: Box<dyn LlmProvider>,
    api_key: Option<String>,
}

impl RecipeFinder {
    /// Create a finder for `provider`.
    ///
    /// A missing or blank `api_key` is reported by each lookup as
    /// [`RecipeError::MissingCredential`] before anything is sent.
    pub fn new(provider: Box<dyn LlmProvider>, api_key: Option<String>) -> Self {
        RecipeFinder {
            provider,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    /// Create a finder for the configured default provider
    pub fn from_config(config: &AiConfig) -> Result<Self, RecipeError> {
        let provider_name = &config.default_provider;
        let provider = ProviderFactory::get_default_provider(config)?;
        let api_key = config
            .provider_config(provider_name)
            .resolve_api_key(ProviderFactory::credential_env_var(provider_name));

        Ok(Self::new(provider, api_key))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Check the query and credential, then build the prompt.
    ///
    /// Makes no network call.
    pub fn prepare(&self, query: &str) -> Result<PreparedRequest, RecipeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RecipeError::EmptyQuery);
        }

        let api_key = self
            .api_key
            .clone()
            .ok_or_else(|| RecipeError::MissingCredential {
                provider: self.provider.provider_name().to_string(),
                env_var: ProviderFactory::credential_env_var(self.provider.provider_name()),
            })?;

        Ok(PreparedRequest {
            prompt: build_prompt(query),
            api_key,
        })
    }

    /// Send a prepared request and classify the reply
    pub async fn execute(&self, request: PreparedRequest) -> Result<Classification, RecipeError> {
        debug!(
            "Requesting recipe from {} ({} byte prompt)",
            self.provider.provider_name(),
            request.prompt.len()
        );

        let reply = self
            .provider
            .generate(&request.api_key, &request.prompt)
            .await
            .map_err(|e| {
                error!(
                    "Recipe request to {} failed: {}",
                    self.provider.provider_name(),
                    e
                );
                RecipeError::from(e)
            })?;

        let classification = classify(reply);
        match &classification {
            Classification::Rejected => info!("Query rejected as not food-related"),
            Classification::Recipe(recipe) => info!(
                "Received recipe with {} section headings",
                recipe.headings().len()
            ),
        }

        Ok(classification)
    }

    /// Look up a recipe for a free-text query
    pub async fn get_recipe(&self, query: &str) -> Result<Classification, RecipeError> {
        let request = self.prepare(query)?;
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderError;
    use async_trait::async_trait;

    struct EchoProvider;

    #[async_trait]
    impl LlmProvider for EchoProvider {
        fn provider_name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, ProviderError> {
            Ok(format!("{api_key}\n{prompt}"))
        }
    }

    #[test]
    fn test_prepare_trims_query() {
        let finder = RecipeFinder::new(Box::new(EchoProvider), Some("key".to_string()));
        let request = finder.prepare("  pad thai \n").unwrap();
        assert!(request.prompt().contains("\"pad thai\""));
    }

    #[test]
    fn test_prepare_checks_query_before_credential() {
        let finder = RecipeFinder::new(Box::new(EchoProvider), None);
        assert!(matches!(finder.prepare(" "), Err(RecipeError::EmptyQuery)));
        assert!(matches!(
            finder.prepare("soup"),
            Err(RecipeError::MissingCredential { .. })
        ));
    }

    #[test]
    fn test_blank_credential_is_missing() {
        let finder = RecipeFinder::new(Box::new(EchoProvider), Some(String::new()));
        assert!(matches!(
            finder.prepare("soup"),
            Err(RecipeError::MissingCredential { .. })
        ));
    }

    #[tokio::test]
    async fn test_execute_passes_credential() {
        let finder = RecipeFinder::new(Box::new(EchoProvider), Some("secret".to_string()));
        let result = finder.get_recipe("soup").await.unwrap();
        assert!(result.recipe().unwrap().body().starts_with("secret\n"));
    }
}
