use crate::providers::ProviderError;
use thiserror::Error;

/// Errors that can occur while looking up a recipe
///
/// The `Display` text of each variant is safe to show to the user as is.
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The query was empty or whitespace only
    #[error("Please enter a recipe to search")]
    EmptyQuery,

    /// No API key is configured for the provider
    #[error("{provider} API key not configured. Please add {env_var} to your environment variables.")]
    MissingCredential {
        provider: String,
        env_var: &'static str,
    },

    /// The backend call failed; the underlying cause is kept for logging
    #[error("Failed to get recipe. Please check your API key and try again.")]
    BackendFailure {
        #[from]
        source: ProviderError,
    },

    /// A newer search was started before this one finished
    #[error("This search was replaced by a newer one")]
    Superseded,

    /// The configured provider could not be created
    #[error("Provider error: {0}")]
    ProviderSetup(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl RecipeError {
    /// The underlying backend message, if this is a backend failure
    pub fn detail(&self) -> Option<String> {
        match self {
            RecipeError::BackendFailure { source } => Some(source.to_string()),
            _ => None,
        }
    }
}
