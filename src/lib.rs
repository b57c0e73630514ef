//! Ask a language model for a recipe.
//!
//! A query is wrapped in a prompt that asks the model either for a recipe in
//! four marked sections (ingredients, procedure, calories, tips) or for a
//! fixed refusal token when the query is not about food. The reply comes
//! back as a [`Classification`], and recipe bodies can be split into
//! [`Section`]s for display.
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use recipe_finder::Classification;
//!
//! match recipe_finder::get_recipe("chicken curry").await? {
//!     Classification::Recipe(recipe) => {
//!         for section in recipe.sections() {
//!             println!("{}", section.text());
//!         }
//!     }
//!     Classification::Rejected => println!("{}", recipe_finder::NOT_FOOD_MESSAGE),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod finder;
pub mod prompt;
pub mod providers;
pub mod reply;
pub mod session;

pub use crate::config::{AiConfig, ProviderConfig};
pub use crate::error::RecipeError;
pub use crate::finder::{PreparedRequest, RecipeFinder};
pub use crate::prompt::build_prompt;
pub use crate::providers::{LlmProvider, ProviderError, ProviderFactory};
pub use crate::reply::{
    classify, segment, Classification, Marker, Recipe, Section, NOT_FOOD_MESSAGE,
};
pub use crate::session::{RecipeSession, RequestToken};

/// Look up a recipe using configuration from `config.toml` and the environment.
///
/// See [`AiConfig::load`] for where settings come from.
pub async fn get_recipe(query: &str) -> Result<Classification, RecipeError> {
    let config = AiConfig::load()?;
    RecipeFinder::from_config(&config)?.get_recipe(query).await
}
