use async_trait::async_trait;
use recipe_finder::{
    Classification, LlmProvider, ProviderError, RecipeError, RecipeFinder, RecipeSession,
};
use std::time::Duration;
use tokio::time::sleep;

/// Answers slowly for queries mentioning "slow" and fails for "broken"
struct DelayedProvider;

#[async_trait]
impl LlmProvider for DelayedProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn generate(&self, _api_key: &str, prompt: &str) -> Result<String, ProviderError> {
        let delay = if prompt.contains("slow") { 100 } else { 10 };
        sleep(Duration::from_millis(delay)).await;

        if prompt.contains("broken") {
            return Err(ProviderError::Api {
                status: 503,
                message: "overloaded".to_string(),
            });
        }

        let dish = if prompt.contains("soup") { "soup" } else { "salad" };
        Ok(format!("🍽️ Ingredients:\n{}", dish))
    }
}

fn session() -> RecipeSession {
    RecipeSession::new(RecipeFinder::new(
        Box::new(DelayedProvider),
        Some("test-key".to_string()),
    ))
}

fn body(result: Result<Classification, RecipeError>) -> String {
    match result {
        Ok(Classification::Recipe(recipe)) => recipe.into_body(),
        other => panic!("expected a recipe, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_sequential_searches_both_complete() {
    let session = session();

    assert!(body(session.search("slow soup").await).ends_with("soup"));
    assert!(body(session.search("salad").await).ends_with("salad"));
}

#[tokio::test(start_paused = true)]
async fn test_newer_search_supersedes_older() {
    let session = session();

    let (first, second) = tokio::join!(session.search("slow soup"), session.search("salad"));

    assert!(matches!(first, Err(RecipeError::Superseded)));
    assert!(body(second).ends_with("salad"));
}

#[tokio::test(start_paused = true)]
async fn test_stale_failure_is_also_dropped() {
    let session = session();

    let (first, second) = tokio::join!(
        session.search("slow broken soup"),
        session.search("salad")
    );

    assert!(matches!(first, Err(RecipeError::Superseded)));
    assert!(second.is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_reset_drops_in_flight_result() {
    let session = session();

    let (result, _) = tokio::join!(session.search("slow soup"), async {
        sleep(Duration::from_millis(20)).await;
        session.reset();
    });

    assert!(matches!(result, Err(RecipeError::Superseded)));
}

#[tokio::test(start_paused = true)]
async fn test_invalid_query_does_not_supersede() {
    let session = session();

    let (first, second) = tokio::join!(session.search("slow soup"), async {
        sleep(Duration::from_millis(20)).await;
        session.search("   ").await
    });

    assert!(body(first).ends_with("soup"));
    assert!(matches!(second, Err(RecipeError::EmptyQuery)));
}

#[test]
fn test_tokens_are_invalidated_in_order() {
    let session = session();

    let first = session.begin();
    assert!(session.is_current(first));

    let second = session.begin();
    assert!(!session.is_current(first));
    assert!(session.is_current(second));

    session.reset();
    assert!(!session.is_current(second));
}
