/// The instruction template sent to the language model.
///
/// The template is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax. It contains a single `{query}` placeholder.
pub const RECIPE_PROMPT_TEMPLATE: &str = include_str!("prompt.txt");

const QUERY_PLACEHOLDER: &str = "{query}";

/// Build the prompt for a user query.
///
/// The query is embedded verbatim. Callers reject empty queries before
/// getting here, see [`crate::RecipeFinder::prepare`].
pub fn build_prompt(query: &str) -> String {
    // replacen on the template only, so braces inside the query are never re-expanded
    RECIPE_PROMPT_TEMPLATE.replacen(QUERY_PLACEHOLDER, query, 1)
}
