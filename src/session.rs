//! Supersession of in-flight searches.
//!
//! A session hands out a new [`RequestToken`] for every search it starts.
//! Starting another search or calling [`RecipeSession::reset`] invalidates
//! the previous token, and a result that arrives for an invalidated token is
//! dropped instead of being shown.

use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};

use crate::error::RecipeError;
use crate::finder::RecipeFinder;
use crate::reply::Classification;

/// Identifies one search within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

pub struct RecipeSession {
    finder: RecipeFinder,
    generation: AtomicU64,
}

impl RecipeSession {
    pub fn new(finder: RecipeFinder) -> Self {
        RecipeSession {
            finder,
            generation: AtomicU64::new(0),
        }
    }

    pub fn finder(&self) -> &RecipeFinder {
        &self.finder
    }

    /// Start a new request, invalidating any earlier token
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `token` belongs to the most recent request
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }

    /// Drop whatever search is in flight
    pub fn reset(&self) {
        let token = self.begin();
        debug!("Session reset, now at request {}", token.0);
    }

    /// Run a search, discarding its result if a newer one started meanwhile.
    ///
    /// Queries that fail validation return their error without touching the
    /// in-flight search.
    pub async fn search(&self, query: &str) -> Result<Classification, RecipeError> {
        let request = self.finder.prepare(query)?;
        let token = self.begin();

        let result = self.finder.execute(request).await;

        if !self.is_current(token) {
            warn!("Dropping stale result for request {}", token.0);
            return Err(RecipeError::Superseded);
        }

        result
    }
}
