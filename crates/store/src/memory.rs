//! In-memory token store backed by an `ArcSwapOption`.

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use meowseek_types::{OAuthToken, TokenStore, traits::Result};
use std::sync::Arc;

/// A process-lifetime [`TokenStore`]. Saving swaps the whole token in one step.
pub struct MemoryTokenStore {
    current: ArcSwapOption<OAuthToken>,
}

impl MemoryTokenStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: ArcSwapOption::empty(),
        }
    }

    /// Creates a store pre-populated with `token`.
    #[must_use]
    pub fn with_token(token: OAuthToken) -> Self {
        Self {
            current: ArcSwapOption::from_pointee(token),
        }
    }

    /// Returns a snapshot of the current token without cloning it.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<OAuthToken>> {
        self.current.load_full()
    }

    /// Atomically publishes `token`.
    pub fn replace(&self, token: OAuthToken) {
        self.current.store(Some(Arc::new(token)));
    }
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<OAuthToken>> {
        Ok(self.snapshot().map(|t| (*t).clone()))
    }

    async fn save(&self, token: &OAuthToken) -> Result<()> {
        self.replace(token.clone());
        Ok(())
    }
}
