//! Explicit session registry
//!
//! Owns the mapping from connection key to live session. Sessions are
//! created on first sight of a key and evicted on disconnect or reset;
//! nothing here persists across process restarts.

use crate::handler::HybridTurnHandler;
use std::collections::HashMap;

#[derive(Default)]
pub struct SessionStore {
    sessions: HashMap<String, HybridTurnHandler>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh opaque session key for transports that don't bring their own.
    pub fn generate_key() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    pub fn get_or_create(&mut self, key: &str) -> &mut HybridTurnHandler {
        self.sessions
            .entry(key.to_string())
            .or_insert_with(|| HybridTurnHandler::new(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut HybridTurnHandler> {
        self.sessions.get_mut(key)
    }

    /// Remove a session. Returns whether one existed.
    pub fn evict(&mut self, key: &str) -> bool {
        let existed = self.sessions.remove(key).is_some();
        if existed {
            tracing::info!(session = %key, "session evicted");
        }
        existed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_get_and_evict() {
        let mut store = SessionStore::new();
        assert!(store.is_empty());
        assert!(store.get_mut("conn-1").is_none());

        store.get_or_create("conn-1");
        store.get_or_create("conn-2");
        assert_eq!(store.len(), 2);
        assert!(store.get_mut("conn-1").is_some());

        assert!(store.evict("conn-1"));
        assert!(!store.evict("conn-1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_or_create_is_stable_per_key() {
        let mut store = SessionStore::new();
        store.get_or_create("conn-1").finish_streamed_turn("hello");
        // Same key must come back with its history intact.
        assert_eq!(
            store.get_or_create("conn-1").history().last_assistant(),
            Some("hello")
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn generated_keys_are_unique() {
        assert_ne!(SessionStore::generate_key(), SessionStore::generate_key());
    }
}
