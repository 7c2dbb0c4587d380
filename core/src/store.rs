use alloc::borrow::ToOwned;
use alloc::string::{String, ToString};
use hashbrown::HashMap;

use crate::*;

/// Storage key of the persisted best score.
pub const BEST_SCORE_KEY: &str = "matchpairs:best-score:v1";

/// Minimal durable key-value capability.
pub trait Store {
    fn get(&self, key: &str) -> core::result::Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), StoreError>;
}

/// Volatile store, used by tests and headless runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> core::result::Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Reads the persisted best score. Missing, unreadable or corrupt records all read as `None`.
pub fn load_best_score(store: &impl Store) -> Option<GameScore> {
    let raw = match store.get(BEST_SCORE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            log::warn!("Failed to load best score: {}", err);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(score) => Some(score),
        Err(err) => {
            log::warn!("Ignoring corrupt best score {:?}: {}", raw, err);
            None
        }
    }
}

/// Overwrites the persisted best score. Failures are logged and otherwise ignored.
pub fn save_best_score(store: &mut impl Store, score: &GameScore) {
    let encoded = match serde_json::to_string(score) {
        Ok(encoded) => encoded,
        Err(err) => {
            log::error!("Failed to save best score: {}", StoreError::Serialize(err.to_string()));
            return;
        }
    };

    if let Err(err) = store.set(BEST_SCORE_KEY, &encoded) {
        log::error!("Failed to save best score: {}", err);
    }
}

/// Best score kept across sessions, backed by a [`Store`].
#[derive(Clone, Debug)]
pub struct ScoreBoard<S> {
    store: S,
    best: Option<GameScore>,
}

impl<S: Store> ScoreBoard<S> {
    pub fn load(store: S) -> Self {
        let best = load_best_score(&store);
        log::debug!("best score loaded: {:?}", best);
        Self { store, best }
    }

    pub fn best(&self) -> Option<&GameScore> {
        self.best.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records a finished game, persisting it when it beats the current best.
    /// Returns whether it became the new best.
    pub fn submit(&mut self, score: &GameScore) -> bool {
        let is_best = self.best.as_ref().is_none_or(|best| score.beats(best));
        if is_best {
            log::info!("new best score: {} moves in {}s", score.moves, score.time);
            save_best_score(&mut self.store, score);
            self.best = Some(score.clone());
        }
        is_best
    }
}
