//! Key-value persistence for the player name and running scores.
//!
//! The store holds plain strings under three keys. Reads never fail the game:
//! a missing key or a value that does not parse reads as the empty/zero default.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::engine::models::{PersistedRecord, Session};

pub const KEY_PLAYER_NAME: &str = "playerName";
pub const KEY_PLAYER_SCORE: &str = "playerScore";
pub const KEY_COMPUTER_SCORE: &str = "computerScore";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {} is not a flat JSON object of strings: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A flat JSON object on disk, rewritten in full on every write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened store");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.entries).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

fn read_score(store: &dyn KeyValueStore, key: &str) -> u32 {
    store
        .get(key)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

/// Read the stored record, defaulting anything missing or malformed.
pub fn load_record(store: &dyn KeyValueStore) -> PersistedRecord {
    PersistedRecord {
        player_name: store.get(KEY_PLAYER_NAME).unwrap_or_default(),
        player_score: read_score(store, KEY_PLAYER_SCORE),
        computer_score: read_score(store, KEY_COMPUTER_SCORE),
    }
}

pub fn save_name(store: &mut dyn KeyValueStore, name: &str) -> Result<(), StoreError> {
    store.set(KEY_PLAYER_NAME, name)
}

pub fn save_scores(store: &mut dyn KeyValueStore, session: &Session) -> Result<(), StoreError> {
    store.set(KEY_PLAYER_SCORE, &session.player_score.to_string())?;
    store.set(KEY_COMPUTER_SCORE, &session.computer_score.to_string())
}

/// Reset the stored scores to zero. The name is kept.
pub fn clear_scores(store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
    save_scores(store, &Session::default())
}
