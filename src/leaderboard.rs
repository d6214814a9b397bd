use std::time::{SystemTime, UNIX_EPOCH};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::KeyValueStore;

pub const STORAGE_KEY: &str = "snake_highscores";
pub const MAX_NAME_CHARS: usize = 20;
pub const SHOWN_ENTRIES: usize = 10;
pub const DEFAULT_NAME: &str = "Guest";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Entry {
    pub name: String,
    pub score: u32,
    /// Milliseconds since the Unix epoch.
    #[serde(rename = "ts")]
    pub timestamp: u64,
}

/// Persisted high scores. The whole list lives under a single store key and
/// is rewritten on every change.
pub struct Leaderboard<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Leaderboard<S> {
    pub fn new(store: S) -> Self {
        Leaderboard { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored entries in insertion order. Missing or unreadable data is an empty list.
    pub fn load(&self) -> Vec<Entry> {
        let raw = match self.store.get(STORAGE_KEY) {
            Some(raw) => raw,
            None => return vec![],
        };
        match serde_json::from_str::<Option<Vec<Entry>>>(&raw) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                warn!("ignoring stored high scores: {}", e);
                vec![]
            }
        }
    }

    pub fn save(&mut self, entries: &[Entry]) -> Result<()> {
        let encoded = serde_json::to_string(entries)?;
        self.store.set(STORAGE_KEY, &encoded)
    }

    pub fn submit(&mut self, name: &str, score: u32) -> Result<Vec<String>> {
        self.submit_at(name, score, now_millis())
    }

    pub fn submit_at(&mut self, name: &str, score: u32, timestamp: u64) -> Result<Vec<String>> {
        let name = clean_name(name);
        info!("recording {} points for {}", score, name);

        let mut entries = self.load();
        entries.push(Entry { name, score, timestamp });
        self.save(&entries)?;
        Ok(self.render())
    }

    /// Best entries first, at most [`SHOWN_ENTRIES`]. Ties keep insertion order.
    pub fn top(&self) -> Vec<Entry> {
        let mut entries = self.load();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(SHOWN_ENTRIES);
        entries
    }

    pub fn render(&self) -> Vec<String> {
        self.top()
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("{}. {} — {}", i + 1, entry.name, entry.score))
            .collect()
    }

    pub fn clear(&mut self) -> Result<Vec<String>> {
        self.store.remove(STORAGE_KEY)?;
        info!("cleared high scores");
        Ok(self.render())
    }
}

fn clean_name(name: &str) -> String {
    let trimmed = name.trim();
    let name = if trimmed.is_empty() { DEFAULT_NAME } else { trimmed };
    name.chars().take(MAX_NAME_CHARS).collect()
}

fn now_millis() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}
