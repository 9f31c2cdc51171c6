//! Prompt history
//!
//! Keeps the most recent successful prompts, newest first, with a star flag
//! per entry. Every change is written straight back to the preference store
//! as a full snapshot.
//!
//! Features:
//! - Duplicate submissions (same trimmed text) are recorded once
//! - Capped length; the oldest entry is evicted whether starred or not
//! - Star/delete by id; unknown ids are ignored
//! - Corrupt snapshots load as an empty history

use crate::store::{StoreHandle, KEY_HISTORY};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// A previously submitted prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Millisecond timestamp of creation, bumped if needed to stay unique
    pub id: i64,
    /// Trimmed, never empty
    pub text: String,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub starred: bool,
}

impl HistoryEntry {
    /// e.g. "3/14/2025 at 09:26:53"
    pub fn formatted_date(&self) -> String {
        let local = self.created_at.with_timezone(&Local);
        format!("{} at {}", local.format("%-m/%-d/%Y"), local.format("%H:%M:%S"))
    }

    /// Format as "just now", "5m ago", "3h ago", "2d ago"
    pub fn relative_time(&self) -> String {
        let seconds = Utc::now()
            .signed_duration_since(self.created_at)
            .num_seconds()
            .max(0);

        if seconds < 60 {
            "just now".to_string()
        } else if seconds < 3600 {
            format!("{}m ago", seconds / 60)
        } else if seconds < 86400 {
            format!("{}h ago", seconds / 3600)
        } else if seconds < 604800 {
            format!("{}d ago", seconds / 86400)
        } else {
            format!("{}w ago", seconds / 604800)
        }
    }
}

pub struct HistoryManager {
    /// Most recent first
    entries: Vec<HistoryEntry>,
    limit: usize,
    store: StoreHandle,
}

impl HistoryManager {
    /// Load the persisted snapshot; missing or corrupt data yields an empty history.
    pub fn load(store: StoreHandle, limit: usize) -> Self {
        let mut entries: Vec<HistoryEntry> = store.lock().get(KEY_HISTORY).unwrap_or_default();
        entries.truncate(limit);
        Self {
            entries,
            limit,
            store,
        }
    }

    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: i64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a prompt. Returns `false` if it was blank or already present.
    pub fn add(&mut self, text: &str) -> bool {
        self.add_at(text, Utc::now())
    }

    pub fn add_at(&mut self, text: &str, now: DateTime<Utc>) -> bool {
        let text = text.trim();
        if text.is_empty() || self.entries.iter().any(|e| e.text == text) {
            debug!("history unchanged for {:?}", text);
            return false;
        }

        // Ids come from the clock but must stay unique when two adds share a millisecond.
        let newest = self.entries.iter().map(|e| e.id).max().unwrap_or(i64::MIN);
        let id = now.timestamp_millis().max(newest.saturating_add(1));

        self.entries.insert(
            0,
            HistoryEntry {
                id,
                text: text.to_string(),
                created_at: now,
                starred: false,
            },
        );
        self.entries.truncate(self.limit);
        self.persist();
        true
    }

    /// Flip the star on an entry. Returns `false` if the id is unknown.
    pub fn toggle_star(&mut self, id: i64) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        entry.starred = !entry.starred;
        self.persist();
        true
    }

    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Empty the history. Callers confirm with the user first.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    fn persist(&self) {
        self.store.lock().set(KEY_HISTORY, &self.entries);
    }
}
