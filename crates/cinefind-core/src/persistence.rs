//! Search history, search counter, theme and session scratch space.
//!
//! Every access is best-effort: backend and decode failures are logged and
//! degrade to empty/absent values. Nothing here returns an error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::Theme;
use crate::storage::KeyValueStore;

pub const HISTORY_KEY: &str = "movieSearchHistory";
pub const TOTAL_SEARCHES_KEY: &str = "totalSearches";
pub const THEME_KEY: &str = "theme";
/// Ephemeral key holding the last submitted query.
pub const LAST_QUERY_KEY: &str = "lastQuery";

pub const MAX_HISTORY_ITEMS: usize = 10;

/// Durable + per-session storage for the app.
pub struct PersistenceStore {
    durable: Box<dyn KeyValueStore>,
    ephemeral: Box<dyn KeyValueStore>,
    max_history: usize,
}

impl PersistenceStore {
    pub fn new(durable: Box<dyn KeyValueStore>, ephemeral: Box<dyn KeyValueStore>) -> Self {
        Self {
            durable,
            ephemeral,
            max_history: MAX_HISTORY_ITEMS,
        }
    }

    /// Override the history cap (minimum 1).
    pub fn with_max_history(mut self, max: usize) -> Self {
        self.max_history = max.max(1);
        self
    }

    // ── History & counter ───────────────────────────────────────

    /// Record a submitted query: move it to the front of the history
    /// (replacing any case-insensitive duplicate), cap the list, bump the
    /// counter. Blank queries are ignored. Returns whether anything was recorded.
    pub fn record_search(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }

        let needle = query.to_lowercase();
        let mut history = self.history();
        history.retain(|item| item.to_lowercase() != needle);
        history.insert(0, query.to_string());
        history.truncate(self.max_history);

        match serde_json::to_string(&history) {
            Ok(json) => self.write_durable(HISTORY_KEY, &json),
            Err(e) => warn!("Failed to encode search history: {e}"),
        }

        let total = self.search_count().saturating_add(1);
        self.write_durable(TOTAL_SEARCHES_KEY, &total.to_string());
        debug!(query, total, "Recorded search");
        true
    }

    /// Persisted history, newest first. Absent or corrupt → empty.
    pub fn history(&self) -> Vec<String> {
        let Some(raw) = self.read_durable(HISTORY_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(history) => history,
            Err(e) => {
                warn!("Discarding malformed search history: {e}");
                Vec::new()
            }
        }
    }

    /// Drop the history. The counter is untouched.
    pub fn clear_history(&mut self) -> Vec<String> {
        if let Err(e) = self.durable.remove(HISTORY_KEY) {
            warn!("Failed to clear search history: {e}");
        }
        Vec::new()
    }

    /// Total submitted searches. Absent or malformed → 0.
    pub fn search_count(&self) -> u64 {
        self.read_durable(TOTAL_SEARCHES_KEY)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0)
    }

    // ── Theme ───────────────────────────────────────────────────

    /// Persisted theme, or `default` when absent/unrecognised.
    pub fn theme(&self, default: Theme) -> Theme {
        self.read_durable(THEME_KEY)
            .and_then(|raw| Theme::from_str_opt(raw.trim()))
            .unwrap_or(default)
    }

    /// Whether a theme has been persisted at all.
    pub fn has_theme(&self) -> bool {
        self.read_durable(THEME_KEY).is_some()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.write_durable(THEME_KEY, theme.as_str());
    }

    // ── Ephemeral ───────────────────────────────────────────────

    /// JSON-encode `value` into the session store. Failures are logged.
    pub fn put_ephemeral<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, "Failed to encode session value: {e}");
                return;
            }
        };
        if let Err(e) = self.ephemeral.set(key, &json) {
            warn!(key, "Failed to write session value: {e}");
        }
    }

    /// Decode a session value. Absent, unreadable or undecodable → `None`.
    pub fn get_ephemeral<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.ephemeral.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key, "Failed to read session value: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, "Failed to decode session value: {e}");
                None
            }
        }
    }

    // ── Helpers ─────────────────────────────────────────────────

    fn read_durable(&self, key: &str) -> Option<String> {
        match self.durable.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, "Failed to read storage: {e}");
                None
            }
        }
    }

    fn write_durable(&mut self, key: &str, value: &str) {
        if let Err(e) = self.durable.set(key, value) {
            warn!(key, "Failed to write storage: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStore;

    fn store() -> PersistenceStore {
        PersistenceStore::new(Box::new(MemoryStore::new()), Box::new(MemoryStore::new()))
    }

    fn store_with(durable: MemoryStore) -> PersistenceStore {
        PersistenceStore::new(Box::new(durable), Box::new(MemoryStore::new()))
    }

    /// Backend where every operation fails, like disabled browser storage.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Rejected("quota exceeded".into()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }
    }

    #[test]
    fn test_blank_query_is_ignored() {
        let mut s = store();
        for q in ["", "   ", "\t\n"] {
            assert!(!s.record_search(q));
        }
        assert!(s.history().is_empty());
        assert_eq!(s.search_count(), 0);
    }

    #[test]
    fn test_record_trims_and_prepends() {
        let mut s = store();
        s.record_search("  batman ");
        s.record_search("alien");
        assert_eq!(s.history(), vec!["alien", "batman"]);
        assert_eq!(s.search_count(), 2);
    }

    #[test]
    fn test_case_insensitive_duplicate_is_replaced() {
        let mut s = store();
        s.record_search("batman");
        assert_eq!(s.history(), vec!["batman"]);
        assert_eq!(s.search_count(), 1);

        s.record_search("Batman");
        assert_eq!(s.history(), vec!["Batman"]);
        assert_eq!(s.search_count(), 2);
    }

    #[test]
    fn test_history_is_capped() {
        let mut s = store();
        for i in 0..15 {
            s.record_search(&format!("query {i}"));
        }
        let history = s.history();
        assert_eq!(history.len(), MAX_HISTORY_ITEMS);
        assert_eq!(history[0], "query 14");
        assert_eq!(history[9], "query 5");
        assert_eq!(s.search_count(), 15);
    }

    #[test]
    fn test_custom_cap() {
        let mut s = store().with_max_history(2);
        s.record_search("a");
        s.record_search("b");
        s.record_search("c");
        assert_eq!(s.history(), vec!["c", "b"]);
    }

    #[test]
    fn test_clear_keeps_counter() {
        let mut s = store();
        s.record_search("a");
        s.record_search("b");
        assert!(s.clear_history().is_empty());
        assert!(s.history().is_empty());
        assert_eq!(s.search_count(), 2);
    }

    #[test]
    fn test_corrupt_values_fail_closed() {
        let mut durable = MemoryStore::new();
        durable.set(HISTORY_KEY, "[\"unterminated").unwrap();
        durable.set(TOTAL_SEARCHES_KEY, "twelve").unwrap();
        durable.set(THEME_KEY, "sepia").unwrap();
        let mut s = store_with(durable);

        assert!(s.history().is_empty());
        assert_eq!(s.search_count(), 0);
        assert_eq!(s.theme(Theme::Dark), Theme::Dark);

        // Recording over a corrupt value starts fresh.
        s.record_search("dune");
        assert_eq!(s.history(), vec!["dune"]);
        assert_eq!(s.search_count(), 1);
    }

    #[test]
    fn test_broken_backend_degrades_silently() {
        let mut s = PersistenceStore::new(Box::new(BrokenStore), Box::new(BrokenStore));
        assert!(s.record_search("batman"));
        assert!(s.history().is_empty());
        assert_eq!(s.search_count(), 0);
        assert!(s.clear_history().is_empty());

        s.put_ephemeral("k", &42);
        assert_eq!(s.get_ephemeral::<i32>("k"), None);
        assert_eq!(s.theme(Theme::Light), Theme::Light);
    }

    #[test]
    fn test_theme_persists() {
        let mut s = store();
        assert!(!s.has_theme());
        assert_eq!(s.theme(Theme::Light), Theme::Light);
        s.set_theme(Theme::Dark);
        assert!(s.has_theme());
        assert_eq!(s.theme(Theme::Light), Theme::Dark);
    }

    #[test]
    fn test_ephemeral_roundtrip_and_decode_failure() {
        let mut s = store();
        s.put_ephemeral(LAST_QUERY_KEY, "batman");
        assert_eq!(
            s.get_ephemeral::<String>(LAST_QUERY_KEY).as_deref(),
            Some("batman")
        );
        assert_eq!(s.get_ephemeral::<String>("missing"), None);
        // Stored as a string, asked for as a number.
        assert_eq!(s.get_ephemeral::<u32>(LAST_QUERY_KEY), None);
    }
}
