use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::memory::InMemoryKvStore;
use crate::traits::KeyValueStore;

/// Fail-soft gateway between typed tables and a [`KeyValueStore`] backend.
///
/// This is the only face of persistence the layers above ever see, and it
/// never fails: backend errors and malformed data degrade to a safe
/// default (reads come back absent or empty, writes and removes become
/// no-ops) and are logged for diagnostics. The adapter owns no state of
/// its own; it is a stateless gateway consulted synchronously on every
/// repository call.
///
/// Cloning is cheap and clones share the same backend.
#[derive(Clone)]
pub struct StoreAdapter {
    backend: Arc<dyn KeyValueStore>,
}

impl StoreAdapter {
    /// Wrap a backend.
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Adapter over a fresh [`InMemoryKvStore`].
    pub fn in_memory() -> Self {
        Self::new(InMemoryKvStore::new())
    }

    /// Read the JSON array stored at `key`. Absent, unreadable, or
    /// malformed entries all come back as an empty collection.
    pub fn read_table<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.read_json(key).unwrap_or_default()
    }

    /// Replace the JSON array stored at `key` with `rows`.
    pub fn write_table<T: Serialize>(&self, key: &str, rows: &[T]) {
        self.write_json(key, &rows);
    }

    /// Read the single JSON object stored at `key`, if present and intact.
    pub fn read_record<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.read_json(key)
    }

    /// Replace the single JSON object stored at `key`.
    pub fn write_record<T: Serialize>(&self, key: &str, record: &T) {
        self.write_json(key, record);
    }

    /// Remove the entry at `key`, if any.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            warn!(key, error = %e, "kv remove failed; entry may linger");
        }
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.read(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key, error = %e, "kv read failed; treating as absent");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "stored value is malformed; treating as absent");
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "serialization failed; value not persisted");
                return;
            }
        };
        if let Err(e) = self.backend.write(key, &raw) {
            warn!(key, error = %e, "kv write failed; value not persisted");
        }
    }
}

impl std::fmt::Debug for StoreAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreAdapter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, StoreResult};

    /// Backend whose every operation fails, for exercising the fail-soft
    /// policy.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn read(&self, _key: &str) -> StoreResult<Option<String>> {
            Err(StoreError::Serialization("backend down".into()))
        }
        fn write(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Serialization("backend down".into()))
        }
        fn remove(&self, _key: &str) -> StoreResult<bool> {
            Err(StoreError::Serialization("backend down".into()))
        }
    }

    #[test]
    fn table_round_trip() {
        let adapter = StoreAdapter::in_memory();
        adapter.write_table("names.table", &["ana".to_string(), "luis".to_string()]);
        let names: Vec<String> = adapter.read_table("names.table");
        assert_eq!(names, vec!["ana", "luis"]);
    }

    #[test]
    fn absent_table_reads_empty() {
        let adapter = StoreAdapter::in_memory();
        let rows: Vec<String> = adapter.read_table("nothing.table");
        assert!(rows.is_empty());
    }

    #[test]
    fn malformed_table_degrades_to_empty() {
        let backend = InMemoryKvStore::new();
        backend.write("bad.table", "{ not json").unwrap();
        let adapter = StoreAdapter::new(backend);
        let rows: Vec<String> = adapter.read_table("bad.table");
        assert!(rows.is_empty());
    }

    #[test]
    fn record_round_trip_and_remove() {
        let adapter = StoreAdapter::in_memory();
        adapter.write_record("user.session", &"ana".to_string());
        assert_eq!(
            adapter.read_record::<String>("user.session").as_deref(),
            Some("ana")
        );
        adapter.remove("user.session");
        assert!(adapter.read_record::<String>("user.session").is_none());
    }

    #[test]
    fn broken_backend_never_panics_or_errors() {
        let adapter = StoreAdapter::new(BrokenStore);
        adapter.write_table("t.table", &["x".to_string()]);
        let rows: Vec<String> = adapter.read_table("t.table");
        assert!(rows.is_empty());
        adapter.remove("t.table");
    }

    #[test]
    fn clones_share_the_backend() {
        let adapter = StoreAdapter::in_memory();
        let other = adapter.clone();
        adapter.write_record("k", &1u32);
        assert_eq!(other.read_record::<u32>("k"), Some(1));
    }
}
