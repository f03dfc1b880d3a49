use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::KeyValueStore;

/// File-backed key-value store: one UTF-8 JSON file per key.
///
/// Keys map directly to file names (`orders.table` becomes
/// `<root>/orders.table.json`), so keys are restricted to ASCII
/// alphanumerics plus `.`, `_` and `-`. Writes go through a temp file and
/// an atomic rename; a crash mid-write leaves the previous value intact.
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    /// Open (or create) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory this store writes into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

fn validate_key(key: &str) -> StoreResult<()> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

impl KeyValueStore for FileKvStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        // Temp-then-rename keeps the previous value readable if this
        // process dies mid-write.
        let tmp = self.root.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(key, bytes = value.len(), "kv write");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

impl std::fmt::Debug for FileKvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileKvStore").field("root", &self.root).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileKvStore::open(dir.path()).unwrap();
            store.write("clients.table", r#"[{"name":"Ana"}]"#).unwrap();
        }
        let store = FileKvStore::open(dir.path()).unwrap();
        assert_eq!(
            store.read("clients.table").unwrap().as_deref(),
            Some(r#"[{"name":"Ana"}]"#)
        );
    }

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::open(dir.path()).unwrap();
        assert!(store.read("orders.table").unwrap().is_none());
    }

    #[test]
    fn remove_deletes_the_file_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::open(dir.path()).unwrap();
        store.write("user.session", "{}").unwrap();
        assert!(store.remove("user.session").unwrap());
        assert!(!store.remove("user.session").unwrap());
        assert!(store.read("user.session").unwrap().is_none());
    }

    #[test]
    fn rejects_keys_that_do_not_map_to_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::open(dir.path()).unwrap();
        for bad in ["", "../escape", "a/b", "espa\u{f1}a"] {
            assert!(matches!(
                store.read(bad),
                Err(StoreError::InvalidKey(_))
            ));
        }
    }

    #[test]
    fn write_replaces_existing_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::open(dir.path()).unwrap();
        store.write("k.table", "[1]").unwrap();
        store.write("k.table", "[1,2]").unwrap();
        assert_eq!(store.read("k.table").unwrap().as_deref(), Some("[1,2]"));
    }
}
