//! redb-backed persistent cache storage.
//!
//! Keys are addressed as `"<namespace>:<key>"` strings rather than pure
//! content hashes, since the platform needs both its own reserved
//! bookkeeping namespace and arbitrary namespaces for node/task state.

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

const CACHE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("cache");

/// Namespace reserved for the platform's own bookkeeping (tool version,
/// build mode, and rule-manifest mtime fingerprint). Collaborators must not
/// write to this namespace.
pub const RESERVED_NAMESPACE: &str = ":make";

fn compose_key(namespace: &str, key: &str) -> String {
    format!("{namespace}:{key}")
}

/// Persistent key-value cache store, one database file per project.
pub struct CacheStorage {
    db: Database,
}

impl CacheStorage {
    /// Open or create a cache store at `<cache_dir>/cache.redb`.
    pub fn open(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)?;
        let db_path = cache_dir.join("cache.redb");
        let db = Database::create(&db_path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(CACHE_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Fetch and deserialize a value, returning `None` on a cache miss.
    pub fn get<T: DeserializeOwned>(&self, namespace: &str, key: &str) -> Result<Option<T>> {
        let full_key = compose_key(namespace, key);
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CACHE_TABLE)?;

        match table.get(full_key.as_str())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Serialize and store a value under `namespace:key`.
    pub fn set<T: Serialize>(&self, namespace: &str, key: &str, value: &T) -> Result<()> {
        let full_key = compose_key(namespace, key);
        let bytes = serde_json::to_vec(value)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CACHE_TABLE)?;
            table.insert(full_key.as_str(), bytes.as_slice())?;
        }
        write_txn.commit()?;

        Ok(())
    }

    /// Remove a single entry.
    pub fn remove(&self, namespace: &str, key: &str) -> Result<()> {
        let full_key = compose_key(namespace, key);
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(CACHE_TABLE)?;
            table.remove(full_key.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Whether `namespace:key` is present.
    pub fn contains(&self, namespace: &str, key: &str) -> Result<bool> {
        let full_key = compose_key(namespace, key);
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CACHE_TABLE)?;
        Ok(table.get(full_key.as_str())?.is_some())
    }

    /// Drop every entry, including the reserved `:make` bookkeeping
    /// namespace. Used when the cache is found stale.
    pub fn clear(&self) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            write_txn.delete_table(CACHE_TABLE)?;
            let _ = write_txn.open_table(CACHE_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(CACHE_TABLE)?;
        Ok(table.iter()?.count())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (CacheStorage, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = CacheStorage::open(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn open_creates_database_file() {
        let dir = TempDir::new().unwrap();
        let cache_dir = dir.path().join("cache");
        let _store = CacheStorage::open(&cache_dir).unwrap();
        assert!(cache_dir.join("cache.redb").exists());
    }

    #[test]
    fn get_is_none_on_miss() {
        let (store, _dir) = store();
        let value: Option<String> = store.get("nodes", "bundles/common").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let (store, _dir) = store();
        store.set("nodes", "bundles/common", &"built").unwrap();
        let value: Option<String> = store.get("nodes", "bundles/common").unwrap();
        assert_eq!(value, Some("built".to_string()));
    }

    #[test]
    fn namespaces_do_not_collide() {
        let (store, _dir) = store();
        store.set("a", "key", &1u32).unwrap();
        store.set("b", "key", &2u32).unwrap();
        assert_eq!(store.get::<u32>("a", "key").unwrap(), Some(1));
        assert_eq!(store.get::<u32>("b", "key").unwrap(), Some(2));
    }

    #[test]
    fn clear_removes_everything_including_reserved_namespace() {
        let (store, _dir) = store();
        store.set(RESERVED_NAMESPACE, "version", &"1.0.0").unwrap();
        store.set("nodes", "x", &true).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn remove_deletes_single_entry() {
        let (store, _dir) = store();
        store.set("nodes", "x", &true).unwrap();
        store.remove("nodes", "x").unwrap();
        assert!(!store.contains("nodes", "x").unwrap());
    }
}
