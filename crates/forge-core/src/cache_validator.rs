//! Cache invalidation: the on-disk cache is dropped whenever the tool
//! version, build mode, or rule-manifest mtimes it was built under no
//! longer match the current invocation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use forge_cache::{CacheStorage, RESERVED_NAMESPACE};
use serde::{Deserialize, Serialize};

use crate::error::Result;

const BOOKKEEPING_KEY: &str = "bookkeeping";

/// Mtime fingerprint for the set of rule-manifest files that contributed to
/// the current project config, keyed by path (as a string, for JSON
/// round-tripping).
pub type MakefileFingerprint = HashMap<String, u64>;

#[derive(Debug, Serialize, Deserialize)]
struct Bookkeeping {
    mode: String,
    version: String,
    makefiles: MakefileFingerprint,
}

/// Computes and compares the `:make` bookkeeping record against the current
/// invocation, deciding whether the whole cache must be dropped.
pub struct CacheValidator;

impl CacheValidator {
    /// Compute the current mtime fingerprint. Files that no longer exist are
    /// silently skipped — a removed makefile does not by itself invalidate
    /// the cache.
    pub fn fingerprint(makefile_paths: &[PathBuf]) -> MakefileFingerprint {
        let mut fingerprint = MakefileFingerprint::new();
        for path in makefile_paths {
            if let Some(mtime) = mtime_secs(path) {
                fingerprint.insert(path.to_string_lossy().into_owned(), mtime);
            }
        }
        fingerprint
    }

    /// Read-only: compare the stored bookkeeping against the current
    /// mode/version/fingerprint, clearing the entire store if anything is
    /// stale. Does *not* write a fresh bookkeeping record — that is
    /// `stamp`'s job, called from `save_cache`. Returns `true` if the cache
    /// was dropped.
    pub fn validate(
        storage: &CacheStorage,
        mode: &str,
        version: &str,
        makefile_paths: &[PathBuf],
    ) -> Result<bool> {
        let current_fingerprint = Self::fingerprint(makefile_paths);
        let stored: Option<Bookkeeping> = storage.get(RESERVED_NAMESPACE, BOOKKEEPING_KEY)?;

        let stale = match &stored {
            None => false,
            Some(bookkeeping) => {
                bookkeeping.mode != mode
                    || bookkeeping.version != version
                    || is_fingerprint_stale(&current_fingerprint, &bookkeeping.makefiles)
            }
        };

        if stale {
            storage.clear()?;
        }

        Ok(stale)
    }

    /// Write the current mode/version/fingerprint as the new bookkeeping
    /// record, unconditionally.
    pub fn stamp(
        storage: &CacheStorage,
        mode: &str,
        version: &str,
        makefile_paths: &[PathBuf],
    ) -> Result<()> {
        storage.set(
            RESERVED_NAMESPACE,
            BOOKKEEPING_KEY,
            &Bookkeeping {
                mode: mode.to_string(),
                version: version.to_string(),
                makefiles: Self::fingerprint(makefile_paths),
            },
        )
    }

    /// Wipe the entire cache store unconditionally, bookkeeping included.
    pub fn drop_cache(storage: &CacheStorage) -> Result<()> {
        storage.clear()
    }
}

fn is_fingerprint_stale(current: &MakefileFingerprint, stored: &MakefileFingerprint) -> bool {
    current.iter().any(|(path, mtime)| stored.get(path) != Some(mtime))
}

fn mtime_secs(path: &Path) -> Option<u64> {
    let metadata = std::fs::metadata(path).ok()?;
    let modified = metadata.modified().ok()?;
    modified.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs())
}
