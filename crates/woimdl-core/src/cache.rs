//! File-backed page cache: one plain-text document per key.
//!
//! Read failures are indistinguishable from cache misses; write failures are
//! loud, since losing cache writes silently would cost every later run a
//! re-fetch. Writes go through a `.part` temp file, fsync, and atomic rename
//! so a partial document is never visible to a subsequent read.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error from a failed cache write. Callers propagate this; the cache
/// directory is broken and the operator has to fix it.
#[derive(Debug, Error)]
#[error("cache write failed for key '{key}': {source}")]
pub struct CacheWriteError {
    pub key: String,
    #[source]
    pub source: io::Error,
}

/// Content-addressed text store under a single directory.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage path for `key`. Characters that could be interpreted as path
    /// components are replaced, so a key can never escape the cache dir.
    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| match c {
                'A'..='Z' | 'a'..='z' | '0'..='9' | '_' | '-' | '.' => c,
                _ => '_',
            })
            .collect();
        let safe = safe.trim_matches('.').to_string();
        self.dir.join(safe)
    }

    pub fn exists(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    /// Cached document for `key`, or `None` on miss or unreadable file.
    pub fn read(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => {
                tracing::info!("cache loaded: {key}");
                Some(text)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("cache unreadable for {key}: {e}");
                None
            }
        }
    }

    /// Persists `text` under `key`, creating or overwriting. Durable before
    /// returning.
    pub fn write(&self, key: &str, text: &str) -> Result<(), CacheWriteError> {
        self.write_inner(key, text).map_err(|source| CacheWriteError {
            key: key.to_string(),
            source,
        })?;
        tracing::info!("cache updated: {key}");
        Ok(())
    }

    fn write_inner(&self, key: &str, text: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let final_path = self.path_for(key);
        let temp_path = temp_path(&final_path);

        let mut file = fs::File::create(&temp_path)?;
        file.write_all(text.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &final_path)
    }
}

/// Temp path for an in-progress write: appends `.part` to the final path.
fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(".part");
    PathBuf::from(o)
}
