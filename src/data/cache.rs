//! Table Cache
//!
//! Memoizes the loaded table for the lifetime of the owning application
//! state. The cache key is the source path plus its modification time, so
//! repeated loads of an unchanged file return the same `Arc`.

use super::error::{LoadError, LoadResult};
use super::loader::CsvLoader;
use super::types::SalesTable;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

/// Identity of one load: which file, as of which modification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadKey {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
}

impl LoadKey {
    /// Compute the key for the current state of `path`
    pub fn current(path: &Path) -> LoadResult<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            modified: metadata.modified().ok(),
        })
    }
}

/// Memoizing loader for a single configured file
pub struct TableCache {
    path: PathBuf,
    loader: CsvLoader,
    entry: RwLock<Option<(LoadKey, Arc<SalesTable>)>>,
}

impl TableCache {
    /// Create an empty cache for `path`
    pub fn new(path: impl Into<PathBuf>, loader: CsvLoader) -> Self {
        Self {
            path: path.into(),
            loader,
            entry: RwLock::new(None),
        }
    }

    /// Path of the source file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the table, reading the file only when the key changed
    pub fn load(&self) -> LoadResult<Arc<SalesTable>> {
        let key = LoadKey::current(&self.path)?;

        {
            let entry = self
                .entry
                .read()
                .map_err(|e| LoadError::Lock(e.to_string()))?;
            if let Some((cached_key, table)) = entry.as_ref() {
                if *cached_key == key {
                    return Ok(Arc::clone(table));
                }
            }
        }

        let mut entry = self
            .entry
            .write()
            .map_err(|e| LoadError::Lock(e.to_string()))?;

        // Another caller may have loaded while we waited for the write lock
        if let Some((cached_key, table)) = entry.as_ref() {
            if *cached_key == key {
                return Ok(Arc::clone(table));
            }
        }

        if entry.is_some() {
            tracing::info!(path = %self.path.display(), "Source file changed, reloading");
        }

        let table = Arc::new(self.loader.load(&self.path)?);
        *entry = Some((key, Arc::clone(&table)));
        Ok(table)
    }

    /// Whether a table is currently memoized
    pub fn is_loaded(&self) -> bool {
        self.entry.read().map(|e| e.is_some()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::tempdir;

    const HEADER: &str =
        "date,product,quantity,unit_price,unit_cost,payment_method,rating,location,latitude,longitude\n";

    fn write_csv(path: &Path, rows: &str) {
        let mut file = std::fs::File::create(path).unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        file.write_all(rows.as_bytes()).unwrap();
    }

    #[test]
    fn test_repeated_load_returns_same_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        write_csv(&path, "2024-01-01,ipa,2,10,4,pix,5,A,1,2\n");

        let cache = TableCache::new(&path, CsvLoader::new());
        assert!(!cache.is_loaded());

        let first = cache.load().unwrap();
        let second = cache.load().unwrap();

        assert!(cache.is_loaded());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.records, second.records);
    }

    #[test]
    fn test_changed_file_is_reloaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        write_csv(&path, "2024-01-01,ipa,2,10,4,pix,5,A,1,2\n");

        let cache = TableCache::new(&path, CsvLoader::new());
        let first = cache.load().unwrap();
        assert_eq!(first.len(), 1);

        write_csv(
            &path,
            "2024-01-01,ipa,2,10,4,pix,5,A,1,2\n2024-01-02,lager,1,8,3,card,4,B,3,4\n",
        );
        let later = SystemTime::now() + Duration::from_secs(60);
        std::fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(later)
            .unwrap();

        let second = cache.load().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = tempdir().unwrap();
        let cache = TableCache::new(dir.path().join("absent.csv"), CsvLoader::new());
        assert!(matches!(cache.load(), Err(LoadError::Io { .. })));
        assert!(!cache.is_loaded());
    }
}
