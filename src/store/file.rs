use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::KeyValueStore;
use crate::error::{AppError, Result};

/// Store persisted as a single JSON object file (`{"key": "value", ...}`).
///
/// The whole file is rewritten on every `set`/`remove`: the new contents go to a
/// sibling temp file which is then renamed over the original, so a crash leaves
/// either the old or the new file on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens (or creates) the store at `path`.
    ///
    /// A missing file is an empty store. A file that exists but is not a JSON
    /// object of strings is rejected rather than silently overwritten.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| {
                    AppError::InternalServerError(format!(
                        "store file {} is corrupted: {}",
                        path.display(),
                        e
                    ))
                })?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!("Opened file store at {} ({} keys)", path.display(), entries.len());

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::InternalServerError("file store lock poisoned".to_string()))
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries()?;
        let previous = entries.insert(key.to_owned(), value.to_owned());

        if let Err(e) = self.persist(&entries) {
            // Keep memory in line with disk
            match previous {
                Some(old) => entries.insert(key.to_owned(), old),
                None => entries.remove(key),
            };
            tracing::error!("Failed to persist key '{}': {}", key, e);
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries()?;
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };

        if let Err(e) = self.persist(&entries) {
            entries.insert(key.to_owned(), previous);
            tracing::error!("Failed to persist removal of '{}': {}", key, e);
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("store.json");

        {
            let store = FileStore::open(&path).unwrap();
            store.set("currentUser", "\"a@b.c\"").unwrap();
            store.set("users", "[]").unwrap();
            store.remove("users").unwrap();
        }

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("currentUser").unwrap().as_deref(),
            Some("\"a@b.c\"")
        );
        assert_eq!(reopened.get("users").unwrap(), None);
    }

    #[test]
    fn corrupted_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let result = FileStore::open(&path);
        assert!(matches!(result, Err(AppError::InternalServerError(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn failed_write_keeps_old_value_in_memory_and_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let store = FileStore::open(&path).unwrap();
        store.set("users", "[1]").unwrap();
        let on_disk = fs::read(&path).unwrap();

        // A directory where the temp file goes makes every persist fail
        fs::create_dir(path.with_extension("json.tmp")).unwrap();

        assert!(store.set("users", "[1,2]").is_err());
        assert!(store.set("auditLog", "[]").is_err());
        assert!(store.remove("users").is_err());

        assert_eq!(store.get("users").unwrap().as_deref(), Some("[1]"));
        assert_eq!(store.get("auditLog").unwrap(), None);
        assert_eq!(fs::read(&path).unwrap(), on_disk);
    }
}
