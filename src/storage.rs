use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::{AppError, Result};

/// The storage key holding the session token.
pub const USER_TOKEN_KEY: &str = "userToken";
/// The storage key holding the session role.
pub const USER_ROLE_KEY: &str = "userRole";

/// Durable string key/value storage scoped to this client.
///
/// Every write goes straight through to the backing file so a later process
/// sees the same session. Without a path the values live only in memory.
#[derive(Debug)]
pub struct LocalStorage {
    path: Option<PathBuf>,
    items: Mutex<BTreeMap<String, String>>,
}

impl LocalStorage {
    /// Opens the storage file at `path`, starting empty if it does not exist yet.
    ///
    /// # Arguments
    ///
    /// * `path` - The JSON file backing the storage.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `LocalStorage`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let items = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                sonic_rs::from_str(&raw).map_err(|e| {
                    AppError::Storage(format!("corrupt storage file {}: {}", path.display(), e))
                })?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!("📦 Local storage opened at {}", path.display());

        Ok(Self {
            path: Some(path),
            items: Mutex::new(items),
        })
    }

    /// Creates storage that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            items: Mutex::new(BTreeMap::new()),
        }
    }

    /// Returns the value stored under `key`.
    pub fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Stores `value` under `key` and persists the storage.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value.to_string());
        self.persist(&items)
    }

    /// Removes `key` and persists the storage.
    pub fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        if items.remove(key).is_some() {
            self.persist(&items)?;
        }
        Ok(())
    }

    fn persist(&self, items: &BTreeMap<String, String>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        ensure_parent(path)?;
        let json = sonic_rs::to_string(items)
            .map_err(|e| AppError::Storage(format!("storage serialization failed: {}", e)))?;
        fs::write(path, json)?;
        Ok(())
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {}", parent.display(), e);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = LocalStorage::open(&path).unwrap();
        storage.set_item(USER_TOKEN_KEY, "MOCK_ADMIN_TOKEN").unwrap();
        storage.set_item(USER_ROLE_KEY, "admin").unwrap();
        drop(storage);

        let reopened = LocalStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item(USER_TOKEN_KEY).as_deref(), Some("MOCK_ADMIN_TOKEN"));
        assert_eq!(reopened.get_item(USER_ROLE_KEY).as_deref(), Some("admin"));
    }

    #[test]
    fn remove_deletes_key() {
        let storage = LocalStorage::in_memory();
        storage.set_item(USER_TOKEN_KEY, "t").unwrap();
        storage.remove_item(USER_TOKEN_KEY).unwrap();
        assert_eq!(storage.get_item(USER_TOKEN_KEY), None);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(LocalStorage::open(&path), Err(AppError::Storage(_))));
    }
}
