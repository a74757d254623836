//! Saved city per chat user, backed by a JSON file.

use std::{
    collections::BTreeMap,
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Owns the locations file; nothing else reads or writes it.
#[derive(Debug)]
pub struct LocationStore {
    path: PathBuf,
    locations: Mutex<BTreeMap<String, String>>,
}

impl LocationStore {
    /// Load the mapping from `path`. A missing file means an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();

        let locations = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|source| {
                PersistenceError::Parse {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: path.clone(),
                    source,
                });
            }
        };

        info!(path = %path.display(), users = locations.len(), "loaded saved locations");

        Ok(Self {
            path,
            locations: Mutex::new(locations),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, user_id: &str) -> Option<String> {
        self.locations.lock().get(user_id).cloned()
    }

    /// Save `city` for `user_id` and rewrite the file before returning.
    ///
    /// The in-memory value is updated even when the write fails. The write
    /// is blocking and runs on the caller's thread; the file holds one short
    /// line per user.
    pub fn set(&self, user_id: &str, city: &str) -> Result<(), PersistenceError> {
        let mut locations = self.locations.lock();
        locations.insert(user_id.to_string(), city.to_string());

        // Lock stays held through the write so concurrent saves never interleave.
        self.persist(&locations)
    }

    pub fn len(&self) -> usize {
        self.locations.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn persist(&self, locations: &BTreeMap<String, String>) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(locations).map_err(PersistenceError::Serialize)?;

        let tmp = tmp_path(&self.path);
        let write_err = |source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        };

        fs::write(&tmp, json).map_err(write_err)?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(source));
        }

        debug!(path = %self.path.display(), users = locations.len(), "saved locations");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};

    fn store_in(dir: &tempfile::TempDir) -> LocationStore {
        LocationStore::open(dir.path().join("locations.json")).unwrap()
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.is_empty());
        assert_eq!(store.get("42"), None);
    }

    #[test]
    fn set_then_get_returns_new_city() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set("42", "Toronto").unwrap();
        assert_eq!(store.get("42").as_deref(), Some("Toronto"));

        store.set("42", "Montreal").unwrap();
        assert_eq!(store.get("42").as_deref(), Some("Montreal"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn users_do_not_affect_each_other() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set("alice", "Oslo").unwrap();
        store.set("bob", "Lima").unwrap();
        store.set("alice", "Bergen").unwrap();

        assert_eq!(store.get("bob").as_deref(), Some("Lima"));
        assert_eq!(store.get("alice").as_deref(), Some("Bergen"));
    }

    #[test]
    fn saved_locations_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        store_in(&dir).set("42", "São Paulo").unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.get("42").as_deref(), Some("São Paulo"));
    }

    #[test]
    fn file_is_pretty_printed_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set("42", "Toronto").unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "{\n  \"42\": \"Toronto\"\n}");
        assert!(!dir.path().join("locations.json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.json");
        fs::write(&path, "{ not json").unwrap();

        let err = LocationStore::open(&path).unwrap_err();
        assert!(matches!(err, PersistenceError::Parse { .. }));
    }

    #[test]
    fn failed_write_still_updates_memory() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocationStore::open(dir.path().join("missing-dir").join("locations.json"))
            .unwrap();

        let err = store.set("42", "Toronto").unwrap_err();
        assert!(matches!(err, PersistenceError::Write { .. }));
        assert_eq!(store.get("42").as_deref(), Some("Toronto"));
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        // A directory in place of the file makes the final rename fail.
        fs::create_dir(store.path()).unwrap();

        let err = store.set("42", "Toronto").unwrap_err();

        assert!(matches!(err, PersistenceError::Write { .. }));
        assert!(!dir.path().join("locations.json.tmp").exists());
        assert_eq!(store.get("42").as_deref(), Some("Toronto"));
    }

    #[test]
    fn concurrent_sets_keep_every_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store_in(&dir));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.set(&format!("user-{i}"), &format!("City {i}")))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let reopened = store_in(&dir);
        assert_eq!(reopened.len(), 8);
        for i in 0..8 {
            assert_eq!(reopened.get(&format!("user-{i}")), Some(format!("City {i}")));
        }
    }
}
