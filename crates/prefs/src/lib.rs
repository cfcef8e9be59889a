//! Key-value preference persistence for the search UI.
//!
//! UI selections (search mode, filters, disclosure toggle) survive a page
//! reload through a [`PrefStore`]. The store is deliberately forgiving: a
//! missing or corrupt backing file yields an empty store, and write failures
//! are logged and swallowed. Callers always fall back to their own defaults
//! when a key is absent, so persistence can never take the session down.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, warn};

/// String key-value persistence capability.
///
/// `set` is best-effort: implementations must not propagate storage failures
/// to the caller.
pub trait PrefStore: Send + Sync {
	/// Returns the stored value for `key`, if any.
	fn get(&self, key: &str) -> Option<String>;
	/// Stores `value` under `key`, replacing any previous value.
	fn set(&self, key: &str, value: &str);
	/// Removes `key` from the store.
	fn remove(&self, key: &str);
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
	values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

impl PrefStore for MemoryStore {
	fn get(&self, key: &str) -> Option<String> {
		self.values.lock().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) {
		self.values.lock().insert(key.to_string(), value.to_string());
	}

	fn remove(&self, key: &str) {
		self.values.lock().remove(key);
	}
}

/// File-backed store holding a single flat JSON object.
///
/// The file is read once at open time; every mutation rewrites it in full.
/// Unreadable or malformed content is treated as an empty store.
#[derive(Debug)]
pub struct JsonFileStore {
	path: PathBuf,
	values: Mutex<HashMap<String, String>>,
}

impl JsonFileStore {
	/// Opens the store at `path`, loading whatever valid state exists there.
	pub fn open(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		let values = load_values(&path);
		Self {
			path,
			values: Mutex::new(values),
		}
	}

	/// Path of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn persist(&self, values: &HashMap<String, String>) {
		let serialized = match serde_json::to_string_pretty(values) {
			Ok(serialized) => serialized,
			Err(error) => {
				warn!(path = ?self.path, %error, "failed to serialize preferences");
				return;
			}
		};
		if let Some(parent) = self.path.parent() {
			if let Err(error) = fs::create_dir_all(parent) {
				warn!(path = ?parent, %error, "failed to create preference directory");
				return;
			}
		}
		if let Err(error) = fs::write(&self.path, serialized) {
			warn!(path = ?self.path, %error, "failed to write preferences");
		}
	}
}

impl PrefStore for JsonFileStore {
	fn get(&self, key: &str) -> Option<String> {
		self.values.lock().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) {
		let mut values = self.values.lock();
		values.insert(key.to_string(), value.to_string());
		self.persist(&values);
	}

	fn remove(&self, key: &str) {
		let mut values = self.values.lock();
		if values.remove(key).is_some() {
			self.persist(&values);
		}
	}
}

fn load_values(path: &Path) -> HashMap<String, String> {
	let raw = match fs::read_to_string(path) {
		Ok(raw) => raw,
		Err(error) => {
			debug!(path = ?path, %error, "no stored preferences, starting empty");
			return HashMap::new();
		}
	};
	match serde_json::from_str(&raw) {
		Ok(values) => values,
		Err(error) => {
			warn!(path = ?path, %error, "ignoring corrupt preference file");
			HashMap::new()
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn memory_store_round_trips() {
		let store = MemoryStore::new();
		assert_eq!(store.get("mode"), None);
		store.set("mode", "loose");
		assert_eq!(store.get("mode"), Some("loose".to_string()));
		store.remove("mode");
		assert_eq!(store.get("mode"), None);
	}

	#[test]
	fn file_store_survives_reopen() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("prefs.json");

		let store = JsonFileStore::open(&path);
		store.set("ext_filter", "pdf");
		store.set("zen_mode", "true");
		drop(store);

		let reopened = JsonFileStore::open(&path);
		assert_eq!(reopened.get("ext_filter"), Some("pdf".to_string()));
		assert_eq!(reopened.get("zen_mode"), Some("true".to_string()));
	}

	#[test]
	fn corrupt_file_yields_empty_store() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("prefs.json");
		fs::write(&path, "{not valid json").unwrap();

		let store = JsonFileStore::open(&path);
		assert_eq!(store.get("ext_filter"), None);

		// Writing through the store replaces the corrupt content.
		store.set("ext_filter", "msg");
		let reopened = JsonFileStore::open(&path);
		assert_eq!(reopened.get("ext_filter"), Some("msg".to_string()));
	}

	#[test]
	fn missing_file_is_not_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let store = JsonFileStore::open(dir.path().join("absent.json"));
		assert_eq!(store.get("anything"), None);
	}

	#[test]
	fn remove_persists() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("prefs.json");

		let store = JsonFileStore::open(&path);
		store.set("time_filter", "last7");
		store.remove("time_filter");

		let reopened = JsonFileStore::open(&path);
		assert_eq!(reopened.get("time_filter"), None);
	}
}
