//! Persisted UI preference keys and encoding helpers.
//!
//! Raw stored strings are fed back through the normal filter normalization
//! at session start, so corrupt values degrade to the documented defaults
//! instead of erroring.

use std::collections::BTreeSet;

use suchwerk_prefs::PrefStore;
use tracing::debug;

pub const KEY_SEARCH_MODE: &str = "search_mode";
pub const KEY_EXT_FILTER: &str = "ext_filter";
pub const KEY_TIME_FILTER: &str = "time_filter";
pub const KEY_SOURCE_LABELS: &str = "source_labels";
pub const KEY_ZEN_MODE: &str = "zen_mode";

/// Decodes the stored source-label selection (a JSON string array).
/// Anything unreadable counts as "nothing selected".
pub fn load_sources(store: &dyn PrefStore) -> Vec<String> {
	let Some(raw) = store.get(KEY_SOURCE_LABELS) else {
		return Vec::new();
	};
	match serde_json::from_str(&raw) {
		Ok(labels) => labels,
		Err(error) => {
			debug!(%error, "ignoring corrupt stored source labels");
			Vec::new()
		}
	}
}

pub fn store_sources(store: &dyn PrefStore, labels: &BTreeSet<String>) {
	let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
	if let Ok(encoded) = serde_json::to_string(&labels) {
		store.set(KEY_SOURCE_LABELS, &encoded);
	}
}

/// Decodes the stored zen toggle; `None` when absent or unreadable.
pub fn load_zen(store: &dyn PrefStore) -> Option<bool> {
	match store.get(KEY_ZEN_MODE)?.as_str() {
		"true" => Some(true),
		"false" => Some(false),
		_ => None,
	}
}

pub fn store_zen(store: &dyn PrefStore, enabled: bool) {
	store.set(KEY_ZEN_MODE, if enabled { "true" } else { "false" });
}
