//! Session tunables.

use std::time::Duration;

use crate::zen::DEFAULT_ZEN_STEPS;

/// Debounce window applied to typing and filter changes.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);

/// Page size requested per search call, matching the server's default.
pub const DEFAULT_PAGE_SIZE: usize = 200;

/// Knobs of one search session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
	pub debounce: Duration,
	pub page_size: usize,
	/// Disclosure steps for zen mode; past the last step all rows show.
	pub zen_steps: Vec<usize>,
	/// Whether zen mode starts enabled (overridden by a stored preference).
	pub zen_enabled: bool,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			debounce: DEFAULT_DEBOUNCE,
			page_size: DEFAULT_PAGE_SIZE,
			zen_steps: DEFAULT_ZEN_STEPS.to_vec(),
			zen_enabled: false,
		}
	}
}
