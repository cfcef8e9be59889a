//! Stepped disclosure of already-fetched rows ("zen mode").
//!
//! Independent of server pagination, the pager limits how many of the
//! fetched rows are visible and reveals more in fixed steps. Advancing is
//! purely local; once the local buffer is exhausted the caller falls
//! through to a real fetch. This avoids re-running the whole pipeline for
//! every "show more" click while enough rows are already client-side.

/// Default disclosure steps; past the last entry all rows are visible.
pub const DEFAULT_ZEN_STEPS: &[usize] = &[15, 30, 45];

/// Client-local row-visibility limiter.
#[derive(Debug)]
pub struct ZenPager {
	enabled: bool,
	step_index: usize,
	steps: Vec<usize>,
}

impl ZenPager {
	pub fn new(enabled: bool) -> Self {
		Self::with_steps(DEFAULT_ZEN_STEPS.to_vec(), enabled)
	}

	/// `steps` must be strictly increasing; the step past the end is
	/// unbounded.
	pub fn with_steps(steps: Vec<usize>, enabled: bool) -> Self {
		debug_assert!(steps.windows(2).all(|w| w[0] < w[1]));
		Self {
			enabled,
			step_index: 0,
			steps,
		}
	}

	pub fn enabled(&self) -> bool {
		self.enabled
	}

	/// Enables or disables the pager. Enabling restarts at the first step;
	/// disabling makes all fetched rows visible unconditionally.
	pub fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
		if enabled {
			self.reset();
		}
	}

	/// Back to the first step. Called whenever a new search identity begins.
	pub fn reset(&mut self) {
		self.step_index = 0;
	}

	/// Row limit of the current step; `None` when unbounded (final step or
	/// pager disabled).
	pub fn visible_limit(&self) -> Option<usize> {
		if !self.enabled {
			return None;
		}
		self.steps.get(self.step_index).copied()
	}

	/// Attempts a local reveal. No-ops (returning false) when the pager is
	/// disabled, already unbounded, or `fetched` does not exceed the current
	/// limit; in the last case the caller must fetch from the server
	/// instead.
	pub fn advance(&mut self, fetched: usize) -> bool {
		let Some(limit) = self.visible_limit() else {
			return false;
		};
		if fetched <= limit {
			return false;
		}
		self.step_index += 1;
		true
	}

	/// How many of `fetched` rows are visible under the current limit.
	pub fn visible_count(&self, fetched: usize) -> usize {
		match self.visible_limit() {
			Some(limit) => fetched.min(limit),
			None => fetched,
		}
	}

	/// True when some fetched rows are currently held back.
	pub fn has_hidden(&self, fetched: usize) -> bool {
		self.visible_count(fetched) < fetched
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn disabled_pager_shows_everything() {
		let mut pager = ZenPager::new(false);
		assert_eq!(pager.visible_limit(), None);
		assert_eq!(pager.visible_count(500), 500);
		assert!(!pager.advance(500));
	}

	#[test]
	fn walks_steps_while_rows_remain() {
		let mut pager = ZenPager::new(true);
		assert_eq!(pager.visible_count(50), 15);

		assert!(pager.advance(50));
		assert_eq!(pager.visible_count(50), 30);
		assert!(pager.advance(50));
		assert_eq!(pager.visible_count(50), 45);
		assert!(pager.advance(50));
		assert_eq!(pager.visible_count(50), 50);

		// Unbounded now; further advances are the caller's cue to fetch.
		assert!(!pager.advance(50));
	}

	#[test]
	fn does_not_advance_past_fetched_rows() {
		let mut pager = ZenPager::new(true);
		// Only 10 rows fetched: nothing hidden, advancing would reveal
		// nothing new.
		assert!(!pager.advance(10));
		assert_eq!(pager.visible_count(10), 10);
		assert!(!pager.has_hidden(10));
	}

	#[test]
	fn boundary_advance_requires_strictly_more_rows() {
		let mut pager = ZenPager::new(true);
		assert!(!pager.advance(15));
		assert!(pager.advance(16));
	}

	#[test]
	fn reset_returns_to_first_step() {
		let mut pager = ZenPager::new(true);
		assert!(pager.advance(50));
		pager.reset();
		assert_eq!(pager.visible_limit(), Some(15));
	}

	#[test]
	fn reenabling_restarts_at_first_step() {
		let mut pager = ZenPager::new(true);
		assert!(pager.advance(50));
		pager.set_enabled(false);
		assert_eq!(pager.visible_limit(), None);
		pager.set_enabled(true);
		assert_eq!(pager.visible_limit(), Some(15));
	}
}
