//! Server-side pagination bookkeeping.
//!
//! One [`PaginationState`] tracks the offset/has-more cursor for the search
//! identity it last saw. Starting a different identity invalidates the
//! cursor wholesale; receiving a page advances it. Only the controller's
//! transition handlers mutate this state.

use crate::filters::QueryIdentity;

/// Offset/has-more cursor for incremental fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationCursor {
	/// Number of rows already fetched for the current identity.
	pub offset: usize,
	/// Server-supplied flag: more rows exist beyond the fetched window.
	pub has_more: bool,
	/// An append request is currently in flight.
	pub loading: bool,
}

/// Pagination cursor keyed by search identity.
#[derive(Debug, Default)]
pub struct PaginationState {
	cursor: PaginationCursor,
	identity: Option<QueryIdentity>,
}

impl PaginationState {
	pub fn new() -> Self {
		Self::default()
	}

	/// Remembers `identity` as the current search, resetting the cursor when
	/// it differs from the previous one (or none was remembered). Returns
	/// true when a reset happened.
	pub fn begin_query(&mut self, identity: &QueryIdentity) -> bool {
		if self.identity.as_ref() == Some(identity) {
			return false;
		}
		self.identity = Some(identity.clone());
		self.cursor = PaginationCursor::default();
		true
	}

	/// True when `identity` is the search this cursor belongs to.
	pub fn matches(&self, identity: &QueryIdentity) -> bool {
		self.identity.as_ref() == Some(identity)
	}

	/// Records a received page. A reset page replaces the offset with the
	/// row count; an appended page advances it.
	pub fn record_page(&mut self, returned: usize, has_more: bool, appended: bool) {
		self.cursor.offset = if appended {
			self.cursor.offset + returned
		} else {
			returned
		};
		self.cursor.has_more = has_more;
		self.cursor.loading = false;
	}

	/// Marks an append request as in flight.
	pub fn mark_loading(&mut self) {
		self.cursor.loading = true;
	}

	/// Failure path: no further pages are offered until a new search.
	pub fn force_exhausted(&mut self) {
		self.cursor.has_more = false;
		self.cursor.loading = false;
	}

	/// Drops the remembered identity and cursor entirely.
	pub fn clear(&mut self) {
		self.identity = None;
		self.cursor = PaginationCursor::default();
	}

	pub fn can_load_more(&self) -> bool {
		self.cursor.has_more && !self.cursor.loading
	}

	pub fn offset(&self) -> usize {
		self.cursor.offset
	}

	pub fn cursor(&self) -> PaginationCursor {
		self.cursor
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::filters::FilterState;

	fn identity_for(query: &str) -> QueryIdentity {
		let mut filters = FilterState::new();
		filters.set_query(query);
		filters.snapshot().identity()
	}

	#[test]
	fn first_query_resets() {
		let mut state = PaginationState::new();
		assert!(state.begin_query(&identity_for("bericht")));
		assert_eq!(state.cursor(), PaginationCursor::default());
	}

	#[test]
	fn same_identity_keeps_cursor() {
		let mut state = PaginationState::new();
		state.begin_query(&identity_for("bericht"));
		state.record_page(30, true, false);

		assert!(!state.begin_query(&identity_for("bericht")));
		assert_eq!(state.offset(), 30);
		assert!(state.can_load_more());
	}

	#[test]
	fn changed_identity_resets_cursor() {
		let mut state = PaginationState::new();
		state.begin_query(&identity_for("bericht"));
		state.record_page(30, true, false);

		assert!(state.begin_query(&identity_for("rechnung")));
		assert_eq!(state.cursor(), PaginationCursor::default());
	}

	#[test]
	fn append_advances_offset() {
		let mut state = PaginationState::new();
		state.begin_query(&identity_for("bericht"));
		state.record_page(30, true, false);
		state.mark_loading();
		assert!(!state.can_load_more());

		state.record_page(12, false, true);
		assert_eq!(state.offset(), 42);
		assert!(!state.can_load_more());
	}

	#[test]
	fn failure_forces_exhaustion() {
		let mut state = PaginationState::new();
		state.begin_query(&identity_for("bericht"));
		state.record_page(30, true, false);
		state.mark_loading();

		state.force_exhausted();
		assert!(!state.can_load_more());
		assert_eq!(state.offset(), 30);
	}
}
