//! Pre-dispatch query guards.
//!
//! These mirror the server's own checks so obviously fruitless requests
//! never leave the client: an empty query, a query below the minimum
//! length, and the wildcard without a narrowing filter (which would scan
//! the whole corpus).

use crate::filters::FilterSnapshot;

/// Minimum trimmed query length, matching the server.
pub const MIN_QUERY_LENGTH: usize = 2;

/// The match-everything sentinel.
pub const WILDCARD: &str = "*";

/// Why a snapshot was rejected without network I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
	EmptyQuery,
	QueryTooShort,
	UnguardedWildcard,
}

impl RejectReason {
	/// User-facing message, worded like the server's responses.
	pub const fn message(self) -> &'static str {
		match self {
			Self::EmptyQuery => "Bitte Suchbegriff eingeben.",
			Self::QueryTooShort => "Suchbegriff zu kurz (min. 2 Zeichen)",
			Self::UnguardedWildcard => "Wildcard nur mit aktivem Filter.",
		}
	}
}

/// Checks whether `snapshot` may be dispatched.
pub fn validate(snapshot: &FilterSnapshot) -> Result<(), RejectReason> {
	let trimmed = snapshot.trimmed_query();
	if trimmed.is_empty() {
		return Err(RejectReason::EmptyQuery);
	}
	if trimmed == WILDCARD {
		if snapshot.has_active_filter() {
			return Ok(());
		}
		return Err(RejectReason::UnguardedWildcard);
	}
	if trimmed.chars().count() < MIN_QUERY_LENGTH {
		return Err(RejectReason::QueryTooShort);
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::filters::FilterState;

	fn snapshot_for(query: &str) -> FilterSnapshot {
		let mut filters = FilterState::new();
		filters.set_query(query);
		filters.snapshot()
	}

	#[test]
	fn empty_and_whitespace_queries_are_rejected() {
		assert_eq!(validate(&snapshot_for("")), Err(RejectReason::EmptyQuery));
		assert_eq!(validate(&snapshot_for("   ")), Err(RejectReason::EmptyQuery));
	}

	#[test]
	fn single_character_is_too_short() {
		assert_eq!(validate(&snapshot_for("a")), Err(RejectReason::QueryTooShort));
		assert_eq!(validate(&snapshot_for(" ä ")), Err(RejectReason::QueryTooShort));
		assert!(validate(&snapshot_for("ab")).is_ok());
	}

	#[test]
	fn wildcard_requires_a_filter() {
		assert_eq!(validate(&snapshot_for("*")), Err(RejectReason::UnguardedWildcard));

		let mut filters = FilterState::new();
		filters.set_query("*");
		filters.set_extension("msg");
		assert!(validate(&filters.snapshot()).is_ok());

		let mut filters = FilterState::new();
		filters.set_query("*");
		filters.toggle_source("Archiv");
		assert!(validate(&filters.snapshot()).is_ok());
	}
}
