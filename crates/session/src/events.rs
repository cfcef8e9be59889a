//! Completion events delivered back to the session controller.

use crate::error::TransportError;
use crate::types::SearchResponse;

/// Event emitted by a lifecycle task onto the session's event channel.
///
/// Every event carries the generation of the stage that produced it; the
/// controller drops events whose generation is no longer current, which is
/// the second line of defense behind token cancellation.
#[derive(Debug)]
pub enum SessionEvent {
	/// The debounce window elapsed without being superseded.
	DebounceElapsed { generation: u64 },
	/// A transport call finished (successfully or not).
	SearchFinished {
		generation: u64,
		/// Whether the call was an append (load-more) rather than a reset.
		appended: bool,
		result: Result<SearchResponse, TransportError>,
	},
}
