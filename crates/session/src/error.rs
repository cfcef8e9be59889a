//! Error types for the search boundary.

use thiserror::Error;

/// Failure of one transport call.
///
/// Cancellation is not represented here: a superseded call is silently
/// discarded by the lifecycle and never surfaces as an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
	/// The server answered with a non-2xx status.
	#[error("HTTP {status}: {detail}")]
	Status { status: u16, detail: String },

	/// The call failed below the HTTP layer (DNS, connect, decode, …).
	#[error("network error: {0}")]
	Network(String),
}
