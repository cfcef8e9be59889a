//! Client-side search session core for the suchwerk document search UI.
//!
//! This crate turns user input (query text, filters, sort, pagination
//! requests) into a sequence of remote search calls and reconciles their
//! results against the evolving UI state:
//!
//! - [`FilterState`] normalizes every filter value against a fixed allowed
//!   set, falling back to defaults instead of erroring.
//! - [`RequestLifecycle`] guarantees at most one in-flight request;
//!   superseding a request cancels its predecessor, and a cancelled
//!   request's result never reaches the renderer even when the underlying
//!   I/O already completed.
//! - [`PaginationState`] tracks the server-side offset/has-more cursor per
//!   search identity.
//! - [`ZenPager`] reveals already-fetched rows in fixed steps, escalating
//!   to a real fetch only once the local buffer is exhausted.
//! - [`SearchSession`] composes the above into the per-page state machine.
//!
//! The core is single-threaded in the logical sense: spawned lifecycle
//! tasks report back through one event channel, and the embedding event
//! loop feeds those events into [`SearchSession::handle_event`]. The crate
//! must run inside a tokio runtime.

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod filters;
pub mod lifecycle;
pub mod pagination;
pub mod prefs;
pub mod sink;
pub mod telemetry;
pub mod transport;
pub mod types;
pub mod validate;
pub mod zen;

pub use config::{DEFAULT_DEBOUNCE, DEFAULT_PAGE_SIZE, SessionConfig};
pub use controller::{NO_MATCHES, SEARCH_FAILED, SearchSession, SessionPhase, SettledOutcome};
pub use error::TransportError;
pub use events::SessionEvent;
pub use filters::{
	ExtensionFilter, FilterSnapshot, FilterState, QueryIdentity, SUPPORTED_EXTENSIONS, SearchMode,
	Sort, SortDirection, SortKey, TimeFilter,
};
pub use lifecycle::RequestLifecycle;
pub use pagination::{PaginationCursor, PaginationState};
pub use sink::{RenderMode, RenderSink};
pub use telemetry::{NoopTelemetry, TelemetryEvent, TelemetrySink, TraceTelemetry};
pub use transport::SearchTransport;
pub use types::{ResultRow, SearchParams, SearchResponse};
pub use validate::{MIN_QUERY_LENGTH, RejectReason, WILDCARD, validate};
pub use zen::{DEFAULT_ZEN_STEPS, ZenPager};
