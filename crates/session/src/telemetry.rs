//! Best-effort telemetry boundary.
//!
//! The surrounding UI reports timing events (for example how long a
//! document preview took to render). Delivery is fire-and-forget: a sink
//! that drops or fails to deliver an event must never disturb the search
//! session.

use tracing::debug;

/// One timing observation.
#[derive(Debug, Clone)]
pub struct TelemetryEvent {
	/// Logical endpoint or interaction name, e.g. `"document_preview"`.
	pub endpoint: &'static str,
	/// Document the event concerns, when applicable.
	pub doc_id: Option<u64>,
	pub elapsed_ms: f64,
	/// Status of the underlying call, when one was made.
	pub status_code: Option<u16>,
}

/// Consumes telemetry events. Must not fail or block.
pub trait TelemetrySink: Send + Sync {
	fn record(&self, event: TelemetryEvent);
}

/// Discards every event.
#[derive(Debug, Default)]
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
	fn record(&self, _event: TelemetryEvent) {}
}

/// Logs events at debug level instead of shipping them anywhere.
#[derive(Debug, Default)]
pub struct TraceTelemetry;

impl TelemetrySink for TraceTelemetry {
	fn record(&self, event: TelemetryEvent) {
		debug!(
			endpoint = event.endpoint,
			doc_id = event.doc_id,
			elapsed_ms = event.elapsed_ms,
			status_code = event.status_code,
			"telemetry event"
		);
	}
}
