//! Single-flight request lifecycle.
//!
//! At most one stage (a debounce timer or a transport call) is live per
//! session. Scheduling a new stage cancels its predecessor; a cancelled
//! stage suppresses its own completion event even if the underlying work
//! already finished. Completion events are tagged with a monotonically
//! increasing generation so the controller can drop anything stale that
//! slips through.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::events::SessionEvent;
use crate::transport::SearchTransport;
use crate::types::SearchParams;

/// Owns the generation counter and the cancellation capability of the one
/// live stage.
pub struct RequestLifecycle {
	generation: u64,
	in_flight: Option<InFlight>,
	events: UnboundedSender<SessionEvent>,
}

struct InFlight {
	cancel: CancellationToken,
}

impl RequestLifecycle {
	pub fn new(events: UnboundedSender<SessionEvent>) -> Self {
		Self {
			generation: 0,
			in_flight: None,
			events,
		}
	}

	/// Generation of the most recently scheduled stage.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// True when `generation` belongs to the live stage.
	pub fn is_current(&self, generation: u64) -> bool {
		generation == self.generation && self.in_flight.is_some()
	}

	/// Cancels the live stage, if any.
	pub fn cancel(&mut self) {
		if let Some(in_flight) = self.in_flight.take() {
			in_flight.cancel.cancel();
		}
	}

	/// Starts the debounce timer, superseding any live stage. Emits
	/// [`SessionEvent::DebounceElapsed`] unless superseded first.
	pub fn schedule(&mut self, delay: Duration) -> u64 {
		let (generation, cancel) = self.supersede();
		let events = self.events.clone();
		tokio::spawn(async move {
			if delay > Duration::ZERO {
				tokio::select! {
					_ = cancel.cancelled() => return,
					_ = sleep(delay) => {}
				}
			} else if cancel.is_cancelled() {
				return;
			}
			let _ = events.send(SessionEvent::DebounceElapsed { generation });
		});
		generation
	}

	/// Issues the transport call, superseding any live stage. Emits
	/// [`SessionEvent::SearchFinished`] unless superseded first; a call
	/// cancelled mid-flight never reports back.
	pub fn dispatch(
		&mut self,
		transport: Arc<dyn SearchTransport>,
		params: SearchParams,
		appended: bool,
	) -> u64 {
		let (generation, cancel) = self.supersede();
		let events = self.events.clone();
		tokio::spawn(async move {
			let result = tokio::select! {
				_ = cancel.cancelled() => {
					trace!(generation, "search call superseded mid-flight");
					return;
				}
				result = transport.search(&params) => result,
			};
			if cancel.is_cancelled() {
				return;
			}
			let _ = events.send(SessionEvent::SearchFinished {
				generation,
				appended,
				result,
			});
		});
		generation
	}

	/// Marks the stage `generation` as finished, releasing the live slot.
	/// No-op for stale generations.
	pub fn settle(&mut self, generation: u64) {
		if generation == self.generation {
			self.in_flight = None;
		}
	}

	fn supersede(&mut self) -> (u64, CancellationToken) {
		self.cancel();
		self.generation = self.generation.wrapping_add(1);
		let cancel = CancellationToken::new();
		self.in_flight = Some(InFlight {
			cancel: cancel.clone(),
		});
		(self.generation, cancel)
	}
}

impl Drop for RequestLifecycle {
	fn drop(&mut self) {
		self.cancel();
	}
}
