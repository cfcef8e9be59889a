//! The search session controller.
//!
//! One [`SearchSession`] per page owns the entire client-side search state:
//! the filter selection, the pagination cursor, the zen disclosure cursor,
//! the result rows, and the single live request. User intents arrive as
//! method calls; lifecycle completions arrive as [`SessionEvent`]s on the
//! channel returned from [`SearchSession::new`], which the embedding event
//! loop feeds back through [`SearchSession::handle_event`]. All mutation
//! happens on that one logical thread.
//!
//! # State machine
//!
//! ```text
//! Idle ──change──▶ Debouncing ──timer──▶ Dispatching ──valid──▶ AwaitingResult
//!   ▲                  ▲  │                    │                     │
//!   │                  │  └──change restarts   └─invalid─▶ Settled(Rejected)
//! close()              │                                            │
//!                      └────────change cancels in-flight◀───────────┤
//!                                             Settled(Success|Failed)
//! ```
//!
//! Sort toggling and load-more skip the debounce edge and dispatch
//! immediately; zen reveals never leave the settled state.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, warn};

use suchwerk_prefs::PrefStore;

use crate::config::SessionConfig;
use crate::error::TransportError;
use crate::events::SessionEvent;
use crate::filters::{FilterSnapshot, FilterState, SortKey};
use crate::lifecycle::RequestLifecycle;
use crate::pagination::PaginationState;
use crate::prefs;
use crate::sink::{RenderMode, RenderSink};
use crate::transport::SearchTransport;
use crate::types::{ResultRow, SearchParams, SearchResponse};
use crate::validate::{RejectReason, validate};
use crate::zen::ZenPager;

/// Message shown for a successful search without hits.
pub const NO_MATCHES: &str = "Keine Treffer gefunden.";

/// Message shown when the transport call fails.
pub const SEARCH_FAILED: &str = "Suche fehlgeschlagen.";

/// Where the session currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
	Idle,
	Debouncing,
	Dispatching,
	AwaitingResult,
	Settled(SettledOutcome),
}

/// How the last search concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettledOutcome {
	Success,
	Rejected,
	Failed,
}

/// Client-side search session: filter state, single-flight dispatch,
/// pagination, and stepped disclosure behind one façade.
pub struct SearchSession {
	config: SessionConfig,
	filters: FilterState,
	pagination: PaginationState,
	zen: ZenPager,
	lifecycle: RequestLifecycle,
	phase: SessionPhase,
	rows: Vec<ResultRow>,
	transport: Arc<dyn SearchTransport>,
	sink: Box<dyn RenderSink>,
	store: Arc<dyn PrefStore>,
}

impl SearchSession {
	/// Builds a session, restoring persisted filter preferences from
	/// `store`. The returned receiver must be pumped by the embedding event
	/// loop: every received event goes back into [`Self::handle_event`].
	pub fn new(
		transport: Arc<dyn SearchTransport>,
		sink: Box<dyn RenderSink>,
		store: Arc<dyn PrefStore>,
		config: SessionConfig,
	) -> (Self, UnboundedReceiver<SessionEvent>) {
		let (events_tx, events_rx) = mpsc::unbounded_channel();

		let mut filters = FilterState::new();
		if let Some(raw) = store.get(prefs::KEY_SEARCH_MODE) {
			filters.set_mode(&raw);
		}
		if let Some(raw) = store.get(prefs::KEY_EXT_FILTER) {
			filters.set_extension(&raw);
		}
		if let Some(raw) = store.get(prefs::KEY_TIME_FILTER) {
			filters.set_time_filter(&raw);
		}
		filters.set_sources(prefs::load_sources(store.as_ref()));

		let zen_enabled = prefs::load_zen(store.as_ref()).unwrap_or(config.zen_enabled);
		let zen = ZenPager::with_steps(config.zen_steps.clone(), zen_enabled);

		let session = Self {
			filters,
			pagination: PaginationState::new(),
			zen,
			lifecycle: RequestLifecycle::new(events_tx),
			phase: SessionPhase::Idle,
			rows: Vec::new(),
			transport,
			sink,
			store,
			config,
		};
		(session, events_rx)
	}

	// --- user intents -----------------------------------------------------

	/// The user typed into the search box.
	pub fn set_query(&mut self, raw: &str) {
		self.filters.set_query(raw);
		self.schedule_search();
	}

	/// The user picked an extension filter value.
	pub fn set_extension_filter(&mut self, raw: &str) {
		let value = self.filters.set_extension(raw);
		self.store
			.set(prefs::KEY_EXT_FILTER, value.as_param().unwrap_or(""));
		self.schedule_search();
	}

	/// The user picked a time filter value.
	pub fn set_time_filter(&mut self, raw: &str) {
		let value = self.filters.set_time_filter(raw);
		let encoded = value.map(|t| t.as_param()).unwrap_or_default();
		self.store.set(prefs::KEY_TIME_FILTER, &encoded);
		self.schedule_search();
	}

	/// The user toggled one source label.
	pub fn toggle_source_label(&mut self, label: &str) {
		self.filters.toggle_source(label);
		prefs::store_sources(self.store.as_ref(), self.filters.sources());
		self.schedule_search();
	}

	/// The user switched the search mode.
	pub fn set_search_mode(&mut self, raw: &str) {
		let mode = self.filters.set_mode(raw);
		self.store.set(prefs::KEY_SEARCH_MODE, mode.as_str());
		self.schedule_search();
	}

	/// The user clicked a sortable column header. A deliberate discrete
	/// action: dispatches immediately as a reset, no debounce.
	pub fn toggle_sort(&mut self, key: SortKey) {
		self.filters.toggle_sort(key);
		self.dispatch_current();
	}

	/// The user toggled zen mode. Purely local: enabling restarts the
	/// disclosure steps, disabling reveals every fetched row.
	pub fn set_zen_enabled(&mut self, enabled: bool) {
		self.zen.set_enabled(enabled);
		prefs::store_zen(self.store.as_ref(), enabled);
		let visible = self.zen.visible_count(self.rows.len());
		self.sink
			.on_result_set(&self.rows[..visible], RenderMode::Replace);
		self.notify_load_more();
	}

	/// The user asked for more rows. Reveals locally while zen holds rows
	/// back; otherwise fetches the next page. A no-op when neither applies.
	pub fn load_more(&mut self) {
		if self.phase != SessionPhase::Settled(SettledOutcome::Success) {
			return;
		}
		if self.zen.advance(self.rows.len()) {
			let visible = self.zen.visible_count(self.rows.len());
			self.sink
				.on_result_set(&self.rows[..visible], RenderMode::Replace);
			self.notify_load_more();
			return;
		}
		if !self.pagination.can_load_more() {
			return;
		}
		let snapshot = self.filters.snapshot();
		if !self.pagination.matches(&snapshot.identity()) {
			return;
		}
		self.dispatch(snapshot, true);
	}

	/// Tears the session down, cancelling any in-flight work.
	pub fn close(&mut self) {
		self.lifecycle.cancel();
		self.phase = SessionPhase::Idle;
	}

	// --- event handling ---------------------------------------------------

	/// Feeds one lifecycle completion back into the state machine.
	pub fn handle_event(&mut self, event: SessionEvent) {
		match event {
			SessionEvent::DebounceElapsed { generation } => {
				if !self.lifecycle.is_current(generation) {
					debug!(generation, "ignoring superseded debounce");
					return;
				}
				self.dispatch_current();
			}
			SessionEvent::SearchFinished {
				generation,
				appended,
				result,
			} => {
				if !self.lifecycle.is_current(generation) {
					debug!(generation, "discarding stale search result");
					return;
				}
				self.lifecycle.settle(generation);
				match result {
					Ok(response) => self.apply_success(response, appended),
					Err(error) => self.apply_failure(&error),
				}
			}
		}
	}

	// --- accessors --------------------------------------------------------

	pub fn phase(&self) -> SessionPhase {
		self.phase
	}

	/// All rows fetched for the current search.
	pub fn rows(&self) -> &[ResultRow] {
		&self.rows
	}

	/// The prefix of [`Self::rows`] the zen pager currently exposes.
	pub fn visible_rows(&self) -> &[ResultRow] {
		&self.rows[..self.zen.visible_count(self.rows.len())]
	}

	pub fn filters(&self) -> &FilterState {
		&self.filters
	}

	pub fn zen_enabled(&self) -> bool {
		self.zen.enabled()
	}

	// --- transitions ------------------------------------------------------

	fn schedule_search(&mut self) {
		self.lifecycle.schedule(self.config.debounce);
		self.phase = SessionPhase::Debouncing;
	}

	/// Validates the current snapshot and either settles rejected or
	/// dispatches a reset search.
	fn dispatch_current(&mut self) {
		self.phase = SessionPhase::Dispatching;
		let snapshot = self.filters.snapshot();
		match validate(&snapshot) {
			Err(reason) => self.settle_rejected(reason),
			Ok(()) => self.dispatch(snapshot, false),
		}
	}

	fn dispatch(&mut self, snapshot: FilterSnapshot, appended: bool) {
		let offset = if appended {
			self.pagination.mark_loading();
			self.pagination.offset()
		} else {
			if self.pagination.begin_query(&snapshot.identity()) {
				self.zen.reset();
			}
			0
		};
		let params = SearchParams::from_snapshot(&snapshot, self.config.page_size, offset);
		debug!(query = %params.query, offset, appended, "dispatching search");
		self.lifecycle
			.dispatch(Arc::clone(&self.transport), params, appended);
		self.phase = SessionPhase::AwaitingResult;
		self.notify_load_more();
	}

	fn settle_rejected(&mut self, reason: RejectReason) {
		debug!(?reason, "query rejected without dispatch");
		self.lifecycle.cancel();
		self.rows.clear();
		self.pagination.clear();
		self.zen.reset();
		self.phase = SessionPhase::Settled(SettledOutcome::Rejected);
		self.sink.on_result_set(&[], RenderMode::Replace);
		self.sink.on_message(reason.message());
		self.notify_load_more();
	}

	fn apply_success(&mut self, response: SearchResponse, appended: bool) {
		let returned = response.results.len();
		self.pagination
			.record_page(returned, response.has_more, appended);
		if appended {
			self.rows.extend(response.results);
		} else {
			self.rows = response.results;
		}
		self.phase = SessionPhase::Settled(SettledOutcome::Success);

		if self.zen.enabled() {
			let visible = self.zen.visible_count(self.rows.len());
			self.sink
				.on_result_set(&self.rows[..visible], RenderMode::Replace);
		} else if appended {
			self.sink
				.on_result_set(&self.rows[self.rows.len() - returned..], RenderMode::Append);
		} else {
			self.sink.on_result_set(&self.rows, RenderMode::Replace);
		}

		if let Some(message) = response.message.as_deref() {
			// Server-side guard tripped; its wording wins.
			self.sink.on_message(message);
		} else if self.rows.is_empty() {
			self.sink.on_message(NO_MATCHES);
		}
		self.notify_load_more();
	}

	fn apply_failure(&mut self, error: &TransportError) {
		warn!(%error, "search request failed");
		self.pagination.force_exhausted();
		self.phase = SessionPhase::Settled(SettledOutcome::Failed);
		self.sink.on_message(SEARCH_FAILED);
		self.notify_load_more();
	}

	fn notify_load_more(&mut self) {
		let cursor = self.pagination.cursor();
		let local = self.zen.has_hidden(self.rows.len());
		self.sink
			.on_load_more(local || cursor.has_more, !cursor.loading);
	}
}

impl std::fmt::Debug for SearchSession {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SearchSession")
			.field("phase", &self.phase)
			.field("rows", &self.rows.len())
			.field("pagination", &self.pagination)
			.finish()
	}
}
