//! Filter state and normalization for search queries.
//!
//! Every user-facing filter value is drawn from a fixed enumerated set;
//! unknown or malformed raw input falls back to the field's default instead
//! of erroring. [`FilterState`] holds the mutable selection, [`FilterSnapshot`]
//! is the immutable view a dispatch works from, and [`QueryIdentity`] is the
//! equality key deciding whether two dispatches are "the same search".

use std::collections::BTreeSet;

/// File extensions the indexer understands, and therefore the only values
/// the extension filter accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["msg", "pdf", "rtf", "txt"];

/// How query tokens are matched server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
	/// Exact token match.
	Strict,
	/// Prefix match for longer tokens.
	#[default]
	Standard,
	/// Prefix match for nearly everything, terms OR-joined.
	Loose,
}

impl SearchMode {
	/// Parses a raw mode string, returning `None` for unknown values.
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"strict" => Some(Self::Strict),
			"standard" => Some(Self::Standard),
			"loose" => Some(Self::Loose),
			_ => None,
		}
	}

	/// Normalizes an optional raw value, falling back to `default`.
	pub fn normalize(raw: Option<&str>, default: Self) -> Self {
		raw.and_then(Self::parse).unwrap_or(default)
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Strict => "strict",
			Self::Standard => "standard",
			Self::Loose => "loose",
		}
	}
}

/// Extension filter: a single known extension, or no restriction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExtensionFilter {
	#[default]
	All,
	Extension(String),
}

impl ExtensionFilter {
	/// Normalizes raw input (`".PDF"`, `"pdf"`, …) against the supported
	/// set. Anything unknown means "all".
	pub fn normalize(raw: &str) -> Self {
		let cleaned = raw.trim().trim_start_matches('.').to_ascii_lowercase();
		if SUPPORTED_EXTENSIONS.contains(&cleaned.as_str()) {
			Self::Extension(cleaned)
		} else {
			Self::All
		}
	}

	/// The query parameter value, absent when unrestricted.
	pub fn as_param(&self) -> Option<&str> {
		match self {
			Self::All => None,
			Self::Extension(ext) => Some(ext),
		}
	}
}

/// Modification-time range restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFilter {
	Today,
	Yesterday,
	Last7,
	Last30,
	Last365,
	/// A specific calendar year.
	Year(u16),
}

impl TimeFilter {
	/// Parses a raw filter key. Four digits select a year; unknown values
	/// yield `None` (no restriction).
	pub fn parse(raw: &str) -> Option<Self> {
		let key = raw.trim().to_ascii_lowercase();
		match key.as_str() {
			"today" => Some(Self::Today),
			"yesterday" => Some(Self::Yesterday),
			"last7" => Some(Self::Last7),
			"last30" => Some(Self::Last30),
			"last365" => Some(Self::Last365),
			_ => {
				if key.len() == 4 && key.chars().all(|c| c.is_ascii_digit()) {
					key.parse().ok().map(Self::Year)
				} else {
					None
				}
			}
		}
	}

	pub fn as_param(&self) -> String {
		match self {
			Self::Today => "today".to_string(),
			Self::Yesterday => "yesterday".to_string(),
			Self::Last7 => "last7".to_string(),
			Self::Last30 => "last30".to_string(),
			Self::Last365 => "last365".to_string(),
			Self::Year(year) => year.to_string(),
		}
	}
}

/// Sortable result columns, matching the server's ORDER BY whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
	Filename,
	Source,
	Extension,
	SizeBytes,
	Mtime,
}

impl SortKey {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw.trim().to_ascii_lowercase().as_str() {
			"filename" => Some(Self::Filename),
			"source" => Some(Self::Source),
			"extension" => Some(Self::Extension),
			"size_bytes" => Some(Self::SizeBytes),
			"mtime" => Some(Self::Mtime),
			_ => None,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Filename => "filename",
			Self::Source => "source",
			Self::Extension => "extension",
			Self::SizeBytes => "size_bytes",
			Self::Mtime => "mtime",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
	#[default]
	Ascending,
	Descending,
}

impl SortDirection {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Ascending => "asc",
			Self::Descending => "desc",
		}
	}

	pub const fn flipped(self) -> Self {
		match self {
			Self::Ascending => Self::Descending,
			Self::Descending => Self::Ascending,
		}
	}
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
	pub key: SortKey,
	pub direction: SortDirection,
}

/// Immutable view of the filter selection at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSnapshot {
	pub query: String,
	pub extension: ExtensionFilter,
	pub time: Option<TimeFilter>,
	pub sources: BTreeSet<String>,
	pub sort: Option<Sort>,
	pub mode: SearchMode,
}

impl FilterSnapshot {
	pub fn trimmed_query(&self) -> &str {
		self.query.trim()
	}

	/// True when any extension/time/source restriction is active. Gates the
	/// wildcard query.
	pub fn has_active_filter(&self) -> bool {
		self.extension != ExtensionFilter::All || self.time.is_some() || !self.sources.is_empty()
	}

	/// The equality key for append-vs-reset decisions. Offset is not part
	/// of the snapshot, so identity is the whole snapshot with the query
	/// trimmed.
	pub fn identity(&self) -> QueryIdentity {
		QueryIdentity {
			query: self.trimmed_query().to_string(),
			extension: self.extension.clone(),
			time: self.time,
			sources: self.sources.clone(),
			sort: self.sort,
			mode: self.mode,
		}
	}
}

/// Search identity: two dispatches with equal identities are "the same
/// search, more results"; anything else is a different search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryIdentity {
	query: String,
	extension: ExtensionFilter,
	time: Option<TimeFilter>,
	sources: BTreeSet<String>,
	sort: Option<Sort>,
	mode: SearchMode,
}

/// Mutable filter selection owned by the session controller.
///
/// Setters only mutate state; scheduling the resulting search dispatch is
/// the controller's job.
#[derive(Debug, Default)]
pub struct FilterState {
	query: String,
	extension: ExtensionFilter,
	time: Option<TimeFilter>,
	sources: BTreeSet<String>,
	sort: Option<Sort>,
	mode: SearchMode,
}

impl FilterState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_query(&mut self, raw: &str) {
		self.query = raw.to_string();
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	/// Normalizes and stores the extension filter, returning the effective
	/// value.
	pub fn set_extension(&mut self, raw: &str) -> &ExtensionFilter {
		self.extension = ExtensionFilter::normalize(raw);
		&self.extension
	}

	/// Parses and stores the time filter; unknown input clears it.
	pub fn set_time_filter(&mut self, raw: &str) -> Option<TimeFilter> {
		self.time = TimeFilter::parse(raw);
		self.time
	}

	/// Toggles a source label, returning true when it is now selected.
	pub fn toggle_source(&mut self, label: &str) -> bool {
		let label = label.trim();
		if label.is_empty() {
			return false;
		}
		if self.sources.remove(label) {
			false
		} else {
			self.sources.insert(label.to_string());
			true
		}
	}

	pub fn set_sources(&mut self, labels: impl IntoIterator<Item = String>) {
		self.sources = labels
			.into_iter()
			.filter_map(|label| {
				let trimmed = label.trim();
				(!trimmed.is_empty()).then(|| trimmed.to_string())
			})
			.collect();
	}

	pub fn sources(&self) -> &BTreeSet<String> {
		&self.sources
	}

	/// Toggles sorting on `key`: a new column starts ascending, the same
	/// column flips direction.
	pub fn toggle_sort(&mut self, key: SortKey) -> Sort {
		let next = match self.sort {
			Some(sort) if sort.key == key => Sort {
				key,
				direction: sort.direction.flipped(),
			},
			_ => Sort {
				key,
				direction: SortDirection::Ascending,
			},
		};
		self.sort = Some(next);
		next
	}

	pub fn clear_sort(&mut self) {
		self.sort = None;
	}

	/// Normalizes and stores the search mode, falling back to standard.
	pub fn set_mode(&mut self, raw: &str) -> SearchMode {
		self.mode = SearchMode::normalize(Some(raw), SearchMode::default());
		self.mode
	}

	pub fn mode(&self) -> SearchMode {
		self.mode
	}

	pub fn snapshot(&self) -> FilterSnapshot {
		FilterSnapshot {
			query: self.query.clone(),
			extension: self.extension.clone(),
			time: self.time,
			sources: self.sources.clone(),
			sort: self.sort,
			mode: self.mode,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_mode_falls_back_to_standard() {
		assert_eq!(SearchMode::normalize(Some("LOOSE"), SearchMode::Standard), SearchMode::Loose);
		assert_eq!(SearchMode::normalize(Some("fuzzy"), SearchMode::Standard), SearchMode::Standard);
		assert_eq!(SearchMode::normalize(None, SearchMode::Strict), SearchMode::Strict);
	}

	#[test]
	fn extension_normalization_strips_dot_and_case() {
		assert_eq!(ExtensionFilter::normalize(".PDF"), ExtensionFilter::Extension("pdf".into()));
		assert_eq!(ExtensionFilter::normalize("msg"), ExtensionFilter::Extension("msg".into()));
		assert_eq!(ExtensionFilter::normalize("docx"), ExtensionFilter::All);
		assert_eq!(ExtensionFilter::normalize(""), ExtensionFilter::All);
	}

	#[test]
	fn time_filter_accepts_known_keys_and_years() {
		assert_eq!(TimeFilter::parse("yesterday"), Some(TimeFilter::Yesterday));
		assert_eq!(TimeFilter::parse("LAST30"), Some(TimeFilter::Last30));
		assert_eq!(TimeFilter::parse("2023"), Some(TimeFilter::Year(2023)));
		assert_eq!(TimeFilter::parse("23"), None);
		assert_eq!(TimeFilter::parse("never"), None);
	}

	#[test]
	fn toggle_sort_flips_direction_on_same_column() {
		let mut state = FilterState::new();
		let first = state.toggle_sort(SortKey::Mtime);
		assert_eq!(first.direction, SortDirection::Ascending);
		let second = state.toggle_sort(SortKey::Mtime);
		assert_eq!(second.direction, SortDirection::Descending);
		let other = state.toggle_sort(SortKey::Filename);
		assert_eq!(other.direction, SortDirection::Ascending);
	}

	#[test]
	fn identity_ignores_query_whitespace() {
		let mut state = FilterState::new();
		state.set_query("  bericht ");
		let padded = state.snapshot().identity();
		state.set_query("bericht");
		assert_eq!(padded, state.snapshot().identity());
	}

	#[test]
	fn identity_differs_per_field() {
		let mut state = FilterState::new();
		state.set_query("bericht");
		let base = state.snapshot().identity();

		state.set_extension("pdf");
		assert_ne!(base, state.snapshot().identity());

		state.set_extension("");
		state.toggle_source("Archiv");
		assert_ne!(base, state.snapshot().identity());

		state.toggle_source("Archiv");
		state.toggle_sort(SortKey::SizeBytes);
		assert_ne!(base, state.snapshot().identity());
	}

	#[test]
	fn toggle_source_adds_and_removes() {
		let mut state = FilterState::new();
		assert!(state.toggle_source("Archiv"));
		assert!(state.sources().contains("Archiv"));
		assert!(!state.toggle_source("Archiv"));
		assert!(state.sources().is_empty());
		assert!(!state.toggle_source("   "));
	}

	#[test]
	fn wildcard_guard_tracks_active_filters() {
		let mut state = FilterState::new();
		state.set_query("*");
		assert!(!state.snapshot().has_active_filter());
		state.set_time_filter("last7");
		assert!(state.snapshot().has_active_filter());
	}
}
