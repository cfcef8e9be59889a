//! Wire types shared between the session core and the search transport.

use serde::Deserialize;

use crate::filters::{FilterSnapshot, SearchMode};

/// One search hit as delivered by the server.
///
/// The core treats rows as opaque beyond counting them; the fields exist so
/// an external renderer can display them.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultRow {
	#[serde(alias = "doc_id")]
	pub id: u64,
	pub source: String,
	pub path: String,
	pub filename: String,
	pub extension: String,
	pub size_bytes: u64,
	pub mtime: f64,
	#[serde(default)]
	pub snippet: String,
}

/// Body of a search response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
	#[serde(default)]
	pub results: Vec<ResultRow>,
	#[serde(default)]
	pub has_more: bool,
	/// Effective mode the server searched with.
	#[serde(default)]
	pub mode: Option<String>,
	/// Server-side guard message accompanying an empty result list.
	#[serde(default)]
	pub message: Option<String>,
}

/// Fully resolved parameter set for one search call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
	pub query: String,
	pub limit: usize,
	pub offset: usize,
	pub extension: Option<String>,
	pub time_filter: Option<String>,
	pub source_labels: Vec<String>,
	pub sort: Option<(&'static str, &'static str)>,
	pub mode: SearchMode,
}

impl SearchParams {
	/// Resolves a filter snapshot plus pagination window into parameters.
	pub fn from_snapshot(snapshot: &FilterSnapshot, limit: usize, offset: usize) -> Self {
		Self {
			query: snapshot.trimmed_query().to_string(),
			limit,
			offset,
			extension: snapshot.extension.as_param().map(str::to_string),
			time_filter: snapshot.time.as_ref().map(|t| t.as_param()),
			source_labels: snapshot.sources.iter().cloned().collect(),
			sort: snapshot
				.sort
				.map(|sort| (sort.key.as_str(), sort.direction.as_str())),
			mode: snapshot.mode,
		}
	}

	/// Serializes the parameters as query pairs in the order the server
	/// documents them. Optional fields are omitted, source labels repeat,
	/// and the mode is always present.
	pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = vec![
			("q", self.query.clone()),
			("limit", self.limit.to_string()),
			("offset", self.offset.to_string()),
		];
		if let Some(extension) = &self.extension {
			pairs.push(("extension", extension.clone()));
		}
		if let Some(time_filter) = &self.time_filter {
			pairs.push(("time_filter", time_filter.clone()));
		}
		for label in &self.source_labels {
			pairs.push(("source_labels", label.clone()));
		}
		if let Some((key, direction)) = self.sort {
			pairs.push(("sort_key", key.to_string()));
			pairs.push(("sort_dir", direction.to_string()));
		}
		pairs.push(("mode", self.mode.as_str().to_string()));
		pairs
	}
}
