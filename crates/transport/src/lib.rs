//! HTTP implementation of the suchwerk search API boundary.
//!
//! [`HttpSearchClient`] talks to the document index server:
//!
//! - `GET /api/search`: the cancellable search call behind
//!   [`SearchTransport`]
//! - `GET /api/sources`: available source labels for the filter UI
//! - `GET /api/document/{id}`: document details for the preview pane
//!
//! Cancellation needs no support here: the session lifecycle drops the
//! in-flight future when a call is superseded. Every request carries the
//! app secret header when one is configured.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use suchwerk_session::{
	SearchParams, SearchResponse, SearchTransport, TelemetryEvent, TelemetrySink, TransportError,
};

/// Header the server accepts the shared app secret in.
pub const APP_SECRET_HEADER: &str = "X-App-Secret";

/// Client for the document index HTTP API.
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
	http: reqwest::Client,
	base: Url,
	app_secret: Option<String>,
}

impl HttpSearchClient {
	/// Creates a client for the API rooted at `base`.
	pub fn new(base: Url) -> Self {
		Self {
			http: reqwest::Client::new(),
			base,
			app_secret: None,
		}
	}

	/// Attaches the shared app secret sent with every request.
	pub fn with_app_secret(mut self, secret: impl Into<String>) -> Self {
		self.app_secret = Some(secret.into());
		self
	}

	/// Available source labels, for populating the source filter.
	pub async fn sources(&self) -> Result<Vec<String>, TransportError> {
		#[derive(Deserialize)]
		struct Body {
			#[serde(default)]
			labels: Vec<String>,
		}
		let url = self.endpoint("api/sources")?;
		let body: Body = self.get_json(url).await?;
		Ok(body.labels)
	}

	/// Document details (content and mail headers) for the preview pane.
	pub async fn document(&self, id: u64) -> Result<DocumentDetails, TransportError> {
		let url = self.endpoint(&format!("api/document/{id}"))?;
		self.get_json(url).await
	}

	/// Like [`Self::document`], reporting the fetch timing to `telemetry`.
	/// Telemetry is fire-and-forget and never affects the result.
	pub async fn document_timed(
		&self,
		id: u64,
		telemetry: &dyn TelemetrySink,
	) -> Result<DocumentDetails, TransportError> {
		let started = Instant::now();
		let result = self.document(id).await;
		let status_code = match &result {
			Ok(_) => Some(200),
			Err(TransportError::Status { status, .. }) => Some(*status),
			Err(TransportError::Network(_)) => None,
		};
		telemetry.record(TelemetryEvent {
			endpoint: "document_meta",
			doc_id: Some(id),
			elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
			status_code,
		});
		result
	}

	fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
		self.base
			.join(path)
			.map_err(|error| TransportError::Network(error.to_string()))
	}

	fn headers(&self) -> HeaderMap {
		let mut headers = HeaderMap::new();
		if let Some(secret) = &self.app_secret {
			if let Ok(value) = secret.parse() {
				headers.insert(APP_SECRET_HEADER, value);
			}
		}
		headers
	}

	async fn get_json<T>(&self, url: Url) -> Result<T, TransportError>
	where
		T: serde::de::DeserializeOwned,
	{
		debug!(%url, "GET");
		let response = self
			.http
			.get(url)
			.headers(self.headers())
			.send()
			.await
			.map_err(|error| TransportError::Network(error.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			return Err(TransportError::Status {
				status: status.as_u16(),
				detail: status
					.canonical_reason()
					.unwrap_or("unexpected status")
					.to_string(),
			});
		}
		response
			.json()
			.await
			.map_err(|error| TransportError::Network(error.to_string()))
	}
}

#[async_trait]
impl SearchTransport for HttpSearchClient {
	async fn search(&self, params: &SearchParams) -> Result<SearchResponse, TransportError> {
		let mut url = self.endpoint("api/search")?;
		url.query_pairs_mut().extend_pairs(params.query_pairs());
		self.get_json(url).await
	}
}

/// Full document record as served for the preview pane.
///
/// Mail-specific fields are only present for `.msg` documents.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentDetails {
	pub id: u64,
	pub source: String,
	pub path: String,
	pub filename: String,
	pub extension: String,
	pub size_bytes: u64,
	pub mtime: f64,
	#[serde(default)]
	pub content: String,
	#[serde(default)]
	pub title_or_subject: String,
	#[serde(default)]
	pub msg_from: Option<String>,
	#[serde(default)]
	pub msg_to: Option<String>,
	#[serde(default)]
	pub msg_cc: Option<String>,
	#[serde(default)]
	pub msg_subject: Option<String>,
	#[serde(default)]
	pub msg_date: Option<String>,
}
