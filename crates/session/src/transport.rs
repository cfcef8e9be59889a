//! Search transport boundary.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::types::{SearchParams, SearchResponse};

/// A cancellable remote search capability.
///
/// The session core only ever holds one call in flight; cancellation is
/// handled outside the trait by dropping the future, so implementations
/// need no explicit abort support.
#[async_trait]
pub trait SearchTransport: Send + Sync {
	async fn search(&self, params: &SearchParams) -> Result<SearchResponse, TransportError>;
}
