//! These traits define what the application can do.

use async_trait::async_trait;

use crate::dto::HttpRequest;
use crate::http::HttpResponse;

/// Inbound port turning a raw request into a response envelope.
#[async_trait]
pub trait Controller: Send + Sync {
    /// Handle a single request. Never fails: every outcome is an envelope.
    async fn handle(&self, request: HttpRequest) -> HttpResponse;
}
