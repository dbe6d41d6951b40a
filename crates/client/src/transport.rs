use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::request::ApiRequest;

/// The network collaborator failed to produce any response at all.
/// Timeouts, if any, are this layer's concern, not the core's.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("network unavailable: {0}")]
pub struct TransportError(pub String);

/// Raw result of one network exchange, before envelope interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

/// Opaque network collaborator.
///
/// The request layer hands over the call and the bearer token to attach;
/// everything else about the wire is the transport's business.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<RawResponse, TransportError>;
}
