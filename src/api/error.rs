//! Error types for the relationship server API.

use thiserror::Error;

/// Errors returned by [`crate::api::Backend`] implementations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, timeout, ...)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// Server answered with a non-success status
    #[error("server error ({status}) from {url}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },
    /// Response body could not be decoded
    #[error("failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
    /// The active view has no endpoint for this operation
    #[error("view '{view}' has no {operation} endpoint")]
    NoEndpoint {
        view: String,
        operation: &'static str,
    },
    /// A link entry did not have the `[label, url, ...]` shape
    #[error("invalid link entry: {0}")]
    InvalidLink(String),
}
