//! Error types for spatial-query calls.
//!
//! Every variant is caught by the caller and turned into a failed
//! annotation on the affected polygon; none of them is fatal.

/// Errors that can occur while querying the spatial-query service.
#[derive(Debug, thiserror::Error)]
pub enum OverpassError {
    /// The HTTP client could not be constructed.
    #[error("client setup failed: {0}")]
    Client(String),

    /// The request never produced a response (DNS, connect, timeout).
    #[error("request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("service returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The response body was not the expected JSON document.
    #[error("response parse failed: {0}")]
    Parse(String),
}
