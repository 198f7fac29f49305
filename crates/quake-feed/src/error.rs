//! Error types for feed ingestion.

/// Errors that can occur while fetching a feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The HTTP client could not be constructed.
    #[error("client setup failed: {0}")]
    Client(String),

    /// The request never produced a response.
    #[error("request to {url} failed: {message}")]
    Request {
        /// Requested URL.
        url: String,
        /// Underlying transport error.
        message: String,
    },

    /// The feed answered with a non-success status.
    #[error("{url} returned status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The body was not the expected JSON document.
    #[error("{url} returned an unparseable body: {message}")]
    Parse {
        /// Requested URL.
        url: String,
        /// Deserializer error.
        message: String,
    },
}
