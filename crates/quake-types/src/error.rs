//! Error types for the `quake-types` crate.

/// Reasons a vertex list cannot form an area-of-interest polygon.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolygonError {
    /// Fewer than three vertices were supplied.
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices {
        /// Number of vertices supplied.
        count: usize,
    },

    /// A vertex coordinate was NaN or infinite.
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex {
        /// Position of the offending vertex.
        index: usize,
    },
}
