//! Error types for the `quake-engine` crate.

/// Errors that can occur during engine operations.
///
/// Filtering and syncing never fail. Only session lifecycle misuse is
/// reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The event store was already populated for this session.
    #[error("event store already holds {count} events for this session")]
    StoreAlreadyPopulated {
        /// Number of events already stored.
        count: usize,
    },
}
