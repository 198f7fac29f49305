//! Session event store.
//!
//! Populated exactly once per session from the event feed and read-only
//! afterwards. The filter engine only ever reads from it.

use quake_types::{EarthquakeEvent, EventId};
use tracing::info;

use crate::error::EngineError;

/// Holds every ingested event for the current session, in feed order.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<EarthquakeEvent>,
    populated: bool,
}

impl EventStore {
    /// Create an empty, unpopulated store.
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            populated: false,
        }
    }

    /// Populate the store with the session's events.
    ///
    /// An empty batch still counts as populated (a failed or empty feed
    /// leaves the map usable with no data).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StoreAlreadyPopulated`] if called twice.
    pub fn populate(&mut self, events: Vec<EarthquakeEvent>) -> Result<usize, EngineError> {
        if self.populated {
            return Err(EngineError::StoreAlreadyPopulated {
                count: self.events.len(),
            });
        }
        self.events = events;
        self.populated = true;
        info!(count = self.events.len(), "event store populated");
        Ok(self.events.len())
    }

    /// All stored events in ingestion order.
    pub fn events(&self) -> &[EarthquakeEvent] {
        &self.events
    }

    /// Look up an event by its identifier.
    pub fn get(&self, id: &EventId) -> Option<&EarthquakeEvent> {
        self.events.iter().find(|event| &event.id == id)
    }

    /// Number of stored events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the store holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether ingestion has happened for this session.
    pub const fn is_populated(&self) -> bool {
        self.populated
    }
}
