//! Initial data load.
//!
//! The server starts answering immediately with `loading: true`; the feed
//! and overlay are fetched in the background and handed to the session
//! when they arrive.

use std::sync::Arc;

use quake_feed::FeedClient;
use tracing::{error, info, warn};

use crate::state::AppState;

/// Fetch the event feed into the session, then the tectonic overlay.
///
/// A failed feed leaves the session loaded with an empty store. A failed
/// overlay leaves the empty collection in place.
pub async fn load_feeds(state: Arc<AppState>, feed: FeedClient) {
    match feed.fetch_events().await {
        Ok(events) => {
            let mut session = state.session.lock().await;
            match session.ingest(events) {
                Ok(count) => info!(count, "initial events loaded"),
                Err(e) => error!(error = %e, "initial events rejected"),
            }
        }
        Err(e) => {
            error!(error = %e, "failed to fetch event feed");
            state.session.lock().await.mark_load_failed();
        }
    }

    match feed.fetch_tectonic().await {
        Ok(overlay) => *state.tectonic.write().await = overlay,
        Err(e) => warn!(error = %e, "failed to fetch tectonic overlay"),
    }
}
