//! HTTP API server for the Quakewatch earthquake map.
//!
//! The map front-end renders what this server computes: the filtered
//! visible set, cluster markers and heat points, the paginated table, the
//! hover tooltip, buffer circles, and the infrastructure summaries of
//! drawn polygons.
//!
//! # Architecture
//!
//! All session state lives in one [`quake_engine::MapSession`] behind an
//! async mutex in [`AppState`]. The event feed is loaded in the background
//! at startup ([`startup::load_feeds`]); until it arrives the session
//! reports `loading: true`.
//!
//! # Modules
//!
//! - [`config`] -- `quakewatch.yaml` loading and environment overrides
//! - [`state`] -- Shared state
//! - [`handlers`] -- Endpoint handlers
//! - [`router`] -- Route table and middleware
//! - [`server`] -- Bind and serve
//! - [`startup`] -- Initial feed load
//! - [`error`] -- API errors

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;

pub use config::{ConfigError, ConfigSource, QuakeConfig, RejectedOverride};
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::{AppState, Session};
