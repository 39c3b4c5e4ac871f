//! Administrative HTTP surface for triggering and inspecting ingestion runs.

pub mod error;
pub mod routes;
pub mod server;

use engine_runtime::engine::SyncEngine;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub engine: SyncEngine,
}

impl AppState {
    pub fn new(engine: SyncEngine) -> Self {
        Self { engine }
    }
}

pub use routes::create_router;
pub use server::run_server;
