//! Front-end agnostic application core: owns the view state machine and
//! wires user signals to the catalog, persistence and a [`Renderer`].
//!
//! [`Renderer`]: cinefind_core::view::Renderer

mod controller;
mod state;

use std::path::Path;

use cinefind_api::{OmdbClient, OmdbError};
use cinefind_core::config::AppConfig;
use cinefind_core::persistence::PersistenceStore;
use cinefind_core::storage::{JsonFileStore, MemoryStore};
use cinefind_core::view::Renderer;

pub use controller::{
    Controller, ControllerOptions, DETAIL_ERROR_MESSAGE, DETAIL_ERROR_TITLE,
    HISTORY_CLEARED_MESSAGE,
};
pub use state::{DetailTicket, ErrorNotice, Phase, SearchTicket, UiSignal, ViewState};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(String),
    #[error("catalog error: {0}")]
    Catalog(#[from] OmdbError),
}

/// Load config from `path`, or the per-user location when `None`.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, RuntimeError> {
    let result = match path {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    result.map_err(|e| RuntimeError::Config(e.to_string()))
}

/// Native wiring: OMDb catalog, a JSON file for durable state and an
/// in-process map for the session store.
pub fn native_controller<R: Renderer>(
    config: &AppConfig,
    storage_path: &Path,
    renderer: R,
) -> Result<Controller<OmdbClient, R>, RuntimeError> {
    let catalog = OmdbClient::from_config(&config.catalog)?;
    let store = PersistenceStore::new(
        Box::new(JsonFileStore::open(storage_path)),
        Box::new(MemoryStore::new()),
    )
    .with_max_history(config.history.max_entries);

    tracing::debug!(path = %storage_path.display(), "Opened durable storage");
    Ok(Controller::new(
        catalog,
        store,
        renderer,
        ControllerOptions::from_config(config),
    ))
}
