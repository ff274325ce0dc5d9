use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::storage::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` while no API key is configured; the analyze handler turns that
    /// into a configuration error. Upload, dashboard and login keep working.
    pub llm: Option<LlmClient>,
    /// Pluggable result store. Default: JsonFileStore under DATA_DIR.
    pub store: Arc<dyn ResumeStore>,
    pub config: Config,
}
