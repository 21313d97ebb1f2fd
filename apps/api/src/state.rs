use std::sync::Arc;

use crate::config::Config;
use crate::oracle::Oracle;
use crate::store::{ProfileRepository, SessionRepository};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Text-generation backend. Default: `ChatCompletionClient`.
    pub oracle: Arc<dyn Oracle>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub config: Config,
}
