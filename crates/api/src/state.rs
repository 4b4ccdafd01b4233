use std::sync::Arc;

use survey_db::{ResponseStore, UserStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Questionnaire responses (PostgreSQL or in-memory).
    pub responses: Arc<dyn ResponseStore>,
    /// Dashboard accounts.
    pub users: Arc<dyn UserStore>,
    pub config: Arc<ServerConfig>,
}
