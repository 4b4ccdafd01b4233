//! Route definitions for the `/forms` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::forms;
use crate::state::AppState;

/// Routes mounted at `/forms`.
///
/// ```text
/// POST /            -> create (public)
/// GET  /            -> list
/// GET  /metrics     -> metrics
/// GET  /analytics   -> analytics
/// GET  /report      -> report
/// GET  /{id}        -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(forms::list).post(forms::create))
        .route("/metrics", get(forms::metrics))
        .route("/analytics", get(forms::analytics))
        .route("/report", get(forms::report))
        .route("/{id}", get(forms::get_by_id))
}
