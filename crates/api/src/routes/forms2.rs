//! Route definitions for the `/forms2` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::forms2;
use crate::state::AppState;

/// Routes mounted at `/forms2`.
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
        .route("/", get(forms2::list).post(forms2::create))
        .route("/metrics", get(forms2::metrics))
        .route("/analytics", get(forms2::analytics))
        .route("/report", get(forms2::report))
        .route("/{id}", get(forms2::get_by_id))
}
