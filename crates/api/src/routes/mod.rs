pub mod auth;
pub mod forms;
pub mod forms2;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      login (public)
///
/// /users                           list (requires auth)
///
/// /forms                           submit (public), list
/// /forms/metrics                   aggregate metrics
/// /forms/analytics                 dashboard breakdowns
/// /forms/report                    report payload
/// /forms/{id}                      get
///
/// /forms2                          submit (public), list
/// /forms2/metrics                  aggregate metrics
/// /forms2/analytics                dashboard breakdowns
/// /forms2/report                   report payload
/// /forms2/{id}                     get
/// ```
///
/// Every GET under `/forms` and `/forms2` requires a bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/forms", forms::router())
        .nest("/forms2", forms2::router())
}
