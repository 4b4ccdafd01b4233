//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::Json;
use survey_db::models::user::UserResponse;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users
///
/// Dashboard accounts, newest first, without password hashes.
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = state.users.list_users().await?;
    let data = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse { data }))
}
