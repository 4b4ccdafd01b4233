//! Handlers for the `/forms` resource (questionnaire 1, patient satisfaction).

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use survey_core::analytics::{satisfaction_analytics, SatisfactionAnalytics};
use survey_core::error::CoreError;
use survey_core::filter::apply_filter;
use survey_core::metrics::{aggregate, SatisfactionMetrics};
use survey_core::report::{describe_filters, Report};
use survey_core::sorting::sort_by_score;
use survey_core::survey::{NewSatisfactionResponse, SatisfactionResponse};
use survey_core::types::DbId;
use survey_core::validation::{normalize_new_satisfaction, validate_new_satisfaction};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ResponseQueryParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/forms
///
/// Public: patients submit without an account.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewSatisfactionResponse>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<SatisfactionResponse>>)> {
    let Json(mut input) = payload?;
    normalize_new_satisfaction(&mut input);
    validate_new_satisfaction(&input)?;

    let record = state.responses.insert_satisfaction(&input).await?;
    tracing::info!(
        id = %record.id,
        department = %record.evaluated_department,
        "Satisfaction response submitted"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// GET /api/v1/forms
///
/// Filtered, optionally score-sorted responses. Without a sort they stay
/// most recent first.
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    params: Result<Query<ResponseQueryParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<Vec<SatisfactionResponse>>>> {
    let Query(params) = params?;
    let filter = params.filter()?;
    let sort = params.sort()?;

    let records = state.responses.list_satisfaction().await?;
    let records = sort_by_score(apply_filter(records, &filter), sort);
    tracing::debug!(count = records.len(), ?filter, sort = sort.as_str(), "Listed satisfaction responses");

    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/forms/metrics
pub async fn metrics(
    _user: AuthUser,
    State(state): State<AppState>,
    params: Result<Query<ResponseQueryParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<SatisfactionMetrics>>> {
    let Query(params) = params?;
    let filter = params.filter()?;

    let records = apply_filter(state.responses.list_satisfaction().await?, &filter);
    let metrics = SatisfactionMetrics::from(aggregate(&records, Utc::now()));

    Ok(Json(DataResponse { data: metrics }))
}

/// GET /api/v1/forms/analytics
pub async fn analytics(
    _user: AuthUser,
    State(state): State<AppState>,
    params: Result<Query<ResponseQueryParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<SatisfactionAnalytics>>> {
    let Query(params) = params?;
    let filter = params.filter()?;

    let records = apply_filter(state.responses.list_satisfaction().await?, &filter);
    Ok(Json(DataResponse {
        data: satisfaction_analytics(&records),
    }))
}

/// GET /api/v1/forms/report
pub async fn report(
    user: AuthUser,
    State(state): State<AppState>,
    params: Result<Query<ResponseQueryParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<Report<SatisfactionResponse, SatisfactionMetrics>>>> {
    let Query(params) = params?;
    let filter = params.filter()?;
    let sort = params.sort()?;
    let now = Utc::now();

    let all = state.responses.list_satisfaction().await?;
    let total_forms_count = all.len();
    let responses = sort_by_score(apply_filter(all, &filter), sort);
    let metrics = SatisfactionMetrics::from(aggregate(&responses, now));
    tracing::info!(
        user_id = %user.user_id,
        included = responses.len(),
        total = total_forms_count,
        "Generated satisfaction report"
    );

    Ok(Json(DataResponse {
        data: Report {
            metrics,
            filter_description: describe_filters(&filter, sort),
            filters: filter,
            sort,
            responses,
            generated_at: now,
            total_forms_count,
        },
    }))
}

/// GET /api/v1/forms/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<DataResponse<SatisfactionResponse>>> {
    let Path(id) = id?;
    let record = state
        .responses
        .find_satisfaction(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Form response",
            id,
        }))?;
    Ok(Json(DataResponse { data: record }))
}
