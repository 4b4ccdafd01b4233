//! Handlers for the `/forms2` resource (questionnaire 2, infrastructure and
//! patient safety).
//!
//! Questionnaire 2 has no department, so a `department` parameter is accepted
//! but ignored.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use survey_core::analytics::{infrastructure_analytics, InfrastructureAnalytics};
use survey_core::error::CoreError;
use survey_core::filter::apply_filter;
use survey_core::metrics::{aggregate, InfrastructureMetrics};
use survey_core::report::{describe_filters, Report};
use survey_core::sorting::sort_by_score;
use survey_core::survey::{InfrastructureResponse, NewInfrastructureResponse};
use survey_core::types::DbId;
use survey_core::validation::{normalize_new_infrastructure, validate_new_infrastructure};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ResponseQueryParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/forms2
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewInfrastructureResponse>, JsonRejection>,
) -> AppResult<(StatusCode, Json<DataResponse<InfrastructureResponse>>)> {
    let Json(mut input) = payload?;
    normalize_new_infrastructure(&mut input);
    validate_new_infrastructure(&input)?;

    let record = state.responses.insert_infrastructure(&input).await?;
    tracing::info!(id = %record.id, "Infrastructure response submitted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// GET /api/v1/forms2
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    params: Result<Query<ResponseQueryParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<Vec<InfrastructureResponse>>>> {
    let Query(params) = params?;
    let filter = params.filter_without_department()?;
    let sort = params.sort()?;

    let records = state.responses.list_infrastructure().await?;
    let records = sort_by_score(apply_filter(records, &filter), sort);
    tracing::debug!(count = records.len(), ?filter, sort = sort.as_str(), "Listed infrastructure responses");

    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/forms2/metrics
pub async fn metrics(
    _user: AuthUser,
    State(state): State<AppState>,
    params: Result<Query<ResponseQueryParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<InfrastructureMetrics>>> {
    let Query(params) = params?;
    let filter = params.filter_without_department()?;

    let records = apply_filter(state.responses.list_infrastructure().await?, &filter);
    let metrics = InfrastructureMetrics::from(aggregate(&records, Utc::now()));

    Ok(Json(DataResponse { data: metrics }))
}

/// GET /api/v1/forms2/analytics
pub async fn analytics(
    _user: AuthUser,
    State(state): State<AppState>,
    params: Result<Query<ResponseQueryParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<InfrastructureAnalytics>>> {
    let Query(params) = params?;
    let filter = params.filter_without_department()?;

    let records = apply_filter(state.responses.list_infrastructure().await?, &filter);
    Ok(Json(DataResponse {
        data: infrastructure_analytics(&records),
    }))
}

/// GET /api/v1/forms2/report
pub async fn report(
    user: AuthUser,
    State(state): State<AppState>,
    params: Result<Query<ResponseQueryParams>, QueryRejection>,
) -> AppResult<Json<DataResponse<Report<InfrastructureResponse, InfrastructureMetrics>>>> {
    let Query(params) = params?;
    let filter = params.filter_without_department()?;
    let sort = params.sort()?;
    let now = Utc::now();

    let all = state.responses.list_infrastructure().await?;
    let total_forms_count = all.len();
    let responses = sort_by_score(apply_filter(all, &filter), sort);
    let metrics = InfrastructureMetrics::from(aggregate(&responses, now));
    tracing::info!(
        user_id = %user.user_id,
        included = responses.len(),
        total = total_forms_count,
        "Generated infrastructure report"
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

/// GET /api/v1/forms2/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<DataResponse<InfrastructureResponse>>> {
    let Path(id) = id?;
    let record = state
        .responses
        .find_infrastructure(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Form2 response",
            id,
        }))?;
    Ok(Json(DataResponse { data: record }))
}
