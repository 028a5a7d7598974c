//! Handlers for the `/sesiones-fechas` resource.
//!
//! Dates are soft-deleted: `DELETE` marks them inactive and they remain in
//! list results with `activo = false`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sesiones_core::action::ManageRequest;
use sesiones_core::types::DbId;
use sesiones_db::models::session_date::{CreateSessionDate, SessionDateFields, UpdateSessionDate};
use sesiones_db::repositories::SessionDateRepo;

use crate::error::AppResult;
use crate::extract::{ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::query::SessionDateListParams;
use crate::response::{AffectedResponse, DataResponse};
use crate::state::AppState;

/// POST /api/v1/sesiones-fechas
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateSessionDate>,
) -> AppResult<impl IntoResponse> {
    let date = state.bounded(SessionDateRepo::create(&state.pool, &input)).await?;
    tracing::info!(
        session_date_id = date.id,
        session_id = date.id_calendario_sesiones,
        "Session date created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: date })))
}

/// GET /api/v1/sesiones-fechas?id=&id_calendario_sesiones=
pub async fn list(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<SessionDateListParams>,
) -> AppResult<impl IntoResponse> {
    let dates = state
        .bounded(SessionDateRepo::list(&state.pool, params.into_filter()))
        .await?;
    Ok(Json(DataResponse { data: dates }))
}

/// GET /api/v1/sesiones-fechas/by-sesion/{id}
pub async fn list_by_session(
    State(state): State<AppState>,
    ValidatedPath(session_id): ValidatedPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let dates = state
        .bounded(SessionDateRepo::list_by_session(&state.pool, session_id))
        .await?;
    Ok(Json(DataResponse { data: dates }))
}

/// PUT /api/v1/sesiones-fechas/{id}
pub async fn update(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateSessionDate>,
) -> AppResult<impl IntoResponse> {
    let affected = state
        .bounded(SessionDateRepo::update(&state.pool, id, &input))
        .await?;
    tracing::info!(session_date_id = id, "Session date rescheduled");
    Ok(Json(DataResponse {
        data: AffectedResponse { affected },
    }))
}

/// DELETE /api/v1/sesiones-fechas/{id}
pub async fn delete(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<StatusCode> {
    state.bounded(SessionDateRepo::delete(&state.pool, id)).await?;
    tracing::info!(session_date_id = id, "Session date deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sesiones-fechas/gestionar
pub async fn manage(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ManageRequest<SessionDateFields>>,
) -> AppResult<impl IntoResponse> {
    let command = request.into_command()?;
    let action = command.action();
    let outcome = state
        .bounded(SessionDateRepo::manage(&state.pool, &command))
        .await?;
    tracing::info!(%action, ?outcome, "Session date managed");
    Ok(Json(DataResponse { data: outcome }))
}
