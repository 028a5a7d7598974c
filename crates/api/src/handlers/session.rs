//! Handlers for the `/sesiones` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sesiones_core::action::ManageRequest;
use sesiones_core::filter;
use sesiones_core::types::DbId;
use sesiones_db::models::session::{CreateSession, SessionFields, UpdateSession};
use sesiones_db::repositories::{SessionDeliverableRepo, SessionRepo};

use crate::error::AppResult;
use crate::extract::{ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::query::{ChecklistParams, SessionListParams};
use crate::response::{AffectedResponse, DataResponse};
use crate::state::AppState;

/// POST /api/v1/sesiones
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateSession>,
) -> AppResult<impl IntoResponse> {
    let session = state.bounded(SessionRepo::create(&state.pool, &input)).await?;
    tracing::info!(session_id = session.id, id_ente = %session.id_ente, "Session created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// GET /api/v1/sesiones
///
/// Each query parameter narrows the list independently; absent parameters
/// match everything. Ordered newest `fecha` first.
pub async fn list(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<SessionListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.into_filter();
    let sessions = state.bounded(SessionRepo::list(&state.pool, &filter)).await?;
    Ok(Json(DataResponse { data: sessions }))
}

/// GET /api/v1/sesiones/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = state.bounded(SessionRepo::get(&state.pool, id)).await?;
    Ok(Json(DataResponse { data: session }))
}

/// PUT /api/v1/sesiones/{id}
pub async fn update(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateSession>,
) -> AppResult<impl IntoResponse> {
    let affected = state.bounded(SessionRepo::update(&state.pool, id, &input)).await?;
    tracing::info!(session_id = id, "Session updated");
    Ok(Json(DataResponse {
        data: AffectedResponse { affected },
    }))
}

/// DELETE /api/v1/sesiones/{id}
///
/// Removes the session; its dates and links go with it.
pub async fn delete(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<StatusCode> {
    state.bounded(SessionRepo::delete(&state.pool, id)).await?;
    tracing::info!(session_id = id, "Session deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sesiones/gestionar
pub async fn manage(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ManageRequest<SessionFields>>,
) -> AppResult<impl IntoResponse> {
    let command = request.into_command()?;
    let action = command.action();
    let outcome = state.bounded(SessionRepo::manage(&state.pool, &command)).await?;
    tracing::info!(%action, ?outcome, "Session managed");
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/sesiones/entregables-popular?id=&id_calendario_sesiones=
///
/// The deliverables catalog with `estatus` marking items linked to the
/// session.
pub async fn deliverables_checklist(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ChecklistParams>,
) -> AppResult<impl IntoResponse> {
    let items = state
        .bounded(SessionDeliverableRepo::checklist(
            &state.pool,
            filter::from_wire(params.id),
            filter::from_wire(params.id_calendario_sesiones),
        ))
        .await?;
    Ok(Json(DataResponse { data: items }))
}
