//! Handlers for the `/sesiones-entregables` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sesiones_core::links::LinkKey;
use sesiones_core::types::DbId;
use sesiones_db::models::session_deliverable::CreateSessionDeliverable;
use sesiones_db::repositories::SessionDeliverableRepo;

use crate::error::AppResult;
use crate::extract::{ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::query::SessionLinkParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/sesiones-entregables
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateSessionDeliverable>,
) -> AppResult<impl IntoResponse> {
    let link = state
        .bounded(SessionDeliverableRepo::create(&state.pool, &input))
        .await?;
    tracing::info!(
        session_id = link.id_calendario_sesiones,
        deliverable_id = link.id_listado_entregables,
        "Deliverable linked",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: link })))
}

/// GET /api/v1/sesiones-entregables?id_calendario_sesiones=
pub async fn list_by_session(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<SessionLinkParams>,
) -> AppResult<impl IntoResponse> {
    let links = state
        .bounded(SessionDeliverableRepo::list_by_session(
            &state.pool,
            params.id_calendario_sesiones,
        ))
        .await?;
    Ok(Json(DataResponse { data: links }))
}

/// DELETE /api/v1/sesiones-entregables/{id_calendario_sesiones}/{id_listado_entregables}
pub async fn delete(
    State(state): State<AppState>,
    ValidatedPath((session_id, deliverable_id)): ValidatedPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let key = LinkKey::new(session_id, deliverable_id);
    state
        .bounded(SessionDeliverableRepo::delete(&state.pool, key))
        .await?;
    tracing::info!(session_id, deliverable_id, "Deliverable unlinked");
    Ok(StatusCode::NO_CONTENT)
}
