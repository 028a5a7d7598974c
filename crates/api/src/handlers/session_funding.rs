//! Handlers for the `/sesiones-fuentes` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sesiones_core::links::LinkKey;
use sesiones_core::types::DbId;
use sesiones_db::models::session_funding::CreateSessionFundingSource;
use sesiones_db::repositories::SessionFundingRepo;

use crate::error::AppResult;
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/sesiones-fuentes
///
/// Linking the same source twice is a 409.
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateSessionFundingSource>,
) -> AppResult<impl IntoResponse> {
    let link = state
        .bounded(SessionFundingRepo::create(&state.pool, &input))
        .await?;
    tracing::info!(
        session_id = link.id_calendario_sesiones,
        funding_source_id = link.id_fuente_financiamiento,
        "Funding source linked",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: link })))
}

/// GET /api/v1/sesiones-fuentes/{id_calendario_sesiones}
pub async fn list_by_session(
    State(state): State<AppState>,
    ValidatedPath(session_id): ValidatedPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let links = state
        .bounded(SessionFundingRepo::list_by_session(&state.pool, session_id))
        .await?;
    Ok(Json(DataResponse { data: links }))
}

/// DELETE /api/v1/sesiones-fuentes/{id_calendario_sesiones}/{id_fuente_financiamiento}
pub async fn delete(
    State(state): State<AppState>,
    ValidatedPath((session_id, source_id)): ValidatedPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let key = LinkKey::new(session_id, source_id);
    state.bounded(SessionFundingRepo::delete(&state.pool, key)).await?;
    tracing::info!(session_id, funding_source_id = source_id, "Funding source unlinked");
    Ok(StatusCode::NO_CONTENT)
}
