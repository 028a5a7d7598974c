//! Read-only handlers for the `/catalogos` lookups.
//!
//! Catalog reads run without the persistence bound.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use sesiones_core::filter;
use sesiones_db::repositories::CatalogRepo;

use crate::error::AppResult;
use crate::extract::ValidatedQuery;
use crate::query::{CatalogIdParams, PublicEntityParams, ServantAssignmentParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/catalogos/clasificacion-licitacion?p_id=
pub async fn tender_classifications(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<CatalogIdParams>,
) -> AppResult<impl IntoResponse> {
    let rows =
        CatalogRepo::tender_classifications(&state.pool, filter::from_wire(params.p_id)).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/catalogos/entes?p_id=&p_descripcion=
pub async fn public_entities(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PublicEntityParams>,
) -> AppResult<impl IntoResponse> {
    let rows = CatalogRepo::public_entities(
        &state.pool,
        filter::from_wire(params.p_id),
        filter::from_wire(params.p_descripcion),
    )
    .await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/catalogos/servidores-publicos?p_id=
pub async fn public_servants(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<CatalogIdParams>,
) -> AppResult<impl IntoResponse> {
    let rows = CatalogRepo::public_servants(&state.pool, filter::from_wire(params.p_id)).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/catalogos/servidores-publicos-ente?p_id=&p_id_ente=
pub async fn public_servant_assignments(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ServantAssignmentParams>,
) -> AppResult<impl IntoResponse> {
    let rows = CatalogRepo::public_servant_assignments(
        &state.pool,
        filter::from_wire(params.p_id),
        filter::from_wire(params.p_id_ente),
    )
    .await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/catalogos/comite
pub async fn committee_kinds(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = CatalogRepo::committee_kinds(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/catalogos/modo-sesion
pub async fn session_modes(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = CatalogRepo::session_modes(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/catalogos/fuentes-financiamiento
pub async fn funding_sources(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rows = CatalogRepo::funding_sources(&state.pool).await?;
    Ok(Json(DataResponse { data: rows }))
}
