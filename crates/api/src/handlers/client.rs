//! Handlers for the `/clientes` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sesiones_core::action::ManageRequest;
use sesiones_core::client::ClientSearch;
use sesiones_core::filter;
use sesiones_core::types::DbId;
use sesiones_db::models::client::{ClientFields, CreateClient, UpdateClient};
use sesiones_db::repositories::ClientRepo;

use crate::error::AppResult;
use crate::extract::{ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::query::ClientListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/clientes
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateClient>,
) -> AppResult<impl IntoResponse> {
    let client = state.bounded(ClientRepo::create(&state.pool, &input)).await?;
    tracing::info!(client_id = client.id, "Client created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: client })))
}

/// GET /api/v1/clientes?search=&id=
///
/// A numeric `search` looks up by id; any other text is a case-insensitive
/// name match. Without `search`, lists every client or just `id`.
pub async fn list(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ClientListParams>,
) -> AppResult<impl IntoResponse> {
    let clients = match params.search.as_deref().and_then(ClientSearch::parse) {
        Some(search) => state.bounded(ClientRepo::search(&state.pool, &search)).await?,
        None => {
            let id = filter::from_wire(params.id);
            state.bounded(ClientRepo::list(&state.pool, id)).await?
        }
    };
    Ok(Json(DataResponse { data: clients }))
}

/// GET /api/v1/clientes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let client = state.bounded(ClientRepo::get(&state.pool, id)).await?;
    Ok(Json(DataResponse { data: client }))
}

/// PUT /api/v1/clientes/{id}
///
/// Replaces `nombre` and `edad`; responds with the refreshed record.
pub async fn update(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateClient>,
) -> AppResult<impl IntoResponse> {
    let client = state
        .bounded(ClientRepo::update_and_fetch(&state.pool, id, &input))
        .await?;
    tracing::info!(client_id = id, "Client updated");
    Ok(Json(DataResponse { data: client }))
}

/// DELETE /api/v1/clientes/{id}
pub async fn delete(
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<DbId>,
) -> AppResult<StatusCode> {
    state.bounded(ClientRepo::delete(&state.pool, id)).await?;
    tracing::info!(client_id = id, "Client deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/clientes/gestionar
///
/// Tagged entry point: `{ "accion": "NUEVO" | "EDITAR" | "ELIMINAR", "id"?, ... }`.
pub async fn manage(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ManageRequest<ClientFields>>,
) -> AppResult<impl IntoResponse> {
    let command = request.into_command()?;
    let action = command.action();
    let outcome = state.bounded(ClientRepo::manage(&state.pool, &command)).await?;
    tracing::info!(%action, ?outcome, "Client managed");
    Ok(Json(DataResponse { data: outcome }))
}
