//! Route definitions for the `/sesiones-fuentes` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::session_funding;
use crate::state::AppState;

/// Routes mounted at `/sesiones-fuentes`.
///
/// ```text
/// POST   /                                                   -> create
/// GET    /{id_calendario_sesiones}                           -> list_by_session
/// DELETE /{id_calendario_sesiones}/{id_fuente_financiamiento} -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(session_funding::create))
        .route("/{session_id}", get(session_funding::list_by_session))
        .route("/{session_id}/{source_id}", delete(session_funding::delete))
}
