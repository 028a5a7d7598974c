//! Route definitions for the `/sesiones-entregables` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::session_deliverable;
use crate::state::AppState;

/// Routes mounted at `/sesiones-entregables`.
///
/// ```text
/// GET    /                                                  -> list_by_session (?id_calendario_sesiones)
/// POST   /                                                  -> create
/// DELETE /{id_calendario_sesiones}/{id_listado_entregables} -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(session_deliverable::list_by_session).post(session_deliverable::create),
        )
        .route(
            "/{session_id}/{deliverable_id}",
            delete(session_deliverable::delete),
        )
}
