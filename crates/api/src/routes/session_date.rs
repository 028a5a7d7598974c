//! Route definitions for the `/sesiones-fechas` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::session_date;
use crate::state::AppState;

/// Routes mounted at `/sesiones-fechas`.
///
/// ```text
/// GET    /                  -> list             (?id, id_calendario_sesiones)
/// POST   /                  -> create
/// POST   /gestionar         -> manage
/// GET    /by-sesion/{id}    -> list_by_session
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete           (soft)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(session_date::list).post(session_date::create))
        .route("/gestionar", post(session_date::manage))
        .route("/by-sesion/{id}", get(session_date::list_by_session))
        .route(
            "/{id}",
            put(session_date::update).delete(session_date::delete),
        )
}
