//! Route definitions for the `/sesiones` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Routes mounted at `/sesiones`.
///
/// ```text
/// GET    /                        -> list                    (filters)
/// POST   /                        -> create
/// POST   /gestionar               -> manage
/// GET    /entregables-popular     -> deliverables_checklist  (?id, id_calendario_sesiones)
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(session::list).post(session::create))
        .route("/gestionar", post(session::manage))
        .route("/entregables-popular", get(session::deliverables_checklist))
        .route(
            "/{id}",
            get(session::get_by_id)
                .put(session::update)
                .delete(session::delete),
        )
}
