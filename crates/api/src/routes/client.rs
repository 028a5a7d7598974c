//! Route definitions for the `/clientes` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::client;
use crate::state::AppState;

/// Routes mounted at `/clientes`.
///
/// ```text
/// GET    /              -> list      (?search, id)
/// POST   /              -> create
/// POST   /gestionar     -> manage
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(client::list).post(client::create))
        .route("/gestionar", post(client::manage))
        .route(
            "/{id}",
            get(client::get_by_id)
                .put(client::update)
                .delete(client::delete),
        )
}
