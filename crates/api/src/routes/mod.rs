pub mod catalog;
pub mod client;
pub mod health;
pub mod session;
pub mod session_date;
pub mod session_deliverable;
pub mod session_funding;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /clientes                                        list (?search, id), create
/// /clientes/gestionar                              tagged manage (POST)
/// /clientes/{id}                                   get, update, delete
///
/// /sesiones                                        list (filters), create
/// /sesiones/gestionar                              tagged manage (POST)
/// /sesiones/entregables-popular                    deliverables checklist (GET)
/// /sesiones/{id}                                   get, update, delete
///
/// /sesiones-fechas                                 list (?id, id_calendario_sesiones), create
/// /sesiones-fechas/gestionar                       tagged manage (POST)
/// /sesiones-fechas/by-sesion/{id}                  dates of one session (GET)
/// /sesiones-fechas/{id}                            update, soft delete
///
/// /sesiones-fuentes                                link (POST)
/// /sesiones-fuentes/{id_calendario_sesiones}       links of one session (GET)
/// /sesiones-fuentes/{session_id}/{source_id}       unlink (DELETE)
///
/// /sesiones-entregables                            links of one session (GET), link (POST)
/// /sesiones-entregables/{session_id}/{item_id}     unlink (DELETE)
///
/// /catalogos/clasificacion-licitacion              tender classifications (?p_id)
/// /catalogos/entes                                 public entities (?p_id, p_descripcion)
/// /catalogos/servidores-publicos                   public servants (?p_id)
/// /catalogos/servidores-publicos-ente              servant assignments (?p_id, p_id_ente)
/// /catalogos/comite                                committee kinds
/// /catalogos/modo-sesion                           session modes
/// /catalogos/fuentes-financiamiento                funding sources
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/clientes", client::router())
        .nest("/sesiones", session::router())
        .nest("/sesiones-fechas", session_date::router())
        .nest("/sesiones-fuentes", session_funding::router())
        .nest("/sesiones-entregables", session_deliverable::router())
        .nest("/catalogos", catalog::router())
}
