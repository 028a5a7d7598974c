//! Route definitions for the read-only `/catalogos` lookups.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/catalogos`.
///
/// ```text
/// GET /clasificacion-licitacion     -> tender_classifications     (?p_id)
/// GET /entes                        -> public_entities            (?p_id, p_descripcion)
/// GET /servidores-publicos          -> public_servants            (?p_id)
/// GET /servidores-publicos-ente     -> public_servant_assignments (?p_id, p_id_ente)
/// GET /comite                       -> committee_kinds
/// GET /modo-sesion                  -> session_modes
/// GET /fuentes-financiamiento       -> funding_sources
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/clasificacion-licitacion", get(catalog::tender_classifications))
        .route("/entes", get(catalog::public_entities))
        .route("/servidores-publicos", get(catalog::public_servants))
        .route(
            "/servidores-publicos-ente",
            get(catalog::public_servant_assignments),
        )
        .route("/comite", get(catalog::committee_kinds))
        .route("/modo-sesion", get(catalog::session_modes))
        .route("/fuentes-financiamiento", get(catalog::funding_sources))
}
