//! Read-only catalog rows.

use serde::Serialize;
use sesiones_core::types::DbId;
use sqlx::FromRow;

/// `catalogos.sp_cat_clasificacion_licitacion`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TenderClassification {
    pub id: DbId,
    pub descripcion: String,
    pub tipo_licitacion: String,
}

/// `catalogos.sp_cat_ente`. Public entities are keyed by a text code.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicEntity {
    pub id: String,
    pub descripcion: String,
    pub siglas: Option<String>,
    pub clasificacion: Option<String>,
    pub id_ente_tipo: Option<String>,
    pub ente_tipo_descripcion: Option<String>,
}

/// `catalogos.sp_cat_servidor_publico`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicServant {
    pub id: DbId,
    pub nombre: String,
    pub cargo: String,
    pub activo: bool,
}

/// `catalogos.sp_servidor_publico_ente`: a public servant with the entity
/// they serve.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PublicServantAssignment {
    pub id: DbId,
    pub nombre: String,
    pub cargo: String,
    pub activo: bool,
    pub id_ente: String,
    pub ente_publico: String,
    pub ente_siglas: Option<String>,
    pub ente_clasificacion: Option<String>,
}

/// `catalogos.cat_fuente_financiamiento`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FundingSource {
    pub id: DbId,
    pub descripcion: String,
}

/// One value of the `procesos.comite_sesion` enum.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommitteeKind {
    pub comite_sesion: String,
}

/// One value of the `procesos.modo_sesion` enum.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SessionMode {
    pub modo_sesion: String,
}
