//! Read-only catalog lookups backing the session forms.

use sesiones_core::filter;
use sesiones_core::types::DbId;
use sqlx::PgPool;

use crate::models::catalog::{
    CommitteeKind, FundingSource, PublicEntity, PublicServant, PublicServantAssignment,
    SessionMode, TenderClassification,
};

/// Provides filtered reads over the `catalogos` schema and the session enums.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Tender classifications, optionally narrowed to one id.
    pub async fn tender_classifications(
        pool: &PgPool,
        id: Option<DbId>,
    ) -> Result<Vec<TenderClassification>, sqlx::Error> {
        sqlx::query_as::<_, TenderClassification>(
            "SELECT id, descripcion, tipo_licitacion \
             FROM catalogos.sp_cat_clasificacion_licitacion($1)",
        )
        .bind(filter::resolve(id))
        .fetch_all(pool)
        .await
    }

    /// Active public entities by code and/or description substring.
    pub async fn public_entities(
        pool: &PgPool,
        id: Option<String>,
        descripcion: Option<String>,
    ) -> Result<Vec<PublicEntity>, sqlx::Error> {
        sqlx::query_as::<_, PublicEntity>(
            "SELECT id, descripcion, siglas, clasificacion, id_ente_tipo, ente_tipo_descripcion \
             FROM catalogos.sp_cat_ente($1, $2)",
        )
        .bind(filter::resolve(id))
        .bind(filter::resolve(descripcion))
        .fetch_all(pool)
        .await
    }

    pub async fn public_servants(
        pool: &PgPool,
        id: Option<DbId>,
    ) -> Result<Vec<PublicServant>, sqlx::Error> {
        sqlx::query_as::<_, PublicServant>(
            "SELECT id, nombre, cargo, activo FROM catalogos.sp_cat_servidor_publico($1)",
        )
        .bind(filter::resolve(id))
        .fetch_all(pool)
        .await
    }

    /// Public servants joined with the entities they serve.
    pub async fn public_servant_assignments(
        pool: &PgPool,
        id: Option<DbId>,
        id_ente: Option<String>,
    ) -> Result<Vec<PublicServantAssignment>, sqlx::Error> {
        sqlx::query_as::<_, PublicServantAssignment>(
            "SELECT id, nombre, cargo, activo, id_ente, ente_publico, ente_siglas, \
                    ente_clasificacion \
             FROM catalogos.sp_servidor_publico_ente($1, $2)",
        )
        .bind(filter::resolve(id))
        .bind(filter::resolve(id_ente))
        .fetch_all(pool)
        .await
    }

    /// Values of the `procesos.comite_sesion` enum, in declaration order.
    pub async fn committee_kinds(pool: &PgPool) -> Result<Vec<CommitteeKind>, sqlx::Error> {
        sqlx::query_as::<_, CommitteeKind>("SELECT comite_sesion FROM procesos.sp_enum_comite()")
            .fetch_all(pool)
            .await
    }

    /// Values of the `procesos.modo_sesion` enum, in declaration order.
    pub async fn session_modes(pool: &PgPool) -> Result<Vec<SessionMode>, sqlx::Error> {
        sqlx::query_as::<_, SessionMode>("SELECT modo_sesion FROM procesos.sp_enum_modo_sesion()")
            .fetch_all(pool)
            .await
    }

    pub async fn funding_sources(pool: &PgPool) -> Result<Vec<FundingSource>, sqlx::Error> {
        sqlx::query_as::<_, FundingSource>(
            "SELECT id, descripcion FROM catalogos.cat_fuente_financiamiento ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }
}
