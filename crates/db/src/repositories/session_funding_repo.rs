//! Repository for `procesos.calendario_sesiones_fuentes_financiamiento`.

use std::convert::Infallible;

use sesiones_core::action::ManageCommand;
use sesiones_core::error::CoreError;
use sesiones_core::links::{LinkKey, FUNDING_ENTITY};
use sesiones_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use super::SessionRepo;
use crate::dispatch::{self, ManageProcedure, ManageQuery};
use crate::error::DbError;
use crate::models::session_funding::{CreateSessionFundingSource, SessionFundingSource};

/// Join with the catalog for the denormalized description.
const SELECT_LINKS: &str = "\
    SELECT l.id_calendario_sesiones, l.id_fuente_financiamiento, \
           f.descripcion AS fuente_descripcion \
    FROM procesos.calendario_sesiones_fuentes_financiamiento l \
    JOIN catalogos.cat_fuente_financiamiento f ON f.id = l.id_fuente_financiamiento";

/// `procesos.sp_calendario_sesiones_fuentes_financiamiento_gestionar(accion, sesion, fuente)`.
pub struct SessionFundingProcedure;

impl ManageProcedure for SessionFundingProcedure {
    const ENTITY: &'static str = FUNDING_ENTITY;
    const PROCEDURE: &'static str = "procesos.sp_calendario_sesiones_fuentes_financiamiento_gestionar";
    const ARITY: usize = 2;

    type Key = LinkKey;
    type New = CreateSessionFundingSource;
    type Edit = Infallible;

    fn validate_new(input: &CreateSessionFundingSource) -> Result<(), CoreError> {
        input
            .key()
            .validate("id_calendario_sesiones", "id_fuente_financiamiento")
    }

    fn validate_edit(changes: &Infallible) -> Result<(), CoreError> {
        match *changes {}
    }

    fn bind_new<'q>(
        query: ManageQuery<'q>,
        input: &'q CreateSessionFundingSource,
    ) -> ManageQuery<'q> {
        query
            .bind(input.id_calendario_sesiones)
            .bind(input.id_fuente_financiamiento)
    }

    fn bind_edit<'q>(_: ManageQuery<'q>, _: LinkKey, changes: &'q Infallible) -> ManageQuery<'q> {
        match *changes {}
    }

    fn bind_delete<'q>(query: ManageQuery<'q>, key: LinkKey) -> ManageQuery<'q> {
        query.bind(key.session_id).bind(key.item_id)
    }
}

/// Entity manager for session ↔ funding source links.
pub struct SessionFundingRepo;

impl SessionFundingRepo {
    /// Link a funding source to an existing session and return the link.
    ///
    /// A duplicate pair violates `uq_calendario_sesiones_fuentes_financiamiento`
    /// and the transaction is rolled back.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSessionFundingSource,
    ) -> Result<SessionFundingSource, DbError> {
        SessionFundingProcedure::validate_new(input)?;
        let mut tx = pool.begin().await?;
        let result = Self::insert(&mut tx, input).await;
        dispatch::finish(tx, FUNDING_ENTITY, result).await
    }

    async fn insert(
        conn: &mut PgConnection,
        input: &CreateSessionFundingSource,
    ) -> Result<SessionFundingSource, DbError> {
        SessionRepo::require_in(&mut *conn, input.id_calendario_sesiones).await?;
        dispatch::execute::<SessionFundingProcedure>(&mut *conn, ManageCommand::New(input))
            .await?
            .created_id()?;
        let key = input.key();
        Self::find(&mut *conn, key).await?.ok_or_else(|| {
            CoreError::Internal(format!("{FUNDING_ENTITY} {key} missing after insert")).into()
        })
    }

    /// Find one link by its pair.
    pub async fn find<'e>(
        executor: impl PgExecutor<'e>,
        key: LinkKey,
    ) -> Result<Option<SessionFundingSource>, sqlx::Error> {
        let query = format!(
            "{SELECT_LINKS} \
             WHERE l.id_calendario_sesiones = $1 AND l.id_fuente_financiamiento = $2"
        );
        sqlx::query_as::<_, SessionFundingSource>(&query)
            .bind(key.session_id)
            .bind(key.item_id)
            .fetch_optional(executor)
            .await
    }

    /// Funding sources linked to one session, ordered by source id.
    pub async fn list_by_session(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<Vec<SessionFundingSource>, sqlx::Error> {
        let query = format!(
            "{SELECT_LINKS} \
             WHERE l.id_calendario_sesiones = $1 \
             ORDER BY l.id_fuente_financiamiento"
        );
        sqlx::query_as::<_, SessionFundingSource>(&query)
            .bind(session_id)
            .fetch_all(pool)
            .await
    }

    /// Unlink a funding source. Returns the affected count.
    pub async fn delete(pool: &PgPool, key: LinkKey) -> Result<u64, DbError> {
        let outcome =
            dispatch::mutate::<SessionFundingProcedure>(pool, ManageCommand::Delete { key })
                .await?;
        Ok(outcome.affected())
    }
}
