//! Repository for `procesos.calendario_sesiones_listado_entregables`.

use std::convert::Infallible;

use sesiones_core::action::ManageCommand;
use sesiones_core::error::CoreError;
use sesiones_core::filter;
use sesiones_core::links::{LinkKey, DELIVERABLE_ENTITY};
use sesiones_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use super::SessionRepo;
use crate::dispatch::{self, ManageProcedure, ManageQuery};
use crate::error::DbError;
use crate::models::session_deliverable::{
    CreateSessionDeliverable, DeliverableChecklistItem, SessionDeliverable,
};

/// Join with the catalog for the denormalized description.
const SELECT_LINKS: &str = "\
    SELECT l.id_calendario_sesiones, l.id_listado_entregables, c.descripcion \
    FROM procesos.calendario_sesiones_listado_entregables l \
    JOIN catalogos.cat_listado_sesiones_entregables c ON c.id = l.id_listado_entregables";

/// `procesos.sp_calendario_sesiones_listado_entregables_gestionar(accion, sesion, entregable)`.
pub struct SessionDeliverableProcedure;

impl ManageProcedure for SessionDeliverableProcedure {
    const ENTITY: &'static str = DELIVERABLE_ENTITY;
    const PROCEDURE: &'static str = "procesos.sp_calendario_sesiones_listado_entregables_gestionar";
    const ARITY: usize = 2;

    type Key = LinkKey;
    type New = CreateSessionDeliverable;
    type Edit = Infallible;

    fn validate_new(input: &CreateSessionDeliverable) -> Result<(), CoreError> {
        input
            .key()
            .validate("id_calendario_sesiones", "id_listado_entregables")
    }

    fn validate_edit(changes: &Infallible) -> Result<(), CoreError> {
        match *changes {}
    }

    fn bind_new<'q>(
        query: ManageQuery<'q>,
        input: &'q CreateSessionDeliverable,
    ) -> ManageQuery<'q> {
        query
            .bind(input.id_calendario_sesiones)
            .bind(input.id_listado_entregables)
    }

    fn bind_edit<'q>(_: ManageQuery<'q>, _: LinkKey, changes: &'q Infallible) -> ManageQuery<'q> {
        match *changes {}
    }

    fn bind_delete<'q>(query: ManageQuery<'q>, key: LinkKey) -> ManageQuery<'q> {
        query.bind(key.session_id).bind(key.item_id)
    }
}

/// Entity manager for session ↔ deliverable links.
pub struct SessionDeliverableRepo;

impl SessionDeliverableRepo {
    /// Link a deliverable to an existing session and return the link.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSessionDeliverable,
    ) -> Result<SessionDeliverable, DbError> {
        SessionDeliverableProcedure::validate_new(input)?;
        let mut tx = pool.begin().await?;
        let result = Self::insert(&mut tx, input).await;
        dispatch::finish(tx, DELIVERABLE_ENTITY, result).await
    }

    async fn insert(
        conn: &mut PgConnection,
        input: &CreateSessionDeliverable,
    ) -> Result<SessionDeliverable, DbError> {
        SessionRepo::require_in(&mut *conn, input.id_calendario_sesiones).await?;
        dispatch::execute::<SessionDeliverableProcedure>(&mut *conn, ManageCommand::New(input))
            .await?
            .created_id()?;
        let key = input.key();
        Self::find(&mut *conn, key).await?.ok_or_else(|| {
            CoreError::Internal(format!("{DELIVERABLE_ENTITY} {key} missing after insert")).into()
        })
    }

    /// Find one link by its pair.
    pub async fn find<'e>(
        executor: impl PgExecutor<'e>,
        key: LinkKey,
    ) -> Result<Option<SessionDeliverable>, sqlx::Error> {
        let query = format!(
            "{SELECT_LINKS} \
             WHERE l.id_calendario_sesiones = $1 AND l.id_listado_entregables = $2"
        );
        sqlx::query_as::<_, SessionDeliverable>(&query)
            .bind(key.session_id)
            .bind(key.item_id)
            .fetch_optional(executor)
            .await
    }

    /// Deliverables linked to one session, ordered by catalog id.
    pub async fn list_by_session(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<Vec<SessionDeliverable>, sqlx::Error> {
        let query = format!(
            "{SELECT_LINKS} \
             WHERE l.id_calendario_sesiones = $1 \
             ORDER BY l.id_listado_entregables"
        );
        sqlx::query_as::<_, SessionDeliverable>(&query)
            .bind(session_id)
            .fetch_all(pool)
            .await
    }

    /// The deliverables checklist: every catalog item (or just `id`), with
    /// `estatus` set when `session_id` links it.
    pub async fn checklist(
        pool: &PgPool,
        id: Option<DbId>,
        session_id: Option<DbId>,
    ) -> Result<Vec<DeliverableChecklistItem>, sqlx::Error> {
        sqlx::query_as::<_, DeliverableChecklistItem>(
            "SELECT id, descripcion, id_calendario_sesiones, estatus \
             FROM procesos.sp_calendario_sesiones_listado_entregables_popular($1, $2)",
        )
        .bind(filter::resolve(id))
        .bind(filter::resolve(session_id))
        .fetch_all(pool)
        .await
    }

    /// Unlink a deliverable. Returns the affected count.
    pub async fn delete(pool: &PgPool, key: LinkKey) -> Result<u64, DbError> {
        let outcome =
            dispatch::mutate::<SessionDeliverableProcedure>(pool, ManageCommand::Delete { key })
                .await?;
        Ok(outcome.affected())
    }
}
