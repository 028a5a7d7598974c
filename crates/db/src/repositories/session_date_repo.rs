//! Repository for the `procesos.calendario_sesiones_fechas` table.
//!
//! Deletes are soft: `ELIMINAR` clears `activo` on an active row. A second
//! delete of the same date affects nothing and is reported as `NotFound`.

use chrono::{NaiveDate, NaiveTime};
use sesiones_core::action::{ManageCommand, ManageOutcome};
use sesiones_core::error::CoreError;
use sesiones_core::filter::{self, Sentinel};
use sesiones_core::session_date::{validate_session_date, ENTITY};
use sesiones_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use super::SessionRepo;
use crate::dispatch::{self, ManageProcedure, ManageQuery};
use crate::error::DbError;
use crate::models::session_date::{
    CreateSessionDate, SessionDate, SessionDateFilter, UpdateSessionDate,
};

/// Column list shared across queries.
const COLUMNS: &str = "id, id_calendario_sesiones, fecha, hora, activo";

/// `procesos.sp_calendario_sesiones_fechas_gestionar(accion, id, sesion, fecha, hora, activo)`.
pub struct SessionDateProcedure;

impl ManageProcedure for SessionDateProcedure {
    const ENTITY: &'static str = ENTITY;
    const PROCEDURE: &'static str = "procesos.sp_calendario_sesiones_fechas_gestionar";
    const ARITY: usize = 5;

    type Key = DbId;
    type New = CreateSessionDate;
    type Edit = UpdateSessionDate;

    fn validate_new(input: &CreateSessionDate) -> Result<(), CoreError> {
        validate_session_date(Some(input.id_calendario_sesiones), input.fecha)
    }

    fn validate_edit(changes: &UpdateSessionDate) -> Result<(), CoreError> {
        validate_session_date(None, changes.fecha)
    }

    fn bind_new<'q>(query: ManageQuery<'q>, input: &'q CreateSessionDate) -> ManageQuery<'q> {
        query
            .bind(None::<DbId>)
            .bind(input.id_calendario_sesiones)
            .bind(input.fecha)
            .bind(input.hora)
            .bind(input.activo)
    }

    fn bind_edit<'q>(
        query: ManageQuery<'q>,
        key: DbId,
        changes: &'q UpdateSessionDate,
    ) -> ManageQuery<'q> {
        query
            .bind(key)
            .bind(None::<DbId>)
            .bind(changes.fecha)
            .bind(changes.hora)
            .bind(None::<bool>)
    }

    fn bind_delete<'q>(query: ManageQuery<'q>, key: DbId) -> ManageQuery<'q> {
        query
            .bind(key)
            .bind(None::<DbId>)
            .bind(None::<NaiveDate>)
            .bind(None::<NaiveTime>)
            .bind(None::<bool>)
    }
}

/// Entity manager for session dates.
pub struct SessionDateRepo;

impl SessionDateRepo {
    /// Schedule a date under an existing session and return the stored row.
    ///
    /// Fails with `NotFound` on the session when it does not exist.
    pub async fn create(pool: &PgPool, input: &CreateSessionDate) -> Result<SessionDate, DbError> {
        SessionDateProcedure::validate_new(input)?;
        let mut tx = pool.begin().await?;
        let result = Self::insert(&mut tx, input).await;
        dispatch::finish(tx, ENTITY, result).await
    }

    async fn insert(
        conn: &mut PgConnection,
        input: &CreateSessionDate,
    ) -> Result<SessionDate, DbError> {
        SessionRepo::require_in(&mut *conn, input.id_calendario_sesiones).await?;
        let id = dispatch::execute::<SessionDateProcedure>(&mut *conn, ManageCommand::New(input))
            .await?
            .created_id()?;
        Self::find_by_id(&mut *conn, id).await?.ok_or_else(|| {
            CoreError::Internal(format!("SessionDate {id} missing after insert")).into()
        })
    }

    /// Find a date by id, active or not.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<SessionDate>, sqlx::Error> {
        if id.is_match_all() {
            return Ok(None);
        }
        let query = format!(
            "SELECT {COLUMNS} FROM procesos.sp_calendario_sesiones_fechas($1, $2)"
        );
        sqlx::query_as::<_, SessionDate>(&query)
            .bind(id)
            .bind(filter::MATCH_ALL_ID)
            .fetch_optional(executor)
            .await
    }

    /// Find a date by id, failing with `NotFound` when absent.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<SessionDate, DbError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY, id).into())
    }

    /// List dates matching every present filter, ordered by `fecha`, `hora`.
    pub async fn list(
        pool: &PgPool,
        params: SessionDateFilter,
    ) -> Result<Vec<SessionDate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM procesos.sp_calendario_sesiones_fechas($1, $2)"
        );
        sqlx::query_as::<_, SessionDate>(&query)
            .bind(filter::resolve(params.id))
            .bind(filter::resolve(params.id_calendario_sesiones))
            .fetch_all(pool)
            .await
    }

    /// All dates of one session. The match-all id names no session.
    pub async fn list_by_session(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<Vec<SessionDate>, sqlx::Error> {
        if session_id.is_match_all() {
            return Ok(Vec::new());
        }
        Self::list(
            pool,
            SessionDateFilter {
                id: None,
                id_calendario_sesiones: Some(session_id),
            },
        )
        .await
    }

    /// Move a date to a new `fecha` / `hora`. Returns the affected count.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &UpdateSessionDate,
    ) -> Result<u64, DbError> {
        let outcome = dispatch::mutate::<SessionDateProcedure>(
            pool,
            ManageCommand::Edit { key: id, changes },
        )
        .await?;
        Ok(outcome.affected())
    }

    /// Mark a date inactive. Returns the affected count.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, DbError> {
        let outcome =
            dispatch::mutate::<SessionDateProcedure>(pool, ManageCommand::Delete { key: id })
                .await?;
        Ok(outcome.affected())
    }

    /// Dispatch a tagged command.
    pub async fn manage(
        pool: &PgPool,
        command: &ManageCommand<CreateSessionDate, UpdateSessionDate>,
    ) -> Result<ManageOutcome, DbError> {
        match command {
            ManageCommand::New(input) => {
                let date = Self::create(pool, input).await?;
                Ok(ManageOutcome::Created(date.id))
            }
            keyed => dispatch::mutate::<SessionDateProcedure>(pool, keyed.as_ref()).await,
        }
    }
}
