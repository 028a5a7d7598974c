//! Repository for the `procesos.calendario_sesiones` table.

use sesiones_core::action::{ManageCommand, ManageOutcome};
use sesiones_core::error::CoreError;
use sesiones_core::filter::{self, Sentinel};
use sesiones_core::session::ENTITY;
use sesiones_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::dispatch::{self, ManageProcedure, ManageQuery};
use crate::error::DbError;
use crate::models::session::{CreateSession, Session, SessionFilter, UpdateSession};

/// Column list shared across queries.
const COLUMNS: &str = "\
    id, id_ente, id_usuario, oficio_o_acta_numero, asunto, fecha, \
    id_servidor_publico, modo_sesion, comite, id_clasificacion_licitacion, \
    activo, creado_en";

/// Read function call with all six filter slots.
const READ_SQL: &str = "procesos.sp_calendario_sesiones($1, $2, $3, $4, $5, $6)";

/// `procesos.sp_calendario_sesiones_gestionar(accion, id, ...11 fields)`.
pub struct SessionProcedure;

impl SessionProcedure {
    fn bind_fields<'q>(query: ManageQuery<'q>, fields: &'q CreateSession) -> ManageQuery<'q> {
        query
            .bind(&fields.id_ente)
            .bind(fields.id_usuario)
            .bind(&fields.oficio_o_acta_numero)
            .bind(&fields.asunto)
            .bind(fields.fecha)
            .bind(fields.id_servidor_publico)
            .bind(fields.modo_sesion.as_deref())
            .bind(fields.comite.as_deref())
            .bind(fields.id_clasificacion_licitacion)
            .bind(fields.activo)
    }
}

impl ManageProcedure for SessionProcedure {
    const ENTITY: &'static str = ENTITY;
    const PROCEDURE: &'static str = "procesos.sp_calendario_sesiones_gestionar";
    const ARITY: usize = 11;

    type Key = DbId;
    type New = CreateSession;
    type Edit = UpdateSession;

    fn validate_new(input: &CreateSession) -> Result<(), CoreError> {
        input.validate_all()
    }

    fn validate_edit(changes: &UpdateSession) -> Result<(), CoreError> {
        changes.validate_all()
    }

    fn bind_new<'q>(query: ManageQuery<'q>, input: &'q CreateSession) -> ManageQuery<'q> {
        Self::bind_fields(query.bind(None::<DbId>), input)
    }

    fn bind_edit<'q>(
        query: ManageQuery<'q>,
        key: DbId,
        changes: &'q UpdateSession,
    ) -> ManageQuery<'q> {
        Self::bind_fields(query.bind(key), changes)
    }

    fn bind_delete<'q>(query: ManageQuery<'q>, key: DbId) -> ManageQuery<'q> {
        query
            .bind(key)
            .bind(None::<String>)
            .bind(None::<DbId>)
            .bind(None::<String>)
            .bind(None::<String>)
            .bind(None::<chrono::NaiveDate>)
            .bind(None::<DbId>)
            .bind(None::<String>)
            .bind(None::<String>)
            .bind(None::<DbId>)
            .bind(None::<bool>)
    }
}

/// Entity manager for sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a session and return the stored row, both inside one transaction.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<Session, DbError> {
        input.validate_all()?;
        let mut tx = pool.begin().await?;
        let result = Self::insert(&mut tx, input).await;
        dispatch::finish(tx, ENTITY, result).await
    }

    async fn insert(conn: &mut PgConnection, input: &CreateSession) -> Result<Session, DbError> {
        let id = dispatch::execute::<SessionProcedure>(&mut *conn, ManageCommand::New(input))
            .await?
            .created_id()?;
        Self::find_by_id(&mut *conn, id)
            .await?
            .ok_or_else(|| CoreError::Internal(format!("Session {id} missing after insert")).into())
    }

    /// Find a session by id.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Session>, sqlx::Error> {
        if id.is_match_all() {
            return Ok(None);
        }
        let (from, to) = filter::date_window();
        let query = format!("SELECT {COLUMNS} FROM {READ_SQL}");
        sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .bind(filter::MATCH_ALL_TEXT)
            .bind(filter::MATCH_ALL_ID)
            .bind(filter::MATCH_ALL_ID)
            .bind(from)
            .bind(to)
            .fetch_optional(executor)
            .await
    }

    /// Find a session by id, failing with `NotFound` when absent.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Session, DbError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY, id).into())
    }

    /// Whether a session row exists, taking a key-share lock on it so it
    /// cannot be deleted before the surrounding transaction ends.
    pub async fn exists_in<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let row = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM procesos.calendario_sesiones WHERE id = $1 FOR KEY SHARE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(row.is_some())
    }

    /// List sessions matching every present filter, newest first.
    pub async fn list(pool: &PgPool, params: &SessionFilter) -> Result<Vec<Session>, DbError> {
        let (from, to) = params.fechas.resolve()?;
        let query = format!("SELECT {COLUMNS} FROM {READ_SQL}");
        let sessions = sqlx::query_as::<_, Session>(&query)
            .bind(filter::resolve(params.id))
            .bind(filter::resolve(params.id_ente.clone()))
            .bind(filter::resolve(params.id_servidor_publico))
            .bind(filter::resolve(params.id_clasificacion_licitacion))
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await?;
        Ok(sessions)
    }

    /// Replace every mutable field. Returns the affected count (always 1).
    pub async fn update(pool: &PgPool, id: DbId, changes: &UpdateSession) -> Result<u64, DbError> {
        let outcome =
            dispatch::mutate::<SessionProcedure>(pool, ManageCommand::Edit { key: id, changes })
                .await?;
        Ok(outcome.affected())
    }

    /// Remove a session. Its dates and links go with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, DbError> {
        let outcome =
            dispatch::mutate::<SessionProcedure>(pool, ManageCommand::Delete { key: id }).await?;
        Ok(outcome.affected())
    }

    /// Dispatch a tagged command.
    pub async fn manage(
        pool: &PgPool,
        command: &ManageCommand<CreateSession, UpdateSession>,
    ) -> Result<ManageOutcome, DbError> {
        match command {
            ManageCommand::New(input) => {
                let session = Self::create(pool, input).await?;
                Ok(ManageOutcome::Created(session.id))
            }
            keyed => dispatch::mutate::<SessionProcedure>(pool, keyed.as_ref()).await,
        }
    }

    /// Fail with `NotFound` unless the session exists, locking it for the
    /// rest of the transaction.
    pub(crate) async fn require_in<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<(), DbError> {
        if Self::exists_in(executor, id).await? {
            Ok(())
        } else {
            Err(CoreError::not_found(ENTITY, id).into())
        }
    }
}
