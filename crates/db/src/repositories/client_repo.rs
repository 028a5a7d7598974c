//! Repository for the `clientes` table.

use sesiones_core::action::{ManageCommand, ManageOutcome};
use sesiones_core::client::{ClientSearch, ENTITY};
use sesiones_core::error::CoreError;
use sesiones_core::filter::{self, Sentinel};
use sesiones_core::types::DbId;
use sesiones_core::validation::check;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::dispatch::{self, ManageProcedure, ManageQuery};
use crate::error::DbError;
use crate::models::client::{Client, CreateClient, UpdateClient};

/// Column list shared across queries.
const COLUMNS: &str = "id, nombre, edad, fecha_creacion";

/// `sp_clientes_gestionar(accion, id, nombre, edad)`.
pub struct ClientProcedure;

impl ManageProcedure for ClientProcedure {
    const ENTITY: &'static str = ENTITY;
    const PROCEDURE: &'static str = "sp_clientes_gestionar";
    const ARITY: usize = 3;

    type Key = DbId;
    type New = CreateClient;
    type Edit = UpdateClient;

    fn validate_new(input: &CreateClient) -> Result<(), CoreError> {
        check(input)
    }

    fn validate_edit(changes: &UpdateClient) -> Result<(), CoreError> {
        check(changes)
    }

    fn bind_new<'q>(query: ManageQuery<'q>, input: &'q CreateClient) -> ManageQuery<'q> {
        query
            .bind(None::<DbId>)
            .bind(&input.nombre)
            .bind(input.edad)
    }

    fn bind_edit<'q>(query: ManageQuery<'q>, key: DbId, changes: &'q UpdateClient) -> ManageQuery<'q> {
        query.bind(key).bind(&changes.nombre).bind(changes.edad)
    }

    fn bind_delete<'q>(query: ManageQuery<'q>, key: DbId) -> ManageQuery<'q> {
        query.bind(key).bind(None::<String>).bind(None::<i32>)
    }
}

/// Entity manager for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a client and return the stored row, both inside one transaction.
    pub async fn create(pool: &PgPool, input: &CreateClient) -> Result<Client, DbError> {
        check(input)?;
        let mut tx = pool.begin().await?;
        let result = Self::insert(&mut tx, input).await;
        dispatch::finish(tx, ENTITY, result).await
    }

    async fn insert(conn: &mut PgConnection, input: &CreateClient) -> Result<Client, DbError> {
        let id = dispatch::execute::<ClientProcedure>(&mut *conn, ManageCommand::New(input))
            .await?
            .created_id()?;
        Self::find_by_id(&mut *conn, id)
            .await?
            .ok_or_else(|| CoreError::Internal(format!("Client {id} missing after insert")).into())
    }

    /// Find a client by id.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Client>, sqlx::Error> {
        if id.is_match_all() {
            return Ok(None);
        }
        let query = format!("SELECT {COLUMNS} FROM sp_clientes_consultar($1)");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a client by id, failing with `NotFound` when absent.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Client, DbError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY, id).into())
    }

    /// List clients, optionally narrowed to one id.
    pub async fn list(pool: &PgPool, id: Option<DbId>) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sp_clientes_consultar($1)");
        sqlx::query_as::<_, Client>(&query)
            .bind(filter::resolve(id))
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring match on the name.
    pub async fn search_by_name(pool: &PgPool, name: &str) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clientes \
             WHERE nombre ILIKE $1 ESCAPE '\\' \
             ORDER BY id"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(ClientSearch::like_pattern(name))
            .fetch_all(pool)
            .await
    }

    /// Run a free-text search: numeric terms look up by id.
    pub async fn search(pool: &PgPool, search: &ClientSearch) -> Result<Vec<Client>, sqlx::Error> {
        match search {
            ClientSearch::ById(id) => Self::list(pool, filter::from_wire(Some(*id))).await,
            ClientSearch::ByName(name) => Self::search_by_name(pool, name).await,
        }
    }

    /// Replace a client's name and age. Returns the affected count (always 1).
    pub async fn update(pool: &PgPool, id: DbId, changes: &UpdateClient) -> Result<u64, DbError> {
        let outcome =
            dispatch::mutate::<ClientProcedure>(pool, ManageCommand::Edit { key: id, changes })
                .await?;
        Ok(outcome.affected())
    }

    /// Replace a client's name and age and return the refreshed row.
    ///
    /// The edit and the re-read share one transaction, so a concurrent delete
    /// cannot slip between them.
    pub async fn update_and_fetch(
        pool: &PgPool,
        id: DbId,
        changes: &UpdateClient,
    ) -> Result<Client, DbError> {
        check(changes)?;
        let mut tx = pool.begin().await?;
        let result = Self::replace(&mut tx, id, changes).await;
        dispatch::finish(tx, ENTITY, result).await
    }

    async fn replace(
        conn: &mut PgConnection,
        id: DbId,
        changes: &UpdateClient,
    ) -> Result<Client, DbError> {
        dispatch::execute::<ClientProcedure>(&mut *conn, ManageCommand::Edit { key: id, changes })
            .await?
            .require_affected(ENTITY, id)?;
        Self::find_by_id(&mut *conn, id)
            .await?
            .ok_or_else(|| CoreError::Internal(format!("Client {id} missing after update")).into())
    }

    /// Remove a client permanently. Returns the affected count (always 1).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, DbError> {
        let outcome =
            dispatch::mutate::<ClientProcedure>(pool, ManageCommand::Delete { key: id }).await?;
        Ok(outcome.affected())
    }

    /// Dispatch a tagged command.
    pub async fn manage(
        pool: &PgPool,
        command: &ManageCommand<CreateClient, UpdateClient>,
    ) -> Result<ManageOutcome, DbError> {
        match command {
            ManageCommand::New(input) => {
                let client = Self::create(pool, input).await?;
                Ok(ManageOutcome::Created(client.id))
            }
            keyed => dispatch::mutate::<ClientProcedure>(pool, keyed.as_ref()).await,
        }
    }
}
