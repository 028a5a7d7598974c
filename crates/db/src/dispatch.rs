//! Generic dispatcher for the multiplexed "manage" stored functions.
//!
//! Every manage function has the shape
//! `fn(accion text, <ARITY entity parameters>) RETURNS bigint`, returning the
//! new identifier for `NUEVO` and the affected row count otherwise. Each
//! repository declares a zero-sized [`ManageProcedure`] describing how its
//! command variants bind onto that parameter tuple; unused slots are bound as
//! typed `NULL`s.

use std::fmt;

use sesiones_core::action::{interpret, ManageCommand, ManageOutcome};
use sesiones_core::error::CoreError;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryScalar;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use crate::error::DbError;

/// A manage call with the action tag already bound as `$1`.
pub type ManageQuery<'q> = QueryScalar<'q, Postgres, Option<i64>, PgArguments>;

/// A borrowed manage command for procedure `P`.
pub type CommandRef<'a, P> = ManageCommand<
    &'a <P as ManageProcedure>::New,
    &'a <P as ManageProcedure>::Edit,
    <P as ManageProcedure>::Key,
>;

/// Describes one entity's manage stored function.
pub trait ManageProcedure {
    /// Entity label used in errors and logs.
    const ENTITY: &'static str;
    /// Schema-qualified function name.
    const PROCEDURE: &'static str;
    /// Number of parameters after the action tag.
    const ARITY: usize;

    type Key: Copy + fmt::Display + Send + Sync;
    type New: Sync;
    type Edit: Sync;

    /// Schema checks for a `NUEVO` payload, run before any round trip.
    fn validate_new(input: &Self::New) -> Result<(), CoreError>;

    /// Schema checks for an `EDITAR` payload, run before any round trip.
    fn validate_edit(changes: &Self::Edit) -> Result<(), CoreError>;

    fn bind_new<'q>(query: ManageQuery<'q>, input: &'q Self::New) -> ManageQuery<'q>;

    fn bind_edit<'q>(
        query: ManageQuery<'q>,
        key: Self::Key,
        changes: &'q Self::Edit,
    ) -> ManageQuery<'q>;

    fn bind_delete<'q>(query: ManageQuery<'q>, key: Self::Key) -> ManageQuery<'q>;
}

/// `SELECT proc($1, ..., $n)` for the tag plus `arity` parameters.
pub fn call_sql(procedure: &str, arity: usize) -> String {
    let placeholders: Vec<String> = (1..=arity + 1).map(|i| format!("${i}")).collect();
    format!("SELECT {procedure}({})", placeholders.join(", "))
}

/// Validate the command payload for its action.
pub fn validate<P: ManageProcedure>(command: &CommandRef<'_, P>) -> Result<(), CoreError> {
    match command {
        ManageCommand::New(input) => P::validate_new(input),
        ManageCommand::Edit { changes, .. } => P::validate_edit(changes),
        ManageCommand::Delete { .. } => Ok(()),
    }
}

/// Issue exactly one manage call on an open connection or transaction.
///
/// Commit and rollback are the caller's responsibility.
pub async fn execute<P: ManageProcedure>(
    conn: &mut PgConnection,
    command: CommandRef<'_, P>,
) -> Result<ManageOutcome, DbError> {
    let action = command.action();
    let sql = call_sql(P::PROCEDURE, P::ARITY);
    let query = sqlx::query_scalar::<_, Option<i64>>(&sql).bind(action.as_tag());
    let query = match command {
        ManageCommand::New(input) => P::bind_new(query, input),
        ManageCommand::Edit { key, changes } => P::bind_edit(query, key, changes),
        ManageCommand::Delete { key } => P::bind_delete(query, key),
    };
    let raw = query.fetch_one(&mut *conn).await?;
    Ok(interpret(action, raw)?)
}

/// Validate, then run one manage call in its own transaction.
///
/// For `EDITAR` / `ELIMINAR`, zero affected rows is reported as
/// [`CoreError::NotFound`]. Any failure rolls the transaction back before
/// propagating.
pub async fn mutate<P: ManageProcedure>(
    pool: &PgPool,
    command: CommandRef<'_, P>,
) -> Result<ManageOutcome, DbError> {
    validate::<P>(&command)?;

    let action = command.action();
    let key = command.key().copied();
    let mut tx = pool.begin().await?;

    let result = execute::<P>(&mut *tx, command)
        .await
        .and_then(|outcome| match key {
            Some(key) => outcome
                .require_affected(P::ENTITY, key)
                .map(ManageOutcome::Affected)
                .map_err(DbError::from),
            None => Ok(outcome),
        });

    let outcome = finish(tx, P::ENTITY, result).await?;
    tracing::debug!(entity = P::ENTITY, %action, ?outcome, "Manage call committed");
    Ok(outcome)
}

/// Commit on success, roll back on failure, and hand the result through.
pub async fn finish<T>(
    tx: Transaction<'_, Postgres>,
    entity: &'static str,
    result: Result<T, DbError>,
) -> Result<T, DbError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            rollback(tx, entity).await;
            Err(err)
        }
    }
}

/// Roll back explicitly, logging instead of masking the original failure.
pub async fn rollback(tx: Transaction<'_, Postgres>, entity: &'static str) {
    match tx.rollback().await {
        Ok(()) => tracing::warn!(entity, "Rolled back manage transaction"),
        Err(err) => tracing::error!(entity, error = %err, "Rollback failed"),
    }
}
