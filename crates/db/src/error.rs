use sesiones_core::error::CoreError;

/// Failure of an entity-manager operation.
///
/// Domain outcomes (not found, validation) stay typed as [`CoreError`];
/// driver failures keep the raw [`sqlx::Error`] so the transport layer can
/// classify constraint violations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
