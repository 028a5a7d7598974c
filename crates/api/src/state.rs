use std::future::Future;
use std::sync::Arc;

use sesiones_core::error::CoreError;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: sesiones_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Await one entity-manager call under the configured persistence bound.
    ///
    /// An expired bound drops the call, which releases its connection and
    /// rolls back any open transaction, and reports [`CoreError::Timeout`].
    pub async fn bounded<T, E>(&self, call: impl Future<Output = Result<T, E>>) -> AppResult<T>
    where
        AppError: From<E>,
    {
        let limit = self.config.db_call_timeout();
        match tokio::time::timeout(limit, call).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(AppError::Core(CoreError::Timeout(format!(
                "Persistence call exceeded {}s",
                limit.as_secs()
            )))),
        }
    }
}
