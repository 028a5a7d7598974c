//! Extractors with the API's error shape.
//!
//! Axum's stock `Json`, `Path` and `Query` reject bad input with plain text.
//! The wrappers here decode the same way but report the failure as a
//! `VALIDATION_ERROR` naming the offending field when serde reports one.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use sesiones_core::error::CoreError;

use crate::error::AppError;

/// Field names reported when serde gives no path.
const BODY_FIELD: &str = "body";
const PATH_FIELD: &str = "path";
const QUERY_FIELD: &str = "query";

/// A JSON request body of type `T`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidatedJson(value)),
            Err(rejection) => Err(reject(rejection)),
        }
    }
}

fn reject(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(err) => AppError::BadRequest(err.body_text()),
        other => {
            let text = other.body_text();
            let field = offending_field(&text).unwrap_or_else(|| BODY_FIELD.to_string());
            AppError::Core(CoreError::validation(field, text))
        }
    }
}

/// Typed path segments, e.g. `ValidatedPath<DbId>` for `/{id}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ValidatedPath(value)),
            Err(rejection) => Err(reject_path(rejection)),
        }
    }
}

/// A typed query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ValidatedQuery(value)),
            Err(rejection) => Err(reject_query(rejection)),
        }
    }
}

fn reject_path(rejection: PathRejection) -> AppError {
    let text = rejection.body_text();
    AppError::Core(CoreError::validation(PATH_FIELD, text))
}

fn reject_query(rejection: QueryRejection) -> AppError {
    let text = rejection.body_text();
    let field = offending_field(&text).unwrap_or_else(|| QUERY_FIELD.to_string());
    AppError::Core(CoreError::validation(field, text))
}

/// Pull the field name out of a serde decoding message.
///
/// Handles `missing field `x`` and the `path: reason` prefix added for
/// errors below the root.
fn offending_field(text: &str) -> Option<String> {
    if let Some(rest) = text.split("missing field `").nth(1) {
        return rest.split('`').next().map(str::to_string);
    }
    let detail = text.split("target type: ").nth(1)?;
    let (path, _) = detail.split_once(": ")?;
    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    is_path.then(|| path.to_string())
}
