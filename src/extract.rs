//! Extractors that turn axum's rejections into the application's JSON errors.

use axum::extract::{
    FromRequest, FromRequestParts,
    rejection::{JsonRejection, PathRejection, QueryRejection},
};

use serde::Deserialize;

use crate::{Error, database_id::DatabaseId};

/// A JSON request body.
///
/// Behaves like [axum::Json] but rejects with [Error::InvalidInput] so that
/// clients get the same `{"error": ...}` body as for every other error.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct AppJson<T>(pub T);

/// The query string of a request.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct AppQuery<T>(pub T);

/// The `{id}` segment of a resource route.
///
/// Extracted as `Path<IdPath>`, so the single path parameter is deserialized
/// straight into the wrapped ID.
#[derive(Debug, Deserialize, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct IdPath(pub DatabaseId);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected JSON body: {}", rejection.body_text());
        Error::InvalidInput("invalid payload".to_owned())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {}", rejection.body_text());
        Error::InvalidInput("invalid query".to_owned())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path: {}", rejection.body_text());
        Error::InvalidInput("invalid id".to_owned())
    }
}
