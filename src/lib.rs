//! Ledgerline is a JSON API for personal bookkeeping.
//!
//! Users register or log in to receive a short-lived bearer token, then manage
//! their accounts, transactions, budgets and savings goals. Every resource is
//! owned by exactly one user and every query is scoped to that owner, so a
//! resource that belongs to someone else looks exactly like one that does not
//! exist.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod account;
mod analytics;
mod app_state;
mod auth;
mod budget;
mod database_id;
mod date;
mod db;
mod endpoints;
mod extract;
mod health;
mod logging;
mod routing;
mod savings;
mod transaction;
mod user;
mod validate;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use auth::{PasswordHash, TOKEN_DURATION, TokenService};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use user::{User, UserID};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for the ctrl+c signal: {error}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request did not carry a valid bearer token.
    ///
    /// Covers a missing or malformed `Authorization` header, a bad signature,
    /// an expired token and a token whose subject is not a user ID.
    #[error("missing or invalid bearer token")]
    Unauthenticated,

    /// The email does not belong to a registered user or the password is wrong.
    ///
    /// Both cases share one variant so that a client cannot check for
    /// registered email addresses.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The request body, query or path could not be used as given.
    ///
    /// The string is shown to the client and should say which field was wrong.
    #[error("{0}")]
    InvalidInput(String),

    /// The requested resource was not found.
    ///
    /// Also returned when the resource exists but belongs to another user.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The email used to register is already taken.
    #[error("the email address is already registered")]
    DuplicateEmail,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// An access token could not be signed.
    #[error("could not create access token: {0}")]
    TokenCreation(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::Unauthenticated | Error::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            Error::InvalidInput(message) => (StatusCode::BAD_REQUEST, message),
            Error::NotFound => (StatusCode::NOT_FOUND, "not found".to_owned()),
            // Kept vague on purpose, see the variant docs.
            Error::DuplicateEmail => (
                StatusCode::BAD_REQUEST,
                "could not register a user with these details".to_owned(),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
