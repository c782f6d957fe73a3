//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    Error,
    auth::TokenService,
    db::{acquire_connection, initialize},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Signs and verifies the bearer tokens that authenticate requests.
    pub token_service: TokenService,

    /// The bcrypt cost used when hashing new passwords.
    pub password_hash_cost: u32,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `jwt_secret` is the shared secret used to sign access tokens.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        jwt_secret: &str,
        password_hash_cost: u32,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            token_service: TokenService::new(jwt_secret),
            password_hash_cost,
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }
}

impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.token_service.clone()
    }
}

/// The state needed by route handlers that only touch the database.
#[derive(Debug, Clone)]
pub struct DbState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,
}

impl DbState {
    /// Lock the database connection for the duration of a request.
    ///
    /// # Errors
    /// Returns [Error::DatabaseLockError] if the lock is poisoned.
    pub fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        acquire_connection(&self.db_connection)
    }
}

impl FromRef<AppState> for DbState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
