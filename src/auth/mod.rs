//! Registration, log-in and the bearer tokens that authenticate every other route.

mod log_in;
mod middleware;
mod password;
mod register;
mod token;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;
use serde::Serialize;

pub use log_in::log_in;
pub use middleware::auth_guard;
pub use password::PasswordHash;
pub use register::register_user;
pub use token::{TOKEN_DURATION, TokenService};

use crate::{AppState, User};

/// The state needed to register and log in users.
#[derive(Debug, Clone)]
pub struct AuthState {
    /// The database connection for reading and creating users.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Issues the access token returned on success.
    pub token_service: TokenService,
    /// The bcrypt cost used when hashing new passwords.
    pub password_hash_cost: u32,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            token_service: state.token_service.clone(),
            password_hash_cost: state.password_hash_cost,
        }
    }
}

/// The response body for a successful registration or log-in.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// A bearer token valid for [TOKEN_DURATION].
    pub access_token: String,
    /// The user the token was issued to.
    pub user: User,
}
