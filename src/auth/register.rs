//! The route handler for registering a new user.

use axum::{Json, extract::State, http::StatusCode};
use email_address::EmailAddress;
use serde::Deserialize;

use crate::{
    Error,
    auth::{AuthResponse, AuthState, PasswordHash},
    db::acquire_connection,
    extract::AppJson,
    user::{NewUser, create_user},
};

/// The request body for registering a user.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Handler for registering a new user.
///
/// Responds with 201 Created, a new access token and the user's details.
///
/// # Errors
///
/// This function will return an error if:
/// - any field is empty,
/// - the email is not a valid email address,
/// - the email is already registered,
/// - the password could not be hashed or the token could not be signed.
pub async fn register_user(
    State(state): State<AuthState>,
    AppJson(form): AppJson<RegisterForm>,
) -> Result<(StatusCode, Json<AuthResponse>), Error> {
    let email = form.email.trim();
    let first_name = form.first_name.trim();
    let last_name = form.last_name.trim();

    if email.is_empty() || form.password.is_empty() || first_name.is_empty() || last_name.is_empty()
    {
        return Err(Error::InvalidInput("missing fields".to_owned()));
    }

    if !EmailAddress::is_valid(email) {
        return Err(Error::InvalidInput("invalid email".to_owned()));
    }

    // Hashing happens outside of the database lock.
    let password_hash =
        PasswordHash::spawn_new(form.password, state.password_hash_cost).await?;

    let user = {
        let connection = acquire_connection(&state.db_connection)?;

        create_user(
            NewUser {
                email: email.to_owned(),
                password_hash,
                first_name: first_name.to_owned(),
                last_name: last_name.to_owned(),
            },
            &connection,
        )?
    };

    tracing::info!("Registered user {}", user.id);

    let access_token = state.token_service.issue(user.id)?;

    Ok((StatusCode::CREATED, Json(AuthResponse { access_token, user })))
}
