//! The route handler for logging in with an email and password.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    Error,
    auth::{AuthResponse, AuthState},
    db::acquire_connection,
    extract::AppJson,
    user::get_user_by_email,
};

/// The request body for logging in.
#[derive(Debug, Deserialize)]
pub struct LogInData {
    /// Email entered during log-in.
    pub email: String,
    /// Password entered during log-in.
    pub password: String,
}

/// Handler for log-in requests.
///
/// On success, responds with a new access token and the user's details.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - The email does not belong to a registered user.
/// - The password is not correct.
/// - An internal error occurred when verifying the password or signing the token.
pub async fn log_in(
    State(state): State<AuthState>,
    AppJson(user_data): AppJson<LogInData>,
) -> Result<Json<AuthResponse>, Error> {
    let user = {
        let connection = acquire_connection(&state.db_connection)?;

        match get_user_by_email(&user_data.email, &connection) {
            Ok(user) => user,
            Err(Error::NotFound) => return Err(Error::InvalidCredentials),
            Err(error) => return Err(error),
        }
    };

    let is_password_correct = user
        .password_hash
        .spawn_verify(user_data.password)
        .await
        .inspect_err(|error| tracing::error!("Error verifying password: {error}"))?;

    if !is_password_correct {
        tracing::info!("Log-in failed for user {}: incorrect password", user.id);
        return Err(Error::InvalidCredentials);
    }

    let access_token = state.token_service.issue(user.id)?;

    Ok(Json(AuthResponse { access_token, user }))
}

#[cfg(test)]
mod log_in_tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        test_utils::{TEST_PASSWORD, get_test_server, register_test_user},
    };

    #[tokio::test]
    async fn log_in_succeeds_with_valid_credentials() {
        let server = get_test_server();
        register_test_user(&server, "a@x.com").await;

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({ "email": "a@x.com", "password": TEST_PASSWORD }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert!(body["access_token"].as_str().is_some_and(|token| !token.is_empty()));
        assert_eq!(body["user"]["email"], "a@x.com");
    }

    #[tokio::test]
    async fn token_from_log_in_authenticates_requests() {
        let server = get_test_server();
        register_test_user(&server, "a@x.com").await;
        let body = server
            .post(endpoints::LOG_IN)
            .json(&json!({ "email": "a@x.com", "password": TEST_PASSWORD }))
            .await
            .json::<Value>();
        let token = body["access_token"].as_str().unwrap();

        server
            .get(endpoints::CURRENT_USER)
            .authorization_bearer(token)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn log_in_fails_with_wrong_password() {
        let server = get_test_server();
        register_test_user(&server, "a@x.com").await;

        let response = server
            .post(endpoints::LOG_IN)
            .json(&json!({ "email": "a@x.com", "password": "wrong" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert!(response.json::<Value>().get("access_token").is_none());
    }

    #[tokio::test]
    async fn log_in_fails_with_unknown_email() {
        let server = get_test_server();

        server
            .post(endpoints::LOG_IN)
            .json(&json!({ "email": "nobody@x.com", "password": TEST_PASSWORD }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn log_in_fails_with_malformed_body() {
        let server = get_test_server();

        server
            .post(endpoints::LOG_IN)
            .json(&json!({ "email": "a@x.com" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
