//! Authentication middleware that checks the bearer token on protected routes.

use axum::{
    RequestPartsExt,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{Error, auth::TokenService};

/// Middleware function that checks for a valid bearer token in the `Authorization` header.
/// The user ID is placed into the request extensions and then the request executed normally if
/// the token is valid, otherwise a 401 response is returned.
///
/// **Note**: Route handlers can use the function argument `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard(
    State(token_service): State<TokenService>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let TypedHeader(Authorization(bearer)) = match parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
    {
        Ok(header) => header,
        Err(error) => {
            tracing::warn!("Rejected request to {}: {error}", parts.uri.path());
            return Error::Unauthenticated.into_response();
        }
    };

    let user_id = match token_service.verify(bearer.token()) {
        Ok(user_id) => user_id,
        Err(error) => {
            tracing::warn!("Rejected request to {}: {error}", parts.uri.path());
            return error.into_response();
        }
    };

    parts.extensions.insert(user_id);
    let request = Request::from_parts(parts, body);

    next.run(request).await
}

#[cfg(test)]
mod auth_guard_tests {
    use axum::{
        Extension, Router,
        http::{HeaderValue, StatusCode, header::AUTHORIZATION},
        middleware,
        routing::get,
    };
    use axum_test::TestServer;
    use time::{Duration, OffsetDateTime};

    use crate::{
        UserID,
        auth::{TokenService, middleware::auth_guard},
    };

    const TEST_PATH: &str = "/protected";

    async fn echo_user_id(Extension(user_id): Extension<UserID>) -> String {
        user_id.to_string()
    }

    fn get_test_server(token_service: TokenService) -> TestServer {
        let app = Router::new()
            .route(TEST_PATH, get(echo_user_id))
            .layer(middleware::from_fn_with_state(
                token_service.clone(),
                auth_guard,
            ))
            .with_state(token_service);

        TestServer::new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn valid_token_passes_user_id_to_handler() {
        let token_service = TokenService::new("foobar");
        let user_id = UserID::generate();
        let token = token_service.issue(user_id).unwrap();
        let server = get_test_server(token_service);

        let response = server.get(TEST_PATH).authorization_bearer(token).await;

        response.assert_status_ok();
        response.assert_text(user_id.to_string());
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let server = get_test_server(TokenService::new("foobar"));

        let response = server.get(TEST_PATH).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_rejected() {
        let server = get_test_server(TokenService::new("foobar"));

        let response = server
            .get(TEST_PATH)
            .add_header(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let token_service = TokenService::new("foobar");
        let token = token_service
            .issue_at(
                UserID::generate(),
                OffsetDateTime::now_utc() - Duration::minutes(16),
            )
            .unwrap();
        let server = get_test_server(token_service);

        let response = server.get(TEST_PATH).authorization_bearer(token).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_from_other_secret_is_rejected() {
        let token = TokenService::new("other")
            .issue(UserID::generate())
            .unwrap();
        let server = get_test_server(TokenService::new("foobar"));

        let response = server.get(TEST_PATH).authorization_bearer(token).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
