//! The health check and other bodies that only carry a status.

use axum::Json;
use serde::Serialize;

/// A response body of the form `{"status": "..."}`.
#[derive(Debug, Serialize, PartialEq)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    /// The body returned by the health check.
    pub const OK: Self = Self { status: "ok" };
    /// The body returned after a delete, whether or not a row was removed.
    pub const DELETED: Self = Self { status: "deleted" };
}

/// A route handler that responds with `{"status": "ok"}` while the server is up.
pub async fn get_health() -> Json<StatusResponse> {
    Json(StatusResponse::OK)
}

#[cfg(test)]
mod tests {
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{endpoints, health::get_health};

    #[tokio::test]
    async fn health_check_returns_ok() {
        let app = Router::new().route(endpoints::HEALTH, get(get_health));
        let server = TestServer::new(app).expect("Could not create test server.");

        let response = server.get(endpoints::HEALTH).await;

        response.assert_status_ok();
        response.assert_json(&json!({ "status": "ok" }));
    }
}
