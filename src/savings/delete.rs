//! Defines the endpoint for deleting a savings goal.

use axum::{Extension, Json, extract::State};

use crate::{
    Error, UserID, app_state::DbState, extract::IdPath, health::StatusResponse,
    savings::db::delete_savings_goal,
};

/// A route handler for deleting a savings goal owned by the logged in user.
///
/// Responds with `{"status": "deleted"}` even if there was nothing to delete.
pub async fn delete_savings_goal_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    IdPath(goal_id): IdPath,
) -> Result<Json<StatusResponse>, Error> {
    let connection = state.connection()?;

    let rows_affected = delete_savings_goal(goal_id, user_id, &connection)?;
    tracing::debug!("Deleted {rows_affected} savings goal(s) with id {goal_id}");

    Ok(Json(StatusResponse::DELETED))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{create_test_resource, get_test_server, register_test_user},
    };

    #[tokio::test]
    async fn delete_is_idempotent_and_owner_scoped() {
        let server = get_test_server();
        let owner = register_test_user(&server, "owner@x.com").await;
        let intruder = register_test_user(&server, "intruder@x.com").await;
        let created = create_test_resource(
            &server,
            &owner,
            endpoints::SAVINGS_GOALS,
            json!({ "name": "Holiday", "target_amount": 500.0 }),
        )
        .await;
        let endpoint = format_endpoint(endpoints::SAVINGS_GOAL, created["id"].as_str().unwrap());

        server
            .delete(&endpoint)
            .authorization_bearer(&intruder)
            .await
            .assert_status_ok();
        server
            .get(&endpoint)
            .authorization_bearer(&owner)
            .await
            .assert_status_ok();

        for _ in 0..2 {
            server
                .delete(&endpoint)
                .authorization_bearer(&owner)
                .await
                .assert_json(&json!({ "status": "deleted" }));
        }
        server
            .get(&endpoint)
            .authorization_bearer(&owner)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
