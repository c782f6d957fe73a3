//! Defines the endpoint for creating a new budget.

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{
    Error, UserID,
    app_state::DbState,
    budget::{
        db::create_budget,
        domain::{Budget, BudgetDetails, BudgetForm},
    },
    extract::AppJson,
};

/// A route handler for creating a budget for the logged in user.
///
/// Responds with 201 Created and the new budget.
pub async fn create_budget_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    AppJson(form): AppJson<BudgetForm>,
) -> Result<(StatusCode, Json<Budget>), Error> {
    let details = BudgetDetails::try_from(form)?;
    let connection = state.connection()?;

    let budget = create_budget(user_id, &details, &connection)?;

    Ok((StatusCode::CREATED, Json(budget)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        test_utils::{get_test_server, register_test_user},
    };

    #[tokio::test]
    async fn create_defaults_to_active() {
        let server = get_test_server();
        let token = register_test_user(&server, "a@x.com").await;

        let response = server
            .post(endpoints::BUDGETS)
            .authorization_bearer(&token)
            .json(&json!({
                "name": "Rent",
                "amount": 1500.0,
                "period": "monthly",
                "start_date": "2024-01-01",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created = response.json::<Value>();
        assert_eq!(created["is_active"], true);
        assert_eq!(created["start_date"], "2024-01-01");
        assert_eq!(created["end_date"], Value::Null);
    }

    #[tokio::test]
    async fn invalid_end_date_is_rejected() {
        let server = get_test_server();
        let token = register_test_user(&server, "a@x.com").await;

        let response = server
            .post(endpoints::BUDGETS)
            .authorization_bearer(&token)
            .json(&json!({
                "name": "Rent",
                "amount": 1500.0,
                "period": "monthly",
                "start_date": "2024-01-01",
                "end_date": "2024-31-12",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "invalid end_date" }));
    }

    #[tokio::test]
    async fn missing_start_date_is_rejected() {
        let server = get_test_server();
        let token = register_test_user(&server, "a@x.com").await;

        server
            .post(endpoints::BUDGETS)
            .authorization_bearer(&token)
            .json(&json!({ "name": "Rent", "amount": 1500.0, "period": "monthly" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_positive_amount_is_rejected() {
        let server = get_test_server();
        let token = register_test_user(&server, "a@x.com").await;

        server
            .post(endpoints::BUDGETS)
            .authorization_bearer(&token)
            .json(&json!({
                "name": "Rent",
                "amount": 0,
                "period": "monthly",
                "start_date": "2024-01-01",
            }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
