//! Defines the endpoint for creating a new transaction.

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{
    Error, UserID,
    app_state::DbState,
    extract::AppJson,
    transaction::{
        db::create_transaction,
        domain::{Transaction, TransactionDetails, TransactionForm},
    },
};

/// A route handler for recording a transaction for the logged in user.
///
/// Responds with 201 Created and the new transaction.
pub async fn create_transaction_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    AppJson(form): AppJson<TransactionForm>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let details = TransactionDetails::try_from(form)?;
    let connection = state.connection()?;

    let transaction = create_transaction(user_id, &details, &connection)?;

    Ok((StatusCode::CREATED, Json(transaction)))
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
    async fn create_returns_transaction() {
        let server = get_test_server();
        let token = register_test_user(&server, "a@x.com").await;

        let response = server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&token)
            .json(&json!({
                "title": "Groceries",
                "amount": 50.0,
                "type": "expense",
                "category": "food",
                "date": "2024-01-15",
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created = response.json::<Value>();
        assert_eq!(created["title"], "Groceries");
        assert_eq!(created["type"], "expense");
        assert_eq!(created["transaction_date"], "2024-01-15");
        assert_eq!(created["account_id"], Value::Null);
    }

    #[tokio::test]
    async fn invalid_date_is_rejected() {
        let server = get_test_server();
        let token = register_test_user(&server, "a@x.com").await;

        let response = server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&token)
            .json(&json!({
                "title": "Groceries",
                "amount": 50.0,
                "type": "expense",
                "date": "15/01/2024",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "invalid date" }));
    }

    #[tokio::test]
    async fn missing_date_is_rejected() {
        let server = get_test_server();
        let token = register_test_user(&server, "a@x.com").await;

        let response = server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(&token)
            .json(&json!({ "title": "Groceries", "amount": 50.0, "type": "expense" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "missing date" }));
    }
}
