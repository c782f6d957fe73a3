//! Defines the endpoint for replacing a transaction.

use axum::{Extension, Json, extract::State};

use crate::{
    Error, UserID,
    app_state::DbState,
    extract::{AppJson, IdPath},
    transaction::{
        db::update_transaction,
        domain::{Transaction, TransactionDetails, TransactionForm},
    },
};

/// A route handler for replacing a transaction owned by the logged in user.
///
/// The stored date is kept when the request has no date or an empty one.
pub async fn update_transaction_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    IdPath(transaction_id): IdPath,
    AppJson(form): AppJson<TransactionForm>,
) -> Result<Json<Transaction>, Error> {
    let details = TransactionDetails::try_from(form)?;
    let connection = state.connection()?;

    update_transaction(transaction_id, user_id, &details, &connection).map(Json)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{create_test_resource, get_test_server, register_test_user},
    };

    fn groceries() -> Value {
        json!({
            "title": "Groceries",
            "amount": 50.0,
            "type": "expense",
            "category": "food",
            "date": "2024-01-15",
        })
    }

    #[tokio::test]
    async fn update_with_empty_date_keeps_date() {
        let server = get_test_server();
        let token = register_test_user(&server, "a@x.com").await;
        let created =
            create_test_resource(&server, &token, endpoints::TRANSACTIONS, groceries()).await;

        let response = server
            .put(&format_endpoint(
                endpoints::TRANSACTION,
                created["id"].as_str().unwrap(),
            ))
            .authorization_bearer(&token)
            .json(&json!({ "title": "Pay", "amount": 900.0, "type": "income", "date": "" }))
            .await;

        response.assert_status_ok();
        let updated = response.json::<Value>();
        assert_eq!(updated["title"], "Pay");
        assert_eq!(updated["type"], "income");
        assert_eq!(updated["category"], "");
        assert_eq!(updated["transaction_date"], "2024-01-15");
    }

    #[tokio::test]
    async fn update_other_users_transaction_is_not_found() {
        let server = get_test_server();
        let owner = register_test_user(&server, "owner@x.com").await;
        let intruder = register_test_user(&server, "intruder@x.com").await;
        let created =
            create_test_resource(&server, &owner, endpoints::TRANSACTIONS, groceries()).await;
        let endpoint = format_endpoint(endpoints::TRANSACTION, created["id"].as_str().unwrap());

        server
            .put(&endpoint)
            .authorization_bearer(&intruder)
            .json(&groceries())
            .await
            .assert_status(StatusCode::NOT_FOUND);

        server
            .get(&endpoint)
            .authorization_bearer(&intruder)
            .await
            .assert_status(StatusCode::NOT_FOUND);

        server
            .get(&endpoint)
            .authorization_bearer(&owner)
            .await
            .assert_json(&created);
    }
}
