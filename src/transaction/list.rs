//! Defines the endpoints for reading transactions.

use axum::{Extension, Json, extract::State};

use crate::{
    Error, UserID,
    app_state::DbState,
    extract::{AppQuery, IdPath},
    transaction::{
        db::{get_transaction, get_transactions},
        domain::{Transaction, TransactionFilter, TransactionQuery},
    },
};

/// A route handler that lists the logged in user's transactions, most recent first.
///
/// Supports the query parameters `type`, `category` and `limit`.
pub async fn list_transactions_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    AppQuery(query): AppQuery<TransactionQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let filter = TransactionFilter::from(query);
    let connection = state.connection()?;

    get_transactions(user_id, &filter, &connection).map(Json)
}

/// A route handler for getting one of the logged in user's transactions.
pub async fn get_transaction_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    IdPath(transaction_id): IdPath,
) -> Result<Json<Transaction>, Error> {
    let connection = state.connection()?;

    get_transaction(transaction_id, user_id, &connection).map(Json)
}
