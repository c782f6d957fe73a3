//! Defines the endpoint for deleting a transaction.

use axum::{Extension, Json, extract::State};

use crate::{
    Error, UserID, app_state::DbState, extract::IdPath, health::StatusResponse,
    transaction::db::delete_transaction,
};

/// A route handler for deleting a transaction owned by the logged in user.
///
/// Responds with `{"status": "deleted"}` even if there was nothing to delete.
pub async fn delete_transaction_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    IdPath(transaction_id): IdPath,
) -> Result<Json<StatusResponse>, Error> {
    let connection = state.connection()?;

    let rows_affected = delete_transaction(transaction_id, user_id, &connection)?;
    tracing::debug!("Deleted {rows_affected} transaction(s) with id {transaction_id}");

    Ok(Json(StatusResponse::DELETED))
}
