//! Defines the endpoint for deleting an account.

use axum::{Extension, Json, extract::State};

use crate::{
    Error, UserID, account::db::delete_account, app_state::DbState, extract::IdPath,
    health::StatusResponse,
};

/// A route handler for deleting an account owned by the logged in user.
///
/// Responds with `{"status": "deleted"}` even if there was nothing to delete.
pub async fn delete_account_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    IdPath(account_id): IdPath,
) -> Result<Json<StatusResponse>, Error> {
    let connection = state.connection()?;

    let rows_affected = delete_account(account_id, user_id, &connection)?;
    tracing::debug!("Deleted {rows_affected} account(s) with id {account_id}");

    Ok(Json(StatusResponse::DELETED))
}
