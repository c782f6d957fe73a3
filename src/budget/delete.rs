//! Defines the endpoint for deleting a budget.

use axum::{Extension, Json, extract::State};

use crate::{
    Error, UserID, app_state::DbState, budget::db::delete_budget, extract::IdPath,
    health::StatusResponse,
};

/// A route handler for deleting a budget owned by the logged in user.
///
/// Responds with `{"status": "deleted"}` even if there was nothing to delete.
pub async fn delete_budget_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    IdPath(budget_id): IdPath,
) -> Result<Json<StatusResponse>, Error> {
    let connection = state.connection()?;

    let rows_affected = delete_budget(budget_id, user_id, &connection)?;
    tracing::debug!("Deleted {rows_affected} budget(s) with id {budget_id}");

    Ok(Json(StatusResponse::DELETED))
}
