//! Defines the endpoint for replacing a budget.

use axum::{Extension, Json, extract::State};

use crate::{
    Error, UserID,
    app_state::DbState,
    budget::{
        db::update_budget,
        domain::{Budget, BudgetDetails, BudgetForm},
    },
    extract::{AppJson, IdPath},
};

/// A route handler for replacing a budget owned by the logged in user.
///
/// A stored date is only changed when the request includes a non-empty value for it.
pub async fn update_budget_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    IdPath(budget_id): IdPath,
    AppJson(form): AppJson<BudgetForm>,
) -> Result<Json<Budget>, Error> {
    let details = BudgetDetails::try_from(form)?;
    let connection = state.connection()?;

    update_budget(budget_id, user_id, &details, &connection).map(Json)
}
