//! Defines the endpoints for reading budgets.

use axum::{Extension, Json, extract::State};

use crate::{
    Error, UserID,
    app_state::DbState,
    budget::{
        db::{get_budget, get_budgets},
        domain::{Budget, BudgetFilter, BudgetQuery},
    },
    extract::{AppQuery, IdPath},
};

/// A route handler that lists the logged in user's budgets, newest first.
///
/// Supports the query parameters `period` and `active`.
pub async fn list_budgets_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    AppQuery(query): AppQuery<BudgetQuery>,
) -> Result<Json<Vec<Budget>>, Error> {
    let filter = BudgetFilter::from(query);
    let connection = state.connection()?;

    get_budgets(user_id, &filter, &connection).map(Json)
}

/// A route handler for getting one of the logged in user's budgets.
pub async fn get_budget_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    IdPath(budget_id): IdPath,
) -> Result<Json<Budget>, Error> {
    let connection = state.connection()?;

    get_budget(budget_id, user_id, &connection).map(Json)
}
