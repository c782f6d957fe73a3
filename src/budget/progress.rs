//! How much of a budget has been spent so far.

use axum::{Extension, Json, extract::State};
use rusqlite::Connection;
use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::{
    Error, UserID, app_state::DbState, budget::db::get_budget, database_id::DatabaseId,
    extract::IdPath, transaction::get_expense_total,
};

/// The spending counted against a budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetProgress {
    pub budget_id: DatabaseId,
    /// The budget's amount.
    pub amount: f64,
    /// The sum of the expenses within the budget's dates.
    pub spent: f64,
    /// `amount - spent`, negative when the budget has been overspent.
    pub remaining: f64,
}

/// Compute the progress of the budget with `budget_id` owned by `user_id`.
///
/// Expenses are counted from the budget's start date through to its end date,
/// or through to `today` for an open-ended budget.
///
/// # Errors
/// Returns [Error::NotFound] if there is no such budget.
pub fn get_budget_progress(
    budget_id: DatabaseId,
    user_id: UserID,
    today: Date,
    connection: &Connection,
) -> Result<BudgetProgress, Error> {
    let budget = get_budget(budget_id, user_id, connection)?;
    let window = budget.start_date..=budget.end_date.unwrap_or(today);

    let spent = get_expense_total(user_id, window, connection)?;

    Ok(BudgetProgress {
        budget_id: budget.id,
        amount: budget.amount,
        spent,
        remaining: budget.amount - spent,
    })
}

/// A route handler for getting the progress of one of the logged in user's budgets.
pub async fn get_budget_progress_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    IdPath(budget_id): IdPath,
) -> Result<Json<BudgetProgress>, Error> {
    let today = OffsetDateTime::now_utc().date();
    let connection = state.connection()?;

    get_budget_progress(budget_id, user_id, today, &connection).map(Json)
}
