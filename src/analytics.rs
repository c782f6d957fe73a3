//! A summary of the logged in user's finances.

use axum::{Extension, Json, extract::State};
use rusqlite::Connection;
use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::{
    Error, UserID, account::get_total_account_balance, app_state::DbState,
    budget::get_monthly_allowance, date::calendar_month, savings::get_total_savings,
    transaction::get_expense_total,
};

/// Figures for the analytics summary, all taken from the same snapshot of the database.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// The sum of the user's account balances.
    pub balance: f64,
    /// The sum of the amounts saved across the user's savings goals.
    pub savings: f64,
    /// The largest amount of the user's active monthly budgets, or zero.
    pub monthly_allowance: f64,
    /// The sum of the user's expenses in the current calendar month.
    pub spent_this_month: f64,
    /// What is left of the monthly allowance, never negative.
    pub remaining_this_month: f64,
    /// Change against the previous month. Always zero for now.
    pub delta_percent: f64,
}

/// Compute the summary for `user_id` for the calendar month containing `today`.
///
/// # Errors
/// Returns [Error::SqlError] if any of the queries failed.
pub fn get_summary(
    user_id: UserID,
    today: Date,
    connection: &Connection,
) -> Result<Summary, Error> {
    let transaction = connection.unchecked_transaction()?;

    let balance = get_total_account_balance(user_id, &transaction)?;
    let savings = get_total_savings(user_id, &transaction)?;
    let monthly_allowance = get_monthly_allowance(user_id, &transaction)?;
    let spent_this_month = get_expense_total(user_id, calendar_month(today), &transaction)?;

    transaction.commit()?;

    Ok(Summary {
        balance,
        savings,
        monthly_allowance,
        spent_this_month,
        remaining_this_month: (monthly_allowance - spent_this_month).max(0.0),
        delta_percent: 0.0,
    })
}

/// A route handler for getting the logged in user's analytics summary.
pub async fn get_summary_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Summary>, Error> {
    let today = OffsetDateTime::now_utc().date();
    let connection = state.connection()?;

    get_summary(user_id, today, &connection).map(Json)
}

#[cfg(test)]
mod get_summary_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        UserID,
        analytics::{Summary, get_summary},
        db::initialize,
        test_utils::{insert_test_transaction, insert_test_user},
    };

    fn get_test_connection() -> (Connection, UserID) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let user_id = insert_test_user("owner@example.com", &connection);

        (connection, user_id)
    }

    fn insert_budget(
        user_id: UserID,
        amount: f64,
        period: &str,
        is_active: bool,
        connection: &Connection,
    ) {
        connection
            .execute(
                "INSERT INTO budget (id, user_id, name, amount, period, category, start_date, \
                    end_date, is_active, created_at, updated_at)
                VALUES (?1, ?2, 'Budget', ?3, ?4, '', '2024-01-01', NULL, ?5, \
                    '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')",
                rusqlite::params![uuid::Uuid::new_v4(), user_id, amount, period, is_active],
            )
            .unwrap();
    }

    #[test]
    fn new_user_has_all_zero_summary() {
        let (connection, user_id) = get_test_connection();

        assert_eq!(
            get_summary(user_id, date!(2024 - 05 - 15), &connection),
            Ok(Summary {
                balance: 0.0,
                savings: 0.0,
                monthly_allowance: 0.0,
                spent_this_month: 0.0,
                remaining_this_month: 0.0,
                delta_percent: 0.0,
            })
        );
    }

    #[test]
    fn only_expenses_in_current_month_are_counted() {
        let (connection, user_id) = get_test_connection();
        insert_budget(user_id, 400.0, "monthly", true, &connection);
        insert_test_transaction(user_id, "expense", 30.0, date!(2024 - 05 - 01), &connection);
        insert_test_transaction(user_id, "expense", 20.0, date!(2024 - 05 - 31), &connection);
        insert_test_transaction(user_id, "expense", 99.0, date!(2024 - 04 - 30), &connection);
        insert_test_transaction(user_id, "expense", 99.0, date!(2024 - 06 - 01), &connection);
        insert_test_transaction(user_id, "income", 1000.0, date!(2024 - 05 - 10), &connection);

        let summary = get_summary(user_id, date!(2024 - 05 - 15), &connection).unwrap();

        assert_eq!(summary.spent_this_month, 50.0);
        assert_eq!(summary.monthly_allowance, 400.0);
        assert_eq!(summary.remaining_this_month, 350.0);
    }

    #[test]
    fn allowance_is_largest_active_monthly_budget() {
        let (connection, user_id) = get_test_connection();
        let other = insert_test_user("other@example.com", &connection);
        insert_budget(user_id, 300.0, "monthly", true, &connection);
        insert_budget(user_id, 500.0, "monthly", true, &connection);
        insert_budget(user_id, 900.0, "monthly", false, &connection);
        insert_budget(user_id, 800.0, "weekly", true, &connection);
        insert_budget(other, 1000.0, "monthly", true, &connection);

        let summary = get_summary(user_id, date!(2024 - 05 - 15), &connection).unwrap();

        assert_eq!(summary.monthly_allowance, 500.0);
    }

    #[test]
    fn overspending_clamps_remaining_to_zero() {
        let (connection, user_id) = get_test_connection();
        insert_budget(user_id, 100.0, "monthly", true, &connection);
        insert_test_transaction(user_id, "expense", 150.0, date!(2024 - 05 - 02), &connection);

        let summary = get_summary(user_id, date!(2024 - 05 - 15), &connection).unwrap();

        assert_eq!(summary.spent_this_month, 150.0);
        assert_eq!(summary.remaining_this_month, 0.0);
    }

    #[test]
    fn balance_sums_own_accounts() {
        let (connection, user_id) = get_test_connection();
        let other = insert_test_user("other@example.com", &connection);
        for (owner, balance) in [(user_id, 100.0), (user_id, -25.5), (other, 1000.0)] {
            connection
                .execute(
                    "INSERT INTO account (id, user_id, account_name, account_type, balance, \
                        currency, is_primary, created_at, updated_at)
                    VALUES (?1, ?2, 'Account', 'checking', ?3, 'USD', 0, \
                        '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')",
                    rusqlite::params![uuid::Uuid::new_v4(), owner, balance],
                )
                .unwrap();
        }

        let summary = get_summary(user_id, date!(2024 - 05 - 15), &connection).unwrap();

        assert_eq!(summary.balance, 74.5);
    }
}
