//! Database operations for budgets.

use rusqlite::{Connection, Row, named_params};
use time::OffsetDateTime;

use crate::{
    Error, UserID,
    budget::domain::{Budget, BudgetDetails, BudgetFilter, MONTHLY},
    database_id::{DatabaseId, new_database_id},
    date::require_date,
};

const BUDGET_COLUMNS: &str = "id, user_id, name, amount, period, category, start_date, end_date, \
    is_active, created_at, updated_at";

type RowsAffected = usize;

pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget (
            id BLOB PRIMARY KEY,
            user_id BLOB NOT NULL,
            name TEXT NOT NULL,
            amount REAL NOT NULL,
            period TEXT NOT NULL,
            category TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT,
            is_active INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_budget_user_id ON budget(user_id)",
        (),
    )?;

    Ok(())
}

/// Insert a new budget owned by `user_id`.
///
/// # Errors
/// Returns:
/// - [Error::InvalidInput] if `details` has no start date,
/// - [Error::SqlError] if the SQL query failed.
pub fn create_budget(
    user_id: UserID,
    details: &BudgetDetails,
    connection: &Connection,
) -> Result<Budget, Error> {
    let start_date = require_date("start_date", details.start_date)?;

    connection
        .prepare(&format!(
            "INSERT INTO budget (id, user_id, name, amount, period, category, start_date, \
                end_date, is_active, created_at, updated_at)
            VALUES (:id, :user_id, :name, :amount, :period, :category, :start_date, :end_date, \
                :is_active, :now, :now)
            RETURNING {BUDGET_COLUMNS}"
        ))?
        .query_row(
            named_params! {
                ":id": new_database_id(),
                ":user_id": user_id,
                ":name": details.name,
                ":amount": details.amount,
                ":period": details.period,
                ":category": details.category,
                ":start_date": start_date,
                ":end_date": details.end_date,
                ":is_active": details.is_active,
                ":now": OffsetDateTime::now_utc(),
            },
            map_row_to_budget,
        )
        .map_err(Error::from)
}

/// Get the budget with `id` owned by `user_id`.
///
/// # Errors
/// Returns [Error::NotFound] if there is no such budget.
pub fn get_budget(id: DatabaseId, user_id: UserID, connection: &Connection) -> Result<Budget, Error> {
    connection
        .prepare(&format!(
            "SELECT {BUDGET_COLUMNS} FROM budget WHERE id = :id AND user_id = :user_id"
        ))?
        .query_row(
            named_params! {":id": id, ":user_id": user_id},
            map_row_to_budget,
        )
        .map_err(Error::from)
}

/// Get the budgets owned by `user_id` that match `filter`, newest first.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query failed.
pub fn get_budgets(
    user_id: UserID,
    filter: &BudgetFilter,
    connection: &Connection,
) -> Result<Vec<Budget>, Error> {
    let mut statement = connection.prepare(&format!(
        "SELECT {BUDGET_COLUMNS} FROM budget
        WHERE user_id = :user_id
            AND (:period IS NULL OR period = :period)
            AND (:is_active IS NULL OR is_active = :is_active)
        ORDER BY rowid DESC"
    ))?;

    statement
        .query_map(
            named_params! {
                ":user_id": user_id,
                ":period": filter.period,
                ":is_active": filter.is_active,
            },
            map_row_to_budget,
        )?
        .map(|maybe_budget| maybe_budget.map_err(Error::from))
        .collect()
}

/// Replace the budget with `id` owned by `user_id`.
///
/// Each stored date is kept if the matching date in `details` is `None`.
///
/// # Errors
/// Returns [Error::NotFound] if there is no such budget.
pub fn update_budget(
    id: DatabaseId,
    user_id: UserID,
    details: &BudgetDetails,
    connection: &Connection,
) -> Result<Budget, Error> {
    connection
        .prepare(&format!(
            "UPDATE budget
            SET name = :name,
                amount = :amount,
                period = :period,
                category = :category,
                start_date = COALESCE(:start_date, start_date),
                end_date = COALESCE(:end_date, end_date),
                is_active = :is_active,
                updated_at = :now
            WHERE id = :id AND user_id = :user_id
            RETURNING {BUDGET_COLUMNS}"
        ))?
        .query_row(
            named_params! {
                ":name": details.name,
                ":amount": details.amount,
                ":period": details.period,
                ":category": details.category,
                ":start_date": details.start_date,
                ":end_date": details.end_date,
                ":is_active": details.is_active,
                ":now": OffsetDateTime::now_utc(),
                ":id": id,
                ":user_id": user_id,
            },
            map_row_to_budget,
        )
        .map_err(Error::from)
}

/// Delete the budget with `id` if it is owned by `user_id`.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query failed.
pub fn delete_budget(
    id: DatabaseId,
    user_id: UserID,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM budget WHERE id = :id AND user_id = :user_id",
            named_params! {":id": id, ":user_id": user_id},
        )
        .map_err(Error::from)
}

/// The largest amount of the active monthly budgets owned by `user_id`, or zero if there are none.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query failed.
pub fn get_monthly_allowance(user_id: UserID, connection: &Connection) -> Result<f64, Error> {
    connection
        .query_row(
            "SELECT COALESCE(MAX(amount), 0) FROM budget
            WHERE user_id = :user_id AND period = :period AND is_active = 1",
            named_params! {":user_id": user_id, ":period": MONTHLY},
            |row| row.get(0),
        )
        .map_err(Error::from)
}

fn map_row_to_budget(row: &Row) -> Result<Budget, rusqlite::Error> {
    Ok(Budget {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        amount: row.get(3)?,
        period: row.get(4)?,
        category: row.get(5)?,
        start_date: row.get(6)?,
        end_date: row.get(7)?,
        is_active: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}
