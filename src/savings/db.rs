//! Database operations for savings goals.

use rusqlite::{Connection, Row, named_params};
use time::OffsetDateTime;

use crate::{
    Error, UserID,
    database_id::{DatabaseId, new_database_id},
    savings::domain::{SavingsGoal, SavingsGoalDetails},
};

const SAVINGS_GOAL_COLUMNS: &str = "id, user_id, name, target_amount, current_amount, deadline, \
    is_completed, created_at, updated_at";

type RowsAffected = usize;

pub fn create_savings_goal_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS savings_goal (
            id BLOB PRIMARY KEY,
            user_id BLOB NOT NULL,
            name TEXT NOT NULL,
            target_amount REAL NOT NULL,
            current_amount REAL NOT NULL DEFAULT 0,
            deadline TEXT,
            is_completed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_savings_goal_user_id ON savings_goal(user_id)",
        (),
    )?;

    Ok(())
}

/// Insert a new savings goal owned by `user_id` with nothing saved yet.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query failed.
pub fn create_savings_goal(
    user_id: UserID,
    details: &SavingsGoalDetails,
    connection: &Connection,
) -> Result<SavingsGoal, Error> {
    connection
        .prepare(&format!(
            "INSERT INTO savings_goal (id, user_id, name, target_amount, deadline, created_at, \
                updated_at)
            VALUES (:id, :user_id, :name, :target_amount, :deadline, :now, :now)
            RETURNING {SAVINGS_GOAL_COLUMNS}"
        ))?
        .query_row(
            named_params! {
                ":id": new_database_id(),
                ":user_id": user_id,
                ":name": details.name,
                ":target_amount": details.target_amount,
                ":deadline": details.deadline,
                ":now": OffsetDateTime::now_utc(),
            },
            map_row_to_savings_goal,
        )
        .map_err(Error::from)
}

/// Get the savings goal with `id` owned by `user_id`.
///
/// # Errors
/// Returns [Error::NotFound] if there is no such savings goal.
pub fn get_savings_goal(
    id: DatabaseId,
    user_id: UserID,
    connection: &Connection,
) -> Result<SavingsGoal, Error> {
    connection
        .prepare(&format!(
            "SELECT {SAVINGS_GOAL_COLUMNS} FROM savings_goal WHERE id = :id AND user_id = :user_id"
        ))?
        .query_row(
            named_params! {":id": id, ":user_id": user_id},
            map_row_to_savings_goal,
        )
        .map_err(Error::from)
}

/// Get all of the savings goals owned by `user_id`, newest first.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query failed.
pub fn get_savings_goals(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<SavingsGoal>, Error> {
    let mut statement = connection.prepare(&format!(
        "SELECT {SAVINGS_GOAL_COLUMNS} FROM savings_goal WHERE user_id = :user_id \
        ORDER BY rowid DESC"
    ))?;

    statement
        .query_map(named_params! {":user_id": user_id}, map_row_to_savings_goal)?
        .map(|maybe_goal| maybe_goal.map_err(Error::from))
        .collect()
}

/// Replace the name and target of the savings goal with `id` owned by `user_id`.
///
/// The stored deadline is kept if `details` has no deadline. The goal is
/// marked as completed if the new target has already been reached.
///
/// # Errors
/// Returns [Error::NotFound] if there is no such savings goal.
pub fn update_savings_goal(
    id: DatabaseId,
    user_id: UserID,
    details: &SavingsGoalDetails,
    connection: &Connection,
) -> Result<SavingsGoal, Error> {
    connection
        .prepare(&format!(
            "UPDATE savings_goal
            SET name = :name,
                target_amount = :target_amount,
                deadline = COALESCE(:deadline, deadline),
                is_completed = is_completed OR current_amount >= :target_amount,
                updated_at = :now
            WHERE id = :id AND user_id = :user_id
            RETURNING {SAVINGS_GOAL_COLUMNS}"
        ))?
        .query_row(
            named_params! {
                ":name": details.name,
                ":target_amount": details.target_amount,
                ":deadline": details.deadline,
                ":now": OffsetDateTime::now_utc(),
                ":id": id,
                ":user_id": user_id,
            },
            map_row_to_savings_goal,
        )
        .map_err(Error::from)
}

/// Add `amount` to the savings goal with `id` owned by `user_id`.
///
/// The increment and the completion check happen in one statement, so
/// concurrent contributions are never lost. A negative `amount` reduces the
/// amount saved but does not reset a completed goal.
///
/// # Errors
/// Returns [Error::NotFound] if there is no such savings goal.
pub fn contribute_to_savings_goal(
    id: DatabaseId,
    user_id: UserID,
    amount: f64,
    connection: &Connection,
) -> Result<SavingsGoal, Error> {
    connection
        .prepare(&format!(
            "UPDATE savings_goal
            SET current_amount = current_amount + :amount,
                is_completed = is_completed OR (current_amount + :amount >= target_amount),
                updated_at = :now
            WHERE id = :id AND user_id = :user_id
            RETURNING {SAVINGS_GOAL_COLUMNS}"
        ))?
        .query_row(
            named_params! {
                ":amount": amount,
                ":now": OffsetDateTime::now_utc(),
                ":id": id,
                ":user_id": user_id,
            },
            map_row_to_savings_goal,
        )
        .map_err(Error::from)
}

/// Delete the savings goal with `id` if it is owned by `user_id`.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query failed.
pub fn delete_savings_goal(
    id: DatabaseId,
    user_id: UserID,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM savings_goal WHERE id = :id AND user_id = :user_id",
            named_params! {":id": id, ":user_id": user_id},
        )
        .map_err(Error::from)
}

/// Sum the amount saved across all of the savings goals owned by `user_id`.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query failed.
pub fn get_total_savings(user_id: UserID, connection: &Connection) -> Result<f64, Error> {
    connection
        .query_row(
            "SELECT COALESCE(SUM(current_amount), 0) FROM savings_goal WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )
        .map_err(Error::from)
}

fn map_row_to_savings_goal(row: &Row) -> Result<SavingsGoal, rusqlite::Error> {
    Ok(SavingsGoal {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        target_amount: row.get(3)?,
        current_amount: row.get(4)?,
        deadline: row.get(5)?,
        is_completed: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}
