//! Database operations for transactions.

use std::ops::RangeInclusive;

use rusqlite::{Connection, Row, named_params};
use time::{Date, OffsetDateTime};

use crate::{
    Error, UserID,
    database_id::{DatabaseId, new_database_id},
    date::require_date,
    transaction::domain::{EXPENSE, Transaction, TransactionDetails, TransactionFilter},
};

const TRANSACTION_COLUMNS: &str = "id, user_id, account_id, title, amount, type, category, \
    transaction_date, created_at, updated_at";

type RowsAffected = usize;

pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id BLOB PRIMARY KEY,
            user_id BLOB NOT NULL,
            account_id BLOB,
            title TEXT NOT NULL,
            amount REAL NOT NULL,
            type TEXT NOT NULL,
            category TEXT NOT NULL,
            transaction_date TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    // Covers the owner lookups and the date range sums for budgets.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_date
            ON \"transaction\"(user_id, transaction_date)",
        (),
    )?;

    Ok(())
}

/// Insert a new transaction owned by `user_id`.
///
/// # Errors
/// Returns:
/// - [Error::InvalidInput] if `details` has no date,
/// - [Error::SqlError] if the SQL query failed.
pub fn create_transaction(
    user_id: UserID,
    details: &TransactionDetails,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let date = require_date("date", details.date)?;
    let now = OffsetDateTime::now_utc();

    connection
        .prepare(&format!(
            "INSERT INTO \"transaction\" (id, user_id, account_id, title, amount, type, category, \
                transaction_date, created_at, updated_at)
            VALUES (:id, :user_id, :account_id, :title, :amount, :type, :category, :date, \
                :now, :now)
            RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            named_params! {
                ":id": new_database_id(),
                ":user_id": user_id,
                ":account_id": details.account_id,
                ":title": details.title,
                ":amount": details.amount,
                ":type": details.transaction_type,
                ":category": details.category,
                ":date": date,
                ":now": now,
            },
            map_row_to_transaction,
        )
        .map_err(Error::from)
}

/// Get the transaction with `id` owned by `user_id`.
///
/// # Errors
/// Returns [Error::NotFound] if there is no such transaction.
pub fn get_transaction(
    id: DatabaseId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" \
            WHERE id = :id AND user_id = :user_id"
        ))?
        .query_row(
            named_params! {":id": id, ":user_id": user_id},
            map_row_to_transaction,
        )
        .map_err(Error::from)
}

/// Get the transactions owned by `user_id` that match `filter`, most recent first.
///
/// Transactions on the same day are listed newest-created first.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query failed.
pub fn get_transactions(
    user_id: UserID,
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut statement = connection.prepare(&format!(
        "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\"
        WHERE user_id = :user_id
            AND (:type IS NULL OR type = :type)
            AND (:category IS NULL OR category = :category)
        ORDER BY transaction_date DESC, rowid DESC
        LIMIT :limit"
    ))?;

    statement
        .query_map(
            named_params! {
                ":user_id": user_id,
                ":type": filter.transaction_type,
                ":category": filter.category,
                ":limit": filter.limit,
            },
            map_row_to_transaction,
        )?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Replace the transaction with `id` owned by `user_id`.
///
/// The stored date is kept if `details` has no date.
///
/// # Errors
/// Returns [Error::NotFound] if there is no such transaction.
pub fn update_transaction(
    id: DatabaseId,
    user_id: UserID,
    details: &TransactionDetails,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection
        .prepare(&format!(
            "UPDATE \"transaction\"
            SET account_id = :account_id,
                title = :title,
                amount = :amount,
                type = :type,
                category = :category,
                transaction_date = COALESCE(:date, transaction_date),
                updated_at = :now
            WHERE id = :id AND user_id = :user_id
            RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            named_params! {
                ":account_id": details.account_id,
                ":title": details.title,
                ":amount": details.amount,
                ":type": details.transaction_type,
                ":category": details.category,
                ":date": details.date,
                ":now": OffsetDateTime::now_utc(),
                ":id": id,
                ":user_id": user_id,
            },
            map_row_to_transaction,
        )
        .map_err(Error::from)
}

/// Delete the transaction with `id` if it is owned by `user_id`.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query failed.
pub fn delete_transaction(
    id: DatabaseId,
    user_id: UserID,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM \"transaction\" WHERE id = :id AND user_id = :user_id",
            named_params! {":id": id, ":user_id": user_id},
        )
        .map_err(Error::from)
}

/// Sum the amounts of the expenses owned by `user_id` dated within `date_range`.
///
/// Both ends of `date_range` are included.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query failed.
pub fn get_expense_total(
    user_id: UserID,
    date_range: RangeInclusive<Date>,
    connection: &Connection,
) -> Result<f64, Error> {
    connection
        .query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM \"transaction\"
            WHERE user_id = :user_id
                AND type = :type
                AND transaction_date BETWEEN :start AND :end",
            named_params! {
                ":user_id": user_id,
                ":type": EXPENSE,
                ":start": date_range.start(),
                ":end": date_range.end(),
            },
            |row| row.get(0),
        )
        .map_err(Error::from)
}

fn map_row_to_transaction(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        user_id: row.get(1)?,
        account_id: row.get(2)?,
        title: row.get(3)?,
        amount: row.get(4)?,
        transaction_type: row.get(5)?,
        category: row.get(6)?,
        transaction_date: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}
