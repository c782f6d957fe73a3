//! Database operations for accounts.
//!
//! Every query is scoped to the owner, so an account that belongs to another
//! user is reported as [Error::NotFound].

use rusqlite::{Connection, Row, named_params};
use time::OffsetDateTime;

use crate::{
    Error, UserID,
    account::domain::{Account, AccountDetails},
    database_id::{DatabaseId, new_database_id},
};

const ACCOUNT_COLUMNS: &str = "id, user_id, account_name, account_type, balance, currency, \
    is_primary, created_at, updated_at";

type RowsAffected = usize;

pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
            id BLOB PRIMARY KEY,
            user_id BLOB NOT NULL,
            account_name TEXT NOT NULL,
            account_type TEXT NOT NULL,
            balance REAL NOT NULL,
            currency TEXT NOT NULL,
            is_primary INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_account_user_id ON account(user_id)",
        (),
    )?;

    Ok(())
}

/// Insert a new account owned by `user_id`.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query failed.
pub fn create_account(
    user_id: UserID,
    details: &AccountDetails,
    connection: &Connection,
) -> Result<Account, Error> {
    let now = OffsetDateTime::now_utc();

    connection
        .prepare(&format!(
            "INSERT INTO account (id, user_id, account_name, account_type, balance, currency, \
                is_primary, created_at, updated_at)
            VALUES (:id, :user_id, :account_name, :account_type, :balance, :currency, \
                :is_primary, :now, :now)
            RETURNING {ACCOUNT_COLUMNS}"
        ))?
        .query_row(
            named_params! {
                ":id": new_database_id(),
                ":user_id": user_id,
                ":account_name": details.account_name,
                ":account_type": details.account_type,
                ":balance": details.balance,
                ":currency": details.currency,
                ":is_primary": details.is_primary,
                ":now": now,
            },
            map_row_to_account,
        )
        .map_err(Error::from)
}

/// Get the account with `id` owned by `user_id`.
///
/// # Errors
/// Returns [Error::NotFound] if there is no such account.
pub fn get_account(
    id: DatabaseId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Account, Error> {
    connection
        .prepare(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account WHERE id = :id AND user_id = :user_id"
        ))?
        .query_row(
            named_params! {":id": id, ":user_id": user_id},
            map_row_to_account,
        )
        .map_err(Error::from)
}

/// Get all of the accounts owned by `user_id` in the order they were created.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query failed.
pub fn get_accounts(user_id: UserID, connection: &Connection) -> Result<Vec<Account>, Error> {
    let mut statement = connection.prepare(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM account WHERE user_id = :user_id ORDER BY rowid ASC"
    ))?;

    statement
        .query_map(named_params! {":user_id": user_id}, map_row_to_account)?
        .map(|maybe_account| maybe_account.map_err(Error::from))
        .collect()
}

/// Replace every field of the account with `id` owned by `user_id`.
///
/// # Errors
/// Returns [Error::NotFound] if there is no such account.
pub fn update_account(
    id: DatabaseId,
    user_id: UserID,
    details: &AccountDetails,
    connection: &Connection,
) -> Result<Account, Error> {
    connection
        .prepare(&format!(
            "UPDATE account
            SET account_name = :account_name,
                account_type = :account_type,
                balance = :balance,
                currency = :currency,
                is_primary = :is_primary,
                updated_at = :now
            WHERE id = :id AND user_id = :user_id
            RETURNING {ACCOUNT_COLUMNS}"
        ))?
        .query_row(
            named_params! {
                ":account_name": details.account_name,
                ":account_type": details.account_type,
                ":balance": details.balance,
                ":currency": details.currency,
                ":is_primary": details.is_primary,
                ":now": OffsetDateTime::now_utc(),
                ":id": id,
                ":user_id": user_id,
            },
            map_row_to_account,
        )
        .map_err(Error::from)
}

/// Delete the account with `id` if it is owned by `user_id`.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query failed.
pub fn delete_account(
    id: DatabaseId,
    user_id: UserID,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM account WHERE id = :id AND user_id = :user_id",
            named_params! {":id": id, ":user_id": user_id},
        )
        .map_err(Error::from)
}

/// Get the total balance across all of the accounts owned by `user_id`.
///
/// # Errors
/// Returns [Error::SqlError] if the SQL query failed.
pub fn get_total_account_balance(user_id: UserID, connection: &Connection) -> Result<f64, Error> {
    connection
        .query_row(
            "SELECT COALESCE(SUM(balance), 0) FROM account WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )
        .map_err(Error::from)
}

fn map_row_to_account(row: &Row) -> Result<Account, rusqlite::Error> {
    Ok(Account {
        id: row.get(0)?,
        user_id: row.get(1)?,
        account_name: row.get(2)?,
        account_type: row.get(3)?,
        balance: row.get(4)?,
        currency: row.get(5)?,
        is_primary: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}
