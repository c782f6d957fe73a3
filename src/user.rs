//! Code for creating the user table, fetching users from the database and the
//! endpoints for reading and updating the logged in user.

use std::{fmt::Display, str::FromStr};

use axum::{Extension, Json, extract::State};
use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, PasswordHash, app_state::DbState, extract::AppJson};

/// A newtype wrapper for user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and makes it impossible to pass a resource ID where the owner's ID is expected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct UserID(Uuid);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new, random user ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserID {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl ToSql for UserID {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for UserID {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Uuid::column_result(value).map(Self)
    }
}

/// A user of the application.
///
/// The password hash is never serialized so a `User` can be sent to the client as is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The email the user registered with, unique ignoring case.
    pub email: String,
    /// The user's password hash.
    #[serde(skip)]
    pub password_hash: PasswordHash,
    /// The user's first name.
    pub first_name: String,
    /// The user's last name.
    pub last_name: String,
    /// When the user registered.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the user's details were last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The details needed to create a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: PasswordHash,
    pub first_name: String,
    pub last_name: String,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id BLOB PRIMARY KEY,
                email TEXT NOT NULL UNIQUE COLLATE NOCASE,
                password TEXT NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns:
/// - [Error::DuplicateEmail] if the email is already registered,
/// - [Error::SqlError] if another SQL related error occurred.
pub fn create_user(new_user: NewUser, connection: &Connection) -> Result<User, Error> {
    let now = OffsetDateTime::now_utc();

    connection
        .query_row(
            "INSERT INTO user (id, email, password, first_name, last_name, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            RETURNING id, email, password, first_name, last_name, created_at, updated_at",
            (
                UserID::generate(),
                &new_user.email,
                new_user.password_hash.as_ref(),
                &new_user.first_name,
                &new_user.last_name,
                now,
            ),
            map_row_to_user,
        )
        .map_err(|error| error.into())
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_user_by_id(user_id: UserID, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare(
            "SELECT id, email, password, first_name, last_name, created_at, updated_at
            FROM user WHERE id = :id",
        )?
        .query_row(&[(":id", &user_id)], map_row_to_user)
        .map_err(|error| error.into())
}

/// Get the user that registered with `email`, ignoring case.
///
/// # Errors
///
/// Returns [Error::NotFound] if no user registered with `email`.
pub fn get_user_by_email(email: &str, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare(
            "SELECT id, email, password, first_name, last_name, created_at, updated_at
            FROM user WHERE email = :email",
        )?
        .query_row(&[(":email", &email.trim())], map_row_to_user)
        .map_err(|error| error.into())
}

/// Replace the user's names, keeping the stored value for any name that is `None`.
///
/// # Errors
///
/// Returns [Error::NotFound] if `user_id` does not belong to a registered user.
pub fn update_user_names(
    user_id: UserID,
    first_name: Option<&str>,
    last_name: Option<&str>,
    connection: &Connection,
) -> Result<User, Error> {
    connection
        .query_row(
            "UPDATE user
            SET first_name = COALESCE(?1, first_name),
                last_name = COALESCE(?2, last_name),
                updated_at = ?3
            WHERE id = ?4
            RETURNING id, email, password, first_name, last_name, created_at, updated_at",
            (first_name, last_name, OffsetDateTime::now_utc(), user_id),
            map_row_to_user,
        )
        .map_err(|error| error.into())
}

/// Get the number of users in the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
#[cfg(test)]
pub fn count_users(connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM user;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

fn map_row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_password_hash: String = row.get(2)?;

    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
        first_name: row.get(3)?,
        last_name: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

/// A route handler for getting the logged in user.
pub async fn get_current_user(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<User>, Error> {
    let connection = state.connection()?;

    get_user_by_id(user_id, &connection).map(Json)
}

/// The request body for updating the logged in user.
///
/// Only non-empty names are written.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// A route handler for updating the logged in user's names.
///
/// # Errors
///
/// Returns [Error::InvalidInput] if neither name is given.
pub async fn update_current_user(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    AppJson(form): AppJson<UpdateUserForm>,
) -> Result<Json<User>, Error> {
    let first_name = Some(form.first_name.trim()).filter(|name| !name.is_empty());
    let last_name = Some(form.last_name.trim()).filter(|name| !name.is_empty());

    if first_name.is_none() && last_name.is_none() {
        return Err(Error::InvalidInput("no updates".to_owned()));
    }

    let connection = state.connection()?;

    update_user_names(user_id, first_name, last_name, &connection).map(Json)
}


#[cfg(test)]
mod current_user_endpoint_tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use crate::{
        endpoints,
        test_utils::{get_test_server, register_test_user},
    };

    #[tokio::test]
    async fn get_current_user_returns_registered_details() {
        let server = get_test_server();
        let token = register_test_user(&server, "a@x.com").await;

        let response = server
            .get(endpoints::CURRENT_USER)
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        let user = response.json::<Value>();
        assert_eq!(user["email"], "a@x.com");
        assert_eq!(user["first_name"], "A");
        assert_eq!(user["last_name"], "B");
        assert!(
            user.get("password_hash").is_none(),
            "password hash must never be sent to the client"
        );
    }

    #[tokio::test]
    async fn update_current_user_changes_names() {
        let server = get_test_server();
        let token = register_test_user(&server, "a@x.com").await;

        let response = server
            .put(endpoints::CURRENT_USER)
            .authorization_bearer(&token)
            .json(&json!({ "first_name": "Alice" }))
            .await;

        response.assert_status_ok();
        let user = response.json::<Value>();
        assert_eq!(user["first_name"], "Alice");
        assert_eq!(user["last_name"], "B");
    }

    #[tokio::test]
    async fn update_current_user_without_names_is_rejected() {
        let server = get_test_server();
        let token = register_test_user(&server, "a@x.com").await;

        server
            .put(endpoints::CURRENT_USER)
            .authorization_bearer(&token)
            .json(&json!({ "first_name": "", "last_name": "  " }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn current_user_requires_token() {
        let server = get_test_server();

        server
            .get(endpoints::CURRENT_USER)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
