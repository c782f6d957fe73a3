#![allow(missing_docs)]

use axum::http::StatusCode;
use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::{Value, json};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::{
    AppState, PasswordHash, UserID, build_router, endpoints,
    user::{NewUser, create_user},
};

pub const TEST_PASSWORD: &str = "averysafeandsecurepassword";

const TEST_JWT_SECRET: &str = "test-secret";

const TEST_PASSWORD_HASH_COST: u32 = 4;

/// An app state backed by an empty in-memory database.
pub fn get_test_state() -> AppState {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");

    AppState::new(connection, TEST_JWT_SECRET, TEST_PASSWORD_HASH_COST)
        .expect("Could not create app state.")
}

pub fn get_test_server_with_state(state: AppState) -> TestServer {
    TestServer::new(build_router(state)).expect("Could not create test server.")
}

pub fn get_test_server() -> TestServer {
    get_test_server_with_state(get_test_state())
}

/// Register a user with `email` and [TEST_PASSWORD] and return their access token.
pub async fn register_test_user(server: &TestServer, email: &str) -> String {
    let response = server
        .post(endpoints::REGISTER)
        .json(&json!({
            "email": email,
            "password": TEST_PASSWORD,
            "first_name": "A",
            "last_name": "B",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["access_token"]
        .as_str()
        .expect("access_token should be a string")
        .to_owned()
}

/// Post `body` to `endpoint` as the owner of `token` and return the created resource.
pub async fn create_test_resource(
    server: &TestServer,
    token: &str,
    endpoint: &str,
    body: Value,
) -> Value {
    let response = server
        .post(endpoint)
        .authorization_bearer(token)
        .json(&body)
        .await;

    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

/// Insert a user directly into the database, skipping password hashing.
pub fn insert_test_user(email: &str, connection: &Connection) -> UserID {
    create_user(
        NewUser {
            email: email.to_owned(),
            password_hash: PasswordHash::new_unchecked("hunter2"),
            first_name: "Test".to_owned(),
            last_name: "User".to_owned(),
        },
        connection,
    )
    .expect("Could not insert test user.")
    .id
}

/// Insert a transaction that is not linked to an account.
pub fn insert_test_transaction(
    user_id: UserID,
    transaction_type: &str,
    amount: f64,
    date: Date,
    connection: &Connection,
) {
    connection
        .execute(
            "INSERT INTO \"transaction\" (id, user_id, account_id, title, amount, type, category, \
                transaction_date, created_at, updated_at)
            VALUES (?1, ?2, NULL, 'Test', ?3, ?4, '', ?5, ?6, ?6)",
            (
                Uuid::new_v4(),
                user_id,
                amount,
                transaction_type,
                date,
                OffsetDateTime::now_utc(),
            ),
        )
        .expect("Could not insert test transaction.");
}
