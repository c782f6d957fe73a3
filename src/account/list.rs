//! Defines the endpoints for reading accounts.

use axum::{Extension, Json, extract::State};

use crate::{
    Error, UserID,
    account::{
        db::{get_account, get_accounts},
        domain::Account,
    },
    app_state::DbState,
    extract::IdPath,
};

/// A route handler that lists the logged in user's accounts, oldest first.
pub async fn list_accounts_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<Account>>, Error> {
    let connection = state.connection()?;

    get_accounts(user_id, &connection).map(Json)
}

/// A route handler for getting one of the logged in user's accounts.
pub async fn get_account_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    IdPath(account_id): IdPath,
) -> Result<Json<Account>, Error> {
    let connection = state.connection()?;

    get_account(account_id, user_id, &connection).map(Json)
}
