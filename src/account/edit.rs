//! Defines the endpoint for replacing an account.

use axum::{Extension, Json, extract::State};

use crate::{
    Error, UserID,
    account::{
        db::update_account,
        domain::{Account, AccountDetails, AccountForm},
    },
    app_state::DbState,
    extract::{AppJson, IdPath},
};

/// A route handler for replacing the fields of an account owned by the logged in user.
///
/// Fields missing from the request body are reset to their defaults.
pub async fn update_account_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    IdPath(account_id): IdPath,
    AppJson(form): AppJson<AccountForm>,
) -> Result<Json<Account>, Error> {
    let details = AccountDetails::try_from(form)?;
    let connection = state.connection()?;

    update_account(account_id, user_id, &details, &connection)
        .inspect_err(|error| tracing::debug!("Could not update account {account_id}: {error}"))
        .map(Json)
}
