//! Defines the endpoint for creating a new account.

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{
    Error, UserID,
    account::{
        db::create_account,
        domain::{Account, AccountDetails, AccountForm},
    },
    app_state::DbState,
    extract::AppJson,
};

/// A route handler for creating a new account owned by the logged in user.
///
/// Responds with 201 Created and the new account.
pub async fn create_account_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    AppJson(form): AppJson<AccountForm>,
) -> Result<(StatusCode, Json<Account>), Error> {
    let details = AccountDetails::try_from(form)?;
    let connection = state.connection()?;

    let account = create_account(user_id, &details, &connection)?;

    Ok((StatusCode::CREATED, Json(account)))
}
