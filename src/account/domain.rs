//! The account model and the request body used to create or replace one.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, UserID, database_id::DatabaseId, validate::require_text};

/// The currency used when a request does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// A bank account, credit card or wallet and how much money is in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    /// The id for the account.
    pub id: DatabaseId,
    /// The user that owns the account.
    pub user_id: UserID,
    /// A display name, e.g. "Everyday".
    pub account_name: String,
    /// What kind of account this is, e.g. "checking" or "credit".
    pub account_type: String,
    /// The balance, negative for money owed.
    pub balance: f64,
    /// Three letter currency code.
    pub currency: String,
    /// Whether this is the user's main account.
    pub is_primary: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The request body for creating or replacing an account.
#[derive(Debug, Default, Deserialize)]
pub struct AccountForm {
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub account_type: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub is_primary: bool,
}

/// The validated fields of an account, ready to be written to the database.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountDetails {
    pub account_name: String,
    pub account_type: String,
    pub balance: f64,
    pub currency: String,
    pub is_primary: bool,
}

impl TryFrom<AccountForm> for AccountDetails {
    type Error = Error;

    fn try_from(form: AccountForm) -> Result<Self, Self::Error> {
        let currency = match form.currency.trim() {
            "" => DEFAULT_CURRENCY.to_owned(),
            currency => currency.to_owned(),
        };

        Ok(Self {
            account_name: require_text("account_name", &form.account_name)?,
            account_type: require_text("account_type", &form.account_type)?,
            balance: form.balance,
            currency,
            is_primary: form.is_primary,
        })
    }
}
