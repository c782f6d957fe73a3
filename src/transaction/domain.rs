//! The transaction model, the request body for writing one and the list filters.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error, UserID,
    database_id::DatabaseId,
    date::{iso_date, parse_optional_date},
    validate::require_text,
};

/// The transaction type counted as spending by budgets and the summary.
pub const EXPENSE: &str = "expense";

/// How many transactions are listed when the request does not set a limit.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Money moving in or out, e.g. a salary payment or a grocery shop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseId,
    /// The user that owns the transaction.
    pub user_id: UserID,
    /// The account the money moved through, if any.
    ///
    /// This is not checked against the user's accounts.
    pub account_id: Option<DatabaseId>,
    /// A short description, e.g. "Groceries".
    pub title: String,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// What kind of transaction this is, e.g. "income" or "expense".
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// Free text used for filtering, e.g. "food".
    pub category: String,
    /// When the transaction happened.
    #[serde(with = "iso_date")]
    pub transaction_date: Date,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The request body for creating or replacing a transaction.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionForm {
    #[serde(default)]
    pub account_id: Option<DatabaseId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(rename = "type", default)]
    pub transaction_type: String,
    #[serde(default)]
    pub category: String,
    /// The transaction date as "YYYY-MM-DD".
    #[serde(default)]
    pub date: Option<String>,
}

/// The validated fields of a transaction.
///
/// `date` is `None` when the request did not include one.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDetails {
    pub account_id: Option<DatabaseId>,
    pub title: String,
    pub amount: f64,
    pub transaction_type: String,
    pub category: String,
    pub date: Option<Date>,
}

impl TryFrom<TransactionForm> for TransactionDetails {
    type Error = Error;

    fn try_from(form: TransactionForm) -> Result<Self, Self::Error> {
        Ok(Self {
            account_id: form.account_id,
            title: require_text("title", &form.title)?,
            amount: form.amount,
            transaction_type: require_text("type", &form.transaction_type)?,
            category: form.category.trim().to_owned(),
            date: parse_optional_date("date", form.date.as_deref())?,
        })
    }
}

/// The query string for listing transactions.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    /// Only list transactions of this type.
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// Only list transactions in this category.
    pub category: Option<String>,
    /// The maximum number of transactions to list.
    ///
    /// Kept as text so that a bad value falls back to the default instead of
    /// rejecting the request.
    pub limit: Option<String>,
}

/// The filters for listing transactions after parsing the query string.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    pub transaction_type: Option<String>,
    pub category: Option<String>,
    /// A negative limit lists every matching transaction.
    pub limit: i64,
}

impl From<TransactionQuery> for TransactionFilter {
    fn from(query: TransactionQuery) -> Self {
        let non_empty = |value: Option<String>| value.filter(|value| !value.is_empty());

        Self {
            transaction_type: non_empty(query.transaction_type),
            category: non_empty(query.category),
            limit: query
                .limit
                .and_then(|limit| limit.trim().parse().ok())
                .unwrap_or(DEFAULT_LIST_LIMIT),
        }
    }
}
