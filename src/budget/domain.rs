//! The budget model, the request body for writing one and the list filters.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error, UserID,
    database_id::DatabaseId,
    date::{iso_date, parse_optional_date},
    validate::{require_positive, require_text},
};

/// The budget period used for the monthly allowance in the summary.
pub const MONTHLY: &str = "monthly";

/// A spending limit over a period of time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Budget {
    /// The ID of the budget.
    pub id: DatabaseId,
    /// The user that owns the budget.
    pub user_id: UserID,
    /// A display name, e.g. "Groceries".
    pub name: String,
    /// How much may be spent, always positive.
    pub amount: f64,
    /// How often the budget repeats, e.g. "monthly".
    pub period: String,
    pub category: String,
    /// The first day counted towards the budget.
    #[serde(with = "iso_date")]
    pub start_date: Date,
    /// The last day counted towards the budget, `None` for an open-ended budget.
    #[serde(with = "iso_date::option")]
    pub end_date: Option<Date>,
    pub is_active: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

fn default_is_active() -> bool {
    true
}

/// The request body for creating or replacing a budget.
#[derive(Debug, Deserialize)]
pub struct BudgetForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub category: String,
    /// The first day of the budget as "YYYY-MM-DD".
    #[serde(default)]
    pub start_date: Option<String>,
    /// The last day of the budget as "YYYY-MM-DD".
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

impl Default for BudgetForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            amount: 0.0,
            period: String::new(),
            category: String::new(),
            start_date: None,
            end_date: None,
            is_active: default_is_active(),
        }
    }
}

/// The validated fields of a budget.
///
/// The dates are `None` when the request did not include them.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetDetails {
    pub name: String,
    pub amount: f64,
    pub period: String,
    pub category: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub is_active: bool,
}

impl TryFrom<BudgetForm> for BudgetDetails {
    type Error = Error;

    fn try_from(form: BudgetForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: require_text("name", &form.name)?,
            amount: require_positive("amount", form.amount)?,
            period: require_text("period", &form.period)?,
            category: form.category.trim().to_owned(),
            start_date: parse_optional_date("start_date", form.start_date.as_deref())?,
            end_date: parse_optional_date("end_date", form.end_date.as_deref())?,
            is_active: form.is_active,
        })
    }
}

/// The query string for listing budgets.
#[derive(Debug, Default, Deserialize)]
pub struct BudgetQuery {
    /// Only list budgets with this period.
    pub period: Option<String>,
    /// "true" for active budgets, "false" for inactive ones.
    pub active: Option<String>,
}

/// The filters for listing budgets after parsing the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetFilter {
    pub period: Option<String>,
    pub is_active: Option<bool>,
}

impl From<BudgetQuery> for BudgetFilter {
    fn from(query: BudgetQuery) -> Self {
        Self {
            period: query.period.filter(|period| !period.is_empty()),
            // Anything other than "true" or "false" is ignored.
            is_active: match query.active.as_deref() {
                Some("true") => Some(true),
                Some("false") => Some(false),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error,
        budget::domain::{BudgetDetails, BudgetFilter, BudgetForm, BudgetQuery},
    };

    fn form() -> BudgetForm {
        BudgetForm {
            name: "Groceries".to_owned(),
            amount: 200.0,
            period: "monthly".to_owned(),
            start_date: Some("2024-01-01".to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn is_active_defaults_to_true_when_omitted() {
        let form: BudgetForm =
            serde_json::from_str(r#"{"name": "Rent", "amount": 1, "period": "monthly"}"#).unwrap();

        assert!(form.is_active);
    }

    #[test]
    fn valid_form_is_accepted() {
        let details = BudgetDetails::try_from(form()).unwrap();

        assert_eq!(details.start_date, Some(date!(2024 - 01 - 01)));
        assert_eq!(details.end_date, None);
        assert!(details.is_active);
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        for amount in [0.0, -10.0] {
            let form = BudgetForm {
                amount,
                ..form()
            };

            assert_eq!(
                BudgetDetails::try_from(form),
                Err(Error::InvalidInput("amount must be positive".to_owned()))
            );
        }
    }

    #[test]
    fn bad_end_date_is_rejected() {
        let form = BudgetForm {
            end_date: Some("tomorrow".to_owned()),
            ..form()
        };

        assert_eq!(
            BudgetDetails::try_from(form),
            Err(Error::InvalidInput("invalid end_date".to_owned()))
        );
    }

    #[test]
    fn active_filter_only_accepts_true_or_false() {
        let parse = |active: &str| {
            BudgetFilter::from(BudgetQuery {
                period: None,
                active: Some(active.to_owned()),
            })
            .is_active
        };

        assert_eq!(parse("true"), Some(true));
        assert_eq!(parse("false"), Some(false));
        assert_eq!(parse("yes"), None);
        assert_eq!(parse(""), None);
    }
}
