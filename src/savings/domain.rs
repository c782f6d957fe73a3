//! The savings goal model and its request bodies.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error, UserID,
    database_id::DatabaseId,
    date::{iso_date, parse_optional_date},
    validate::{require_positive, require_text},
};

/// An amount of money a user is working towards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsGoal {
    /// The ID of the savings goal.
    pub id: DatabaseId,
    /// The user that owns the savings goal.
    pub user_id: UserID,
    /// A display name, e.g. "Holiday".
    pub name: String,
    /// How much the user wants to save, always positive.
    pub target_amount: f64,
    /// How much has been saved so far.
    pub current_amount: f64,
    /// When the user wants to reach the target by, if ever.
    #[serde(with = "iso_date::option")]
    pub deadline: Option<Date>,
    /// Set once `current_amount` reaches `target_amount` and never unset.
    pub is_completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The request body for creating or replacing a savings goal.
#[derive(Debug, Default, Deserialize)]
pub struct SavingsGoalForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub target_amount: f64,
    /// The deadline as "YYYY-MM-DD".
    #[serde(default)]
    pub deadline: Option<String>,
}

/// The validated fields of a savings goal.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsGoalDetails {
    pub name: String,
    pub target_amount: f64,
    /// `None` when the request did not include a deadline.
    pub deadline: Option<Date>,
}

impl TryFrom<SavingsGoalForm> for SavingsGoalDetails {
    type Error = Error;

    fn try_from(form: SavingsGoalForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: require_text("name", &form.name)?,
            target_amount: require_positive("target_amount", form.target_amount)?,
            deadline: parse_optional_date("deadline", form.deadline.as_deref())?,
        })
    }
}

/// The request body for adding money to a savings goal.
///
/// Negative amounts withdraw money from the goal.
#[derive(Debug, Deserialize)]
pub struct ContributionForm {
    pub amount: f64,
}
