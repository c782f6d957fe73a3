//! Defines the endpoint for adding money to a savings goal.

use axum::{Extension, Json, extract::State};

use crate::{
    Error, UserID,
    app_state::DbState,
    extract::{AppJson, IdPath},
    savings::{
        db::contribute_to_savings_goal,
        domain::{ContributionForm, SavingsGoal},
    },
};

/// A route handler for adding to the amount saved for one of the logged in user's goals.
///
/// Responds with the updated goal.
pub async fn contribute_to_savings_goal_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    IdPath(goal_id): IdPath,
    AppJson(form): AppJson<ContributionForm>,
) -> Result<Json<SavingsGoal>, Error> {
    let connection = state.connection()?;

    contribute_to_savings_goal(goal_id, user_id, form.amount, &connection)
        .inspect(|goal| {
            if goal.is_completed {
                tracing::debug!("Savings goal {goal_id} has reached its target");
            }
        })
        .map(Json)
}
