//! Defines the endpoint for replacing a savings goal.

use axum::{Extension, Json, extract::State};

use crate::{
    Error, UserID,
    app_state::DbState,
    extract::{AppJson, IdPath},
    savings::{
        db::update_savings_goal,
        domain::{SavingsGoal, SavingsGoalDetails, SavingsGoalForm},
    },
};

/// A route handler for replacing the name, target and deadline of a savings goal
/// owned by the logged in user.
///
/// The amount saved can only be changed with a contribution.
pub async fn update_savings_goal_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    IdPath(goal_id): IdPath,
    AppJson(form): AppJson<SavingsGoalForm>,
) -> Result<Json<SavingsGoal>, Error> {
    let details = SavingsGoalDetails::try_from(form)?;
    let connection = state.connection()?;

    update_savings_goal(goal_id, user_id, &details, &connection).map(Json)
}
