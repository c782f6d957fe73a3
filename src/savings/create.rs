//! Defines the endpoint for creating a new savings goal.

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{
    Error, UserID,
    app_state::DbState,
    extract::AppJson,
    savings::{
        db::create_savings_goal,
        domain::{SavingsGoal, SavingsGoalDetails, SavingsGoalForm},
    },
};

/// A route handler for creating a savings goal for the logged in user.
///
/// Responds with 201 Created and the new goal.
pub async fn create_savings_goal_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    AppJson(form): AppJson<SavingsGoalForm>,
) -> Result<(StatusCode, Json<SavingsGoal>), Error> {
    let details = SavingsGoalDetails::try_from(form)?;
    let connection = state.connection()?;

    let goal = create_savings_goal(user_id, &details, &connection)?;

    Ok((StatusCode::CREATED, Json(goal)))
}
