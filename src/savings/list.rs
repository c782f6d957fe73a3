//! Defines the endpoints for reading savings goals.

use axum::{Extension, Json, extract::State};

use crate::{
    Error, UserID,
    app_state::DbState,
    extract::IdPath,
    savings::{
        db::{get_savings_goal, get_savings_goals},
        domain::SavingsGoal,
    },
};

/// A route handler that lists the logged in user's savings goals, newest first.
pub async fn list_savings_goals_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<SavingsGoal>>, Error> {
    let connection = state.connection()?;

    get_savings_goals(user_id, &connection).map(Json)
}

/// A route handler for getting one of the logged in user's savings goals.
pub async fn get_savings_goal_endpoint(
    State(state): State<DbState>,
    Extension(user_id): Extension<UserID>,
    IdPath(goal_id): IdPath,
) -> Result<Json<SavingsGoal>, Error> {
    let connection = state.connection()?;

    get_savings_goal(goal_id, user_id, &connection).map(Json)
}
