//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router,
    http::Uri,
    middleware,
    routing::{get, post},
};

use crate::{
    AppState, Error,
    account::{
        create_account_endpoint, delete_account_endpoint, get_account_endpoint,
        list_accounts_endpoint, update_account_endpoint,
    },
    analytics::get_summary_endpoint,
    auth::{auth_guard, log_in, register_user},
    budget::{
        create_budget_endpoint, delete_budget_endpoint, get_budget_endpoint,
        get_budget_progress_endpoint, list_budgets_endpoint, update_budget_endpoint,
    },
    endpoints,
    health::get_health,
    savings::{
        contribute_to_savings_goal_endpoint, create_savings_goal_endpoint,
        delete_savings_goal_endpoint, get_savings_goal_endpoint, list_savings_goals_endpoint,
        update_savings_goal_endpoint,
    },
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transaction_endpoint,
        list_transactions_endpoint, update_transaction_endpoint,
    },
    user::{get_current_user, update_current_user},
};

/// Return a router with all the app's routes.
///
/// Every route except the health check, registration and log-in requires a
/// valid bearer token.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(endpoints::REGISTER, post(register_user))
        .route(endpoints::LOG_IN, post(log_in));

    let protected_routes = Router::new()
        .route(
            endpoints::CURRENT_USER,
            get(get_current_user).put(update_current_user),
        )
        .route(
            endpoints::ACCOUNTS,
            get(list_accounts_endpoint).post(create_account_endpoint),
        )
        .route(
            endpoints::ACCOUNT,
            get(get_account_endpoint)
                .put(update_account_endpoint)
                .delete(delete_account_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(update_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::BUDGETS,
            get(list_budgets_endpoint).post(create_budget_endpoint),
        )
        .route(
            endpoints::BUDGET,
            get(get_budget_endpoint)
                .put(update_budget_endpoint)
                .delete(delete_budget_endpoint),
        )
        .route(
            endpoints::BUDGET_PROGRESS,
            get(get_budget_progress_endpoint),
        )
        .route(
            endpoints::SAVINGS_GOALS,
            get(list_savings_goals_endpoint).post(create_savings_goal_endpoint),
        )
        .route(
            endpoints::SAVINGS_GOAL,
            get(get_savings_goal_endpoint)
                .put(update_savings_goal_endpoint)
                .delete(delete_savings_goal_endpoint),
        )
        .route(
            endpoints::SAVINGS_CONTRIBUTION,
            post(contribute_to_savings_goal_endpoint),
        )
        .route(endpoints::ANALYTICS_SUMMARY, get(get_summary_endpoint))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found(uri: Uri) -> Error {
    tracing::debug!("No route for {uri}");
    Error::NotFound
}
