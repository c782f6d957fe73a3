//! The API endpoints URIs.
//!
//! Tests fill in parameters such as '/accounts/{account_id}' with `format_endpoint`.

/// Reports whether the server is up.
pub const HEALTH: &str = "/api/v1/health";
/// Creates a user and returns an access token.
pub const REGISTER: &str = "/api/v1/auth/register";
/// Checks a user's credentials and returns an access token.
pub const LOG_IN: &str = "/api/v1/auth/login";
/// The logged in user.
pub const CURRENT_USER: &str = "/api/v1/users/me";
/// The route for listing and creating accounts.
pub const ACCOUNTS: &str = "/api/v1/accounts";
/// The route for a single account.
pub const ACCOUNT: &str = "/api/v1/accounts/{account_id}";
/// The route for listing and creating transactions.
pub const TRANSACTIONS: &str = "/api/v1/transactions";
/// The route for a single transaction.
pub const TRANSACTION: &str = "/api/v1/transactions/{transaction_id}";
/// The route for listing and creating budgets.
pub const BUDGETS: &str = "/api/v1/budgets";
/// The route for a single budget.
pub const BUDGET: &str = "/api/v1/budgets/{budget_id}";
/// How much of a budget has been spent.
pub const BUDGET_PROGRESS: &str = "/api/v1/budgets/{budget_id}/progress";
/// The route for listing and creating savings goals.
pub const SAVINGS_GOALS: &str = "/api/v1/savings";
/// The route for a single savings goal.
pub const SAVINGS_GOAL: &str = "/api/v1/savings/{goal_id}";
/// Adds money to a savings goal.
pub const SAVINGS_CONTRIBUTION: &str = "/api/v1/savings/{goal_id}/contribute";
/// Figures for the dashboard.
pub const ANALYTICS_SUMMARY: &str = "/api/v1/analytics/summary";

/// Replace the first parameter in `endpoint_path` with `id`.
///
/// Parameters are specified with curly braces, e.g. "/accounts/{account_id}".
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, id: impl std::fmt::Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;
    use uuid::Uuid;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::HEALTH);
        assert_endpoint_is_valid_uri(endpoints::REGISTER);
        assert_endpoint_is_valid_uri(endpoints::LOG_IN);
        assert_endpoint_is_valid_uri(endpoints::CURRENT_USER);
        assert_endpoint_is_valid_uri(endpoints::ACCOUNTS);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::BUDGETS);
        assert_endpoint_is_valid_uri(endpoints::SAVINGS_GOALS);
        assert_endpoint_is_valid_uri(endpoints::ANALYTICS_SUMMARY);
    }

    #[test]
    fn formatted_endpoints_are_valid_uris() {
        let id = Uuid::new_v4();

        for endpoint in [
            endpoints::ACCOUNT,
            endpoints::TRANSACTION,
            endpoints::BUDGET,
            endpoints::BUDGET_PROGRESS,
            endpoints::SAVINGS_GOAL,
            endpoints::SAVINGS_CONTRIBUTION,
        ] {
            assert_endpoint_is_valid_uri(&format_endpoint(endpoint, id));
        }
    }

    #[test]
    fn replaces_parameter_in_middle_of_path() {
        let id = Uuid::nil();

        assert_eq!(
            format_endpoint(endpoints::BUDGET_PROGRESS, id),
            "/api/v1/budgets/00000000-0000-0000-0000-000000000000/progress"
        );
    }

    #[test]
    fn returns_path_without_parameter_unchanged() {
        assert_eq!(format_endpoint(endpoints::ACCOUNTS, 1), endpoints::ACCOUNTS);
    }
}
