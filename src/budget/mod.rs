//! Budgets limit how much may be spent over a period.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;
mod progress;

pub use create::create_budget_endpoint;
pub use db::{create_budget_table, get_monthly_allowance};
pub use delete::delete_budget_endpoint;
pub use edit::update_budget_endpoint;
pub use list::{get_budget_endpoint, list_budgets_endpoint};
pub use progress::get_budget_progress_endpoint;
