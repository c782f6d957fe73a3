//! Savings goals track progress towards an amount of money.

mod contribute;
mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use contribute::contribute_to_savings_goal_endpoint;
pub use create::create_savings_goal_endpoint;
pub use db::{create_savings_goal_table, get_total_savings};
pub use delete::delete_savings_goal_endpoint;
pub use edit::update_savings_goal_endpoint;
pub use list::{get_savings_goal_endpoint, list_savings_goals_endpoint};
