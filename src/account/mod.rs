//! Accounts hold the money a user has, e.g. a checking account or a credit card.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::create_account_endpoint;
pub use db::{create_account_table, get_total_account_balance};
pub use delete::delete_account_endpoint;
pub use edit::update_account_endpoint;
pub use list::{get_account_endpoint, list_accounts_endpoint};
