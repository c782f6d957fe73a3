//! Transactions record money coming in or going out.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::create_transaction_endpoint;
pub use db::{create_transaction_table, get_expense_total};
pub use delete::delete_transaction_endpoint;
pub use edit::update_transaction_endpoint;
pub use list::{get_transaction_endpoint, list_transactions_endpoint};
