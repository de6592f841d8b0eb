//! Everything for recording and retrieving a user's income.

mod db;
mod endpoints;
mod models;

pub use db::{
    create_income, create_income_table, delete_income, get_income, get_income_since,
    get_income_total, get_recent_income,
};
pub use endpoints::{
    NewIncome, create_income_endpoint, delete_income_endpoint, get_income_endpoint,
    get_income_total_endpoint, get_recent_income_endpoint,
};
pub use models::{Income, IncomeBuilder};
