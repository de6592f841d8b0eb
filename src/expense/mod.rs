//! Everything for recording and retrieving a user's expenses.

mod db;
mod endpoints;
mod models;

pub use db::{
    create_expense, create_expense_table, delete_expense, get_category_totals, get_expense_total,
    get_expenses, get_expenses_since, get_recent_expenses,
};
pub use endpoints::{
    NewExpense, create_expense_endpoint, delete_expense_endpoint, get_expense_total_endpoint,
    get_expenses_endpoint, get_recent_expenses_endpoint,
};
pub use models::{Expense, ExpenseBuilder};
