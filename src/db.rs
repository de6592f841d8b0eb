//! Database initialization for the application's domain tables.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error, expense::create_expense_table, income::create_income_table, user::create_user_table,
};

/// Create the tables for the application's domain models.
///
/// Tables that already exist are left untouched, so this function is safe to
/// call on every server start.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_expense_table(&transaction)?;
    create_income_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
