//! Code for creating the expense table and querying expenses from the database.
//!
//! Every query takes the owning user's ID as an explicit parameter so that
//! ownership stays visible at each call site.

use rusqlite::{Connection, Row};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    Error,
    database_id::ExpenseId,
    expense::{Expense, ExpenseBuilder},
    user::UserID,
};

/// Create the expense table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    Ok(Expense {
        id: row.get(0)?,
        user_id: UserID::new(row.get(1)?),
        amount: row.get(2)?,
        category: row.get(3)?,
        date: row.get(4)?,
    })
}

/// Create and insert a new expense into the database.
///
/// The date defaults to the current time when the builder has none, and is
/// normalized to UTC so that the stored text column sorts chronologically.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn create_expense(builder: ExpenseBuilder, connection: &Connection) -> Result<Expense, Error> {
    let date = builder
        .date
        .unwrap_or_else(OffsetDateTime::now_utc)
        .to_offset(UtcOffset::UTC);

    connection.execute(
        "INSERT INTO expense (user_id, amount, category, date) VALUES (?1, ?2, ?3, ?4)",
        (
            builder.user_id.as_i64(),
            builder.amount,
            &builder.category,
            &date,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Expense {
        id,
        user_id: builder.user_id,
        amount: builder.amount,
        category: builder.category,
        date,
    })
}

/// Retrieve all of `user_id`'s expenses, most recent first.
///
/// The result is unbounded: there is no pagination on this query.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_expenses(user_id: UserID, connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, amount, category, date FROM expense
             WHERE user_id = :user_id
             ORDER BY date DESC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(Error::SqlError))
        .collect()
}

/// Retrieve the `limit` most recent of `user_id`'s expenses.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_recent_expenses(
    user_id: UserID,
    limit: u32,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, amount, category, date FROM expense
             WHERE user_id = :user_id
             ORDER BY date DESC
             LIMIT :limit",
        )?
        .query_map(
            rusqlite::named_params! {":user_id": user_id.as_i64(), ":limit": limit},
            map_expense_row,
        )?
        .map(|maybe_expense| maybe_expense.map_err(Error::SqlError))
        .collect()
}

/// Retrieve `user_id`'s expenses dated at or after `cutoff`.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_expenses_since(
    user_id: UserID,
    cutoff: OffsetDateTime,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    // Stored dates are UTC, so the cutoff must be too for the text comparison
    // to be chronological.
    let cutoff = cutoff.to_offset(UtcOffset::UTC);

    connection
        .prepare(
            "SELECT id, user_id, amount, category, date FROM expense
             WHERE user_id = :user_id AND date >= :cutoff",
        )?
        .query_map(
            rusqlite::named_params! {":user_id": user_id.as_i64(), ":cutoff": cutoff},
            map_expense_row,
        )?
        .map(|maybe_expense| maybe_expense.map_err(Error::SqlError))
        .collect()
}

/// Get the sum of `user_id`'s expense amounts, 0 when there are none.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_expense_total(user_id: UserID, connection: &Connection) -> Result<f64, Error> {
    connection
        .query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM expense WHERE user_id = :user_id",
            &[(":user_id", &user_id.as_i64())],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Get the sum of `user_id`'s expense amounts grouped by category, sorted by
/// summed amount in descending order.
///
/// Categories with equal sums keep the order produced by the GROUP BY, which
/// for SQLite is ascending category name.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_category_totals(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<(String, f64)>, Error> {
    connection
        .prepare(
            "SELECT category, SUM(amount) FROM expense
             WHERE user_id = :user_id
             GROUP BY category
             ORDER BY SUM(amount) DESC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?
        .map(|maybe_total| maybe_total.map_err(Error::SqlError))
        .collect()
}

type RowsAffected = usize;

/// Delete the expense with `id` if it belongs to `user_id`.
///
/// Returns the number of rows deleted: 0 means the expense does not exist or
/// belongs to another user, and nothing was removed.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn delete_expense(
    id: ExpenseId,
    user_id: UserID,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM expense WHERE id = :id AND user_id = :user_id",
            rusqlite::named_params! {":id": id, ":user_id": user_id.as_i64()},
        )
        .map_err(|error| error.into())
}
