//! Code for creating the income table and querying income records from the
//! database.
//!
//! The queries mirror the expense queries except that income has no category
//! grouping, only a free-form source label.

use rusqlite::{Connection, Row};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    Error,
    database_id::IncomeId,
    income::{Income, IncomeBuilder},
    user::UserID,
};

/// Create the income table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_income_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS income (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                amount REAL NOT NULL,
                source TEXT NOT NULL,
                date TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

fn map_income_row(row: &Row) -> Result<Income, rusqlite::Error> {
    Ok(Income {
        id: row.get(0)?,
        user_id: UserID::new(row.get(1)?),
        amount: row.get(2)?,
        source: row.get(3)?,
        date: row.get(4)?,
    })
}

/// Create and insert a new income record into the database.
///
/// The date defaults to the current time when the builder has none, and is
/// normalized to UTC so that the stored text column sorts chronologically.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn create_income(builder: IncomeBuilder, connection: &Connection) -> Result<Income, Error> {
    let date = builder
        .date
        .unwrap_or_else(OffsetDateTime::now_utc)
        .to_offset(UtcOffset::UTC);

    connection.execute(
        "INSERT INTO income (user_id, amount, source, date) VALUES (?1, ?2, ?3, ?4)",
        (
            builder.user_id.as_i64(),
            builder.amount,
            &builder.source,
            &date,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Income {
        id,
        user_id: builder.user_id,
        amount: builder.amount,
        source: builder.source,
        date,
    })
}

/// Retrieve all of `user_id`'s income records, most recent first.
///
/// The result is unbounded: there is no pagination on this query.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_income(user_id: UserID, connection: &Connection) -> Result<Vec<Income>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, amount, source, date FROM income
             WHERE user_id = :user_id
             ORDER BY date DESC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_income_row)?
        .map(|maybe_income| maybe_income.map_err(Error::SqlError))
        .collect()
}

/// Retrieve the `limit` most recent of `user_id`'s income records.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_recent_income(
    user_id: UserID,
    limit: u32,
    connection: &Connection,
) -> Result<Vec<Income>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, amount, source, date FROM income
             WHERE user_id = :user_id
             ORDER BY date DESC
             LIMIT :limit",
        )?
        .query_map(
            rusqlite::named_params! {":user_id": user_id.as_i64(), ":limit": limit},
            map_income_row,
        )?
        .map(|maybe_income| maybe_income.map_err(Error::SqlError))
        .collect()
}

/// Retrieve `user_id`'s income records dated at or after `cutoff`.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_income_since(
    user_id: UserID,
    cutoff: OffsetDateTime,
    connection: &Connection,
) -> Result<Vec<Income>, Error> {
    // Stored dates are UTC, so the cutoff must be too for the text comparison
    // to be chronological.
    let cutoff = cutoff.to_offset(UtcOffset::UTC);

    connection
        .prepare(
            "SELECT id, user_id, amount, source, date FROM income
             WHERE user_id = :user_id AND date >= :cutoff",
        )?
        .query_map(
            rusqlite::named_params! {":user_id": user_id.as_i64(), ":cutoff": cutoff},
            map_income_row,
        )?
        .map(|maybe_income| maybe_income.map_err(Error::SqlError))
        .collect()
}

/// Get the sum of `user_id`'s income amounts, 0 when there are none.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn get_income_total(user_id: UserID, connection: &Connection) -> Result<f64, Error> {
    connection
        .query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM income WHERE user_id = :user_id",
            &[(":user_id", &user_id.as_i64())],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

type RowsAffected = usize;

/// Delete the income record with `id` if it belongs to `user_id`.
///
/// Returns the number of rows deleted: 0 means the record does not exist or
/// belongs to another user, and nothing was removed.
///
/// # Errors
///
/// Returns an [Error::SqlError] if an SQL related error occurred.
pub fn delete_income(
    id: IncomeId,
    user_id: UserID,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM income WHERE id = :id AND user_id = :user_id",
            rusqlite::named_params! {":id": id, ":user_id": user_id.as_i64()},
        )
        .map_err(|error| error.into())
}

#[cfg(test)]
mod income_db_tests {
    use rusqlite::Connection;
    use time::{Duration, OffsetDateTime};

    use crate::{
        db::initialize,
        income::{
            IncomeBuilder, create_income, delete_income, get_income, get_income_since,
            get_income_total, get_recent_income,
        },
        user::{UserID, create_user},
    };

    fn get_db_connection() -> (Connection, UserID) {
        let conn =
            Connection::open_in_memory().expect("Could not create in-memory SQLite database");
        initialize(&conn).expect("Could not initialize database");
        let user = create_user("foo@bar.baz", "hunter2hash", &conn).unwrap();

        (conn, user.id)
    }

    fn new_income(user_id: UserID, amount: f64, source: &str, days_ago: i64) -> IncomeBuilder {
        IncomeBuilder {
            user_id,
            amount,
            source: source.to_owned(),
            date: Some(OffsetDateTime::now_utc() - Duration::days(days_ago)),
        }
    }

    #[test]
    fn create_income_defaults_date_to_now() {
        let (conn, user_id) = get_db_connection();
        let builder = IncomeBuilder {
            user_id,
            amount: 1000.0,
            source: "Salary".to_owned(),
            date: None,
        };

        let income = create_income(builder, &conn).unwrap();

        assert!((OffsetDateTime::now_utc() - income.date).abs() < Duration::seconds(5));
    }

    #[test]
    fn get_income_sorts_by_date_descending_and_ignores_other_users() {
        let (conn, user_id) = get_db_connection();
        let other_user = create_user("qux@bar.baz", "hunter3hash", &conn).unwrap();
        for days_ago in [3, 1, 2] {
            create_income(new_income(user_id, 1.0, "Salary", days_ago), &conn).unwrap();
        }
        create_income(new_income(other_user.id, 2.0, "Salary", 0), &conn).unwrap();

        let income = get_income(user_id, &conn).unwrap();

        assert_eq!(income.len(), 3);
        assert!(income.windows(2).all(|pair| pair[0].date >= pair[1].date));
        assert!(income.iter().all(|record| record.user_id == user_id));
    }

    #[test]
    fn get_recent_income_limits_results() {
        let (conn, user_id) = get_db_connection();
        for days_ago in 0..7 {
            create_income(new_income(user_id, 1.0, "Salary", days_ago), &conn).unwrap();
        }

        let income = get_recent_income(user_id, 5, &conn).unwrap();

        assert_eq!(income.len(), 5);
    }

    #[test]
    fn get_income_total_sums_amounts() {
        let (conn, user_id) = get_db_connection();
        assert_eq!(get_income_total(user_id, &conn).unwrap(), 0.0);
        for (amount, days_ago) in [(1000.0, 0), (250.5, 1)] {
            create_income(new_income(user_id, amount, "Salary", days_ago), &conn).unwrap();
        }

        let total = get_income_total(user_id, &conn).unwrap();

        assert_eq!(total, 1250.5);
    }

    #[test]
    fn get_income_since_excludes_older_records() {
        let (conn, user_id) = get_db_connection();
        create_income(new_income(user_id, 1.0, "Salary", 10), &conn).unwrap();
        create_income(new_income(user_id, 2.0, "Salary", 200), &conn).unwrap();

        let cutoff = OffsetDateTime::now_utc() - Duration::days(180);
        let income = get_income_since(user_id, cutoff, &conn).unwrap();

        assert_eq!(income.len(), 1);
        assert_eq!(income[0].amount, 1.0);
    }

    #[test]
    fn delete_income_only_removes_own_record() {
        let (conn, user_id) = get_db_connection();
        let other_user = create_user("qux@bar.baz", "hunter3hash", &conn).unwrap();
        let income = create_income(new_income(user_id, 1.0, "Salary", 0), &conn).unwrap();

        assert_eq!(delete_income(income.id, other_user.id, &conn).unwrap(), 0);
        assert_eq!(delete_income(income.id, user_id, &conn).unwrap(), 1);
        assert!(get_income(user_id, &conn).unwrap().is_empty());
    }
}
