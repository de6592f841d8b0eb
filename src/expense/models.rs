//! Domain models for expense records.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{database_id::ExpenseId, user::UserID};

/// A single expense record owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// The ID of the expense in the application database.
    pub id: ExpenseId,
    /// The ID of the user that owns this expense.
    ///
    /// Always taken from the authenticated caller, never from a request body.
    pub user_id: UserID,
    /// The amount of money spent.
    ///
    /// The sign and magnitude are not constrained, matching the write path
    /// contract: zero and negative amounts are accepted silently.
    pub amount: f64,
    /// The category the user filed this expense under.
    pub category: String,
    /// When the expense happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

/// The data needed to insert a new expense.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseBuilder {
    /// The ID of the user that will own the expense.
    pub user_id: UserID,
    /// The amount of money spent.
    pub amount: f64,
    /// The category to file the expense under.
    pub category: String,
    /// When the expense happened. Defaults to the current time when `None`.
    pub date: Option<OffsetDateTime>,
}
