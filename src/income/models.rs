//! Domain models for income records.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{database_id::IncomeId, user::UserID};

/// A single income record owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    /// The ID of the income record in the application database.
    pub id: IncomeId,
    /// The ID of the user that owns this income record.
    pub user_id: UserID,
    /// The amount of money received. The sign is not constrained.
    pub amount: f64,
    /// Where the money came from, e.g. "Salary".
    pub source: String,
    /// When the income was received.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

/// The data needed to insert a new income record.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeBuilder {
    /// The ID of the user that will own the income record.
    pub user_id: UserID,
    /// The amount of money received.
    pub amount: f64,
    /// Where the money came from.
    pub source: String,
    /// When the income was received. Defaults to the current time when `None`.
    pub date: Option<OffsetDateTime>,
}
