//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;

/// The ID of an expense record.
pub type ExpenseId = DatabaseID;

/// The ID of an income record.
pub type IncomeId = DatabaseID;
