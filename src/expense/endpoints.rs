//! Route handlers for creating, listing, and deleting expenses.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    database_id::ExpenseId,
    expense::{
        Expense, ExpenseBuilder, create_expense, delete_expense, get_expense_total, get_expenses,
        get_recent_expenses,
    },
    responses::{MessageResponse, TotalResponse},
    user::UserID,
};

/// How many expenses the recent expenses endpoint returns.
const RECENT_LIMIT: u32 = 5;

/// The state needed by the expense route handlers.
#[derive(Debug, Clone)]
pub struct ExpenseRouteState {
    /// The database connection for managing expenses.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseRouteState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The data a client must send to create an expense.
///
/// The owner is taken from the authenticated caller, never from this body.
#[derive(Debug, Serialize, Deserialize)]
pub struct NewExpense {
    /// The amount of money spent. The sign is not constrained.
    pub amount: f64,
    /// The category to file the expense under.
    pub category: String,
    /// When the expense happened. Defaults to the current time when omitted.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
}

/// A route handler for creating a new expense, responds with the created
/// record.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseRouteState>,
    Extension(user_id): Extension<UserID>,
    Json(new_expense): Json<NewExpense>,
) -> Result<(StatusCode, Json<Expense>), Error> {
    let expense = create_expense(
        ExpenseBuilder {
            user_id,
            amount: new_expense.amount,
            category: new_expense.category,
            date: new_expense.date,
        },
        &state.db_connection.lock().unwrap(),
    )?;

    Ok((StatusCode::CREATED, Json(expense)))
}

/// A route handler for listing all of the caller's expenses, most recent
/// first.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_expenses_endpoint(
    State(state): State<ExpenseRouteState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<Expense>>, Error> {
    let expenses = get_expenses(user_id, &state.db_connection.lock().unwrap())?;

    Ok(Json(expenses))
}

/// A route handler for the sum of the caller's expense amounts.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_expense_total_endpoint(
    State(state): State<ExpenseRouteState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<TotalResponse>, Error> {
    let total = get_expense_total(user_id, &state.db_connection.lock().unwrap())?;

    Ok(Json(TotalResponse { total }))
}

/// A route handler for the caller's five most recent expenses.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_recent_expenses_endpoint(
    State(state): State<ExpenseRouteState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<Expense>>, Error> {
    let expenses = get_recent_expenses(user_id, RECENT_LIMIT, &state.db_connection.lock().unwrap())?;

    Ok(Json(expenses))
}

/// A route handler for deleting one of the caller's expenses.
///
/// Responds with 404 when the expense does not exist or belongs to another
/// user; in the latter case the expense is left untouched.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseRouteState>,
    Extension(user_id): Extension<UserID>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Json<MessageResponse>, Error> {
    let rows_affected = delete_expense(
        expense_id,
        user_id,
        &state.db_connection.lock().unwrap(),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpense);
    }

    Ok(Json(MessageResponse::new("Expense deleted")))
}
