//! Route handlers for creating, listing, and deleting income records.

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
    database_id::IncomeId,
    income::{
        Income, IncomeBuilder, create_income, delete_income, get_income, get_income_total,
        get_recent_income,
    },
    responses::{MessageResponse, TotalResponse},
    user::UserID,
};

/// How many income records the recent income endpoint returns.
const RECENT_LIMIT: u32 = 5;

/// The state needed by the income route handlers.
#[derive(Debug, Clone)]
pub struct IncomeRouteState {
    /// The database connection for managing income records.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for IncomeRouteState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The data a client must send to create an income record.
#[derive(Debug, Serialize, Deserialize)]
pub struct NewIncome {
    /// The amount of money received. The sign is not constrained.
    pub amount: f64,
    /// Where the money came from.
    pub source: String,
    /// When the income was received. Defaults to the current time when omitted.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date: Option<OffsetDateTime>,
}

/// A route handler for recording a new income record, responds with the
/// created record.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_income_endpoint(
    State(state): State<IncomeRouteState>,
    Extension(user_id): Extension<UserID>,
    Json(new_income): Json<NewIncome>,
) -> Result<(StatusCode, Json<Income>), Error> {
    let income = create_income(
        IncomeBuilder {
            user_id,
            amount: new_income.amount,
            source: new_income.source,
            date: new_income.date,
        },
        &state.db_connection.lock().unwrap(),
    )?;

    Ok((StatusCode::CREATED, Json(income)))
}

/// A route handler for listing all of the caller's income records, most
/// recent first.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_income_endpoint(
    State(state): State<IncomeRouteState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<Income>>, Error> {
    let income = get_income(user_id, &state.db_connection.lock().unwrap())?;

    Ok(Json(income))
}

/// A route handler for the sum of the caller's income amounts.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_income_total_endpoint(
    State(state): State<IncomeRouteState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<TotalResponse>, Error> {
    let total = get_income_total(user_id, &state.db_connection.lock().unwrap())?;

    Ok(Json(TotalResponse { total }))
}

/// A route handler for the caller's five most recent income records.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_recent_income_endpoint(
    State(state): State<IncomeRouteState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<Income>>, Error> {
    let income = get_recent_income(user_id, RECENT_LIMIT, &state.db_connection.lock().unwrap())?;

    Ok(Json(income))
}

/// A route handler for deleting one of the caller's income records.
///
/// Responds with 404 when the record does not exist or belongs to another
/// user; in the latter case the record is left untouched.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn delete_income_endpoint(
    State(state): State<IncomeRouteState>,
    Extension(user_id): Extension<UserID>,
    Path(income_id): Path<IncomeId>,
) -> Result<Json<MessageResponse>, Error> {
    let rows_affected = delete_income(
        income_id,
        user_id,
        &state.db_connection.lock().unwrap(),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingIncome);
    }

    Ok(Json(MessageResponse::new("Income deleted")))
}
