//! Route handlers for the analytics reports.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{
    AppState, Error,
    analytics::{ActivityItem, MonthlyTotal, merge_recent_activity, monthly_totals},
    expense::{get_category_totals, get_expense_total, get_expenses_since, get_recent_expenses},
    income::{get_income_since, get_income_total, get_recent_income},
    user::UserID,
};

/// How far back the monthly trends report looks, as a fixed number of days
/// rather than whole calendar months. The oldest bucket can therefore cover a
/// partial month.
const TREND_WINDOW_DAYS: i64 = 180;

/// How many records each side contributes to the activity feed before the
/// merge.
const ACTIVITY_PER_SIDE: u32 = 5;

/// The maximum length of the merged activity feed.
const ACTIVITY_LIMIT: usize = 10;

/// The state needed by the analytics route handlers.
#[derive(Debug, Clone)]
pub struct AnalyticsState {
    /// The database connection for reading expenses and income.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AnalyticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The caller's overall financial position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The sum of all of the caller's expense amounts.
    pub total_expenses: f64,
    /// The sum of all of the caller's income amounts.
    pub total_income: f64,
    /// Income minus expenses.
    pub balance: f64,
}

/// The summed expense amount for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// The summed amount for that category.
    pub amount: f64,
}

/// Month-by-month expense and income totals over the trend window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrends {
    /// Expense totals per month, oldest first.
    pub expenses: Vec<MonthlyTotal>,
    /// Income totals per month, oldest first.
    pub income: Vec<MonthlyTotal>,
}

/// A route handler for the caller's expense total, income total, and balance.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_summary_endpoint(
    State(state): State<AnalyticsState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Summary>, Error> {
    let connection = state.db_connection.lock().unwrap();
    let total_expenses = get_expense_total(user_id, &connection)?;
    let total_income = get_income_total(user_id, &connection)?;

    Ok(Json(Summary {
        total_expenses,
        total_income,
        balance: total_income - total_expenses,
    }))
}

/// A route handler for the caller's expense totals grouped by category,
/// largest first.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_expenses_by_category_endpoint(
    State(state): State<AnalyticsState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<CategoryTotal>>, Error> {
    let totals = get_category_totals(user_id, &state.db_connection.lock().unwrap())?
        .into_iter()
        .map(|(category, amount)| CategoryTotal { category, amount })
        .collect();

    Ok(Json(totals))
}

/// A route handler for the caller's monthly expense and income totals over
/// the last six months.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_monthly_trends_endpoint(
    State(state): State<AnalyticsState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<MonthlyTrends>, Error> {
    let cutoff = OffsetDateTime::now_utc() - Duration::days(TREND_WINDOW_DAYS);
    let connection = state.db_connection.lock().unwrap();

    let expenses = get_expenses_since(user_id, cutoff, &connection)?
        .into_iter()
        .map(|expense| (expense.date, expense.amount));
    let income = get_income_since(user_id, cutoff, &connection)?
        .into_iter()
        .map(|income| (income.date, income.amount));

    Ok(Json(MonthlyTrends {
        expenses: monthly_totals(expenses),
        income: monthly_totals(income),
    }))
}

/// A route handler for the caller's most recent activity across expenses and
/// income.
///
/// Each side contributes its five most recent records before the merge, so
/// the feed can under-report one side when the other has a burst of newer
/// records.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_recent_activity_endpoint(
    State(state): State<AnalyticsState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<ActivityItem>>, Error> {
    let connection = state.db_connection.lock().unwrap();
    let expenses = get_recent_expenses(user_id, ACTIVITY_PER_SIDE, &connection)?;
    let income = get_recent_income(user_id, ACTIVITY_PER_SIDE, &connection)?;

    Ok(Json(merge_recent_activity(expenses, income, ACTIVITY_LIMIT)))
}
