//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::{
    AppState,
    analytics::{
        get_expenses_by_category_endpoint, get_monthly_trends_endpoint,
        get_recent_activity_endpoint, get_summary_endpoint,
    },
    auth::{auth_guard, log_in_endpoint, register_endpoint},
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_expense_total_endpoint,
        get_expenses_endpoint, get_recent_expenses_endpoint,
    },
    income::{
        create_income_endpoint, delete_income_endpoint, get_income_endpoint,
        get_income_total_endpoint, get_recent_income_endpoint,
    },
    logging::logging_middleware,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index))
        .route(endpoints::REGISTER, post(register_endpoint))
        .route(endpoints::LOG_IN, post(log_in_endpoint));

    let protected_routes = Router::new()
        .route(endpoints::EXPENSES, post(create_expense_endpoint))
        .route(endpoints::EXPENSES, get(get_expenses_endpoint))
        .route(endpoints::EXPENSE_TOTAL, get(get_expense_total_endpoint))
        .route(endpoints::RECENT_EXPENSES, get(get_recent_expenses_endpoint))
        .route(endpoints::EXPENSE, delete(delete_expense_endpoint))
        .route(endpoints::INCOME, post(create_income_endpoint))
        .route(endpoints::INCOME, get(get_income_endpoint))
        .route(endpoints::INCOME_TOTAL, get(get_income_total_endpoint))
        .route(endpoints::RECENT_INCOME, get(get_recent_income_endpoint))
        .route(endpoints::INCOME_RECORD, delete(delete_income_endpoint))
        .route(endpoints::SUMMARY, get(get_summary_endpoint))
        .route(
            endpoints::EXPENSES_BY_CATEGORY,
            get(get_expenses_by_category_endpoint),
        )
        .route(endpoints::MONTHLY_TRENDS, get(get_monthly_trends_endpoint))
        .route(endpoints::RECENT_ACTIVITY, get(get_recent_activity_endpoint))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// A plain-text banner for checking that the server is up.
async fn get_index() -> &'static str {
    "Expense Tracker API"
}
