//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/expenses/{expense_id}',
//! tests use `format_endpoint` to substitute a concrete ID.

/// The root route, which responds with the service banner.
pub const ROOT: &str = "/";

/// The route for registering a new user.
pub const REGISTER: &str = "/api/auth/register";
/// The route for logging in a user.
pub const LOG_IN: &str = "/api/auth/login";

/// The route to create and list expenses.
pub const EXPENSES: &str = "/api/expenses";
/// The route for the sum of all of a user's expense amounts.
pub const EXPENSE_TOTAL: &str = "/api/expenses/total";
/// The route for a user's five most recent expenses.
pub const RECENT_EXPENSES: &str = "/api/expenses/recent";
/// The route to delete a single expense.
pub const EXPENSE: &str = "/api/expenses/{expense_id}";

/// The route to create and list income records.
pub const INCOME: &str = "/api/income";
/// The route for the sum of all of a user's income amounts.
pub const INCOME_TOTAL: &str = "/api/income/total";
/// The route for a user's five most recent income records.
pub const RECENT_INCOME: &str = "/api/income/recent";
/// The route to delete a single income record.
pub const INCOME_RECORD: &str = "/api/income/{income_id}";

/// The route for a user's expense, income, and balance totals.
pub const SUMMARY: &str = "/api/analytics/summary";
/// The route for a user's expense amounts grouped by category.
pub const EXPENSES_BY_CATEGORY: &str = "/api/analytics/expenses-by-category";
/// The route for a user's monthly expense and income totals.
pub const MONTHLY_TRENDS: &str = "/api/analytics/monthly-trends";
/// The route for a user's most recent expenses and income, merged.
pub const RECENT_ACTIVITY: &str = "/api/analytics/recent-activity";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/expenses/{expense_id}',
/// '{expense_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
#[cfg(test)]
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::REGISTER);
        assert_endpoint_is_valid_uri(endpoints::LOG_IN);
        assert_endpoint_is_valid_uri(endpoints::EXPENSES);
        assert_endpoint_is_valid_uri(endpoints::EXPENSE_TOTAL);
        assert_endpoint_is_valid_uri(endpoints::RECENT_EXPENSES);
        assert_endpoint_is_valid_uri(endpoints::EXPENSE);
        assert_endpoint_is_valid_uri(endpoints::INCOME);
        assert_endpoint_is_valid_uri(endpoints::INCOME_TOTAL);
        assert_endpoint_is_valid_uri(endpoints::RECENT_INCOME);
        assert_endpoint_is_valid_uri(endpoints::INCOME_RECORD);
        assert_endpoint_is_valid_uri(endpoints::SUMMARY);
        assert_endpoint_is_valid_uri(endpoints::EXPENSES_BY_CATEGORY);
        assert_endpoint_is_valid_uri(endpoints::MONTHLY_TRENDS);
        assert_endpoint_is_valid_uri(endpoints::RECENT_ACTIVITY);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/api/expenses/{expense_id}", 1);

        assert_eq!(formatted_path, "/api/expenses/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/api/expenses", 1);

        assert_eq!(formatted_path, "/api/expenses");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
