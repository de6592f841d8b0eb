//! Cross-cutting reports over a user's expenses and income.

mod aggregation;
mod endpoints;

pub use aggregation::{ActivityItem, MonthlyTotal, merge_recent_activity, monthly_totals};
pub use endpoints::{
    CategoryTotal, MonthlyTrends, Summary, get_expenses_by_category_endpoint,
    get_monthly_trends_endpoint, get_recent_activity_endpoint, get_summary_endpoint,
};
