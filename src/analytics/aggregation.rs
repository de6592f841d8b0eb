//! Pure aggregation helpers for the analytics route handlers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{expense::Expense, income::Income};

/// The summed amount for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// The month label in `YYYY-MM` form.
    pub month: String,
    /// The summed amount for that month.
    pub amount: f64,
}

fn month_label(date: OffsetDateTime) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

/// Bucket `records` by calendar month (in UTC) and sum the amounts per
/// bucket.
///
/// The result is sorted by month label in ascending order. Months without any
/// records are absent rather than zero-filled.
pub fn monthly_totals(records: impl IntoIterator<Item = (OffsetDateTime, f64)>) -> Vec<MonthlyTotal> {
    let mut buckets: HashMap<String, f64> = HashMap::new();

    for (date, amount) in records {
        *buckets.entry(month_label(date)).or_default() += amount;
    }

    let mut totals: Vec<MonthlyTotal> = buckets
        .into_iter()
        .map(|(month, amount)| MonthlyTotal { month, amount })
        .collect();
    totals.sort_by(|a, b| a.month.cmp(&b.month));

    totals
}

/// An entry in the recent activity feed, tagged with the record kind so that
/// expenses and income can share one list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActivityItem {
    /// An expense record.
    Expense(Expense),
    /// An income record.
    Income(Income),
}

impl ActivityItem {
    fn date(&self) -> OffsetDateTime {
        match self {
            ActivityItem::Expense(expense) => expense.date,
            ActivityItem::Income(income) => income.date,
        }
    }
}

/// Merge expenses and income into one feed sorted by date in descending
/// order, truncated to `limit` entries.
pub fn merge_recent_activity(
    expenses: Vec<Expense>,
    income: Vec<Income>,
    limit: usize,
) -> Vec<ActivityItem> {
    let mut activity: Vec<ActivityItem> = expenses
        .into_iter()
        .map(ActivityItem::Expense)
        .chain(income.into_iter().map(ActivityItem::Income))
        .collect();
    activity.sort_by(|a, b| b.date().cmp(&a.date()));
    activity.truncate(limit);

    activity
}

#[cfg(test)]
mod aggregation_tests {
    use time::{Duration, OffsetDateTime, macros::datetime};

    use crate::{expense::Expense, income::Income, user::UserID};

    use super::{ActivityItem, MonthlyTotal, merge_recent_activity, monthly_totals};

    #[test]
    fn monthly_totals_buckets_by_calendar_month() {
        let records = vec![
            (datetime!(2024-01-15 12:00 UTC), 10.0),
            (datetime!(2024-01-20 12:00 UTC), 5.0),
            (datetime!(2024-03-01 12:00 UTC), 7.5),
        ];

        let totals = monthly_totals(records);

        assert_eq!(
            totals,
            vec![
                MonthlyTotal {
                    month: "2024-01".to_owned(),
                    amount: 15.0
                },
                MonthlyTotal {
                    month: "2024-03".to_owned(),
                    amount: 7.5
                },
            ]
        );
    }

    #[test]
    fn monthly_totals_of_nothing_is_empty() {
        assert!(monthly_totals(vec![]).is_empty());
    }

    #[test]
    fn monthly_totals_pads_month_labels() {
        let totals = monthly_totals(vec![(datetime!(2024-09-01 0:00 UTC), 1.0)]);

        assert_eq!(totals[0].month, "2024-09");
    }

    fn expense_on(date: OffsetDateTime) -> Expense {
        Expense {
            id: 1,
            user_id: UserID::new(1),
            amount: 1.0,
            category: "Food".to_owned(),
            date,
        }
    }

    fn income_on(date: OffsetDateTime) -> Income {
        Income {
            id: 1,
            user_id: UserID::new(1),
            amount: 1.0,
            source: "Salary".to_owned(),
            date,
        }
    }

    #[test]
    fn merge_recent_activity_interleaves_by_date_descending() {
        let now = OffsetDateTime::now_utc();
        let expenses = vec![expense_on(now - Duration::days(1)), expense_on(now - Duration::days(3))];
        let income = vec![income_on(now), income_on(now - Duration::days(2))];

        let activity = merge_recent_activity(expenses, income, 10);

        assert_eq!(activity.len(), 4);
        assert!(matches!(activity[0], ActivityItem::Income(_)));
        assert!(matches!(activity[1], ActivityItem::Expense(_)));
        assert!(matches!(activity[2], ActivityItem::Income(_)));
        assert!(matches!(activity[3], ActivityItem::Expense(_)));
    }

    #[test]
    fn merge_recent_activity_truncates_to_limit() {
        let now = OffsetDateTime::now_utc();
        let expenses = (0..6)
            .map(|days_ago| expense_on(now - Duration::days(days_ago)))
            .collect();
        let income = (0..6)
            .map(|days_ago| income_on(now - Duration::days(days_ago)))
            .collect();

        let activity = merge_recent_activity(expenses, income, 10);

        assert_eq!(activity.len(), 10);
    }

    #[test]
    fn activity_items_serialize_with_type_tag() {
        let item = ActivityItem::Income(income_on(datetime!(2024-01-01 0:00 UTC)));

        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["type"], "income");
        assert_eq!(json["source"], "Salary");
    }
}
