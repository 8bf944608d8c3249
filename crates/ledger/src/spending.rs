//! Spending patterns: per-day totals and per-category breakdown.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::expense::{Expense, ExpenseCategory};
use crate::money::{percent, saturating_sum};

/// Spending on one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySpending {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub count: usize,
    /// Average amount per expense on that day.
    pub average: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingOverview {
    pub total_spending: Decimal,
    /// Average over days that had spending.
    pub average_daily_spending: Decimal,
    pub highest_day: Option<DailySpending>,
    pub lowest_day: Option<DailySpending>,
    pub total_days: usize,
    pub total_transactions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub label: &'static str,
    pub total: Decimal,
    pub count: usize,
    pub share_percent: Decimal,
}

/// Expenses grouped by day, oldest day first.
pub fn daily_spending(expenses: &[Expense]) -> Vec<DailySpending> {
    let mut by_day: BTreeMap<NaiveDate, (Decimal, usize)> = BTreeMap::new();
    for e in expenses {
        let slot = by_day.entry(e.date.date_naive()).or_insert((Decimal::ZERO, 0));
        slot.0 = slot.0.saturating_add(e.amount);
        slot.1 += 1;
    }

    by_day
        .into_iter()
        .map(|(date, (amount, count))| DailySpending {
            date,
            amount,
            count,
            average: amount / Decimal::from(count),
        })
        .collect()
}

pub fn spending_overview(expenses: &[Expense]) -> SpendingOverview {
    let days = daily_spending(expenses);
    let total_spending = saturating_sum(days.iter().map(|d| d.amount));
    let average_daily_spending = if days.is_empty() {
        Decimal::ZERO
    } else {
        total_spending / Decimal::from(days.len())
    };

    // First day wins ties, in date order.
    let mut highest_day: Option<&DailySpending> = None;
    let mut lowest_day: Option<&DailySpending> = None;
    for day in &days {
        if highest_day.is_none_or(|h| day.amount > h.amount) {
            highest_day = Some(day);
        }
        if lowest_day.is_none_or(|l| day.amount < l.amount) {
            lowest_day = Some(day);
        }
    }

    SpendingOverview {
        total_spending,
        average_daily_spending,
        highest_day: highest_day.cloned(),
        lowest_day: lowest_day.cloned(),
        total_days: days.len(),
        total_transactions: expenses.len(),
    }
}

/// Totals per category that has spending, largest first.
pub fn category_breakdown(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let grand_total = saturating_sum(expenses.iter().map(|e| e.amount));

    let mut totals: Vec<CategoryTotal> = ExpenseCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let (total, count) = expenses
                .iter()
                .filter(|e| e.category == category)
                .fold((Decimal::ZERO, 0usize), |(t, c), e| (t.saturating_add(e.amount), c + 1));
            if count == 0 {
                return None;
            }
            let share_percent = percent(total, grand_total);
            Some(CategoryTotal {
                category,
                label: category.label(),
                total,
                count,
                share_percent,
            })
        })
        .collect();

    // Stable: equal totals keep declaration order.
    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals
}
