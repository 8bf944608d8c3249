//! Balances derived from the fund's records.
//!
//! Nothing here is cached: every figure is recomputed from the expense and
//! top-up lists on demand.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::expense::Expense;
use crate::fund::Fund;
use crate::money::saturating_sum;

/// Amount the fund owes one group member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberBalance {
    pub member: String,
    pub owed: Decimal,
}

fn sum<'a>(expenses: impl Iterator<Item = &'a Expense>) -> Decimal {
    saturating_sum(expenses.map(|e| e.amount))
}

impl Fund {
    /// Spending that has actually left the pool: pool expenses plus
    /// reimbursed individual expenses.
    pub fn spent_from_pool(&self) -> Decimal {
        sum(self.expenses().iter().filter(|e| e.draws_from_pool()))
    }

    /// Money still in the pool. Unreimbursed individual expenses do not count.
    pub fn current_balance(&self) -> Decimal {
        self.total_balance().saturating_sub(self.spent_from_pool())
    }

    pub fn is_low_balance(&self) -> bool {
        self.current_balance() <= self.low_balance_threshold()
    }

    /// Gross spending regardless of who paid or reimbursement state.
    pub fn total_spent(&self) -> Decimal {
        sum(self.expenses().iter())
    }

    /// Sum of recorded top-ups.
    pub fn total_top_ups(&self) -> Decimal {
        saturating_sum(self.top_ups().iter().map(|t| t.amount))
    }

    /// Individual expenses not yet reimbursed, newest first.
    pub fn pending_reimbursements(&self) -> impl Iterator<Item = &Expense> + '_ {
        self.expenses().iter().filter(|e| e.is_pending())
    }

    pub fn pending_total(&self) -> Decimal {
        sum(self.pending_reimbursements())
    }

    /// What the fund owes `member`. Works for names no longer in the group.
    pub fn member_balance(&self, member: &str) -> Decimal {
        sum(self.pending_reimbursements().filter(|e| e.paid_by == member))
    }

    /// Owed amount per current group member, in member order.
    pub fn member_balances(&self) -> Vec<MemberBalance> {
        self.group_members()
            .iter()
            .map(|m| MemberBalance {
                member: m.clone(),
                owed: self.member_balance(m),
            })
            .collect()
    }
}
