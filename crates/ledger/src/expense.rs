use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use travelfund_core::{DomainError, Entity, ExpenseId};

/// Spending category (fixed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Accommodation,
    Activities,
    Shopping,
    Other,
}

impl ExpenseCategory {
    /// All categories in declaration order.
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Accommodation,
        ExpenseCategory::Activities,
        ExpenseCategory::Shopping,
        ExpenseCategory::Other,
    ];

    /// Human-readable label used in exports.
    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Food & Drinks",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Accommodation => "Accommodation",
            ExpenseCategory::Activities => "Activities",
            ExpenseCategory::Shopping => "Shopping",
            ExpenseCategory::Other => "Other",
        }
    }
}

impl core::str::FromStr for ExpenseCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "food" => Ok(ExpenseCategory::Food),
            "transport" => Ok(ExpenseCategory::Transport),
            "accommodation" => Ok(ExpenseCategory::Accommodation),
            "activities" => Ok(ExpenseCategory::Activities),
            "shopping" => Ok(ExpenseCategory::Shopping),
            "other" => Ok(ExpenseCategory::Other),
            other => Err(DomainError::validation(format!("unknown category: {other}"))),
        }
    }
}

/// Who fronted the money for an expense.
///
/// Snapshots written before payment sources existed only contain pool
/// spending, hence the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentSource {
    /// Drawn directly from the shared fund.
    #[default]
    Pool,
    /// Paid out-of-pocket by a member; the fund owes them until reimbursed.
    Individual,
}

impl PaymentSource {
    pub fn label(self) -> &'static str {
        match self {
            PaymentSource::Pool => "Pool",
            PaymentSource::Individual => "Individual",
        }
    }
}

impl core::str::FromStr for PaymentSource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pool" => Ok(PaymentSource::Pool),
            "individual" => Ok(PaymentSource::Individual),
            other => Err(DomainError::validation(format!("unknown payment source: {other}"))),
        }
    }
}

/// A recorded expense.
///
/// Invariant: `reimbursed_at.is_some() == is_reimbursed`, and pool expenses are
/// never reimbursed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    /// Positive amount in the fund currency.
    pub amount: Decimal,
    pub description: String,
    pub category: ExpenseCategory,
    pub paid_by: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub payment_source: PaymentSource,
    #[serde(default)]
    pub is_reimbursed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reimbursed_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// Individual expense the fund has not paid back yet.
    pub fn is_pending(&self) -> bool {
        self.payment_source == PaymentSource::Individual && !self.is_reimbursed
    }

    /// Whether the amount has left the shared pool (pool-paid, or reimbursed).
    pub fn draws_from_pool(&self) -> bool {
        match self.payment_source {
            PaymentSource::Pool => true,
            PaymentSource::Individual => self.is_reimbursed,
        }
    }

    /// Re-establish the reimbursement invariant on restored data.
    pub(crate) fn normalize(&mut self) {
        if self.payment_source == PaymentSource::Pool || self.reimbursed_at.is_none() {
            self.is_reimbursed = false;
            self.reimbursed_at = None;
        }
        if !self.is_reimbursed {
            self.reimbursed_at = None;
        }
    }
}

impl Entity for Expense {
    type Id = ExpenseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
