//! Commands accepted by the [`Fund`](crate::Fund) aggregate.
//!
//! Commands carry every non-deterministic input (fresh identifiers, the
//! current time) so that deciding on them stays pure.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use travelfund_core::{ExpenseId, TopUpId};

use crate::budget::TripSettings;
use crate::currency::Currency;
use crate::expense::{ExpenseCategory, PaymentSource};

/// Command: AddExpense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddExpense {
    pub expense_id: ExpenseId,
    pub amount: Decimal,
    pub description: String,
    pub category: ExpenseCategory,
    pub paid_by: String,
    pub payment_source: PaymentSource,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveExpense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveExpense {
    pub expense_id: ExpenseId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReimburseExpense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReimburseExpense {
    pub expense_id: ExpenseId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReimburseMember (settle every pending expense of one member).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReimburseMember {
    pub member: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: TopUpFund.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopUpFund {
    pub top_up_id: TopUpId,
    pub amount: Decimal,
    pub added_by: Option<String>,
    pub note: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetThreshold {
    pub threshold: Decimal,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddGroupMember {
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveGroupMember {
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCurrency {
    pub currency: Currency,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetTripSettings. Validation happens when building [`TripSettings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetTripSettings {
    pub trip: TripSettings,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearTripSettings {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetFund {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundCommand {
    AddExpense(AddExpense),
    RemoveExpense(RemoveExpense),
    ReimburseExpense(ReimburseExpense),
    ReimburseMember(ReimburseMember),
    TopUpFund(TopUpFund),
    SetThreshold(SetThreshold),
    AddGroupMember(AddGroupMember),
    RemoveGroupMember(RemoveGroupMember),
    SetCurrency(SetCurrency),
    SetTripSettings(SetTripSettings),
    ClearTripSettings(ClearTripSettings),
    ResetFund(ResetFund),
}

impl FundCommand {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            FundCommand::AddExpense(_) => "add_expense",
            FundCommand::RemoveExpense(_) => "remove_expense",
            FundCommand::ReimburseExpense(_) => "reimburse_expense",
            FundCommand::ReimburseMember(_) => "reimburse_member",
            FundCommand::TopUpFund(_) => "top_up_fund",
            FundCommand::SetThreshold(_) => "set_threshold",
            FundCommand::AddGroupMember(_) => "add_group_member",
            FundCommand::RemoveGroupMember(_) => "remove_group_member",
            FundCommand::SetCurrency(_) => "set_currency",
            FundCommand::SetTripSettings(_) => "set_trip_settings",
            FundCommand::ClearTripSettings(_) => "clear_trip_settings",
            FundCommand::ResetFund(_) => "reset_fund",
        }
    }
}
