//! Events emitted by the [`Fund`](crate::Fund) aggregate.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use travelfund_core::{Event, ExpenseId};

use crate::budget::TripSettings;
use crate::currency::Currency;
use crate::expense::Expense;
use crate::top_up::TopUp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseAdded {
    pub expense: Expense,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRemoved {
    pub expense_id: ExpenseId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseReimbursed {
    pub expense_id: ExpenseId,
    pub reimbursed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundToppedUp {
    pub top_up: TopUp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdChanged {
    pub threshold: Decimal,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberAdded {
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRemoved {
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyChanged {
    pub currency: Currency,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripConfigured {
    pub trip: TripSettings,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripCleared {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundReset {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundEvent {
    ExpenseAdded(ExpenseAdded),
    ExpenseRemoved(ExpenseRemoved),
    ExpenseReimbursed(ExpenseReimbursed),
    FundToppedUp(FundToppedUp),
    ThresholdChanged(ThresholdChanged),
    MemberAdded(MemberAdded),
    MemberRemoved(MemberRemoved),
    CurrencyChanged(CurrencyChanged),
    TripConfigured(TripConfigured),
    TripCleared(TripCleared),
    FundReset(FundReset),
}

impl Event for FundEvent {
    fn event_type(&self) -> &'static str {
        match self {
            FundEvent::ExpenseAdded(_) => "ledger.fund.expense_added",
            FundEvent::ExpenseRemoved(_) => "ledger.fund.expense_removed",
            FundEvent::ExpenseReimbursed(_) => "ledger.fund.expense_reimbursed",
            FundEvent::FundToppedUp(_) => "ledger.fund.topped_up",
            FundEvent::ThresholdChanged(_) => "ledger.fund.threshold_changed",
            FundEvent::MemberAdded(_) => "ledger.fund.member_added",
            FundEvent::MemberRemoved(_) => "ledger.fund.member_removed",
            FundEvent::CurrencyChanged(_) => "ledger.fund.currency_changed",
            FundEvent::TripConfigured(_) => "ledger.fund.trip_configured",
            FundEvent::TripCleared(_) => "ledger.fund.trip_cleared",
            FundEvent::FundReset(_) => "ledger.fund.reset",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            FundEvent::ExpenseAdded(e) => e.expense.date,
            FundEvent::ExpenseRemoved(e) => e.occurred_at,
            FundEvent::ExpenseReimbursed(e) => e.reimbursed_at,
            FundEvent::FundToppedUp(e) => e.top_up.date,
            FundEvent::ThresholdChanged(e) => e.occurred_at,
            FundEvent::MemberAdded(e) => e.occurred_at,
            FundEvent::MemberRemoved(e) => e.occurred_at,
            FundEvent::CurrencyChanged(e) => e.occurred_at,
            FundEvent::TripConfigured(e) => e.occurred_at,
            FundEvent::TripCleared(e) => e.occurred_at,
            FundEvent::FundReset(e) => e.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::{ExpenseCategory, PaymentSource};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use travelfund_core::TopUpId;

    #[test]
    fn event_types_are_stable() {
        let at = Utc.with_ymd_and_hms(2026, 2, 14, 10, 0, 0).unwrap();
        let expense_id = ExpenseId::new();
        let trip = TripSettings::new(at.date_naive(), 4, dec!(400)).unwrap();

        let events = vec![
            FundEvent::ExpenseAdded(ExpenseAdded {
                expense: Expense {
                    id: expense_id,
                    amount: dec!(12),
                    description: "Coffee".to_string(),
                    category: ExpenseCategory::Food,
                    paid_by: "Ana".to_string(),
                    date: at,
                    payment_source: PaymentSource::Pool,
                    is_reimbursed: false,
                    reimbursed_at: None,
                },
            }),
            FundEvent::ExpenseRemoved(ExpenseRemoved {
                expense_id,
                occurred_at: at,
            }),
            FundEvent::ExpenseReimbursed(ExpenseReimbursed {
                expense_id,
                reimbursed_at: at,
            }),
            FundEvent::FundToppedUp(FundToppedUp {
                top_up: TopUp {
                    id: TopUpId::new(),
                    amount: dec!(100),
                    date: at,
                    added_by: "Ana".to_string(),
                    note: None,
                },
            }),
            FundEvent::ThresholdChanged(ThresholdChanged {
                threshold: dec!(50),
                occurred_at: at,
            }),
            FundEvent::MemberAdded(MemberAdded {
                name: "Bob".to_string(),
                occurred_at: at,
            }),
            FundEvent::MemberRemoved(MemberRemoved {
                name: "Bob".to_string(),
                occurred_at: at,
            }),
            FundEvent::CurrencyChanged(CurrencyChanged {
                currency: Currency::Jpy,
                occurred_at: at,
            }),
            FundEvent::TripConfigured(TripConfigured {
                trip,
                occurred_at: at,
            }),
            FundEvent::TripCleared(TripCleared { occurred_at: at }),
            FundEvent::FundReset(FundReset { occurred_at: at }),
        ];

        let types: Vec<_> = events.iter().map(Event::event_type).collect();
        assert_eq!(
            types,
            [
                "ledger.fund.expense_added",
                "ledger.fund.expense_removed",
                "ledger.fund.expense_reimbursed",
                "ledger.fund.topped_up",
                "ledger.fund.threshold_changed",
                "ledger.fund.member_added",
                "ledger.fund.member_removed",
                "ledger.fund.currency_changed",
                "ledger.fund.trip_configured",
                "ledger.fund.trip_cleared",
                "ledger.fund.reset",
            ]
        );
        assert!(events.iter().all(|e| e.version() == 1 && e.occurred_at() == at));
    }
}
