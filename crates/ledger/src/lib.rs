//! Travel fund ledger (pure domain).
//!
//! The [`Fund`] aggregate decides on commands and evolves through events;
//! balances, budget analysis, spending patterns and export tables are derived
//! from it on demand. No IO happens here apart from writing CSV to a
//! caller-supplied writer.

pub mod balances;
pub mod budget;
pub mod command;
pub mod currency;
pub mod event;
pub mod expense;
pub mod export;
pub mod fund;
mod money;
pub mod spending;
pub mod top_up;

pub use balances::MemberBalance;
pub use budget::{BudgetAnalysis, BudgetStatus, TripSettings, analyze};
pub use command::{
    AddExpense, AddGroupMember, ClearTripSettings, FundCommand, ReimburseExpense,
    ReimburseMember, RemoveExpense, RemoveGroupMember, ResetFund, SetCurrency, SetThreshold,
    SetTripSettings, TopUpFund,
};
pub use currency::Currency;
pub use event::FundEvent;
pub use expense::{Expense, ExpenseCategory, PaymentSource};
pub use export::{CsvTable, ExportError, FundExport};
pub use fund::{DEFAULT_LOW_BALANCE_THRESHOLD, Fund};
pub use spending::{
    CategoryTotal, DailySpending, SpendingOverview, category_breakdown, daily_spending,
    spending_overview,
};
pub use top_up::{TopUp, UNKNOWN_CONTRIBUTOR};
