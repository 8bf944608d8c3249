//! Ledger engine: the single writer of the travel fund.
//!
//! ```text
//! caller
//!   ↓  (typed method or FundCommand)
//! 1. Stamp command with fresh ids + clock time
//!   ↓
//! 2. Fund::handle (pure decision, produces events)
//!   ↓
//! 3. Apply events to a copy of the state
//!   ↓
//! 4. Save the copy through the FundStore
//!   ↓
//! 5. Swap the copy in as the authoritative state
//! ```
//!
//! A rejected command or a failed save leaves the authoritative state as it
//! was. Commands that decide on no change skip the save entirely.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, warn};

use travelfund_core::{Aggregate, AggregateRoot, DomainError, Event, ExpenseId, TopUpId};
use travelfund_ledger::{
    AddExpense, AddGroupMember, BudgetAnalysis, CategoryTotal, ClearTripSettings, Currency,
    DailySpending, Expense, ExpenseCategory, Fund, FundCommand, FundEvent, FundExport,
    MemberBalance, PaymentSource, ReimburseExpense, ReimburseMember, RemoveExpense,
    RemoveGroupMember, ResetFund, SetCurrency, SetThreshold, SetTripSettings, SpendingOverview,
    TopUpFund, TripSettings, category_breakdown, daily_spending, spending_overview,
};

use crate::clock::{Clock, SystemClock};
use crate::store::{FundStore, StoreError};

#[derive(Debug, Error)]
pub enum EngineError {
    /// The command was rejected; nothing changed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The new state could not be persisted; nothing changed.
    #[error("persisting fund snapshot failed: {0}")]
    Store(#[from] StoreError),
}

impl EngineError {
    /// The command was rejected on its inputs rather than failing to persist.
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Domain(_))
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Input for [`LedgerEngine::add_expense`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub amount: Decimal,
    pub description: String,
    pub category: ExpenseCategory,
    pub paid_by: String,
    pub payment_source: PaymentSource,
}

pub struct LedgerEngine<S, C = SystemClock> {
    fund: Fund,
    store: S,
    clock: C,
}

impl<S: FundStore> LedgerEngine<S> {
    /// Open against the wall clock.
    pub fn open(store: S) -> EngineResult<Self> {
        Self::open_with_clock(store, SystemClock)
    }
}

impl<S, C> LedgerEngine<S, C>
where
    S: FundStore,
    C: Clock,
{
    /// Restore the fund from `store`, or start from an empty fund.
    pub fn open_with_clock(store: S, clock: C) -> EngineResult<Self> {
        let fund = match store.load()? {
            Some(fund) => {
                debug!(
                    fund_id = %fund.id_typed(),
                    expenses = fund.expenses().len(),
                    top_ups = fund.top_ups().len(),
                    "fund restored from snapshot"
                );
                fund
            }
            None => {
                debug!("no snapshot found, starting with an empty fund");
                Fund::default()
            }
        };
        Ok(Self { fund, store, clock })
    }

    pub fn fund(&self) -> &Fund {
        &self.fund
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn into_parts(self) -> (Fund, S, C) {
        (self.fund, self.store, self.clock)
    }

    /// Run a fully-formed command through decide → apply → save.
    pub fn execute(&mut self, command: FundCommand) -> EngineResult<Vec<FundEvent>> {
        let name = command.name();

        let events = match self.fund.handle(&command) {
            Ok(events) => events,
            Err(err) => {
                warn!(command = name, error = %err, "command rejected");
                return Err(err.into());
            }
        };

        if events.is_empty() {
            debug!(command = name, "command changed nothing");
            return Ok(events);
        }

        let mut next = self.fund.clone();
        for event in &events {
            next.apply(event);
        }

        if let Err(err) = self.store.save(&next) {
            warn!(command = name, error = %err, "snapshot save failed, state left unchanged");
            return Err(err.into());
        }

        self.fund = next;
        info!(
            command = name,
            events = events.len(),
            event_types = ?events.iter().map(Event::event_type).collect::<Vec<_>>(),
            version = self.fund.version(),
            "command applied"
        );
        Ok(events)
    }

    pub fn add_expense(&mut self, expense: NewExpense) -> EngineResult<ExpenseId> {
        let expense_id = ExpenseId::new();
        self.execute(FundCommand::AddExpense(AddExpense {
            expense_id,
            amount: expense.amount,
            description: expense.description,
            category: expense.category,
            paid_by: expense.paid_by,
            payment_source: expense.payment_source,
            occurred_at: self.clock.now(),
        }))?;
        Ok(expense_id)
    }

    /// Returns whether an expense was removed.
    pub fn remove_expense(&mut self, expense_id: ExpenseId) -> EngineResult<bool> {
        let events = self.execute(FundCommand::RemoveExpense(RemoveExpense {
            expense_id,
            occurred_at: self.clock.now(),
        }))?;
        Ok(!events.is_empty())
    }

    /// Returns whether the expense went from pending to reimbursed.
    pub fn reimburse_expense(&mut self, expense_id: ExpenseId) -> EngineResult<bool> {
        let events = self.execute(FundCommand::ReimburseExpense(ReimburseExpense {
            expense_id,
            occurred_at: self.clock.now(),
        }))?;
        Ok(!events.is_empty())
    }

    /// Returns the number of expenses reimbursed.
    pub fn reimburse_member(&mut self, member: &str) -> EngineResult<usize> {
        let events = self.execute(FundCommand::ReimburseMember(ReimburseMember {
            member: member.to_string(),
            occurred_at: self.clock.now(),
        }))?;
        Ok(events.len())
    }

    pub fn top_up_fund(
        &mut self,
        amount: Decimal,
        added_by: Option<&str>,
        note: Option<&str>,
    ) -> EngineResult<TopUpId> {
        let top_up_id = TopUpId::new();
        self.execute(FundCommand::TopUpFund(TopUpFund {
            top_up_id,
            amount,
            added_by: added_by.map(str::to_string),
            note: note.map(str::to_string),
            occurred_at: self.clock.now(),
        }))?;
        Ok(top_up_id)
    }

    pub fn set_threshold(&mut self, threshold: Decimal) -> EngineResult<()> {
        self.execute(FundCommand::SetThreshold(SetThreshold {
            threshold,
            occurred_at: self.clock.now(),
        }))?;
        Ok(())
    }

    pub fn add_group_member(&mut self, name: &str) -> EngineResult<()> {
        self.execute(FundCommand::AddGroupMember(AddGroupMember {
            name: name.to_string(),
            occurred_at: self.clock.now(),
        }))?;
        Ok(())
    }

    /// Existing expenses keep referring to the removed name.
    pub fn remove_group_member(&mut self, name: &str) -> EngineResult<bool> {
        let events = self.execute(FundCommand::RemoveGroupMember(RemoveGroupMember {
            name: name.to_string(),
            occurred_at: self.clock.now(),
        }))?;
        Ok(!events.is_empty())
    }

    pub fn set_currency(&mut self, currency: Currency) -> EngineResult<()> {
        self.execute(FundCommand::SetCurrency(SetCurrency {
            currency,
            occurred_at: self.clock.now(),
        }))?;
        Ok(())
    }

    pub fn set_trip_settings(
        &mut self,
        start_date: NaiveDate,
        duration_days: u32,
        total_budget: Decimal,
    ) -> EngineResult<()> {
        let trip = TripSettings::new(start_date, duration_days, total_budget).inspect_err(|err| {
            warn!(command = "set_trip_settings", error = %err, "command rejected");
        })?;
        self.execute(FundCommand::SetTripSettings(SetTripSettings {
            trip,
            occurred_at: self.clock.now(),
        }))?;
        Ok(())
    }

    pub fn clear_trip_settings(&mut self) -> EngineResult<bool> {
        let events = self.execute(FundCommand::ClearTripSettings(ClearTripSettings {
            occurred_at: self.clock.now(),
        }))?;
        Ok(!events.is_empty())
    }

    /// Back to an empty fund with default preferences.
    pub fn reset_fund(&mut self) -> EngineResult<()> {
        self.execute(FundCommand::ResetFund(ResetFund {
            occurred_at: self.clock.now(),
        }))?;
        Ok(())
    }

    pub fn current_balance(&self) -> Decimal {
        self.fund.current_balance()
    }

    pub fn spent_from_pool(&self) -> Decimal {
        self.fund.spent_from_pool()
    }

    pub fn is_low_balance(&self) -> bool {
        self.fund.is_low_balance()
    }

    pub fn total_spent(&self) -> Decimal {
        self.fund.total_spent()
    }

    pub fn pending_reimbursements(&self) -> Vec<&Expense> {
        self.fund.pending_reimbursements().collect()
    }

    pub fn member_balances(&self) -> Vec<MemberBalance> {
        self.fund.member_balances()
    }

    pub fn member_balance(&self, member: &str) -> Decimal {
        self.fund.member_balance(member)
    }

    /// Budget analysis as of the clock's current day.
    pub fn budget_analysis(&self) -> Option<BudgetAnalysis> {
        self.fund.budget_analysis(self.clock.today())
    }

    pub fn daily_spending(&self) -> Vec<DailySpending> {
        daily_spending(self.fund.expenses())
    }

    pub fn spending_overview(&self) -> SpendingOverview {
        spending_overview(self.fund.expenses())
    }

    pub fn category_breakdown(&self) -> Vec<CategoryTotal> {
        category_breakdown(self.fund.expenses())
    }

    pub fn export(&self) -> FundExport {
        FundExport::from_fund(&self.fund)
    }
}
