use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use travelfund_core::{
    Aggregate, AggregateRoot, DomainError, DomainResult, ExpenseId, FundId, position_of,
};

use crate::budget::TripSettings;
use crate::command::{
    AddExpense, AddGroupMember, FundCommand, ReimburseExpense, ReimburseMember,
    RemoveGroupMember, SetThreshold, TopUpFund,
};
use crate::currency::Currency;
use crate::event::{
    CurrencyChanged, ExpenseAdded, ExpenseReimbursed, ExpenseRemoved, FundEvent, FundReset,
    FundToppedUp, MemberAdded, MemberRemoved, ThresholdChanged, TripCleared, TripConfigured,
};
use crate::expense::Expense;
use crate::top_up::{TopUp, UNKNOWN_CONTRIBUTOR};

/// Alert level used until the user picks one.
pub const DEFAULT_LOW_BALANCE_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;

/// Aggregate root: the shared travel fund.
///
/// `total_balance` only ever grows through top-ups; spending is subtracted
/// when balances are derived (see [`Fund::current_balance`]). Expenses and
/// top-ups are kept newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FundSnapshot", into = "FundSnapshot")]
pub struct Fund {
    id: FundId,
    version: u64,
    total_balance: Decimal,
    low_balance_threshold: Decimal,
    expenses: Vec<Expense>,
    top_ups: Vec<TopUp>,
    group_members: Vec<String>,
    currency: Currency,
    trip: Option<TripSettings>,
}

impl Fund {
    /// Empty fund with default preferences.
    pub fn new(id: FundId) -> Self {
        Self {
            id,
            version: 0,
            total_balance: Decimal::ZERO,
            low_balance_threshold: DEFAULT_LOW_BALANCE_THRESHOLD,
            expenses: Vec::new(),
            top_ups: Vec::new(),
            group_members: Vec::new(),
            currency: Currency::default(),
            trip: None,
        }
    }

    pub fn id_typed(&self) -> FundId {
        self.id
    }

    /// Cumulative sum of all top-ups.
    pub fn total_balance(&self) -> Decimal {
        self.total_balance
    }

    pub fn low_balance_threshold(&self) -> Decimal {
        self.low_balance_threshold
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expense(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    pub fn top_ups(&self) -> &[TopUp] {
        &self.top_ups
    }

    pub fn group_members(&self) -> &[String] {
        &self.group_members
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.group_members.iter().any(|m| m == name)
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn trip(&self) -> Option<&TripSettings> {
        self.trip.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.top_ups.is_empty() && self.group_members.is_empty()
    }
}

impl Default for Fund {
    fn default() -> Self {
        Self::new(FundId::new())
    }
}

impl AggregateRoot for Fund {
    type Id = FundId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for Fund {
    type Command = FundCommand;
    type Event = FundEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            FundEvent::ExpenseAdded(e) => {
                self.expenses.insert(0, e.expense.clone());
            }
            FundEvent::ExpenseRemoved(e) => {
                self.expenses.retain(|x| x.id != e.expense_id);
            }
            FundEvent::ExpenseReimbursed(e) => {
                if let Some(idx) = position_of(&self.expenses, &e.expense_id) {
                    let expense = &mut self.expenses[idx];
                    expense.is_reimbursed = true;
                    expense.reimbursed_at = Some(e.reimbursed_at);
                }
            }
            FundEvent::FundToppedUp(e) => {
                self.total_balance = self.total_balance.saturating_add(e.top_up.amount);
                self.top_ups.insert(0, e.top_up.clone());
            }
            FundEvent::ThresholdChanged(e) => {
                self.low_balance_threshold = e.threshold;
            }
            FundEvent::MemberAdded(e) => {
                self.group_members.push(e.name.clone());
            }
            FundEvent::MemberRemoved(e) => {
                self.group_members.retain(|m| m != &e.name);
            }
            FundEvent::CurrencyChanged(e) => {
                self.currency = e.currency;
            }
            FundEvent::TripConfigured(e) => {
                self.trip = Some(e.trip);
            }
            FundEvent::TripCleared(_) => {
                self.trip = None;
            }
            FundEvent::FundReset(_) => {
                let version = self.version;
                *self = Fund::new(self.id);
                self.version = version;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            FundCommand::AddExpense(cmd) => self.handle_add_expense(cmd),
            FundCommand::RemoveExpense(cmd) => Ok(match self.expense(&cmd.expense_id) {
                Some(_) => vec![FundEvent::ExpenseRemoved(ExpenseRemoved {
                    expense_id: cmd.expense_id,
                    occurred_at: cmd.occurred_at,
                })],
                None => vec![],
            }),
            FundCommand::ReimburseExpense(cmd) => Ok(self.handle_reimburse_expense(cmd)),
            FundCommand::ReimburseMember(cmd) => Ok(self.handle_reimburse_member(cmd)),
            FundCommand::TopUpFund(cmd) => self.handle_top_up(cmd),
            FundCommand::SetThreshold(cmd) => self.handle_set_threshold(cmd),
            FundCommand::AddGroupMember(cmd) => self.handle_add_member(cmd),
            FundCommand::RemoveGroupMember(cmd) => Ok(self.handle_remove_member(cmd)),
            FundCommand::SetCurrency(cmd) => Ok(vec![FundEvent::CurrencyChanged(CurrencyChanged {
                currency: cmd.currency,
                occurred_at: cmd.occurred_at,
            })]),
            FundCommand::SetTripSettings(cmd) => {
                // Re-check: the settings may have been deserialized rather than built.
                let trip = TripSettings::new(
                    cmd.trip.start_date(),
                    cmd.trip.duration_days(),
                    cmd.trip.total_budget(),
                )?;
                Ok(vec![FundEvent::TripConfigured(TripConfigured {
                    trip,
                    occurred_at: cmd.occurred_at,
                })])
            }
            FundCommand::ClearTripSettings(cmd) => Ok(match self.trip {
                Some(_) => vec![FundEvent::TripCleared(TripCleared {
                    occurred_at: cmd.occurred_at,
                })],
                None => vec![],
            }),
            FundCommand::ResetFund(cmd) => Ok(vec![FundEvent::FundReset(FundReset {
                occurred_at: cmd.occurred_at,
            })]),
        }
    }
}

fn ensure_positive(amount: Decimal, what: &str) -> DomainResult<()> {
    if amount <= Decimal::ZERO {
        return Err(DomainError::validation(format!("{what} must be positive")));
    }
    Ok(())
}

fn ensure_representable(running: Decimal, amount: Decimal, what: &str) -> DomainResult<()> {
    if running.checked_add(amount).is_none() {
        return Err(DomainError::validation(format!("{what} would exceed the supported range")));
    }
    Ok(())
}

fn required_text(value: &str, field: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

impl Fund {
    fn handle_add_expense(&self, cmd: &AddExpense) -> DomainResult<Vec<FundEvent>> {
        ensure_positive(cmd.amount, "amount")?;
        let description = required_text(&cmd.description, "description")?;
        let paid_by = required_text(&cmd.paid_by, "paid_by")?;

        if self.expense(&cmd.expense_id).is_some() {
            return Err(DomainError::conflict("expense already exists"));
        }
        ensure_representable(self.total_spent(), cmd.amount, "total spending")?;

        Ok(vec![FundEvent::ExpenseAdded(ExpenseAdded {
            expense: Expense {
                id: cmd.expense_id,
                amount: cmd.amount,
                description,
                category: cmd.category,
                paid_by,
                date: cmd.occurred_at,
                payment_source: cmd.payment_source,
                is_reimbursed: false,
                reimbursed_at: None,
            },
        })])
    }

    fn handle_reimburse_expense(&self, cmd: &ReimburseExpense) -> Vec<FundEvent> {
        match self.expense(&cmd.expense_id) {
            Some(e) if e.is_pending() => vec![FundEvent::ExpenseReimbursed(ExpenseReimbursed {
                expense_id: e.id,
                reimbursed_at: cmd.occurred_at,
            })],
            _ => vec![],
        }
    }

    fn handle_reimburse_member(&self, cmd: &ReimburseMember) -> Vec<FundEvent> {
        let member = cmd.member.trim();
        self.expenses
            .iter()
            .filter(|e| e.is_pending() && e.paid_by == member)
            .map(|e| {
                FundEvent::ExpenseReimbursed(ExpenseReimbursed {
                    expense_id: e.id,
                    reimbursed_at: cmd.occurred_at,
                })
            })
            .collect()
    }

    fn handle_top_up(&self, cmd: &TopUpFund) -> DomainResult<Vec<FundEvent>> {
        ensure_positive(cmd.amount, "top-up amount")?;

        if self.top_ups.iter().any(|t| t.id == cmd.top_up_id) {
            return Err(DomainError::conflict("top-up already exists"));
        }
        ensure_representable(self.total_balance, cmd.amount, "fund balance")?;
        ensure_representable(self.total_top_ups(), cmd.amount, "total top-ups")?;

        let added_by = cmd
            .added_by
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_CONTRIBUTOR)
            .to_string();
        let note = cmd
            .note
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(vec![FundEvent::FundToppedUp(FundToppedUp {
            top_up: TopUp {
                id: cmd.top_up_id,
                amount: cmd.amount,
                date: cmd.occurred_at,
                added_by,
                note,
            },
        })])
    }

    fn handle_set_threshold(&self, cmd: &SetThreshold) -> DomainResult<Vec<FundEvent>> {
        if cmd.threshold < Decimal::ZERO {
            return Err(DomainError::validation("threshold cannot be negative"));
        }
        Ok(vec![FundEvent::ThresholdChanged(ThresholdChanged {
            threshold: cmd.threshold,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_add_member(&self, cmd: &AddGroupMember) -> DomainResult<Vec<FundEvent>> {
        let name = required_text(&cmd.name, "member name")?;
        if self.has_member(&name) {
            return Err(DomainError::conflict(format!("member '{name}' already exists")));
        }
        Ok(vec![FundEvent::MemberAdded(MemberAdded {
            name,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove_member(&self, cmd: &RemoveGroupMember) -> Vec<FundEvent> {
        let name = cmd.name.trim();
        if !self.has_member(name) {
            return vec![];
        }
        vec![FundEvent::MemberRemoved(MemberRemoved {
            name: name.to_string(),
            occurred_at: cmd.occurred_at,
        })]
    }
}

fn default_threshold() -> Decimal {
    DEFAULT_LOW_BALANCE_THRESHOLD
}

/// Value of an optional snapshot field; a value of the wrong shape reads as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field<T> {
        Valid(T),
        Invalid(IgnoredAny),
    }

    Ok(match Field::<T>::deserialize(deserializer)? {
        Field::Valid(value) => Some(value),
        Field::Invalid(_) => None,
    })
}

/// Persisted shape of a [`Fund`].
///
/// Every field is optional on input so that snapshots written by older
/// versions still load. Trip settings are stored flat and only restored when
/// all three values are present and valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FundSnapshot {
    #[serde(default)]
    id: FundId,
    #[serde(default)]
    total_balance: Decimal,
    #[serde(default = "default_threshold")]
    low_balance_threshold: Decimal,
    #[serde(default)]
    expenses: Vec<Expense>,
    #[serde(default)]
    top_ups: Vec<TopUp>,
    #[serde(default)]
    group_members: Vec<String>,
    #[serde(default)]
    currency: Currency,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    trip_start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    trip_duration: Option<u32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    total_budget: Option<Decimal>,
}

impl From<Fund> for FundSnapshot {
    fn from(fund: Fund) -> Self {
        Self {
            id: fund.id,
            total_balance: fund.total_balance,
            low_balance_threshold: fund.low_balance_threshold,
            expenses: fund.expenses,
            top_ups: fund.top_ups,
            group_members: fund.group_members,
            currency: fund.currency,
            trip_start_date: fund.trip.map(|t| t.start_date()),
            trip_duration: fund.trip.map(|t| t.duration_days()),
            total_budget: fund.trip.map(|t| t.total_budget()),
        }
    }
}

impl From<FundSnapshot> for Fund {
    fn from(snapshot: FundSnapshot) -> Self {
        let mut expenses = snapshot.expenses;
        for expense in &mut expenses {
            expense.normalize();
        }

        let mut group_members: Vec<String> = Vec::with_capacity(snapshot.group_members.len());
        for member in snapshot.group_members {
            let name = member.trim();
            if !name.is_empty() && !group_members.iter().any(|m| m == name) {
                group_members.push(name.to_string());
            }
        }

        let trip = match (snapshot.trip_start_date, snapshot.trip_duration, snapshot.total_budget) {
            (Some(start), Some(duration), Some(budget)) => {
                TripSettings::new(start, duration, budget).ok()
            }
            _ => None,
        };

        Self {
            id: snapshot.id,
            version: 0,
            total_balance: snapshot.total_balance,
            low_balance_threshold: snapshot.low_balance_threshold,
            expenses,
            top_ups: snapshot.top_ups,
            group_members,
            currency: snapshot.currency,
            trip,
        }
    }
}
