//! Tabular export of the fund: summary, top-ups, expenses and a combined
//! transaction ledger, each writable as CSV.

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::fund::Fund;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// `Jan 5, 2026, 03:04 PM`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// File stem for an export produced on `today`.
pub fn export_file_stem(today: NaiveDate) -> String {
    format!("travel-fund-{}", today.format("%Y-%m-%d"))
}

/// A row type with a fixed CSV header, written even when a table is empty.
pub trait CsvTable: Serialize {
    const HEADERS: &'static [&'static str];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Item")]
    pub label: String,
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopUpRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Amount")]
    pub amount: Decimal,
    #[serde(rename = "Added By")]
    pub added_by: String,
    #[serde(rename = "Note")]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Category")]
    pub category: &'static str,
    #[serde(rename = "Amount")]
    pub amount: Decimal,
    #[serde(rename = "Paid By")]
    pub paid_by: String,
    #[serde(rename = "Payment Source")]
    pub payment_source: &'static str,
    #[serde(rename = "Reimbursed")]
    pub reimbursed: &'static str,
    #[serde(rename = "Reimbursed At")]
    pub reimbursed_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransactionKind {
    #[serde(rename = "Top-up")]
    TopUp,
    #[serde(rename = "Expense")]
    Expense,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRow {
    #[serde(skip)]
    pub at: DateTime<Utc>,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Type")]
    pub kind: TransactionKind,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Credit")]
    pub credit: Option<Decimal>,
    #[serde(rename = "Debit")]
    pub debit: Option<Decimal>,
    #[serde(rename = "Person")]
    pub person: String,
}

impl CsvTable for SummaryRow {
    const HEADERS: &'static [&'static str] = &["Item", "Value"];
}

impl CsvTable for TopUpRow {
    const HEADERS: &'static [&'static str] = &["Date", "Amount", "Added By", "Note"];
}

impl CsvTable for ExpenseRow {
    const HEADERS: &'static [&'static str] = &[
        "Date",
        "Description",
        "Category",
        "Amount",
        "Paid By",
        "Payment Source",
        "Reimbursed",
        "Reimbursed At",
    ];
}

impl CsvTable for TransactionRow {
    const HEADERS: &'static [&'static str] =
        &["Date", "Type", "Description", "Credit", "Debit", "Person"];
}

/// Everything an export contains, built from one fund snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundExport {
    pub summary: Vec<SummaryRow>,
    pub top_ups: Vec<TopUpRow>,
    pub expenses: Vec<ExpenseRow>,
    /// Newest first.
    pub transactions: Vec<TransactionRow>,
}

impl FundExport {
    pub fn from_fund(fund: &Fund) -> Self {
        let currency = fund.currency();
        let money = |amount: Decimal| format!("{amount:.2} {currency}");

        let mut summary = vec![
            SummaryRow::new("Currency", currency.code()),
            SummaryRow::new("Total Balance", money(fund.total_balance())),
            SummaryRow::new("Total Top-ups", money(fund.total_top_ups())),
            SummaryRow::new("Total Expenses", money(fund.total_spent())),
            SummaryRow::new("Number of Expenses", fund.expenses().len().to_string()),
            SummaryRow::new("Number of Top-ups", fund.top_ups().len().to_string()),
        ];
        summary.extend(
            fund.group_members()
                .iter()
                .map(|m| SummaryRow::new("Group Member", m.as_str())),
        );

        let top_ups = fund
            .top_ups()
            .iter()
            .map(|t| TopUpRow {
                date: format_timestamp(t.date),
                amount: t.amount,
                added_by: t.added_by.clone(),
                note: t.note.clone().unwrap_or_default(),
            })
            .collect();

        let expenses = fund
            .expenses()
            .iter()
            .map(|e| ExpenseRow {
                date: format_timestamp(e.date),
                description: e.description.clone(),
                category: e.category.label(),
                amount: e.amount,
                paid_by: e.paid_by.clone(),
                payment_source: e.payment_source.label(),
                reimbursed: if e.is_reimbursed { "Yes" } else { "No" },
                reimbursed_at: e.reimbursed_at.map(format_timestamp).unwrap_or_default(),
            })
            .collect();

        let mut transactions: Vec<TransactionRow> = fund
            .top_ups()
            .iter()
            .map(|t| TransactionRow {
                at: t.date,
                date: format_timestamp(t.date),
                kind: TransactionKind::TopUp,
                description: t.note.clone().unwrap_or_else(|| "Fund Top-up".to_string()),
                credit: Some(t.amount),
                debit: None,
                person: t.added_by.clone(),
            })
            .chain(fund.expenses().iter().map(|e| TransactionRow {
                at: e.date,
                date: format_timestamp(e.date),
                kind: TransactionKind::Expense,
                description: e.description.clone(),
                credit: None,
                debit: Some(e.amount),
                person: e.paid_by.clone(),
            }))
            .collect();
        transactions.sort_by(|a, b| b.at.cmp(&a.at));

        Self {
            summary,
            top_ups,
            expenses,
            transactions,
        }
    }

    pub fn write_summary_csv<W: Write>(&self, w: W) -> ExportResult<()> {
        write_rows(w, &self.summary)
    }

    pub fn write_top_ups_csv<W: Write>(&self, w: W) -> ExportResult<()> {
        write_rows(w, &self.top_ups)
    }

    pub fn write_expenses_csv<W: Write>(&self, w: W) -> ExportResult<()> {
        write_rows(w, &self.expenses)
    }

    pub fn write_transactions_csv<W: Write>(&self, w: W) -> ExportResult<()> {
        write_rows(w, &self.transactions)
    }
}

impl SummaryRow {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

fn write_rows<W: Write, R: CsvTable>(w: W, rows: &[R]) -> ExportResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(w);
    // serde-driven headers only appear with the first row
    if rows.is_empty() {
        wtr.write_record(R::HEADERS)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
