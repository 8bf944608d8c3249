//! End-to-end scenarios: engine + JSON file store + manual clock.

use std::fs;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use travelfund_core::ExpenseId;
use travelfund_infra::{
    EngineError, JsonFileFundStore, LedgerEngine, ManualClock, NewExpense, StoreConfig,
};
use travelfund_ledger::ExpenseCategory::{Accommodation, Activities, Food, Transport};
use travelfund_ledger::{BudgetStatus, Currency, ExpenseCategory, PaymentSource};

type Engine = LedgerEngine<JsonFileFundStore, Arc<ManualClock>>;

fn start_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap()))
}

fn trip_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
}

fn open(dir: &tempfile::TempDir, clock: Arc<ManualClock>) -> anyhow::Result<Engine> {
    travelfund_observability::init();
    let config = StoreConfig {
        data_dir: dir.path().to_path_buf(),
        ..StoreConfig::default()
    };
    Ok(LedgerEngine::open_with_clock(JsonFileFundStore::from_config(&config), clock)?)
}

/// Paid from the pool.
fn spend(description: &str, amount: Decimal, category: ExpenseCategory, by: &str) -> NewExpense {
    NewExpense {
        amount,
        description: description.to_string(),
        category,
        paid_by: by.to_string(),
        payment_source: PaymentSource::Pool,
    }
}

/// Paid out of pocket, owed back by the fund.
fn fronted(description: &str, amount: Decimal, category: ExpenseCategory, by: &str) -> NewExpense {
    NewExpense {
        payment_source: PaymentSource::Individual,
        ..spend(description, amount, category, by)
    }
}

#[test]
fn shared_pool_scenario() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut engine = open(&dir, start_clock())?;

    engine.add_group_member("Alice")?;
    engine.add_group_member("Bob")?;

    engine.top_up_fund(dec!(1000), Some("Alice"), None)?;
    assert_eq!(engine.current_balance(), dec!(1000));

    engine.add_expense(spend("Dinner", dec!(200), Food, "Bob"))?;
    assert_eq!(engine.current_balance(), dec!(800));
    assert_eq!(engine.total_spent(), dec!(200));

    let taxi = engine.add_expense(fronted("Taxi", dec!(50), Transport, "Bob"))?;
    assert_eq!(engine.current_balance(), dec!(800));
    assert_eq!(engine.member_balance("Bob"), dec!(50));

    assert!(engine.reimburse_expense(taxi)?);
    assert_eq!(engine.current_balance(), dec!(750));
    assert_eq!(engine.member_balance("Bob"), Decimal::ZERO);
    assert!(!engine.reimburse_expense(taxi)?);
    Ok(())
}

#[test]
fn budget_scenario() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut engine = open(&dir, start_clock())?;

    engine.set_trip_settings(trip_start(), 10, dec!(1000))?;
    engine.add_expense(spend("Museum", dec!(50), Activities, "Ana"))?;

    let analysis = engine.budget_analysis().expect("trip configured");
    assert_eq!(analysis.average_daily_budget, dec!(100));
    assert_eq!(analysis.actual_daily_spending, dec!(50));
    assert_eq!(analysis.budget_variance, dec!(50));
    assert_eq!(analysis.projected_total, dec!(500));
    assert_eq!(analysis.status, BudgetStatus::Under);
    Ok(())
}

#[test]
fn budget_analysis_with_tiny_budget_does_not_panic() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut engine = open(&dir, start_clock())?;

    engine.set_trip_settings(trip_start(), 10, Decimal::new(1, 20))?;
    engine.add_expense(spend("Villa", dec!(10000000000), Accommodation, "Ana"))?;

    let analysis = engine.budget_analysis().expect("trip configured");
    assert_eq!(analysis.budget_usage_percent, Decimal::MAX);
    assert_eq!(analysis.status, BudgetStatus::Over);
    Ok(())
}

#[test]
fn oversized_top_up_is_rejected_not_fatal() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut engine = open(&dir, start_clock())?;

    engine.top_up_fund(Decimal::MAX, Some("Ana"), None)?;
    let err = engine.top_up_fund(Decimal::MAX, Some("Ana"), None).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(engine.current_balance(), Decimal::MAX);
    assert_eq!(engine.fund().top_ups().len(), 1);

    engine.add_expense(spend("Yacht", Decimal::MAX, Activities, "Ana"))?;
    let err = engine.add_expense(spend("Tip", dec!(1), Food, "Ana")).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(engine.current_balance(), Decimal::ZERO);
    Ok(())
}

#[test]
fn state_survives_reopen_with_identical_records() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let clock = start_clock();
    let mut engine = open(&dir, clock.clone())?;

    engine.add_group_member("Ana")?;
    engine.add_group_member("Bob")?;
    engine.top_up_fund(dec!(600), Some("Ana"), Some("first round"))?;
    clock.advance(Duration::hours(3));
    engine.add_expense(spend("Hostel", dec!(240.50), Accommodation, "Ana"))?;
    clock.advance(Duration::hours(3));
    let ferry = engine.add_expense(fronted("Ferry", dec!(35), Transport, "Bob"))?;
    engine.add_expense(fronted("Snacks", dec!(8.25), Food, "Bob"))?;
    clock.advance(Duration::days(1));
    engine.reimburse_expense(ferry)?;
    engine.set_threshold(dec!(150))?;

    let (before, _, _) = engine.into_parts();

    let reopened = open(&dir, clock)?;
    let after = reopened.fund();
    assert_eq!(after.expenses(), before.expenses());
    assert_eq!(after.top_ups(), before.top_ups());
    assert_eq!(after.group_members(), before.group_members());
    assert_eq!(after.low_balance_threshold(), dec!(150));
    assert_eq!(after.current_balance(), before.current_balance());
    assert_eq!(after.member_balances(), before.member_balances());
    assert_eq!(reopened.member_balance("Bob"), dec!(8.25));
    assert_eq!(reopened.current_balance(), dec!(324.50));
    assert!(!reopened.is_low_balance());
    Ok(())
}

#[test]
fn rejected_commands_change_nothing_on_disk() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut engine = open(&dir, start_clock())?;
    engine.add_group_member("Alice")?;
    let path = engine.store().path().to_path_buf();
    let on_disk = fs::read_to_string(&path)?;

    let err = engine.add_group_member("Alice").unwrap_err();
    assert!(matches!(err, EngineError::Domain(_)));
    assert_eq!(engine.fund().group_members(), ["Alice".to_string()]);

    assert!(!engine.remove_expense(ExpenseId::new())?);
    assert_eq!(fs::read_to_string(&path)?, on_disk);
    Ok(())
}

#[test]
fn legacy_snapshot_on_disk_is_upgraded_on_first_save() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("travel-fund-data.json");
    fs::write(
        &path,
        r#"{
            "totalBalance": 500,
            "lowBalanceThreshold": 100,
            "expenses": [{
                "id": "lx9f0qa",
                "amount": 75.5,
                "description": "Dinner",
                "category": "food",
                "paidBy": "Ana",
                "date": "2025-12-30T19:45:00.000Z"
            }, {
                "id": "q2w8e4r",
                "amount": 20,
                "description": "Taxi",
                "category": "transport",
                "paidBy": "Bob",
                "date": "2025-12-30T23:10:00.000Z",
                "paymentSource": "individual",
                "isReimbursed": false
            }],
            "tripDuration": "a week"
        }"#,
    )?;

    let mut engine = open(&dir, start_clock())?;
    assert_eq!(engine.current_balance(), dec!(424.5));
    assert_eq!(engine.member_balance("Bob"), dec!(20));
    assert!(engine.fund().trip().is_none());

    let taxi = ExpenseId::from_stored("q2w8e4r")?;
    assert!(engine.reimburse_expense(taxi)?);
    assert_eq!(engine.current_balance(), dec!(404.5));

    let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(saved["expenses"][0]["paymentSource"], "pool");
    assert_eq!(saved["expenses"][1]["isReimbursed"], true);
    assert_eq!(saved["currency"], "USD");

    let reopened = open(&dir, start_clock())?;
    assert_eq!(reopened.fund().expenses(), engine.fund().expenses());
    Ok(())
}

#[test]
fn reset_wipes_records_and_preferences() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut engine = open(&dir, start_clock())?;
    engine.add_group_member("Ana")?;
    engine.set_currency(Currency::Eur)?;
    engine.top_up_fund(dec!(40), None, None)?;
    engine.set_trip_settings(trip_start(), 3, dec!(90))?;

    engine.reset_fund()?;

    let reopened = open(&dir, start_clock())?;
    assert!(reopened.fund().is_empty());
    assert_eq!(reopened.current_balance(), Decimal::ZERO);
    assert_eq!(reopened.fund().currency(), Currency::Usd);
    assert!(reopened.budget_analysis().is_none());
    Ok(())
}

#[test]
fn export_and_spending_views_reflect_engine_state() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let clock = start_clock();
    let mut engine = open(&dir, clock.clone())?;

    engine.top_up_fund(dec!(300), Some("Ana"), None)?;
    engine.add_expense(spend("Bus", dec!(12), Transport, "Ana"))?;
    clock.advance(Duration::days(1));
    engine.add_expense(spend("Tapas", dec!(48), Food, "Ana"))?;

    let overview = engine.spending_overview();
    assert_eq!(overview.total_days, 2);
    assert_eq!(overview.highest_day.map(|d| d.amount), Some(dec!(48)));
    assert_eq!(engine.daily_spending().len(), 2);
    assert_eq!(engine.category_breakdown()[0].category, Food);

    let export = engine.export();
    assert_eq!(export.transactions.len(), 3);
    assert_eq!(export.transactions[0].description, "Tapas");
    let mut csv = Vec::new();
    export.write_top_ups_csv(&mut csv)?;
    assert!(String::from_utf8(csv)?.starts_with("Date,Amount,Added By,Note"));
    Ok(())
}

#[test]
fn export_of_empty_fund_keeps_headers() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let engine = open(&dir, start_clock())?;

    let mut csv = Vec::new();
    engine.export().write_expenses_csv(&mut csv)?;
    let text = String::from_utf8(csv)?;
    assert!(text.starts_with("Date,Description,Category,Amount"));
    assert_eq!(text.lines().count(), 1);
    Ok(())
}
