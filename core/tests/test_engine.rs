//! Integration tests for the time-based model loop

use business_simulator_core_rs::{
    Account, AccountType, BasicActivity, Clock, Component, Entity, GeneralLedger,
    GeneralLedgerStructure, TimeBasedModel, TimePeriod, TransactionTemplate,
};
use chrono::{NaiveDate, NaiveDateTime};

fn datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn structure() -> GeneralLedgerStructure {
    let mut structure = GeneralLedgerStructure::new("structure");
    structure
        .add_account(Account::new("Bank", AccountType::Asset))
        .unwrap();
    structure
        .add_account(Account::new("Expenses", AccountType::Expense))
        .unwrap();
    structure
        .add_account(Account::new("Sales", AccountType::Revenue))
        .unwrap();
    structure
}

fn acme() -> Entity {
    let mut office = Component::new("office");
    office.add_activity(Box::new(
        BasicActivity::new("rent")
            .with_amount(50_000)
            .with_template(TransactionTemplate::new("Rent", "Expenses", "Bank")),
    ));

    let mut shop = Component::new("shop");
    shop.add_activity(Box::new(
        BasicActivity::new("sales")
            .with_interval(3)
            .with_amount(80_000)
            .with_template(TransactionTemplate::new("Sale", "Bank", "Sales")),
    ));

    let mut entity = Entity::new("acme", GeneralLedger::new("ledger", structure()));
    entity.add_component(office);
    entity.add_component(shop);
    entity
}

fn model() -> TimeBasedModel {
    let clock = Clock::new("clock", datetime(2016, 2, 1), TimePeriod::Month);
    let mut model = TimeBasedModel::new("model", clock, 12);
    model.add_entity(acme());
    model
}

#[test]
fn test_run_reports_one_result_per_period() {
    let mut model = model();
    let results = model.run().unwrap();

    assert_eq!(results.len(), 12);
    assert_eq!(results[0].period_ix, 0);
    assert_eq!(results[0].period_datetime, datetime(2016, 2, 1));
    assert_eq!(results[11].period_ix, 11);
    assert_eq!(results[11].period_datetime, datetime(2017, 1, 1));
}

#[test]
fn test_activities_fire_on_their_own_schedules() {
    let mut model = model();
    let results = model.run().unwrap();

    let ledger = model.entity("acme").unwrap().general_ledger();

    // Rent fires every period, sales every third period (0, 3, 6, 9)
    assert_eq!(ledger.transactions_by_source("acme/office/rent").len(), 12);
    assert_eq!(ledger.transactions_by_source("acme/shop/sales").len(), 4);
    assert_eq!(ledger.transactions().len(), 16);

    // Periods where both fire report two creations
    assert_eq!(results[0].transactions_created, 2);
    assert_eq!(results[1].transactions_created, 1);
    assert_eq!(results[3].transactions_created, 2);
}

#[test]
fn test_balances_after_a_full_run() {
    let mut model = model();
    model.run().unwrap();

    let ledger = model.entity("acme").unwrap().general_ledger();

    // 12 rent payments out, 4 sales in
    assert_eq!(
        ledger.account_balance("Bank", None).unwrap(),
        4 * 80_000 - 12 * 50_000
    );
    assert_eq!(
        ledger.account_balance("Expenses", None).unwrap(),
        12 * 50_000
    );
    assert_eq!(ledger.account_balance("Sales", None).unwrap(), 4 * 80_000);
}

#[test]
fn test_windowed_activity_only_fires_inside_its_window() {
    let mut office = Component::new("office");
    office.add_activity(Box::new(
        BasicActivity::new("lease")
            .with_window(datetime(2016, 5, 1), datetime(2016, 8, 1))
            .with_amount(10_000)
            .with_template(TransactionTemplate::new("Lease", "Expenses", "Bank")),
    ));
    let mut entity = Entity::new("acme", GeneralLedger::new("ledger", structure()));
    entity.add_component(office);

    let clock = Clock::new("clock", datetime(2016, 2, 1), TimePeriod::Month);
    let mut model = TimeBasedModel::new("model", clock, 12);
    model.add_entity(entity);
    model.run().unwrap();

    // Periods 3..=6 (May through August)
    let ledger = model.entity("acme").unwrap().general_ledger();
    let transactions = ledger.transactions_by_source("acme/office/lease");
    assert_eq!(transactions.len(), 4);
    assert_eq!(transactions[0].tx_datetime(), datetime(2016, 5, 1));
    assert_eq!(transactions[3].tx_datetime(), datetime(2016, 8, 1));
}

#[test]
fn test_manual_stepping_matches_run() {
    let mut model = model();
    model.prepare_to_run().unwrap();

    let first = model.step().unwrap();
    assert_eq!(first.period_ix, 0);
    assert_eq!(first.transactions_created, 2);
    assert_eq!(model.clock().timestep_ix(), 1);

    let second = model.step().unwrap();
    assert_eq!(second.period_ix, 1);
    assert_eq!(second.transactions_created, 1);
}

#[test]
fn test_entities_keep_separate_ledgers() {
    let clock = Clock::new("clock", datetime(2016, 2, 1), TimePeriod::Month);
    let mut model = TimeBasedModel::new("model", clock, 6);

    model.add_entity(acme());

    let mut household = Entity::new("household", GeneralLedger::new("ledger", structure()));
    let mut home = Component::new("home");
    home.add_activity(Box::new(
        BasicActivity::new("groceries")
            .with_amount(5_000)
            .with_template(TransactionTemplate::new("Groceries", "Expenses", "Bank")),
    ));
    household.add_component(home);
    model.add_entity(household);

    model.run().unwrap();

    let acme_ledger = model.entity("acme").unwrap().general_ledger();
    let household_ledger = model.entity("household").unwrap().general_ledger();

    assert!(acme_ledger
        .transactions_by_source("household/home/groceries")
        .is_empty());
    assert_eq!(
        household_ledger
            .transactions_by_source("household/home/groceries")
            .len(),
        6
    );
    assert_eq!(household_ledger.transactions().len(), 6);
}

#[test]
fn test_journal_survives_a_snapshot() {
    let mut model = model();
    model.run().unwrap();

    let ledger = model.entity("acme").unwrap().general_ledger();
    let json = serde_json::to_string(ledger).unwrap();
    let restored: GeneralLedger = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.transactions(), ledger.transactions());
    assert_eq!(
        restored.account_balance("Bank", None).unwrap(),
        ledger.account_balance("Bank", None).unwrap()
    );
}
