//! Tests for projection output
//!
//! These tests verify:
//! - The net-worth identity over the parts partition on every day
//! - Bit-identical output across repeated runs of the same plan
//! - Overdraft detection and the parameter-update callback

use crate::model::{
    AccountSeed, AccountType, DEBT_CATEGORY, DeclareAccountsParams, EnvelopeDef, EventId,
    EventKind, GrowthModel, InflowParams, OutflowParams, ParameterUpdate, PaymentScheduleParams,
    Recurrence, TransferParams,
};
use crate::plan::Plan;
use crate::simulation::{account_warnings, run_simulation, simulate, simulate_scenarios};

/// A plan exercising growth, flows, a debt envelope, and a tracking envelope.
fn busy_plan() -> Plan {
    Plan::builder()
        .envelope(EnvelopeDef::new("Checking"))
        .envelope(EnvelopeDef::new("Brokerage").growth(GrowthModel::DailyCompound, 0.04))
        .envelope(EnvelopeDef::new("HSA").account_type(AccountType::NonNetworth))
        .envelope(EnvelopeDef::new("Mortgage").category(DEBT_CATEGORY))
        .event(EventKind::DeclareAccounts(DeclareAccountsParams {
            start_time: 0,
            accounts: vec![
                AccountSeed {
                    key: "Checking".into(),
                    balance: 50_000.0,
                },
                AccountSeed {
                    key: "Brokerage".into(),
                    balance: 20_000.0,
                },
                AccountSeed {
                    key: "HSA".into(),
                    balance: 3_000.0,
                },
                AccountSeed {
                    key: "Mortgage".into(),
                    balance: -250_000.0,
                },
            ],
        }))
        .event(EventKind::Inflow(InflowParams {
            schedule: Recurrence::every(0, 14.0),
            amount: 2_000.0,
            to_key: "Checking".into(),
            updating: Vec::new(),
        }))
        .event(EventKind::Outflow(OutflowParams {
            schedule: Recurrence::every(3, 30.0),
            amount: 800.0,
            from_key: "Checking".into(),
            updating: Vec::new(),
        }))
        .event(EventKind::TransferMoney(TransferParams {
            schedule: Recurrence::every(7, 30.0),
            amount: 500.0,
            from_key: "Checking".into(),
            to_key: "Brokerage".into(),
            updating: Vec::new(),
        }))
        .event(EventKind::Inflow(InflowParams {
            schedule: Recurrence::every(0, 30.0),
            amount: 100.0,
            to_key: "HSA".into(),
            updating: Vec::new(),
        }))
        .event(EventKind::PaymentSchedule(PaymentScheduleParams {
            schedule: Recurrence::every(15, 30.0),
            amount: 1_500.0,
            from_key: "Checking".into(),
            loan_key: "Mortgage".into(),
            updating: Vec::new(),
        }))
        .build()
        .unwrap()
}

/// Test that net worth equals non-debt parts minus debt magnitudes, daily
#[test]
fn test_net_worth_identity_holds_every_day() {
    let projection = simulate(&busy_plan(), 0, 365);
    assert_eq!(projection.data.len(), 366);

    for datum in &projection.data {
        let mut expected = 0.0;
        for (name, &balance) in &datum.parts {
            if name == "Mortgage" {
                expected -= balance.abs();
            } else {
                expected += balance;
            }
        }
        assert!(
            (datum.value - expected).abs() < 1e-9,
            "day {}: expected {expected:.2}, got {:.2}",
            datum.date,
            datum.value
        );
        assert!(
            !datum.parts.contains_key("HSA"),
            "tracking envelope leaked into the counted partition"
        );
        assert_eq!(datum.parts.len(), 3);
        assert_eq!(datum.non_networth_parts.len(), 1);
    }
}

/// Test that two runs of the same plan produce identical projections
#[test]
fn test_rerun_is_bit_identical() {
    let plan = busy_plan();
    let first = simulate(&plan, 0, 365);
    let second = simulate(&plan, 0, 365);
    assert_eq!(first, second);
}

/// Test that overdrawn spendable envelopes are flagged and debt is not
#[test]
fn test_account_warnings_flag_overdrafts() {
    let plan = Plan::builder()
        .envelope(EnvelopeDef::new("Checking"))
        .envelope(EnvelopeDef::new("Loan").category(DEBT_CATEGORY))
        .event(EventKind::DeclareAccounts(DeclareAccountsParams {
            start_time: 0,
            accounts: vec![
                AccountSeed {
                    key: "Checking".into(),
                    balance: 100.0,
                },
                AccountSeed {
                    key: "Loan".into(),
                    balance: -500.0,
                },
            ],
        }))
        .event(EventKind::Outflow(OutflowParams {
            schedule: Recurrence::once(5),
            amount: 300.0,
            from_key: "Checking".into(),
            updating: Vec::new(),
        }))
        .build()
        .unwrap();

    let projection = simulate(&plan, 0, 10);
    let warnings = account_warnings(&plan, &projection.data);

    // Checking sits at -200 from day 5 on; the loan stays silent.
    assert_eq!(warnings.len(), 6);
    assert!(warnings.iter().all(|w| w.envelope == "Checking"));
    assert_eq!(warnings[0].date, 5);
    assert!(
        (warnings[0].balance + 200.0).abs() < 1e-9,
        "Expected -200.00, got {:.2}",
        warnings[0].balance
    );
}

/// Test that the callback receives the correction batch exactly once
#[test]
fn test_run_simulation_delivers_corrections_once() {
    let plan = Plan::builder()
        .envelope(EnvelopeDef::new("Checking"))
        .envelope(EnvelopeDef::new("Loan").category(DEBT_CATEGORY))
        .event(EventKind::DeclareAccounts(DeclareAccountsParams {
            start_time: 0,
            accounts: vec![
                AccountSeed {
                    key: "Checking".into(),
                    balance: 5_000.0,
                },
                AccountSeed {
                    key: "Loan".into(),
                    balance: -1_000.0,
                },
            ],
        }))
        .event(EventKind::PaymentSchedule(PaymentScheduleParams {
            schedule: Recurrence::every(10, 10.0),
            amount: 400.0,
            from_key: "Checking".into(),
            loan_key: "Loan".into(),
            updating: Vec::new(),
        }))
        .build()
        .unwrap();

    let mut batches: Vec<Vec<ParameterUpdate>> = Vec::new();
    let data = run_simulation(&plan, 0, 60, |updates| batches.push(updates.to_vec()));

    // Payments on days 10 and 20, then a clamped payoff on day 30.
    assert_eq!(data.len(), 61);
    assert_eq!(batches.len(), 1, "callback must fire exactly once");
    assert_eq!(batches[0], vec![ParameterUpdate::end_time(EventId(1), 30)]);
}

/// Test that a run with nothing to correct never invokes the callback
#[test]
fn test_run_simulation_silent_without_corrections() {
    let mut called = false;
    let data = run_simulation(&busy_plan(), 0, 90, |_| called = true);
    assert_eq!(data.len(), 91);
    assert!(!called, "no corrections were proposed, callback must stay quiet");
}

/// Test that scenario batches line up with their input plans
#[test]
fn test_scenarios_preserve_plan_order() {
    let plans: Vec<Plan> = [1_000.0, 2_000.0]
        .into_iter()
        .map(|amount| {
            Plan::builder()
                .envelope(EnvelopeDef::new("Checking"))
                .event(EventKind::Inflow(InflowParams {
                    schedule: Recurrence::every(0, 30.0),
                    amount,
                    to_key: "Checking".into(),
                    updating: Vec::new(),
                }))
                .build()
                .unwrap()
        })
        .collect();

    let projections = simulate_scenarios(&plans, 0, 60);
    assert_eq!(projections.len(), 2);
    assert_eq!(projections[0], simulate(&plans[0], 0, 60));
    assert_eq!(projections[1], simulate(&plans[1], 0, 60));
    assert_eq!(projections[0].final_balance("Checking"), Some(3_000.0));
    assert_eq!(projections[1].final_balance("Checking"), Some(6_000.0));
}

/// Test that an inverted horizon yields an empty projection
#[test]
fn test_empty_horizon_produces_no_data() {
    let projection = simulate(&busy_plan(), 10, 9);
    assert!(projection.data.is_empty());
    assert!(projection.parameter_updates.is_empty());
    assert_eq!(projection.final_net_worth(), None);
}
