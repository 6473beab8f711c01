//! Tests for paychecks, withholding, and pay modifiers
//!
//! These tests verify:
//! - The paycheck pipeline from gross to net across a run
//! - Shadow withholding envelopes staying out of net worth
//! - Raises, bonuses, and hours changes landing on later paydays

use crate::model::{
    AccountType, EnvelopeDef, EventKind, HoursChangeParams, PayrollModifier, RaiseParams,
    Recurrence, ReoccurringRaiseParams, SalariedJobParams, WageJobParams, WithholdingKeys,
    WithholdingRates,
};
use crate::plan::Plan;
use crate::simulation::simulate;

fn salaried(updating: Vec<PayrollModifier>) -> SalariedJobParams {
    SalariedJobParams {
        start_time: 0,
        end_time: i64::MAX,
        frequency_days: None,
        pay_period: 26.0,
        salary: 104_000.0,
        p_401k_contribution: 0.05,
        p_401k_match: 0.05,
        withholding: WithholdingRates {
            federal: 0.10,
            ..WithholdingRates::default()
        },
        take_home_key: "Checking".into(),
        retirement_key: Some("Retirement".into()),
        withholding_keys: WithholdingKeys {
            federal: Some("FedTax".into()),
            ..WithholdingKeys::default()
        },
        updating,
    }
}

/// Test the full pipeline: gross, 401(k), withholding, net, shadow deposit
#[test]
fn test_salaried_pipeline_over_three_paydays() {
    let plan = Plan::builder()
        .envelope(EnvelopeDef::new("Checking"))
        .envelope(EnvelopeDef::new("Retirement"))
        .envelope(EnvelopeDef::new("FedTax").account_type(AccountType::NonNetworth))
        .event(EventKind::GetJob(salaried(Vec::new())))
        .build()
        .unwrap();

    // pay_period 26 derives a 14-day cadence: paydays 0, 14, 28.
    let projection = simulate(&plan, 0, 28);

    // Per check: gross 4000, employee 401(k) 200, federal on 3800 = 380,
    // net 3420, retirement 200 + 200.
    let checking = projection.final_balance("Checking").unwrap();
    assert!(
        (checking - 3.0 * 3_420.0).abs() < 1e-9,
        "Expected 10260.00, got {checking:.2}"
    );
    let retirement = projection.final_balance("Retirement").unwrap();
    assert!(
        (retirement - 3.0 * 400.0).abs() < 1e-9,
        "Expected 1200.00, got {retirement:.2}"
    );
    let withheld = projection.final_balance("FedTax").unwrap();
    assert!(
        (withheld - 3.0 * 380.0).abs() < 1e-9,
        "Expected 1140.00, got {withheld:.2}"
    );

    // The shadow envelope tracks but never counts.
    let datum = projection.data.last().unwrap();
    assert!(datum.parts.contains_key("Checking"));
    assert!(!datum.parts.contains_key("FedTax"));
    assert!(datum.non_networth_parts.contains_key("FedTax"));
    assert!(
        (datum.value - (checking + retirement)).abs() < 1e-9,
        "Expected {:.2}, got {:.2}",
        checking + retirement,
        datum.value
    );
}

/// Test that an hours change reshapes wage paychecks from the next payday
#[test]
fn test_wage_job_hours_change() {
    let plan = Plan::builder()
        .envelope(EnvelopeDef::new("Checking"))
        .event(EventKind::GetWageJob(WageJobParams {
            start_time: 0,
            end_time: i64::MAX,
            frequency_days: Some(7.0),
            pay_period: 52.0,
            hourly_wage: 20.0,
            hours_per_week: 40.0,
            p_401k_contribution: 0.0,
            p_401k_match: 0.0,
            withholding: WithholdingRates::default(),
            take_home_key: "Checking".into(),
            retirement_key: None,
            withholding_keys: WithholdingKeys::default(),
            updating: vec![PayrollModifier::ChangeHours(HoursChangeParams {
                start_time: 20,
                hours: 20.0,
            })],
        }))
        .build()
        .unwrap();

    let projection = simulate(&plan, 0, 28);

    // Full-time weeks pay 800 on days 0, 7, 14; half-time pays 400 on 21, 28.
    let total = projection.final_balance("Checking").unwrap();
    assert!((total - 3_200.0).abs() < 1e-9, "Expected 3200.00, got {total:.2}");
}

/// Test that recurring raises compound into later paychecks
#[test]
fn test_reoccurring_raise_accumulates() {
    let plan = Plan::builder()
        .envelope(EnvelopeDef::new("Checking"))
        .event(EventKind::GetJob(SalariedJobParams {
            start_time: 0,
            end_time: i64::MAX,
            frequency_days: Some(7.0),
            pay_period: 52.0,
            salary: 52_000.0,
            p_401k_contribution: 0.0,
            p_401k_match: 0.0,
            withholding: WithholdingRates::default(),
            take_home_key: "Checking".into(),
            retirement_key: None,
            withholding_keys: WithholdingKeys::default(),
            updating: vec![PayrollModifier::ReoccurringRaise(ReoccurringRaiseParams {
                schedule: Recurrence::every(1, 14.0),
                amount: 5_200.0,
            })],
        }))
        .build()
        .unwrap();

    let projection = simulate(&plan, 0, 28);

    // Paydays 0/7/14/21/28 at 1000, 1100, 1100, 1200, 1200: raises land on
    // days 1 and 15, each adding 100 per check from the next payday on.
    let total = projection.final_balance("Checking").unwrap();
    assert!((total - 5_600.0).abs() < 1e-9, "Expected 5600.00, got {total:.2}");
}

/// Test that a bonus deposits once, untaxed, on its own day
#[test]
fn test_bonus_is_a_one_time_untaxed_deposit() {
    let plan = Plan::builder()
        .envelope(EnvelopeDef::new("Checking"))
        .envelope(EnvelopeDef::new("Retirement"))
        .envelope(EnvelopeDef::new("FedTax").account_type(AccountType::NonNetworth))
        .event(EventKind::GetJob(salaried(vec![PayrollModifier::GetABonus(
            RaiseParams {
                start_time: 10,
                amount: 2_500.0,
            },
        )])))
        .build()
        .unwrap();

    let projection = simulate(&plan, 0, 13);

    // One payday (day 0) plus the raw bonus on day 10.
    let total = projection.final_balance("Checking").unwrap();
    assert!(
        (total - (3_420.0 + 2_500.0)).abs() < 1e-9,
        "Expected 5920.00, got {total:.2}"
    );
    assert_eq!(
        projection.balance_on(9, "Checking"),
        Some(3_420.0),
        "bonus must not land early"
    );
}
