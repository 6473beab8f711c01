//! Handlers for the payroll family: `get_job` (salaried) and `get_wage_job`
//! (hourly).
//!
//! Each payday builds a paycheck from gross pay down to net, then fans the
//! pieces out: net to the take-home envelope, both 401(k) legs to the
//! retirement envelope, and each withheld category to its optional shadow
//! envelope. Withholding always reduces net pay; the shadow deposits are
//! bookkeeping on top.

use crate::ledger::Ledger;
use crate::model::{
    PayrollModifier, SalariedJobParams, WageJobParams, WithholdingKeys, WithholdingRates,
};
use crate::simulation_state::PayrollState;

/// One paycheck, fully decomposed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Paycheck {
    pub gross: f64,
    pub employee_401k: f64,
    pub employer_match: f64,
    pub federal: f64,
    pub state: f64,
    pub local: f64,
    pub social_security: f64,
    pub medicare: f64,
}

impl Paycheck {
    /// Income-tax categories apply to gross less the pre-tax 401(k)
    /// contribution; FICA applies to full gross.
    pub(crate) fn compute(
        gross: f64,
        contribution_rate: f64,
        match_rate: f64,
        rates: &WithholdingRates,
    ) -> Self {
        let employee_401k = gross * contribution_rate;
        let taxable = gross - employee_401k;
        Self {
            gross,
            employee_401k,
            employer_match: gross * match_rate,
            federal: taxable * rates.federal,
            state: taxable * rates.state,
            local: taxable * rates.local,
            social_security: gross * rates.social_security,
            medicare: gross * rates.medicare,
        }
    }

    pub(crate) fn total_withheld(&self) -> f64 {
        self.federal + self.state + self.local + self.social_security + self.medicare
    }

    pub(crate) fn net(&self) -> f64 {
        self.gross - self.employee_401k - self.total_withheld()
    }
}

/// Days between paychecks. An explicit `frequency_days` wins; otherwise the
/// cadence is derived from paychecks-per-year. Zero means the job never pays.
pub(crate) fn cadence_days(frequency_days: Option<f64>, pay_period: f64) -> i64 {
    match frequency_days {
        Some(f) if f > 0.0 => f.round() as i64,
        _ if pay_period > 0.0 => (365.0 / pay_period).round() as i64,
        _ => 0,
    }
}

fn pays_on(start_time: i64, end_time: i64, cadence: i64, day: i64) -> bool {
    day <= end_time && cadence > 0 && (day - start_time) % cadence == 0
}

pub(crate) fn salaried_job(
    ledger: &mut Ledger,
    state: &mut PayrollState,
    params: &SalariedJobParams,
    day: i64,
) {
    let cadence = cadence_days(params.frequency_days, params.pay_period);
    if pays_on(params.start_time, params.end_time, cadence, day) && params.pay_period > 0.0 {
        let gross = state.working_pay(params.salary) / params.pay_period;
        if gross > 0.0 {
            let check = Paycheck::compute(
                gross,
                state.contribution_override.unwrap_or(params.p_401k_contribution),
                state.match_override.unwrap_or(params.p_401k_match),
                &params.withholding,
            );
            deposit_paycheck(
                ledger,
                &check,
                &params.take_home_key,
                params.retirement_key.as_deref(),
                &params.withholding_keys,
            );
        }
    }
    apply_payroll_modifiers(ledger, state, &params.take_home_key, &params.updating, day);
}

pub(crate) fn wage_job(
    ledger: &mut Ledger,
    state: &mut PayrollState,
    params: &WageJobParams,
    day: i64,
) {
    let cadence = cadence_days(params.frequency_days, params.pay_period);
    if pays_on(params.start_time, params.end_time, cadence, day) {
        let hours = state.hours_override.unwrap_or(params.hours_per_week);
        let gross = state.working_pay(params.hourly_wage) * hours * (cadence as f64 / 7.0);
        if gross > 0.0 {
            let check = Paycheck::compute(
                gross,
                state.contribution_override.unwrap_or(params.p_401k_contribution),
                state.match_override.unwrap_or(params.p_401k_match),
                &params.withholding,
            );
            deposit_paycheck(
                ledger,
                &check,
                &params.take_home_key,
                params.retirement_key.as_deref(),
                &params.withholding_keys,
            );
        }
    }
    apply_payroll_modifiers(ledger, state, &params.take_home_key, &params.updating, day);
}

/// Posts a paycheck's pieces. Each destination resolves on its own; a missing
/// envelope drops that deposit without touching the others.
fn deposit_paycheck(
    ledger: &mut Ledger,
    check: &Paycheck,
    take_home_key: &str,
    retirement_key: Option<&str>,
    shadow_keys: &WithholdingKeys,
) {
    ledger.credit(take_home_key, check.net());
    if let Some(key) = retirement_key {
        ledger.credit(key, check.employee_401k + check.employer_match);
    }
    if let Some(key) = shadow_keys.federal.as_deref() {
        ledger.credit(key, check.federal);
    }
    if let Some(key) = shadow_keys.state.as_deref() {
        ledger.credit(key, check.state);
    }
    if let Some(key) = shadow_keys.local.as_deref() {
        ledger.credit(key, check.local);
    }
    if let Some(key) = shadow_keys.social_security.as_deref() {
        ledger.credit(key, check.social_security);
    }
    if let Some(key) = shadow_keys.medicare.as_deref() {
        ledger.credit(key, check.medicare);
    }
}

fn apply_payroll_modifiers(
    ledger: &mut Ledger,
    state: &mut PayrollState,
    take_home_key: &str,
    modifiers: &[PayrollModifier],
    day: i64,
) {
    for modifier in modifiers {
        match modifier {
            PayrollModifier::GetARaise(p) => {
                if day == p.start_time {
                    state.set_pay(p.amount);
                }
            }
            PayrollModifier::ReoccurringRaise(p) => {
                if p.schedule.fires_on(day) {
                    state.pay_delta += p.amount;
                }
            }
            PayrollModifier::GetABonus(p) => {
                if day == p.start_time && p.amount > 0.0 {
                    ledger.credit(take_home_key, p.amount);
                }
            }
            PayrollModifier::Change401kContribution(p) => {
                if day == p.start_time {
                    state.contribution_override = Some(p.rate);
                }
            }
            PayrollModifier::ChangeHours(p) => {
                if day == p.start_time {
                    state.hours_override = Some(p.hours);
                }
            }
            PayrollModifier::ChangeEmployerMatch(p) => {
                if day == p.start_time {
                    state.match_override = Some(p.rate);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        EnvelopeDef, RaiseParams, RateChangeParams, Recurrence, ReoccurringRaiseParams,
    };

    fn ledger_with(names: &[&str]) -> Ledger {
        let defs: Vec<EnvelopeDef> = names.iter().map(|n| EnvelopeDef::new(*n)).collect();
        Ledger::new(&defs)
    }

    fn rates() -> WithholdingRates {
        WithholdingRates {
            federal: 0.12,
            state: 0.05,
            local: 0.01,
            social_security: 0.062,
            medicare: 0.0145,
        }
    }

    #[test]
    fn test_paycheck_decomposition_balances() {
        let check = Paycheck::compute(4_000.0, 0.06, 0.03, &rates());

        assert!((check.employee_401k - 240.0).abs() < 1e-9);
        assert!((check.employer_match - 120.0).abs() < 1e-9);
        // Income taxes on 3760, FICA on the full 4000.
        assert!((check.federal - 3_760.0 * 0.12).abs() < 1e-9);
        assert!((check.social_security - 4_000.0 * 0.062).abs() < 1e-9);
        let net = check.net();
        let reassembled = net + check.employee_401k + check.total_withheld();
        assert!(
            (reassembled - check.gross).abs() < 1e-9,
            "Expected {:.2}, got {reassembled:.2}",
            check.gross
        );
    }

    #[test]
    fn test_cadence_prefers_explicit_frequency() {
        assert_eq!(cadence_days(Some(14.0), 26.0), 14);
        assert_eq!(cadence_days(None, 26.0), 14);
        assert_eq!(cadence_days(None, 12.0), 30);
        assert_eq!(cadence_days(None, 0.0), 0);
        assert_eq!(cadence_days(Some(0.0), 0.0), 0);
    }

    #[test]
    fn test_salaried_job_pays_on_cadence() {
        let mut ledger = ledger_with(&["Checking", "Retirement"]);
        let mut state = PayrollState::default();
        let params = SalariedJobParams {
            start_time: 0,
            end_time: i64::MAX,
            frequency_days: None,
            pay_period: 26.0,
            salary: 104_000.0,
            p_401k_contribution: 0.05,
            p_401k_match: 0.05,
            withholding: WithholdingRates::default(),
            take_home_key: "Checking".into(),
            retirement_key: Some("Retirement".into()),
            withholding_keys: WithholdingKeys::default(),
            updating: Vec::new(),
        };

        for day in 0..=14 {
            salaried_job(&mut ledger, &mut state, &params, day);
        }

        // Two paydays (0 and 14): gross 4000, net 3800, retirement 400 each.
        let checking = ledger.balance("Checking").unwrap();
        assert!((checking - 7_600.0).abs() < 1e-9, "Expected 7600.00, got {checking:.2}");
        let retirement = ledger.balance("Retirement").unwrap();
        assert!((retirement - 800.0).abs() < 1e-9, "Expected 800.00, got {retirement:.2}");
    }

    #[test]
    fn test_job_stops_paying_after_end_time() {
        let mut ledger = ledger_with(&["Checking"]);
        let mut state = PayrollState::default();
        let params = SalariedJobParams {
            start_time: 0,
            end_time: 20,
            frequency_days: Some(14.0),
            pay_period: 26.0,
            salary: 104_000.0,
            p_401k_contribution: 0.0,
            p_401k_match: 0.0,
            withholding: WithholdingRates::default(),
            take_home_key: "Checking".into(),
            retirement_key: None,
            withholding_keys: WithholdingKeys::default(),
            updating: Vec::new(),
        };

        for day in 0..=60 {
            salaried_job(&mut ledger, &mut state, &params, day);
        }

        // Paydays 0 and 14 land inside [0, 20]; 28 and later do not.
        let checking = ledger.balance("Checking").unwrap();
        assert!((checking - 8_000.0).abs() < 1e-9, "Expected 8000.00, got {checking:.2}");
    }

    #[test]
    fn test_wage_job_scales_with_hours_and_cadence() {
        let mut ledger = ledger_with(&["Checking"]);
        let mut state = PayrollState::default();
        let params = WageJobParams {
            start_time: 0,
            end_time: i64::MAX,
            frequency_days: Some(14.0),
            pay_period: 26.0,
            hourly_wage: 25.0,
            hours_per_week: 40.0,
            p_401k_contribution: 0.0,
            p_401k_match: 0.0,
            withholding: WithholdingRates::default(),
            take_home_key: "Checking".into(),
            retirement_key: None,
            withholding_keys: WithholdingKeys::default(),
            updating: Vec::new(),
        };

        wage_job(&mut ledger, &mut state, &params, 0);

        // 25/hr * 40 hrs * 2 weeks
        let checking = ledger.balance("Checking").unwrap();
        assert!((checking - 2_000.0).abs() < 1e-9, "Expected 2000.00, got {checking:.2}");
    }

    #[test]
    fn test_raise_overwrites_and_clears_accumulated_bumps() {
        let mut state = PayrollState::default();
        let mut ledger = ledger_with(&["Checking"]);
        let modifiers = vec![
            PayrollModifier::ReoccurringRaise(ReoccurringRaiseParams {
                schedule: Recurrence::every(0, 10.0),
                amount: 1_000.0,
            }),
            PayrollModifier::GetARaise(RaiseParams {
                start_time: 25,
                amount: 90_000.0,
            }),
        ];

        for day in 0..=30 {
            apply_payroll_modifiers(&mut ledger, &mut state, "Checking", &modifiers, day);
        }

        // Bumps at 0/10/20 were wiped by the raise at 25; one more landed at 30.
        assert_eq!(state.pay_override, Some(90_000.0));
        assert!((state.working_pay(50_000.0) - 91_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_shadow_withholding_deposits_are_optional() {
        let mut ledger = ledger_with(&["Checking", "FedTax"]);
        let check = Paycheck::compute(1_000.0, 0.0, 0.0, &rates());
        let keys = WithholdingKeys {
            federal: Some("FedTax".into()),
            state: Some("Missing".into()),
            ..WithholdingKeys::default()
        };

        deposit_paycheck(&mut ledger, &check, "Checking", None, &keys);

        let fed = ledger.balance("FedTax").unwrap();
        assert!((fed - 120.0).abs() < 1e-9, "Expected 120.00, got {fed:.2}");
        // The unresolvable state key skipped silently; net still excludes it.
        let checking = ledger.balance("Checking").unwrap();
        assert!((checking - check.net()).abs() < 1e-9);
    }

    #[test]
    fn test_contribution_change_applies_to_later_paychecks() {
        let mut ledger = ledger_with(&["Checking", "Retirement"]);
        let mut state = PayrollState::default();
        let params = SalariedJobParams {
            start_time: 0,
            end_time: i64::MAX,
            frequency_days: Some(10.0),
            pay_period: 10.0,
            salary: 10_000.0,
            p_401k_contribution: 0.0,
            p_401k_match: 0.0,
            withholding: WithholdingRates::default(),
            take_home_key: "Checking".into(),
            retirement_key: Some("Retirement".into()),
            withholding_keys: WithholdingKeys::default(),
            updating: vec![PayrollModifier::Change401kContribution(RateChangeParams {
                start_time: 5,
                rate: 0.10,
            })],
        };

        for day in 0..=10 {
            salaried_job(&mut ledger, &mut state, &params, day);
        }

        // Day 0 pays 1000 with no contribution; day 10 diverts 100.
        let retirement = ledger.balance("Retirement").unwrap();
        assert!((retirement - 100.0).abs() < 1e-9, "Expected 100.00, got {retirement:.2}");
        let checking = ledger.balance("Checking").unwrap();
        assert!((checking - 1_900.0).abs() < 1e-9, "Expected 1900.00, got {checking:.2}");
    }
}
