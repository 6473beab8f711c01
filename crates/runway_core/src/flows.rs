//! Handlers for the transactional event family: inflows, outflows,
//! transfers, account declarations, corrections, and monthly budgets.
//!
//! Every handler runs once per simulated day after the event has become
//! active. The parent effect is applied first, then any `updating`
//! modifiers that are due the same day, so a modifier always affects the
//! next firing rather than the one that just happened.

use crate::ledger::Ledger;
use crate::model::{
    BudgetModifier, BudgetParams, DeclareAccountsParams, FlowModifier, InflowParams,
    ManualCorrectionParams, OutflowParams, TransferParams,
};
use crate::simulation_state::{BudgetState, FlowState};

/// Seed entries past this count in a `declare_accounts` event are ignored.
pub(crate) const MAX_DECLARED_ACCOUNTS: usize = 5;

pub(crate) fn inflow(ledger: &mut Ledger, state: &mut FlowState, params: &InflowParams, day: i64) {
    if params.schedule.fires_on(day) {
        let amount = state.working_amount(params.amount);
        if amount > 0.0 {
            ledger.credit(&params.to_key, amount);
        }
    }
    apply_flow_modifiers(ledger, state, &params.updating, day);
}

pub(crate) fn outflow(
    ledger: &mut Ledger,
    state: &mut FlowState,
    params: &OutflowParams,
    day: i64,
) {
    if params.schedule.fires_on(day) {
        let amount = state.working_amount(params.amount);
        if amount > 0.0 {
            ledger.debit(&params.from_key, amount);
        }
    }
    apply_flow_modifiers(ledger, state, &params.updating, day);
}

pub(crate) fn transfer(
    ledger: &mut Ledger,
    state: &mut FlowState,
    params: &TransferParams,
    day: i64,
) {
    if params.schedule.fires_on(day) {
        let amount = state.working_amount(params.amount);
        if amount > 0.0 {
            // Both sides must resolve or nothing moves.
            ledger.transfer(&params.from_key, &params.to_key, amount);
        }
    }
    apply_flow_modifiers(ledger, state, &params.updating, day);
}

/// One-shot balance seeding. Each entry resolves on its own, so a typo in
/// one key does not block the others.
pub(crate) fn declare_accounts(ledger: &mut Ledger, params: &DeclareAccountsParams, day: i64) {
    if day != params.start_time {
        return;
    }
    for seed in params.accounts.iter().take(MAX_DECLARED_ACCOUNTS) {
        ledger.set(&seed.key, seed.balance);
    }
}

/// Advisory balance overwrite, e.g. reconciling against a real statement.
pub(crate) fn manual_correction(ledger: &mut Ledger, params: &ManualCorrectionParams, day: i64) {
    if day != params.start_time {
        return;
    }
    ledger.set(&params.key, params.balance);
}

pub(crate) fn monthly_budgeting(
    ledger: &mut Ledger,
    state: &mut BudgetState,
    params: &BudgetParams,
    day: i64,
) {
    if params.schedule.fires_on(day) {
        let total = state.working_total(&params.budget);
        if total > 0.0 {
            ledger.debit(&params.from_key, total);
        }
    }
    apply_budget_modifiers(state, &params.updating, day);
}

// === Modifiers ===

/// Applies the flow modifiers that are due on `day`. Shared by the flow
/// events above and by `payment_schedule`.
pub(crate) fn apply_flow_modifiers(
    ledger: &mut Ledger,
    state: &mut FlowState,
    modifiers: &[FlowModifier],
    day: i64,
) {
    for modifier in modifiers {
        match modifier {
            FlowModifier::UpdateAmount(p) => {
                if day == p.start_time {
                    state.set_amount(p.amount);
                }
            }
            FlowModifier::IncrementAmount(p) => {
                if p.schedule.fires_on(day) {
                    state.add_amount(p.amount);
                }
            }
            FlowModifier::AdditionalInflow(p) => {
                if p.schedule.fires_on(day) && p.amount > 0.0 {
                    ledger.credit(&p.to_key, p.amount);
                }
            }
        }
    }
}

fn apply_budget_modifiers(state: &mut BudgetState, modifiers: &[BudgetModifier], day: i64) {
    for modifier in modifiers {
        match modifier {
            BudgetModifier::UpdateMonthlyBudget(p) => {
                if day == p.start_time {
                    state.overrides.insert(p.category, p.amount);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AccountSeed, AdditionalInflowParams, EnvelopeDef, Recurrence, UpdateAmountParams,
    };

    fn ledger_with(names: &[&str]) -> Ledger {
        let defs: Vec<EnvelopeDef> = names.iter().map(|n| EnvelopeDef::new(*n)).collect();
        Ledger::new(&defs)
    }

    #[test]
    fn test_inflow_fires_only_on_schedule() {
        let mut ledger = ledger_with(&["Checking"]);
        let mut state = FlowState::default();
        let params = InflowParams {
            schedule: Recurrence::every(0, 30.0),
            amount: 100.0,
            to_key: "Checking".into(),
            updating: Vec::new(),
        };

        inflow(&mut ledger, &mut state, &params, 0);
        inflow(&mut ledger, &mut state, &params, 15);
        inflow(&mut ledger, &mut state, &params, 30);

        assert_eq!(ledger.balance("Checking"), Some(200.0));
    }

    #[test]
    fn test_non_positive_amount_skips() {
        let mut ledger = ledger_with(&["Checking"]);
        let mut state = FlowState::default();
        let params = OutflowParams {
            schedule: Recurrence::once(5),
            amount: -50.0,
            from_key: "Checking".into(),
            updating: Vec::new(),
        };

        outflow(&mut ledger, &mut state, &params, 5);

        assert_eq!(ledger.balance("Checking"), Some(0.0));
    }

    #[test]
    fn test_update_amount_affects_subsequent_firings() {
        let mut ledger = ledger_with(&["Checking"]);
        let mut state = FlowState::default();
        let params = InflowParams {
            schedule: Recurrence::every(0, 10.0),
            amount: 100.0,
            to_key: "Checking".into(),
            updating: vec![FlowModifier::UpdateAmount(UpdateAmountParams {
                start_time: 10,
                amount: 250.0,
            })],
        };

        inflow(&mut ledger, &mut state, &params, 0); // 100 at the old amount
        inflow(&mut ledger, &mut state, &params, 10); // fires at 100, then overrides
        inflow(&mut ledger, &mut state, &params, 20); // 250 at the new amount

        assert_eq!(ledger.balance("Checking"), Some(450.0));
    }

    #[test]
    fn test_additional_inflow_deposits_independently() {
        let mut ledger = ledger_with(&["Checking", "Savings"]);
        let mut state = FlowState::default();
        let params = InflowParams {
            schedule: Recurrence::once(0),
            amount: 100.0,
            to_key: "Checking".into(),
            updating: vec![FlowModifier::AdditionalInflow(AdditionalInflowParams {
                schedule: Recurrence::once(7),
                amount: 40.0,
                to_key: "Savings".into(),
            })],
        };

        inflow(&mut ledger, &mut state, &params, 0);
        inflow(&mut ledger, &mut state, &params, 7);

        assert_eq!(ledger.balance("Checking"), Some(100.0));
        assert_eq!(ledger.balance("Savings"), Some(40.0));
    }

    #[test]
    fn test_declare_accounts_caps_at_five_seeds() {
        let mut ledger = ledger_with(&["A", "B", "C", "D", "E", "F"]);
        let accounts = ["A", "B", "C", "D", "E", "F"]
            .iter()
            .map(|key| AccountSeed {
                key: (*key).into(),
                balance: 10.0,
            })
            .collect();
        let params = DeclareAccountsParams {
            start_time: 0,
            accounts,
        };

        declare_accounts(&mut ledger, &params, 0);

        assert_eq!(ledger.balance("E"), Some(10.0));
        assert_eq!(ledger.balance("F"), Some(0.0));
    }

    #[test]
    fn test_declare_accounts_sets_rather_than_adds() {
        let mut ledger = ledger_with(&["Checking"]);
        ledger.set("Checking", 500.0);
        let params = DeclareAccountsParams {
            start_time: 3,
            accounts: vec![AccountSeed {
                key: "Checking".into(),
                balance: 1000.0,
            }],
        };

        declare_accounts(&mut ledger, &params, 2);
        assert_eq!(ledger.balance("Checking"), Some(500.0));

        declare_accounts(&mut ledger, &params, 3);
        assert_eq!(ledger.balance("Checking"), Some(1000.0));
    }
}
