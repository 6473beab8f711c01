//! Day-stepped projection loop.
//!
//! One run walks every day of the horizon in order. Each day applies growth
//! to every envelope first, then dispatches the day's events in plan order,
//! then snapshots the ledger into a `Datum`. The loop touches no clocks, no
//! randomness, and no external state, so two runs over the same plan and
//! horizon produce identical projections.

use std::collections::HashMap;

use crate::dispatch;
use crate::growth;
use crate::ledger::Ledger;
use crate::model::{AccountWarning, Datum, ParameterUpdate, Projection};
use crate::plan::Plan;
use crate::simulation_state::SimulationState;
use crate::validate;

#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// Projects a plan across `start_day..=end_day` inclusive.
///
/// Day numbers are offsets from the plan's epoch (conventionally the
/// holder's birth date). An empty range produces an empty projection.
/// Advisory plan issues are logged, never fatal: a bad reference skips its
/// effect each day and the rest of the plan proceeds.
pub fn simulate(plan: &Plan, start_day: i64, end_day: i64) -> Projection {
    for issue in validate::validate_plan(plan) {
        tracing::warn!("{issue}");
    }
    tracing::debug!(start_day, end_day, events = plan.events.len(), "projection started");

    let mut state = SimulationState::new(plan);
    // Preallocation only; clamped so a huge horizon cannot blow the reserve.
    let capacity = end_day
        .saturating_sub(start_day)
        .saturating_add(1)
        .clamp(0, 366 * 200) as usize;
    let mut data = Vec::with_capacity(capacity);

    for day in start_day..=end_day {
        for envelope in state.ledger.iter_mut() {
            growth::grow(envelope);
        }
        dispatch::process_day(plan, &mut state, day);
        data.push(snapshot(&state.ledger, day));
    }

    Projection {
        data,
        parameter_updates: state.parameter_updates,
    }
}

/// `simulate`, with the run's correction batch handed to a callback.
///
/// The callback fires at most once, after the run completes, and only when
/// the run proposed corrections.
pub fn run_simulation<F>(
    plan: &Plan,
    start_day: i64,
    end_day: i64,
    mut on_parameter_updates: F,
) -> Vec<Datum>
where
    F: FnMut(&[ParameterUpdate]),
{
    let projection = simulate(plan, start_day, end_day);
    if !projection.parameter_updates.is_empty() {
        on_parameter_updates(&projection.parameter_updates);
    }
    projection.data
}

/// Days on which a spendable envelope was overdrawn.
///
/// Debt-category envelopes are expected to be negative and are skipped;
/// anything else below zero in the net-worth partition is worth a look.
pub fn account_warnings(plan: &Plan, data: &[Datum]) -> Vec<AccountWarning> {
    let mut warnings = Vec::new();
    for datum in data {
        for def in &plan.envelopes {
            if def.is_debt() {
                continue;
            }
            if let Some(&balance) = datum.parts.get(&def.name)
                && balance < 0.0
            {
                warnings.push(AccountWarning {
                    envelope: def.name.clone(),
                    date: datum.date,
                    balance,
                });
            }
        }
    }
    warnings
}

/// Projects several plan variants over the same horizon.
#[cfg(feature = "parallel")]
pub fn simulate_scenarios(plans: &[Plan], start_day: i64, end_day: i64) -> Vec<Projection> {
    plans
        .into_par_iter()
        .map(|plan| simulate(plan, start_day, end_day))
        .collect()
}

/// Projects several plan variants over the same horizon.
#[cfg(not(feature = "parallel"))]
pub fn simulate_scenarios(plans: &[Plan], start_day: i64, end_day: i64) -> Vec<Projection> {
    plans
        .iter()
        .map(|plan| simulate(plan, start_day, end_day))
        .collect()
}

/// One day of output. Net worth sums the counted partition, with
/// Debt-category balances contributing the negative of their magnitude.
fn snapshot(ledger: &Ledger, day: i64) -> Datum {
    let mut value = 0.0;
    let mut parts = HashMap::new();
    let mut non_networth_parts = HashMap::new();

    for envelope in ledger.iter() {
        if envelope.counts_toward_net_worth() {
            if envelope.is_debt() {
                value -= envelope.balance.abs();
            } else {
                value += envelope.balance;
            }
            parts.insert(envelope.name.clone(), envelope.balance);
        } else {
            non_networth_parts.insert(envelope.name.clone(), envelope.balance);
        }
    }

    Datum {
        date: day,
        value,
        parts,
        non_networth_parts,
    }
}
