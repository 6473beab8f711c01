//! Per-day event dispatch.
//!
//! Events apply strictly in plan order, so two events touching the same
//! envelope on the same day resolve deterministically: the earlier entry in
//! the list settles first.

use crate::flows;
use crate::ledger::Ledger;
use crate::loans;
use crate::model::{Event, EventKind, ParameterUpdate};
use crate::payroll;
use crate::plan::Plan;
use crate::simulation_state::{EventRuntime, SimulationState};

/// Runs every active event against the ledger for one day.
pub(crate) fn process_day(plan: &Plan, state: &mut SimulationState, day: i64) {
    let SimulationState {
        ledger,
        runtime,
        parameter_updates,
    } = state;

    for (slot, event) in runtime.iter_mut().zip(&plan.events) {
        if event.start_time() > day {
            continue;
        }
        apply_event(ledger, slot, parameter_updates, event, day);
    }
}

fn apply_event(
    ledger: &mut Ledger,
    slot: &mut EventRuntime,
    updates: &mut Vec<ParameterUpdate>,
    event: &Event,
    day: i64,
) {
    match &event.kind {
        EventKind::Inflow(params) => {
            if let Some(flow) = slot.as_flow_mut() {
                flows::inflow(ledger, flow, params, day);
            }
        }
        EventKind::Outflow(params) => {
            if let Some(flow) = slot.as_flow_mut() {
                flows::outflow(ledger, flow, params, day);
            }
        }
        EventKind::TransferMoney(params) => {
            if let Some(flow) = slot.as_flow_mut() {
                flows::transfer(ledger, flow, params, day);
            }
        }
        EventKind::DeclareAccounts(params) => {
            flows::declare_accounts(ledger, params, day);
        }
        EventKind::ManualCorrection(params) => {
            flows::manual_correction(ledger, params, day);
        }
        EventKind::MonthlyBudgeting(params) => {
            if let Some(budget) = slot.as_budget_mut() {
                flows::monthly_budgeting(ledger, budget, params, day);
            }
        }
        EventKind::BuyHouse(params) => {
            if let Some(loan) = slot.as_loan_mut() {
                loans::buy_house(ledger, loan, updates, event.id, params, day);
            }
        }
        EventKind::BuyCar(params) => {
            if let Some(loan) = slot.as_loan_mut() {
                loans::buy_car(ledger, loan, updates, event.id, params, day);
            }
        }
        EventKind::PaymentSchedule(params) => {
            if let Some(schedule) = slot.as_schedule_mut() {
                loans::payment_schedule(ledger, schedule, updates, event.id, params, day);
            }
        }
        EventKind::GetJob(params) => {
            if let Some(job) = slot.as_payroll_mut() {
                payroll::salaried_job(ledger, job, params, day);
            }
        }
        EventKind::GetWageJob(params) => {
            if let Some(job) = slot.as_payroll_mut() {
                payroll::wage_job(ledger, job, params, day);
            }
        }
        // Unrecognized persisted event types are carried but never applied.
        EventKind::Unknown => {}
    }
}
