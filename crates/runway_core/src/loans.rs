//! Handlers for the loan family: `buy_house`, `buy_car`, and
//! `payment_schedule`.
//!
//! A purchase event books its effects once on the trigger day, then services
//! the amortization schedule every day after: re-read the loan envelope's
//! live balance, make the scheduled payment when the cursor comes due, and go
//! terminal once the principal clears or the payments run out. Going terminal
//! emits a single `end_time` parameter update so callers can shrink the
//! stored horizon of a loan paid off early.

use crate::flows;
use crate::ledger::Ledger;
use crate::model::{
    CarParams, EventId, HouseParams, LoanModifier, ParameterUpdate, PaymentScheduleParams,
    RefinanceParams, SellHouseParams,
};
use crate::simulation_state::{AmortizationState, LoanState, ScheduleState};

/// Fixed per-period payment of a fully-amortizing loan.
///
/// Degenerate inputs (nothing borrowed, no payments) price to zero rather
/// than dividing by zero.
pub(crate) fn amortized_payment(principal: f64, rate_per_period: f64, periods: u32) -> f64 {
    if principal <= 0.0 || periods == 0 {
        return 0.0;
    }
    if rate_per_period == 0.0 {
        return principal / periods as f64;
    }
    principal * rate_per_period / (1.0 - (1.0 + rate_per_period).powi(-(periods as i32)))
}

/// Schedule for a loan opened on `day` at the given annual rate.
fn open_amortization(
    principal: f64,
    annual_rate: f64,
    term_years: f64,
    period_days: i64,
    day: i64,
) -> AmortizationState {
    let (rate_per_period, total_payments) = if period_days > 0 {
        let n = (term_years * 365.0 / period_days as f64).round();
        let periods = if n > 0.0 { n as u32 } else { 0 };
        (annual_rate * period_days as f64 / 365.0, periods)
    } else {
        (0.0, 0)
    };
    AmortizationState {
        payment_amount: amortized_payment(principal, rate_per_period, total_payments),
        remaining_principal: principal,
        start_time: day,
        end_day: None,
        next_payment_day: day + period_days,
        total_payments,
        payments_made: 0,
        period_days,
    }
}

pub(crate) fn buy_house(
    ledger: &mut Ledger,
    state: &mut LoanState,
    updates: &mut Vec<ParameterUpdate>,
    event_id: EventId,
    params: &HouseParams,
    day: i64,
) {
    if day == params.start_time && state.amortization.is_none() {
        let principal = (params.home_value - params.down_payment).max(0.0);
        if params.pay_down_payment && params.down_payment > 0.0 {
            ledger.debit(&params.from_key, params.down_payment);
        }
        if params.book_asset {
            ledger.credit(&params.asset_key, params.home_value);
        }
        if params.book_loan {
            ledger.debit(&params.loan_key, principal);
        }
        state.amortization = Some(open_amortization(
            principal,
            params.rate,
            params.term_years,
            params.payment_period_days.round() as i64,
            day,
        ));
    }

    if state.sold_on.is_none() {
        let period_tax = if params.charge_property_tax {
            let basis = state.appraised_value.unwrap_or(params.home_value);
            basis * params.property_tax_rate / 12.0
        } else {
            0.0
        };
        let loan_key = state.moved_loan_key.as_deref().unwrap_or(&params.loan_key);
        if let Some(am) = state.amortization.as_mut() {
            service_loan(
                ledger,
                am,
                loan_key,
                &params.from_key,
                params.make_payments,
                period_tax,
                day,
            );
        }
    }

    apply_house_modifiers(ledger, state, params, day);
    finish_if_terminal(state, updates, event_id, day, params.apply_final_correction);
}

pub(crate) fn buy_car(
    ledger: &mut Ledger,
    state: &mut LoanState,
    updates: &mut Vec<ParameterUpdate>,
    event_id: EventId,
    params: &CarParams,
    day: i64,
) {
    if day == params.start_time && state.amortization.is_none() {
        let principal = (params.car_value - params.down_payment).max(0.0);
        if params.down_payment > 0.0 {
            ledger.debit(&params.from_key, params.down_payment);
        }
        ledger.credit(&params.asset_key, params.car_value);
        ledger.debit(&params.loan_key, principal);
        state.amortization = Some(open_amortization(
            principal,
            params.rate,
            params.term_years,
            params.payment_period_days.round() as i64,
            day,
        ));
    }

    if let Some(am) = state.amortization.as_mut() {
        service_loan(ledger, am, &params.loan_key, &params.from_key, true, 0.0, day);
    }

    apply_car_modifiers(ledger, state, params, day);
    finish_if_terminal(state, updates, event_id, day, true);
}

/// Standalone repayment series against an already-booked loan envelope.
pub(crate) fn payment_schedule(
    ledger: &mut Ledger,
    state: &mut ScheduleState,
    updates: &mut Vec<ParameterUpdate>,
    event_id: EventId,
    params: &PaymentScheduleParams,
    day: i64,
) {
    if state.closed_on.is_some() {
        return;
    }
    if params.schedule.fires_on(day)
        && let Some(balance) = ledger.balance(&params.loan_key)
    {
        let outstanding = (-balance).max(0.0);
        if outstanding <= 0.0 {
            state.closed_on = Some(day);
            updates.push(ParameterUpdate::end_time(event_id, day));
        } else {
            let working = state.flow.working_amount(params.amount);
            let payment = working.min(outstanding);
            if payment > 0.0
                && ledger.transfer(&params.from_key, &params.loan_key, payment)
                && working >= outstanding
            {
                // This firing cleared the loan.
                state.closed_on = Some(day);
                updates.push(ParameterUpdate::end_time(event_id, day));
            }
        }
    }
    flows::apply_flow_modifiers(ledger, &mut state.flow, &params.updating, day);
}

/// Daily servicing of an open amortization schedule.
///
/// The outstanding principal is re-read from the loan envelope so extra
/// payments or outside credits shorten the loan. The payment cursor advances
/// whether or not the payment itself is enabled; property tax rides the same
/// cadence.
fn service_loan(
    ledger: &mut Ledger,
    am: &mut AmortizationState,
    loan_key: &str,
    from_key: &str,
    make_payments: bool,
    period_tax: f64,
    day: i64,
) {
    if !am.is_active() {
        return;
    }
    if let Some(balance) = ledger.balance(loan_key) {
        am.remaining_principal = (-balance).max(0.0);
    }
    if am.remaining_principal <= 0.0 {
        return;
    }
    if day >= am.next_payment_day {
        if make_payments {
            let payment = am.payment_amount.min(am.remaining_principal);
            if payment > 0.0 && ledger.transfer(from_key, loan_key, payment) {
                am.remaining_principal -= payment;
                am.payments_made += 1;
            }
        }
        if period_tax > 0.0 {
            ledger.debit(from_key, period_tax);
        }
        am.next_payment_day += am.period_days;
    }
}

/// Marks the loan terminal once the principal clears or payments run out,
/// emitting the `end_time` correction exactly once.
fn finish_if_terminal(
    state: &mut LoanState,
    updates: &mut Vec<ParameterUpdate>,
    event_id: EventId,
    day: i64,
    emit_update: bool,
) {
    let Some(am) = state.amortization.as_mut() else {
        return;
    };
    if am.end_day.is_some() {
        return;
    }
    if am.remaining_principal <= 0.0 || am.payments_made >= am.total_payments {
        am.end_day = Some(day);
        if emit_update {
            updates.push(ParameterUpdate::end_time(event_id, day));
        }
    }
}

// === Modifiers ===

fn apply_house_modifiers(
    ledger: &mut Ledger,
    state: &mut LoanState,
    params: &HouseParams,
    day: i64,
) {
    if state.sold_on.is_some() {
        return;
    }
    for modifier in &params.updating {
        match modifier {
            LoanModifier::NewAppraisal(p) => {
                if day == p.start_time {
                    let basis = state.appraised_value.unwrap_or(params.home_value);
                    ledger.credit(&params.asset_key, p.value - basis);
                    state.appraised_value = Some(p.value);
                }
            }
            LoanModifier::ExtraMortgagePayment(p) | LoanModifier::PayLoanEarly(p) => {
                if p.schedule.fires_on(day) {
                    extra_principal_payment(
                        ledger,
                        state,
                        &params.loan_key,
                        &params.from_key,
                        p.amount,
                    );
                }
            }
            LoanModifier::LatePayment(p) => {
                if p.schedule.fires_on(day) && p.amount > 0.0 {
                    ledger.debit(&params.from_key, p.amount);
                }
            }
            LoanModifier::SellHouse(p) => {
                if day == p.start_time {
                    sell_house(ledger, state, params, p, day);
                }
            }
            LoanModifier::RefinanceHome(p) => {
                if day == p.start_time {
                    refinance(ledger, state, params, p, day);
                }
            }
            // Car-scoped; inert under a house purchase.
            LoanModifier::CarRepair(_) => {}
        }
    }
}

fn apply_car_modifiers(ledger: &mut Ledger, state: &mut LoanState, params: &CarParams, day: i64) {
    for modifier in &params.updating {
        match modifier {
            LoanModifier::ExtraMortgagePayment(p) | LoanModifier::PayLoanEarly(p) => {
                if p.schedule.fires_on(day) {
                    extra_principal_payment(
                        ledger,
                        state,
                        &params.loan_key,
                        &params.from_key,
                        p.amount,
                    );
                }
            }
            LoanModifier::LatePayment(p) | LoanModifier::CarRepair(p) => {
                if p.schedule.fires_on(day) && p.amount > 0.0 {
                    ledger.debit(&params.from_key, p.amount);
                }
            }
            // House-scoped; inert under a car purchase.
            LoanModifier::NewAppraisal(_)
            | LoanModifier::SellHouse(_)
            | LoanModifier::RefinanceHome(_) => {}
        }
    }
}

/// Pays down principal outside the regular schedule, clamped to what is
/// actually owed.
fn extra_principal_payment(
    ledger: &mut Ledger,
    state: &mut LoanState,
    default_loan_key: &str,
    from_key: &str,
    amount: f64,
) {
    let Some(am) = state.amortization.as_mut() else {
        return;
    };
    if am.end_day.is_some() {
        return;
    }
    let loan_key = state.moved_loan_key.as_deref().unwrap_or(default_loan_key);
    let Some(balance) = ledger.balance(loan_key) else {
        return;
    };
    let payment = amount.min((-balance).max(0.0));
    if payment > 0.0 && ledger.transfer(from_key, loan_key, payment) {
        am.remaining_principal = (am.remaining_principal - payment).max(0.0);
    }
}

/// Takes the house off the books, settles the mortgage out of the proceeds,
/// and credits the remainder to the payer. A shortfall debits the payer.
fn sell_house(
    ledger: &mut Ledger,
    state: &mut LoanState,
    params: &HouseParams,
    sale: &SellHouseParams,
    day: i64,
) {
    let Some(am) = state.amortization.as_mut() else {
        return;
    };
    let loan_key = state.moved_loan_key.as_deref().unwrap_or(&params.loan_key);
    let outstanding = ledger.balance(loan_key).map_or(0.0, |b| (-b).max(0.0));
    ledger.set(&params.asset_key, 0.0);
    if outstanding > 0.0 {
        ledger.credit(loan_key, outstanding);
    }
    am.remaining_principal = 0.0;
    ledger.credit(&params.from_key, sale.sale_price - outstanding);
    state.sold_on = Some(day);
}

/// Reprices the live balance at a new rate and term, optionally moving the
/// debt into a different envelope.
fn refinance(
    ledger: &mut Ledger,
    state: &mut LoanState,
    params: &HouseParams,
    refi: &RefinanceParams,
    day: i64,
) {
    let Some(am) = state.amortization.as_mut() else {
        return;
    };
    if am.end_day.is_some() {
        return;
    }
    let old_key = state.moved_loan_key.as_deref().unwrap_or(&params.loan_key);
    let Some(balance) = ledger.balance(old_key) else {
        return;
    };
    let outstanding = (-balance).max(0.0);
    if outstanding <= 0.0 {
        return;
    }

    if let Some(new_key) = refi.new_loan_key.as_deref()
        && ledger.transfer(new_key, old_key, outstanding)
    {
        state.moved_loan_key = Some(new_key.to_string());
    }

    let period_days = am.period_days;
    *am = open_amortization(outstanding, refi.rate, refi.term_years, period_days, day);
}
