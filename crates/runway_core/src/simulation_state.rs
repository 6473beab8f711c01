//! Run-owned simulation state
//!
//! Everything a run accumulates lives here, never on the plan: the envelope
//! ledger and one runtime slot per event, in event-list order. Working
//! parameters are re-derived from the persisted records plus the
//! overrides/deltas collected in these slots, so the plan itself stays
//! immutable and can be shared across runs.

use rustc_hash::FxHashMap;

use crate::ledger::Ledger;
use crate::model::{BudgetCategory, EventKind, MonthlyBudget, ParameterUpdate};
use crate::plan::Plan;

/// All mutable state of one run.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub ledger: Ledger,
    /// One slot per plan event, same order as `plan.events`
    pub runtime: Vec<EventRuntime>,
    /// Corrections accumulated across the run, in emission order
    pub parameter_updates: Vec<ParameterUpdate>,
}

impl SimulationState {
    pub fn new(plan: &Plan) -> Self {
        Self {
            ledger: Ledger::new(&plan.envelopes),
            runtime: plan.events.iter().map(|e| EventRuntime::for_kind(&e.kind)).collect(),
            parameter_updates: Vec::new(),
        }
    }
}

/// Per-event runtime state, matching the event's kind family.
#[derive(Debug, Clone)]
pub enum EventRuntime {
    /// Kinds that carry nothing across days
    Inert,
    Flow(FlowState),
    Budget(BudgetState),
    Loan(LoanState),
    Payroll(PayrollState),
    Schedule(ScheduleState),
}

impl EventRuntime {
    pub fn for_kind(kind: &EventKind) -> Self {
        match kind {
            EventKind::Inflow(_) | EventKind::Outflow(_) | EventKind::TransferMoney(_) => {
                EventRuntime::Flow(FlowState::default())
            }
            EventKind::MonthlyBudgeting(_) => EventRuntime::Budget(BudgetState::default()),
            EventKind::BuyHouse(_) | EventKind::BuyCar(_) => {
                EventRuntime::Loan(LoanState::default())
            }
            EventKind::PaymentSchedule(_) => EventRuntime::Schedule(ScheduleState::default()),
            EventKind::GetJob(_) | EventKind::GetWageJob(_) => {
                EventRuntime::Payroll(PayrollState::default())
            }
            EventKind::DeclareAccounts(_)
            | EventKind::ManualCorrection(_)
            | EventKind::Unknown => EventRuntime::Inert,
        }
    }

    pub fn as_flow_mut(&mut self) -> Option<&mut FlowState> {
        match self {
            EventRuntime::Flow(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_budget_mut(&mut self) -> Option<&mut BudgetState> {
        match self {
            EventRuntime::Budget(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_loan_mut(&mut self) -> Option<&mut LoanState> {
        match self {
            EventRuntime::Loan(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_payroll_mut(&mut self) -> Option<&mut PayrollState> {
        match self {
            EventRuntime::Payroll(state) => Some(state),
            _ => None,
        }
    }

    pub fn as_schedule_mut(&mut self) -> Option<&mut ScheduleState> {
        match self {
            EventRuntime::Schedule(state) => Some(state),
            _ => None,
        }
    }
}

/// Accumulated amount adjustments for a flow-family event.
#[derive(Debug, Clone, Default)]
pub struct FlowState {
    /// Absolute overwrite from the latest `update_amount`
    pub amount_override: Option<f64>,
    /// Running sum of `increment_amount` firings
    pub amount_delta: f64,
}

impl FlowState {
    /// The amount the parent actually moves, given its persisted base.
    pub fn working_amount(&self, base: f64) -> f64 {
        self.amount_override.unwrap_or(base) + self.amount_delta
    }

    /// `update_amount`: overwrite and drop accumulated increments.
    pub fn set_amount(&mut self, amount: f64) {
        self.amount_override = Some(amount);
        self.amount_delta = 0.0;
    }

    /// `increment_amount`: cumulative addition.
    pub fn add_amount(&mut self, amount: f64) {
        self.amount_delta += amount;
    }
}

/// Per-category overwrites for a `monthly_budgeting` event.
#[derive(Debug, Clone, Default)]
pub struct BudgetState {
    pub overrides: FxHashMap<BudgetCategory, f64>,
}

impl BudgetState {
    pub fn working_amount(&self, budget: &MonthlyBudget, category: BudgetCategory) -> f64 {
        self.overrides
            .get(&category)
            .copied()
            .unwrap_or_else(|| budget.amount(category))
    }

    /// Total withdrawn per firing across all categories.
    pub fn working_total(&self, budget: &MonthlyBudget) -> f64 {
        BudgetCategory::ALL
            .iter()
            .map(|&c| self.working_amount(budget, c))
            .sum()
    }
}

/// Loan-family state: amortization once booked, plus house extras.
#[derive(Debug, Clone, Default)]
pub struct LoanState {
    /// Present from the trigger day on; its absence marks the untriggered state
    pub amortization: Option<AmortizationState>,
    /// Latest `new_appraisal` value; property tax basis when set
    pub appraised_value: Option<f64>,
    /// Loan envelope the debt currently sits in; set on refinance
    pub moved_loan_key: Option<String>,
    /// Set by `sell_house`; stops all further processing
    pub sold_on: Option<i64>,
}

/// The running amortization schedule of one loan.
#[derive(Debug, Clone)]
pub struct AmortizationState {
    /// Fixed payment per period
    pub payment_amount: f64,
    /// Outstanding principal, re-read from the loan envelope each day
    pub remaining_principal: f64,
    /// Day the loan was booked
    pub start_time: i64,
    /// Day the loan went terminal; `None` while active
    pub end_day: Option<i64>,
    /// Cursor for the next scheduled payment; advances by whole periods
    pub next_payment_day: i64,
    pub total_payments: u32,
    pub payments_made: u32,
    pub period_days: i64,
}

impl AmortizationState {
    /// Active means booked, not yet terminal, and payments remaining.
    pub fn is_active(&self) -> bool {
        self.end_day.is_none()
            && self.remaining_principal > 0.0
            && self.payments_made < self.total_payments
    }
}

/// Accumulated pay adjustments for a payroll event.
#[derive(Debug, Clone, Default)]
pub struct PayrollState {
    /// Absolute salary/wage overwrite from the latest `get_a_raise`
    pub pay_override: Option<f64>,
    /// Running sum of `reoccurring_raise` firings
    pub pay_delta: f64,
    pub hours_override: Option<f64>,
    pub contribution_override: Option<f64>,
    pub match_override: Option<f64>,
}

impl PayrollState {
    /// Working annual salary (or hourly wage), given the persisted base.
    pub fn working_pay(&self, base: f64) -> f64 {
        self.pay_override.unwrap_or(base) + self.pay_delta
    }

    /// `get_a_raise`: overwrite and drop accumulated bumps.
    pub fn set_pay(&mut self, pay: f64) {
        self.pay_override = Some(pay);
        self.pay_delta = 0.0;
    }
}

/// State of a `payment_schedule` series.
#[derive(Debug, Clone, Default)]
pub struct ScheduleState {
    /// Amount adjustments, shared with the flow family
    pub flow: FlowState,
    /// Day the series closed because the loan reached zero
    pub closed_on: Option<i64>,
}
