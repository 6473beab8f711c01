//! Advisory plan validation.
//!
//! The engine never fails a run over a bad plan: unresolved envelopes and
//! degenerate parameters simply skip their effects day by day. This pass
//! surfaces those silent skips up front so a caller can warn before
//! simulating. Every issue is advisory; `simulate` logs them and proceeds.

use std::collections::HashSet;
use std::fmt;

use crate::model::{
    EventId, EventKind, FlowModifier, GrowthModel, LoanModifier, PayrollModifier, Recurrence,
    WithholdingKeys,
};
use crate::plan::Plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A money-moving effect will silently skip or never fire.
    Warning,
    /// Defined but almost certainly unintended, e.g. an inert modifier.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// One advisory finding about a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub severity: Severity,
    /// Present when the finding is scoped to a single event
    pub event_id: Option<EventId>,
    pub message: String,
}

impl Issue {
    fn warning(event_id: impl Into<Option<EventId>>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            event_id: event_id.into(),
            message: message.into(),
        }
    }

    fn info(event_id: impl Into<Option<EventId>>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            event_id: event_id.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.event_id {
            Some(id) => write!(f, "[{}] event {}: {}", self.severity, id, self.message),
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}

/// Scans a plan for references and parameters that will skip at runtime.
pub fn validate_plan(plan: &Plan) -> Vec<Issue> {
    let mut issues = Vec::new();
    let names: HashSet<&str> = plan.envelopes.iter().map(|e| e.name.as_str()).collect();

    check_envelopes(plan, &mut issues);
    for event in &plan.events {
        check_event(event.id, &event.kind, &names, &mut issues);
    }
    issues
}

fn check_envelopes(plan: &Plan, issues: &mut Vec<Issue>) {
    let mut seen = HashSet::new();
    for def in &plan.envelopes {
        if !seen.insert(def.name.as_str()) {
            issues.push(Issue::warning(
                None,
                format!("duplicate envelope \"{}\"; later definitions are shadowed", def.name),
            ));
        }
        if def.growth == GrowthModel::DepreciationByDays
            && def.days_of_usefulness.unwrap_or(0) == 0
        {
            issues.push(Issue::warning(
                None,
                format!(
                    "envelope \"{}\" uses depreciation_by_days without a positive days_of_usefulness; growth is inert",
                    def.name
                ),
            ));
        }
    }
}

fn check_event(id: EventId, kind: &EventKind, names: &HashSet<&str>, issues: &mut Vec<Issue>) {
    match kind {
        EventKind::Inflow(p) => {
            check_schedule(id, &p.schedule, issues);
            check_key(id, "to_key", &p.to_key, names, issues);
            check_flow_modifiers(id, &p.updating, names, issues);
        }
        EventKind::Outflow(p) => {
            check_schedule(id, &p.schedule, issues);
            check_key(id, "from_key", &p.from_key, names, issues);
            check_flow_modifiers(id, &p.updating, names, issues);
        }
        EventKind::TransferMoney(p) => {
            check_schedule(id, &p.schedule, issues);
            check_key(id, "from_key", &p.from_key, names, issues);
            check_key(id, "to_key", &p.to_key, names, issues);
            check_flow_modifiers(id, &p.updating, names, issues);
        }
        EventKind::DeclareAccounts(p) => {
            if p.accounts.len() > crate::flows::MAX_DECLARED_ACCOUNTS {
                issues.push(Issue::warning(
                    id,
                    format!(
                        "declares {} accounts; entries past the first {} are ignored",
                        p.accounts.len(),
                        crate::flows::MAX_DECLARED_ACCOUNTS
                    ),
                ));
            }
            for seed in &p.accounts {
                check_key(id, "account key", &seed.key, names, issues);
            }
        }
        EventKind::ManualCorrection(p) => {
            check_key(id, "key", &p.key, names, issues);
        }
        EventKind::MonthlyBudgeting(p) => {
            check_schedule(id, &p.schedule, issues);
            check_key(id, "from_key", &p.from_key, names, issues);
        }
        EventKind::BuyHouse(p) => {
            check_key(id, "from_key", &p.from_key, names, issues);
            check_key(id, "asset_key", &p.asset_key, names, issues);
            check_key(id, "loan_key", &p.loan_key, names, issues);
            check_loan_terms(
                id,
                p.home_value - p.down_payment,
                p.term_years,
                p.payment_period_days,
                issues,
            );
            for modifier in &p.updating {
                if let LoanModifier::RefinanceHome(refi) = modifier
                    && let Some(new_key) = refi.new_loan_key.as_deref()
                {
                    check_key(id, "new_loan_key", new_key, names, issues);
                }
                if matches!(modifier, LoanModifier::CarRepair(_)) {
                    issues.push(Issue::info(id, "car_repair modifier is inert under buy_house"));
                }
            }
        }
        EventKind::BuyCar(p) => {
            check_key(id, "from_key", &p.from_key, names, issues);
            check_key(id, "asset_key", &p.asset_key, names, issues);
            check_key(id, "loan_key", &p.loan_key, names, issues);
            check_loan_terms(
                id,
                p.car_value - p.down_payment,
                p.term_years,
                p.payment_period_days,
                issues,
            );
            for modifier in &p.updating {
                let inert = match modifier {
                    LoanModifier::NewAppraisal(_) => Some("new_appraisal"),
                    LoanModifier::SellHouse(_) => Some("sell_house"),
                    LoanModifier::RefinanceHome(_) => Some("refinance_home"),
                    _ => None,
                };
                if let Some(name) = inert {
                    issues.push(Issue::info(
                        id,
                        format!("{name} modifier is inert under buy_car"),
                    ));
                }
            }
        }
        EventKind::PaymentSchedule(p) => {
            check_schedule(id, &p.schedule, issues);
            check_key(id, "from_key", &p.from_key, names, issues);
            check_key(id, "loan_key", &p.loan_key, names, issues);
            check_flow_modifiers(id, &p.updating, names, issues);
        }
        EventKind::GetJob(p) => {
            check_payroll_cadence(id, p.frequency_days, p.pay_period, issues);
            if p.pay_period <= 0.0 {
                issues.push(Issue::warning(
                    id,
                    "pay_period must be positive to derive a per-paycheck gross",
                ));
            }
            check_key(id, "take_home_key", &p.take_home_key, names, issues);
            if let Some(key) = p.retirement_key.as_deref() {
                check_key(id, "retirement_key", key, names, issues);
            }
            check_withholding_keys(id, &p.withholding_keys, names, issues);
            for modifier in &p.updating {
                if matches!(modifier, PayrollModifier::ChangeHours(_)) {
                    issues.push(Issue::info(id, "change_hours modifier is inert under get_job"));
                }
            }
        }
        EventKind::GetWageJob(p) => {
            check_payroll_cadence(id, p.frequency_days, p.pay_period, issues);
            check_key(id, "take_home_key", &p.take_home_key, names, issues);
            if let Some(key) = p.retirement_key.as_deref() {
                check_key(id, "retirement_key", key, names, issues);
            }
            check_withholding_keys(id, &p.withholding_keys, names, issues);
        }
        EventKind::Unknown => {
            issues.push(Issue::info(id, "unrecognized event type is carried but never applied"));
        }
    }
}

fn check_key(id: EventId, role: &str, key: &str, names: &HashSet<&str>, issues: &mut Vec<Issue>) {
    if !names.contains(key) {
        issues.push(Issue::warning(
            id,
            format!("{role} \"{key}\" does not match any envelope; its effect will skip"),
        ));
    }
}

fn check_schedule(id: EventId, schedule: &Recurrence, issues: &mut Vec<Issue>) {
    if schedule.is_recurring && schedule.cadence_days() <= 0 {
        issues.push(Issue::warning(
            id,
            "recurring schedule has a non-positive frequency; it only fires on its start day",
        ));
    }
    if schedule.end_time < schedule.start_time {
        issues.push(Issue::warning(
            id,
            "end_time precedes start_time; the schedule only fires on its start day",
        ));
    }
}

fn check_loan_terms(
    id: EventId,
    principal: f64,
    term_years: f64,
    payment_period_days: f64,
    issues: &mut Vec<Issue>,
) {
    if principal <= 0.0 {
        issues.push(Issue::warning(
            id,
            "non-positive financed principal; nothing is borrowed and the loan goes terminal on its trigger day",
        ));
    }
    if term_years <= 0.0 || payment_period_days <= 0.0 {
        issues.push(Issue::warning(
            id,
            "non-positive loan term or payment period; the payment prices to zero and the loan goes terminal immediately",
        ));
    }
}

fn check_payroll_cadence(
    id: EventId,
    frequency_days: Option<f64>,
    pay_period: f64,
    issues: &mut Vec<Issue>,
) {
    if crate::payroll::cadence_days(frequency_days, pay_period) <= 0 {
        issues.push(Issue::warning(
            id,
            "no payday cadence derivable from frequency_days or pay_period; the job never pays",
        ));
    }
}

fn check_flow_modifiers(
    id: EventId,
    modifiers: &[FlowModifier],
    names: &HashSet<&str>,
    issues: &mut Vec<Issue>,
) {
    for modifier in modifiers {
        if let FlowModifier::AdditionalInflow(p) = modifier {
            check_key(id, "additional_inflow to_key", &p.to_key, names, issues);
        }
    }
}

fn check_withholding_keys(
    id: EventId,
    keys: &WithholdingKeys,
    names: &HashSet<&str>,
    issues: &mut Vec<Issue>,
) {
    let entries = [
        ("withholding key (federal)", keys.federal.as_deref()),
        ("withholding key (state)", keys.state.as_deref()),
        ("withholding key (local)", keys.local.as_deref()),
        ("withholding key (social_security)", keys.social_security.as_deref()),
        ("withholding key (medicare)", keys.medicare.as_deref()),
    ];
    for (role, key) in entries {
        if let Some(key) = key {
            check_key(id, role, key, names, issues);
        }
    }
}
