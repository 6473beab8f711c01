//! Event kinds and their parameter records
//!
//! Events are the mechanism for changing balances over time. Every kind is a
//! closed enum variant with a strongly-typed parameter record; the wire format
//! is internally tagged with the persisted snake_case type names. Each kind
//! carries an ordered list of nested "updating" modifiers, themselves typed
//! and scoped to the parent's family. Modifiers adjust the parent's *working*
//! parameters for the rest of the run; the records here are never mutated by
//! the engine.

use serde::{Deserialize, Serialize};

use super::ids::EventId;
use super::schedule::{NO_END, Recurrence};

fn default_true() -> bool {
    true
}

fn default_payment_period() -> f64 {
    30.0
}

fn no_end() -> i64 {
    NO_END
}

/// One event instance from the persisted plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Stable reference to the persisted event, echoed in parameter updates
    pub id: EventId,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl Event {
    pub fn new(id: EventId, kind: EventKind) -> Self {
        Self { id, kind }
    }

    /// First day this event can have any effect, nested modifiers included.
    pub fn start_time(&self) -> i64 {
        self.kind.start_time()
    }
}

/// Closed set of event kinds, one typed payload per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    // === Transactional ===
    /// Deposit into one envelope on a schedule
    Inflow(InflowParams),
    /// Withdrawal from one envelope on a schedule
    Outflow(OutflowParams),
    /// Atomic move between two envelopes on a schedule
    TransferMoney(TransferParams),
    /// Set up to five envelopes to absolute balances; seeds starting money
    DeclareAccounts(DeclareAccountsParams),
    /// Set one envelope to an absolute balance
    ManualCorrection(ManualCorrectionParams),
    /// Withdraw a set of category amounts from one envelope each period
    MonthlyBudgeting(BudgetParams),

    // === Amortizing loans ===
    /// Down payment, asset + mortgage booking, amortized payments, property tax
    BuyHouse(HouseParams),
    /// Down payment, asset + loan booking, amortized payments
    BuyCar(CarParams),
    /// Fixed recurring payment against a loan envelope, no own amortization
    PaymentSchedule(PaymentScheduleParams),

    // === Payroll ===
    /// Salaried employment with withholding and 401(k) treatment
    GetJob(SalariedJobParams),
    /// Hourly employment with withholding and 401(k) treatment
    GetWageJob(WageJobParams),

    /// Unrecognized persisted type; kept so newer plans still load, never fires
    #[serde(other)]
    Unknown,
}

impl EventKind {
    /// First day this event can have any effect.
    pub fn start_time(&self) -> i64 {
        match self {
            EventKind::Inflow(p) => p.schedule.start_time,
            EventKind::Outflow(p) => p.schedule.start_time,
            EventKind::TransferMoney(p) => p.schedule.start_time,
            EventKind::DeclareAccounts(p) => p.start_time,
            EventKind::ManualCorrection(p) => p.start_time,
            EventKind::MonthlyBudgeting(p) => p.schedule.start_time,
            EventKind::BuyHouse(p) => p.start_time,
            EventKind::BuyCar(p) => p.start_time,
            EventKind::PaymentSchedule(p) => p.schedule.start_time,
            EventKind::GetJob(p) => p.start_time,
            EventKind::GetWageJob(p) => p.start_time,
            EventKind::Unknown => i64::MAX,
        }
    }

    /// Persisted type tag, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            EventKind::Inflow(_) => "inflow",
            EventKind::Outflow(_) => "outflow",
            EventKind::TransferMoney(_) => "transfer_money",
            EventKind::DeclareAccounts(_) => "declare_accounts",
            EventKind::ManualCorrection(_) => "manual_correction",
            EventKind::MonthlyBudgeting(_) => "monthly_budgeting",
            EventKind::BuyHouse(_) => "buy_house",
            EventKind::BuyCar(_) => "buy_car",
            EventKind::PaymentSchedule(_) => "payment_schedule",
            EventKind::GetJob(_) => "get_job",
            EventKind::GetWageJob(_) => "get_wage_job",
            EventKind::Unknown => "unknown",
        }
    }
}

// === Transactional parameter records ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflowParams {
    #[serde(flatten)]
    pub schedule: Recurrence,
    pub amount: f64,
    /// Destination envelope
    pub to_key: String,
    #[serde(default)]
    pub updating: Vec<FlowModifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutflowParams {
    #[serde(flatten)]
    pub schedule: Recurrence,
    pub amount: f64,
    /// Source envelope
    pub from_key: String,
    #[serde(default)]
    pub updating: Vec<FlowModifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferParams {
    #[serde(flatten)]
    pub schedule: Recurrence,
    pub amount: f64,
    pub from_key: String,
    pub to_key: String,
    #[serde(default)]
    pub updating: Vec<FlowModifier>,
}

/// One starting-balance assignment within `declare_accounts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSeed {
    pub key: String,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclareAccountsParams {
    pub start_time: i64,
    /// At most five seeds take effect; extras are ignored
    pub accounts: Vec<AccountSeed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualCorrectionParams {
    pub start_time: i64,
    pub key: String,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetParams {
    #[serde(flatten)]
    pub schedule: Recurrence,
    pub from_key: String,
    #[serde(default)]
    pub budget: MonthlyBudget,
    #[serde(default)]
    pub updating: Vec<BudgetModifier>,
}

/// Named spending categories of a `monthly_budgeting` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetCategory {
    Dining,
    Groceries,
    Rent,
    Utilities,
    Transportation,
    Entertainment,
    Healthcare,
    Subscriptions,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 8] = [
        BudgetCategory::Dining,
        BudgetCategory::Groceries,
        BudgetCategory::Rent,
        BudgetCategory::Utilities,
        BudgetCategory::Transportation,
        BudgetCategory::Entertainment,
        BudgetCategory::Healthcare,
        BudgetCategory::Subscriptions,
    ];
}

/// Per-category amounts withdrawn by each `monthly_budgeting` firing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBudget {
    #[serde(default)]
    pub dining: f64,
    #[serde(default)]
    pub groceries: f64,
    #[serde(default)]
    pub rent: f64,
    #[serde(default)]
    pub utilities: f64,
    #[serde(default)]
    pub transportation: f64,
    #[serde(default)]
    pub entertainment: f64,
    #[serde(default)]
    pub healthcare: f64,
    #[serde(default)]
    pub subscriptions: f64,
}

impl MonthlyBudget {
    pub fn amount(&self, category: BudgetCategory) -> f64 {
        match category {
            BudgetCategory::Dining => self.dining,
            BudgetCategory::Groceries => self.groceries,
            BudgetCategory::Rent => self.rent,
            BudgetCategory::Utilities => self.utilities,
            BudgetCategory::Transportation => self.transportation,
            BudgetCategory::Entertainment => self.entertainment,
            BudgetCategory::Healthcare => self.healthcare,
            BudgetCategory::Subscriptions => self.subscriptions,
        }
    }
}

// === Loan parameter records ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseParams {
    pub start_time: i64,
    /// Envelope paying the down payment, mortgage payments, and property tax
    pub from_key: String,
    /// Envelope holding the home's value
    pub asset_key: String,
    /// Envelope carrying the mortgage as a negative balance
    pub loan_key: String,
    pub home_value: f64,
    #[serde(default)]
    pub down_payment: f64,
    /// Annual mortgage rate as a decimal
    pub rate: f64,
    pub term_years: f64,
    #[serde(default = "default_payment_period")]
    pub payment_period_days: f64,
    /// Annual property tax as a fraction of the home's (appraised) value
    #[serde(default)]
    pub property_tax_rate: f64,

    // Per-effect enable flags, all on by default
    #[serde(default = "default_true")]
    pub pay_down_payment: bool,
    #[serde(default = "default_true")]
    pub book_asset: bool,
    #[serde(default = "default_true")]
    pub book_loan: bool,
    #[serde(default = "default_true")]
    pub make_payments: bool,
    #[serde(default = "default_true")]
    pub charge_property_tax: bool,
    /// Controls the end-of-loan parameter-update emission
    #[serde(default = "default_true")]
    pub apply_final_correction: bool,

    #[serde(default)]
    pub updating: Vec<LoanModifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarParams {
    pub start_time: i64,
    pub from_key: String,
    pub asset_key: String,
    pub loan_key: String,
    pub car_value: f64,
    #[serde(default)]
    pub down_payment: f64,
    pub rate: f64,
    pub term_years: f64,
    #[serde(default = "default_payment_period")]
    pub payment_period_days: f64,
    #[serde(default)]
    pub updating: Vec<LoanModifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentScheduleParams {
    #[serde(flatten)]
    pub schedule: Recurrence,
    /// Fixed payment, clamped to the loan's outstanding balance each firing
    pub amount: f64,
    pub from_key: String,
    pub loan_key: String,
    #[serde(default)]
    pub updating: Vec<FlowModifier>,
}

// === Payroll parameter records ===

/// Flat withholding rates applied to each paycheck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WithholdingRates {
    #[serde(default)]
    pub federal: f64,
    #[serde(default)]
    pub state: f64,
    #[serde(default)]
    pub local: f64,
    #[serde(default)]
    pub social_security: f64,
    #[serde(default)]
    pub medicare: f64,
}

/// Shadow tracking envelopes receiving withheld amounts, one per category.
///
/// Unset or unresolvable keys skip that category's deposit; the withholding
/// itself still reduces net pay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WithholdingKeys {
    #[serde(default)]
    pub federal: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub local: Option<String>,
    #[serde(default)]
    pub social_security: Option<String>,
    #[serde(default)]
    pub medicare: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalariedJobParams {
    pub start_time: i64,
    #[serde(default = "no_end")]
    pub end_time: i64,
    /// Explicit days between paychecks; overrides `pay_period` when set
    #[serde(default)]
    pub frequency_days: Option<f64>,
    /// Paychecks per year, e.g. 26 for biweekly
    pub pay_period: f64,
    /// Annual salary
    pub salary: f64,
    /// Pre-tax employee 401(k) rate on gross
    #[serde(default)]
    pub p_401k_contribution: f64,
    /// Employer match rate on gross
    #[serde(default)]
    pub p_401k_match: f64,
    #[serde(default)]
    pub withholding: WithholdingRates,
    /// Envelope receiving net pay
    pub take_home_key: String,
    /// Envelope receiving employee + employer 401(k) contributions
    #[serde(default)]
    pub retirement_key: Option<String>,
    #[serde(default)]
    pub withholding_keys: WithholdingKeys,
    #[serde(default)]
    pub updating: Vec<PayrollModifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageJobParams {
    pub start_time: i64,
    #[serde(default = "no_end")]
    pub end_time: i64,
    #[serde(default)]
    pub frequency_days: Option<f64>,
    /// Paychecks per year; used for cadence when `frequency_days` is unset
    pub pay_period: f64,
    pub hourly_wage: f64,
    pub hours_per_week: f64,
    #[serde(default)]
    pub p_401k_contribution: f64,
    #[serde(default)]
    pub p_401k_match: f64,
    #[serde(default)]
    pub withholding: WithholdingRates,
    pub take_home_key: String,
    #[serde(default)]
    pub retirement_key: Option<String>,
    #[serde(default)]
    pub withholding_keys: WithholdingKeys,
    #[serde(default)]
    pub updating: Vec<PayrollModifier>,
}

// === Modifier families ===
//
// Modifiers fire by the same recurrence rule as events but are gated by their
// parent's start_time: a parent not yet started skips its modifiers too. A
// modifier firing on the same day as its parent affects subsequent firings,
// not the current one.

/// Modifiers scoped to the flow family (inflow, outflow, transfer_money,
/// monthly_budgeting's withdrawal, payment_schedule's payment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowModifier {
    /// Absolute overwrite of the parent's working amount; clears increments
    UpdateAmount(UpdateAmountParams),
    /// Cumulative addition to the parent's working amount
    IncrementAmount(IncrementAmountParams),
    /// Side deposit into an envelope, independent of the parent's firing
    AdditionalInflow(AdditionalInflowParams),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAmountParams {
    pub start_time: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncrementAmountParams {
    #[serde(flatten)]
    pub schedule: Recurrence,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalInflowParams {
    #[serde(flatten)]
    pub schedule: Recurrence,
    pub amount: f64,
    pub to_key: String,
}

/// Modifiers scoped to `monthly_budgeting`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BudgetModifier {
    /// Overwrite one category's working amount
    UpdateMonthlyBudget(UpdateBudgetParams),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBudgetParams {
    pub start_time: i64,
    pub category: BudgetCategory,
    pub amount: f64,
}

/// Modifiers scoped to the loan family (`buy_house`, `buy_car`).
///
/// The house-only kinds (`new_appraisal`, `sell_house`, `refinance_home`)
/// are ignored under `buy_car`; validation flags them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoanModifier {
    /// Revalue the home; the delta vs. the current basis hits the asset envelope
    NewAppraisal(NewAppraisalParams),
    /// Extra principal payment from the payer into the loan envelope
    ExtraMortgagePayment(ExtraPaymentParams),
    /// Same effect as `extra_mortgage_payment`, the car-loan spelling
    PayLoanEarly(ExtraPaymentParams),
    /// Out-of-band fee debit, no principal effect
    LatePayment(ExtraPaymentParams),
    /// Unwind the asset, settle the loan, credit net proceeds to the payer
    SellHouse(SellHouseParams),
    /// Re-derive the loan from the live balance under new rate/term
    RefinanceHome(RefinanceParams),
    /// One-off or recurring repair debit, no loan effect
    CarRepair(ExtraPaymentParams),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAppraisalParams {
    pub start_time: i64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentParams {
    #[serde(flatten)]
    pub schedule: Recurrence,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellHouseParams {
    pub start_time: i64,
    pub sale_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceParams {
    pub start_time: i64,
    /// New annual rate
    pub rate: f64,
    /// New term in years, from the refinance day
    pub term_years: f64,
    /// Envelope the outstanding debt moves to; stays put when unset
    #[serde(default)]
    pub new_loan_key: Option<String>,
}

/// Modifiers scoped to the payroll family (`get_job`, `get_wage_job`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PayrollModifier {
    /// Absolute change of annual salary (or hourly wage); clears prior raises
    GetARaise(RaiseParams),
    /// Recurring additive pay bump, cumulative across firings
    ReoccurringRaise(ReoccurringRaiseParams),
    /// One-time untaxed deposit to the take-home envelope
    GetABonus(RaiseParams),
    /// Absolute overwrite of the employee 401(k) rate
    #[serde(rename = "change_401k_contribution")]
    Change401kContribution(RateChangeParams),
    /// Absolute overwrite of weekly hours; wage jobs only
    ChangeHours(HoursChangeParams),
    /// Absolute overwrite of the employer match rate
    ChangeEmployerMatch(RateChangeParams),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaiseParams {
    pub start_time: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReoccurringRaiseParams {
    #[serde(flatten)]
    pub schedule: Recurrence,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateChangeParams {
    pub start_time: i64,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoursChangeParams {
    pub start_time: i64,
    pub hours: f64,
}
