//! Envelope definitions
//!
//! An envelope is a named bucket of money with a growth behavior. Definitions
//! are the persisted half of an account; the run-time half (balance, growth
//! counters) lives in the ledger and is rebuilt for every run.

use serde::{Deserialize, Serialize};

/// Category whose balances count against net worth rather than toward it.
pub const DEBT_CATEGORY: &str = "Debt";

/// How an envelope's balance changes on its own, one day at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthModel {
    /// Balance only moves when events move it
    #[default]
    None,
    /// Additive daily accrual at `rate / 365`
    SimpleInterest,
    /// Same accrual as `SimpleInterest`; named for fixed assets
    Appreciation,
    /// Multiplicative daily compounding at `rate / 365`
    DailyCompound,
    /// Full month of growth applied on every 30th elapsed day
    MonthlyCompound,
    /// Same cadence and rate as `MonthlyCompound` (kept distinct for callers)
    YearlyCompound,
    /// Declining-balance decay at `rate / 365`
    Depreciation,
    /// Straight-line decay: highest-seen balance / `days_of_usefulness` per day
    DepreciationByDays,
}

/// Whether an envelope's balance counts toward net worth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    /// Counts toward net worth
    #[default]
    Regular,
    /// Tracking-only bucket, excluded from net worth (e.g. withheld taxes)
    NonNetworth,
    /// Managed by the engine itself; still counts toward net worth
    SystemControlled,
}

/// Persisted definition of an envelope.
///
/// Balances are not part of the definition: every run starts each envelope at
/// zero and expects a `declare_accounts` event to seed starting balances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeDef {
    /// Unique name, the key every event effect uses to reference the envelope
    pub name: String,
    #[serde(default)]
    pub growth: GrowthModel,
    /// Annual rate as a decimal, e.g. 0.05 for 5%
    #[serde(default)]
    pub rate: f64,
    /// Straight-line lifetime, only meaningful for `DepreciationByDays`
    #[serde(default)]
    pub days_of_usefulness: Option<u32>,
    #[serde(default)]
    pub account_type: AccountType,
    /// Free-text grouping; the literal `"Debt"` flips the net-worth sign
    #[serde(default)]
    pub category: String,
}

impl EnvelopeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            growth: GrowthModel::None,
            rate: 0.0,
            days_of_usefulness: None,
            account_type: AccountType::Regular,
            category: String::new(),
        }
    }

    #[must_use]
    pub fn growth(mut self, growth: GrowthModel, rate: f64) -> Self {
        self.growth = growth;
        self.rate = rate;
        self
    }

    #[must_use]
    pub fn useful_for_days(mut self, days: u32) -> Self {
        self.days_of_usefulness = Some(days);
        self
    }

    #[must_use]
    pub fn account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = account_type;
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Debt-category envelopes reduce net worth by their absolute balance.
    pub fn is_debt(&self) -> bool {
        self.category == DEBT_CATEGORY
    }
}
