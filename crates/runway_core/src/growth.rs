//! Daily balance growth
//!
//! Applied once per day to every envelope, before any event dispatch.
//! Balances at or below zero never grow — additive and compound models alike
//! skip them to avoid sign artifacts — but the elapsed-day counter still
//! advances so periodic compounding stays on cadence.

use crate::ledger::Envelope;
use crate::model::GrowthModel;

/// Days between periodic compound accruals (month proxy; not calendar-aware).
pub const COMPOUND_PERIOD_DAYS: u32 = 30;

/// Monthly rate equivalent to `annual` compounded yearly.
pub fn monthly_rate(annual: f64) -> f64 {
    (1.0 + annual).powf(1.0 / 12.0) - 1.0
}

/// Advance one envelope by one day of growth.
pub(crate) fn grow(envelope: &mut Envelope) {
    envelope.elapsed_days += 1;
    if envelope.balance <= 0.0 {
        return;
    }

    let daily = envelope.rate / 365.0;
    match envelope.growth {
        GrowthModel::None => {}
        GrowthModel::SimpleInterest | GrowthModel::Appreciation => {
            envelope.balance += envelope.balance * daily;
        }
        GrowthModel::DailyCompound => {
            envelope.balance *= 1.0 + daily;
        }
        // YearlyCompound shares MonthlyCompound's cadence and rate on purpose:
        // the distinction is preserved for callers, not for the math.
        GrowthModel::MonthlyCompound | GrowthModel::YearlyCompound => {
            if envelope.elapsed_days % COMPOUND_PERIOD_DAYS == 0 {
                envelope.balance *= 1.0 + monthly_rate(envelope.rate);
            }
        }
        GrowthModel::Depreciation => {
            envelope.balance -= envelope.balance * daily;
        }
        GrowthModel::DepreciationByDays => {
            let Some(days) = envelope.days_of_usefulness.filter(|&d| d > 0) else {
                return;
            };
            let basis = match envelope.depreciation_basis {
                Some(basis) if basis >= envelope.balance => basis,
                _ => {
                    envelope.depreciation_basis = Some(envelope.balance);
                    envelope.balance
                }
            };
            envelope.balance = (envelope.balance - basis / days as f64).max(0.0);
        }
    }
}
