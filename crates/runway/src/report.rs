//! Human-readable run summary.
//!
//! The summary goes to stderr so the projection JSON on stdout stays
//! machine-readable.

use std::collections::BTreeMap;

use runway_core::model::Projection;
use runway_core::simulation::account_warnings;

use crate::document::PlanDocument;

pub fn print_summary(document: &PlanDocument, projection: &Projection) {
    let (Some(first), Some(last)) = (projection.data.first(), projection.data.last()) else {
        eprintln!("no days simulated");
        return;
    };

    eprintln!(
        "Projected {} to {} ({} days)",
        document.date_for(first.date),
        document.date_for(last.date),
        projection.data.len()
    );
    eprintln!("Net worth: {}", format_currency(last.value));

    // BTreeMap for stable name order across runs
    let finals: BTreeMap<&str, f64> = last
        .parts
        .iter()
        .chain(last.non_networth_parts.iter())
        .map(|(name, &balance)| (name.as_str(), balance))
        .collect();
    for (name, balance) in finals {
        eprintln!("  {name:<24} {:>16}", format_currency(balance));
    }

    if !projection.parameter_updates.is_empty() {
        eprintln!();
        eprintln!("Proposed parameter updates:");
        for update in &projection.parameter_updates {
            eprintln!(
                "  event {}: {} -> {} ({})",
                update.event_id,
                update.parameter,
                update.value,
                document.date_for(update.value as i64)
            );
        }
    }

    let warnings = account_warnings(&document.plan, &projection.data);
    if !warnings.is_empty() {
        let mut by_envelope: BTreeMap<&str, (i64, usize)> = BTreeMap::new();
        for warning in &warnings {
            let entry = by_envelope
                .entry(warning.envelope.as_str())
                .or_insert((warning.date, 0));
            entry.1 += 1;
        }

        eprintln!();
        eprintln!("Overdraft warnings:");
        for (name, (first_day, count)) in by_envelope {
            eprintln!(
                "  {name}: negative on {count} day(s), first on {}",
                document.date_for(first_day)
            );
        }
    }
}

/// Format a currency value with thousands separators.
pub fn format_currency(value: f64) -> String {
    let abs_value = value.abs();
    let mut dollars = abs_value as i64;
    let mut cents = ((abs_value - dollars as f64) * 100.0).round() as i64;
    if cents == 100 {
        dollars += 1;
        cents = 0;
    }

    let dollars_str = dollars.to_string();
    let mut result = String::new();
    for (i, c) in dollars_str.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let dollars_formatted: String = result.chars().rev().collect();

    if value >= 0.0 {
        format!("${dollars_formatted}.{cents:02}")
    } else {
        format!("-${dollars_formatted}.{cents:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1_234.5), "$1,234.50");
        assert_eq!(format_currency(-250_000.0), "-$250,000.00");
        assert_eq!(format_currency(1_000_000.07), "$1,000,000.07");
    }

    #[test]
    fn test_format_currency_rounds_cents_up() {
        assert_eq!(format_currency(1.999), "$2.00");
        assert_eq!(format_currency(-2.999), "-$3.00");
    }
}
