//! Integration tests for the projection engine
//!
//! Tests are organized by topic:
//! - `growth` - Growth models over full simulated horizons
//! - `flows` - Recurring flows, budgets, and their modifiers
//! - `loans` - Amortization, payoff, and loan corrections
//! - `payroll` - Paychecks, withholding, and pay modifiers
//! - `output` - Net-worth partition, determinism, warnings
//! - `plan_io` - Serde round-trips of persisted plan documents

mod output;
mod payroll;
