//! Deterministic financial projection engine
//!
//! This crate projects a household's finances day by day over a multi-decade
//! horizon. It supports:
//! - Named envelopes of money with per-envelope growth models (simple
//!   interest, daily/periodic compounding, depreciation)
//! - A flat, typed event list: income, spending, transfers, budgets, house
//!   and car purchases with amortized loans, salaried and hourly payroll
//! - Nested "updating" modifiers that adjust a live event mid-stream
//!   (raises, extra mortgage payments, refinancing, appraisals)
//! - One output snapshot per day with net worth partitioned into counted
//!   and excluded envelopes
//! - Advisory parameter corrections, e.g. shrinking a loan's stored end
//!   date when it gets paid off early
//!
//! Time is an integer day offset from a caller-chosen epoch, conventionally
//! the plan holder's birth date. Runs are pure: no clocks, no randomness, no
//! I/O, so the same plan and horizon always produce the same projection.
//! Bad input never aborts a run; unresolvable effects skip silently and
//! [`validate::validate_plan`] reports them up front.
//!
//! # Example
//!
//! ```
//! use runway_core::model::{
//!     AccountSeed, DeclareAccountsParams, EnvelopeDef, EventKind, InflowParams, Recurrence,
//! };
//! use runway_core::plan::Plan;
//!
//! let plan = Plan::builder()
//!     .envelope(EnvelopeDef::new("Checking"))
//!     .event(EventKind::DeclareAccounts(DeclareAccountsParams {
//!         start_time: 0,
//!         accounts: vec![AccountSeed { key: "Checking".into(), balance: 1_000.0 }],
//!     }))
//!     .event(EventKind::Inflow(InflowParams {
//!         schedule: Recurrence::every(0, 30.0),
//!         amount: 100.0,
//!         to_key: "Checking".into(),
//!         updating: Vec::new(),
//!     }))
//!     .build()
//!     .unwrap();
//!
//! let projection = runway_core::simulate(&plan, 0, 60);
//! assert_eq!(projection.final_net_worth(), Some(1_300.0));
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod growth;
pub mod ledger;
pub mod plan;
pub mod simulation;
pub mod simulation_state;
pub mod validate;

mod dispatch;
mod flows;
mod loans;
mod payroll;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use plan::{Plan, PlanBuilder, PlanError};
pub use simulation::{account_warnings, run_simulation, simulate, simulate_scenarios};
pub use validate::{Issue, Severity, validate_plan};
