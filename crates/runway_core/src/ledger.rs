//! Envelope ledger — per-run account state
//!
//! Built fresh from the plan's envelope definitions at the start of every run
//! and discarded at the end; the definitions themselves are never mutated.
//! All lookups are by name and guarded: a reference to an envelope that does
//! not exist is a silent no-op for the affected effect, never an error.

use rustc_hash::FxHashMap;

use crate::model::{AccountType, EnvelopeDef, GrowthModel};

/// Run-time state of one envelope.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub name: String,
    pub balance: f64,
    pub growth: GrowthModel,
    pub rate: f64,
    pub days_of_usefulness: Option<u32>,
    pub account_type: AccountType,
    pub category: String,
    /// Days simulated since construction; drives periodic compounding
    pub(crate) elapsed_days: u32,
    /// Highest balance seen; straight-line basis for `DepreciationByDays`
    pub(crate) depreciation_basis: Option<f64>,
}

impl Envelope {
    fn from_def(def: &EnvelopeDef) -> Self {
        Self {
            name: def.name.clone(),
            balance: 0.0,
            growth: def.growth,
            rate: def.rate,
            days_of_usefulness: def.days_of_usefulness,
            account_type: def.account_type,
            category: def.category.clone(),
            elapsed_days: 0,
            depreciation_basis: None,
        }
    }

    /// Debt-category envelopes reduce net worth by their absolute balance.
    pub fn is_debt(&self) -> bool {
        self.category == crate::model::DEBT_CATEGORY
    }

    /// Whether this envelope participates in the net-worth sum at all.
    pub fn counts_toward_net_worth(&self) -> bool {
        self.account_type != AccountType::NonNetworth
    }
}

/// All envelopes of one run, iterable in definition order.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    envelopes: Vec<Envelope>,
    index: FxHashMap<String, usize>,
}

impl Ledger {
    /// Build the ledger with every balance at zero.
    ///
    /// Duplicate names keep the first definition (plan validation flags them).
    pub fn new(defs: &[EnvelopeDef]) -> Self {
        let mut envelopes = Vec::with_capacity(defs.len());
        let mut index = FxHashMap::default();
        for def in defs {
            if index.contains_key(&def.name) {
                continue;
            }
            index.insert(def.name.clone(), envelopes.len());
            envelopes.push(Envelope::from_def(def));
        }
        Self { envelopes, index }
    }

    pub fn len(&self) -> usize {
        self.envelopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.envelopes.is_empty()
    }

    /// Envelopes in definition order, so output maps are deterministic.
    pub fn iter(&self) -> impl Iterator<Item = &Envelope> {
        self.envelopes.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Envelope> {
        self.envelopes.iter_mut()
    }

    pub fn get(&self, name: &str) -> Option<&Envelope> {
        self.index.get(name).map(|&i| &self.envelopes[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Envelope> {
        self.index.get(name).map(|&i| &mut self.envelopes[i])
    }

    pub fn balance(&self, name: &str) -> Option<f64> {
        self.get(name).map(|e| e.balance)
    }

    /// Add to an envelope. Returns whether the name resolved.
    pub fn credit(&mut self, name: &str, amount: f64) -> bool {
        match self.get_mut(name) {
            Some(envelope) => {
                envelope.balance += amount;
                true
            }
            None => false,
        }
    }

    /// Subtract from an envelope. Returns whether the name resolved.
    pub fn debit(&mut self, name: &str, amount: f64) -> bool {
        self.credit(name, -amount)
    }

    /// Set an envelope to an absolute balance. Returns whether the name resolved.
    pub fn set(&mut self, name: &str, balance: f64) -> bool {
        match self.get_mut(name) {
            Some(envelope) => {
                envelope.balance = balance;
                true
            }
            None => false,
        }
    }

    /// Move `amount` between two envelopes, atomically: if either side is
    /// missing, neither balance changes.
    pub fn transfer(&mut self, from: &str, to: &str, amount: f64) -> bool {
        let (Some(&from_idx), Some(&to_idx)) = (self.index.get(from), self.index.get(to)) else {
            return false;
        };
        self.envelopes[from_idx].balance -= amount;
        self.envelopes[to_idx].balance += amount;
        true
    }
}
