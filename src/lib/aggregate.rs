//! Reductions over a snapshot of sales
//!
//! Everything here is a pure function of its arguments: records are
//! borrowed, never stored, and nothing touches the filesystem. Callers load
//! a fresh snapshot for each analysis.

use std::collections::HashMap;

use crate::lib::{
    date::{Date, FormatError},
    error::Error,
    period::Between,
    record::SaleRecord,
};

pub fn filter_by_branch(records: &[SaleRecord], branch_id: &str) -> Vec<SaleRecord> {
    records
        .iter()
        .filter(|r| r.branch_id == branch_id)
        .cloned()
        .collect()
}

pub fn filter_by_product(records: &[SaleRecord], product_id: &str) -> Vec<SaleRecord> {
    records
        .iter()
        .filter(|r| r.product_id == product_id)
        .cloned()
        .collect()
}

/// Sales dated within `period` (bounds included)
///
/// Fails on the first record whose date cannot be read.
pub fn filter_by_period(
    records: &[SaleRecord],
    period: Between<Date>,
) -> Result<Vec<SaleRecord>, FormatError> {
    let mut kept = Vec::new();
    for r in records {
        if period.contains(&r.date()?) {
            kept.push(r.clone());
        }
    }
    Ok(kept)
}

/// Sales of the Monday to Sunday week that contains `reference`
pub fn filter_by_week(
    records: &[SaleRecord],
    reference: Date,
) -> Result<Vec<SaleRecord>, FormatError> {
    filter_by_period(records, Between::week_of(reference))
}

pub fn amounts(records: &[SaleRecord]) -> Vec<u64> {
    records.iter().map(|r| r.amount).collect()
}

/// Sum of the amounts, `0` when there are no records
///
/// Fails with `Error::Overflow` when the sum does not fit an amount.
pub fn total_amount(records: &[SaleRecord]) -> Result<u64, Error> {
    records
        .iter()
        .try_fold(0u64, |acc, r| acc.checked_add(r.amount))
        .ok_or(Error::Overflow)
}

/// Arithmetic mean, `0.0` when there are no records
///
/// A week without sales is a valid result, unlike `summary_statistics`.
pub fn average_amount(records: &[SaleRecord]) -> f64 {
    if records.is_empty() {
        0.0
    } else {
        let sum: u128 = records.iter().map(|r| u128::from(r.amount)).sum();
        sum as f64 / records.len() as f64
    }
}

/// Descriptive statistics of sale amounts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub max: u64,
    pub min: u64,
    pub median: f64,
}

/// Mean, extrema and median of the amounts
///
/// An empty input means nothing was sold under that key and is reported as
/// `Error::EmptyInput`.
pub fn summary_statistics(records: &[SaleRecord]) -> Result<Summary, Error> {
    let mut values = amounts(records);
    if values.is_empty() {
        return Err(Error::EmptyInput);
    }
    values.sort_unstable();
    let n = values.len();
    let median = if n % 2 == 1 {
        values[n / 2] as f64
    } else {
        (values[n / 2 - 1] as f64 + values[n / 2] as f64) / 2.0
    };
    Ok(Summary {
        mean: average_amount(records),
        max: values[n - 1],
        min: values[0],
        median,
    })
}

/// Totals keyed by a fixed set of branches
///
/// Keys are declared up front and remembered in declaration order.
/// Adding to a key that was never declared fails instead of creating it.
/// The grand total is kept alongside and must fit an amount as well.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchTotals {
    order: Vec<String>,
    totals: HashMap<String, u64>,
    sum: u64,
}

impl BranchTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key with a zero total, no-op if it is already known
    pub fn declare<S: ToString>(&mut self, key: S) {
        let key = key.to_string();
        if !self.totals.contains_key(&key) {
            self.totals.insert(key.clone(), 0);
            self.order.push(key);
        }
    }

    pub fn add(&mut self, key: &str, amount: u64) -> Result<(), Error> {
        let total = self
            .totals
            .get_mut(key)
            .ok_or_else(|| Error::UnknownKey(key.to_string()))?;
        let sum = self.sum.checked_add(amount).ok_or(Error::Overflow)?;
        // the grand total bounds every branch total
        *total += amount;
        self.sum = sum;
        Ok(())
    }

    /// Sum over all branches
    pub fn total(&self) -> u64 {
        self.sum
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.order
            .iter()
            .map(move |k| (k.as_str(), self.totals[k]))
    }

    pub fn labels(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn values(&self) -> Vec<u64> {
        self.iter().map(|(_, v)| v).collect()
    }
}

/// Sum of amounts per branch, every known branch included
///
/// A sale from a branch outside of `known_branch_ids` is an orphan record
/// and fails with `Error::UnknownKey`.
pub fn group_totals_by_branch<S>(
    sales: &[SaleRecord],
    known_branch_ids: &[S],
) -> Result<BranchTotals, Error>
where
    S: AsRef<str>,
{
    let mut totals = BranchTotals::new();
    for id in known_branch_ids {
        totals.declare(id.as_ref());
    }
    for sale in sales {
        totals.add(&sale.branch_id, sale.amount)?;
    }
    Ok(totals)
}
