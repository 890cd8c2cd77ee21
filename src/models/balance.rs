//! Leave balance model.
//!
//! This module defines [`BalanceRecord`], the per-owner ledger of
//! entitlement and consumption by leave category.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::LeaveCategory;

/// Per-owner entitlement and usage, keyed by leave category.
///
/// The record does not enforce `used <= entitlement`; an approval that
/// bypassed validation can push `available` below zero.
///
/// # Example
///
/// ```
/// use leave_engine::models::{BalanceRecord, LeaveCategory};
/// use std::collections::BTreeMap;
///
/// let mut balance = BalanceRecord::new(
///     "emp_001",
///     BTreeMap::from([(LeaveCategory::Sick, 10)]),
/// );
/// balance.apply_usage(LeaveCategory::Sick, 8);
///
/// assert_eq!(balance.available(LeaveCategory::Sick), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    /// The owner of the balance.
    pub owner_id: String,
    /// Days allotted per category.
    pub entitlement: BTreeMap<LeaveCategory, u32>,
    /// Days consumed per category by approved leave.
    pub used: BTreeMap<LeaveCategory, u32>,
    /// IDs of the intervals whose usage has been debited.
    #[serde(default)]
    pub applied_intervals: BTreeSet<String>,
}

impl BalanceRecord {
    /// Creates a record with the given entitlement and zero usage in every
    /// entitled category.
    pub fn new(owner_id: impl Into<String>, entitlement: BTreeMap<LeaveCategory, u32>) -> Self {
        let used = entitlement.keys().map(|category| (*category, 0)).collect();
        Self {
            owner_id: owner_id.into(),
            entitlement,
            used,
            applied_intervals: BTreeSet::new(),
        }
    }

    /// Days allotted for a category (zero if the category is not entitled).
    pub fn entitlement_for(&self, category: LeaveCategory) -> u32 {
        self.entitlement.get(&category).copied().unwrap_or(0)
    }

    /// Days consumed for a category.
    pub fn used_for(&self, category: LeaveCategory) -> u32 {
        self.used.get(&category).copied().unwrap_or(0)
    }

    /// Entitlement minus usage. Negative when the category is overdrawn.
    pub fn available(&self, category: LeaveCategory) -> i64 {
        i64::from(self.entitlement_for(category)) - i64::from(self.used_for(category))
    }

    /// Total days consumed across all categories.
    pub fn total_used(&self) -> u64 {
        self.used.values().map(|days| u64::from(*days)).sum()
    }

    /// Adds `days` to the category's usage.
    ///
    /// Not idempotent: calling twice for the same approval double-counts.
    pub fn apply_usage(&mut self, category: LeaveCategory, days: u32) {
        let used = self.used.entry(category).or_insert(0);
        *used = used.saturating_add(days);
    }

    /// Returns true if the interval's usage has already been debited.
    pub fn has_applied(&self, interval_id: &str) -> bool {
        self.applied_intervals.contains(interval_id)
    }
}
