//! Balance ledger.
//!
//! The ledger reads and writes [`BalanceRecord`]s through a [`LeaveStore`],
//! creating a starter record on an owner's first lookup.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::config::LeavePolicy;
use crate::error::LeaveResult;
use crate::models::{BalanceRecord, LeaveCategory, LeaveInterval};
use crate::store::LeaveStore;

/// Tracks per-owner entitlement and usage.
#[derive(Debug, Clone)]
pub struct BalanceLedger {
    default_entitlement: BTreeMap<LeaveCategory, u32>,
}

impl BalanceLedger {
    /// Creates a ledger that hands out the policy's starter allocation.
    pub fn new(policy: &LeavePolicy) -> Self {
        Self {
            default_entitlement: policy.entitlements().clone(),
        }
    }

    /// Returns the owner's balance, creating and persisting a starter record
    /// with zero usage if none exists.
    pub fn get_balance<S: LeaveStore + ?Sized>(
        &self,
        store: &mut S,
        owner_id: &str,
    ) -> LeaveResult<BalanceRecord> {
        if let Some(existing) = store.fetch_balance(owner_id)? {
            return Ok(existing);
        }

        let record = BalanceRecord::new(owner_id, self.default_entitlement.clone());
        store.persist_balance(owner_id, &record)?;
        info!(owner_id, "Created starter leave balance");
        Ok(record)
    }

    /// Adds `days` to the owner's usage in `category`.
    ///
    /// Not idempotent. Approval paths go through
    /// [`BalanceLedger::apply_interval_usage`] instead.
    pub fn apply_usage<S: LeaveStore + ?Sized>(
        &self,
        store: &mut S,
        owner_id: &str,
        category: LeaveCategory,
        days: u32,
    ) -> LeaveResult<BalanceRecord> {
        let mut record = self.get_balance(store, owner_id)?;
        record.apply_usage(category, days);
        store.persist_balance(owner_id, &record)?;
        Ok(record)
    }

    /// Debits an interval's days from its owner's balance and journals the
    /// interval ID in the same write.
    ///
    /// An interval already in the journal is not debited again.
    pub fn apply_interval_usage<S: LeaveStore + ?Sized>(
        &self,
        store: &mut S,
        interval: &LeaveInterval,
    ) -> LeaveResult<BalanceRecord> {
        let mut record = self.get_balance(store, interval.owner_id())?;

        if record.has_applied(interval.id()) {
            warn!(
                interval_id = %interval.id(),
                owner_id = %interval.owner_id(),
                "Usage already applied for interval, skipping"
            );
            return Ok(record);
        }

        record.apply_usage(interval.category(), interval.days());
        record.applied_intervals.insert(interval.id().to_string());
        store.persist_balance(interval.owner_id(), &record)?;

        info!(
            interval_id = %interval.id(),
            owner_id = %interval.owner_id(),
            category = %interval.category(),
            days = interval.days(),
            available = record.available(interval.category()),
            "Applied leave usage"
        );
        Ok(record)
    }
}
