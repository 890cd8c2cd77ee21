//! Repair of approvals whose balance write did not land.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::LeaveResult;
use crate::models::{BalanceRecord, DateRange, ScopeFilter};
use crate::store::LeaveStore;

use super::LeaveWorkflow;

/// What a reconciliation pass found and fixed for one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// The owner reconciled.
    pub owner_id: String,
    /// Approved intervals whose usage was applied by this pass.
    pub repaired: Vec<String>,
    /// Journaled interval IDs that are no longer approved in the store.
    pub orphaned: Vec<String>,
    /// The balance after repair.
    pub balance: BalanceRecord,
}

impl ReconciliationReport {
    /// Whether the balance already agreed with the store.
    pub fn is_clean(&self) -> bool {
        self.repaired.is_empty() && self.orphaned.is_empty()
    }
}

impl<S: LeaveStore> LeaveWorkflow<S> {
    /// Brings an owner's balance journal in line with their approved leave.
    ///
    /// Approved intervals missing from the journal have their usage applied.
    /// Journal entries with no approved interval behind them are reported
    /// but left alone.
    pub fn reconcile(&mut self, owner_id: &str) -> LeaveResult<ReconciliationReport> {
        let approved = self.store.fetch_approved_intervals(
            &DateRange::unbounded(),
            &ScopeFilter::Owner(owner_id.to_string()),
        )?;
        let mut balance = self.ledger.get_balance(&mut self.store, owner_id)?;

        let missing: Vec<_> = approved
            .iter()
            .filter(|i| !balance.has_applied(i.id()))
            .collect();
        let mut repaired = Vec::with_capacity(missing.len());
        for interval in missing {
            balance = self.ledger.apply_interval_usage(&mut self.store, interval)?;
            repaired.push(interval.id().to_string());
        }

        let orphaned: Vec<String> = balance
            .applied_intervals
            .iter()
            .filter(|id| !approved.iter().any(|i| i.id() == id.as_str()))
            .cloned()
            .collect();

        if !orphaned.is_empty() {
            warn!(owner_id, orphaned = ?orphaned, "Journaled intervals are not approved");
        }
        info!(
            owner_id,
            repaired = repaired.len(),
            orphaned = orphaned.len(),
            "Reconciled leave balance"
        );

        Ok(ReconciliationReport {
            owner_id: owner_id.to_string(),
            repaired,
            orphaned,
            balance,
        })
    }
}
