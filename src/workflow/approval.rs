//! The leave approval workflow.
//!
//! [`LeaveWorkflow`] ties validation, conflict detection and the balance
//! ledger to a [`LeaveStore`]. On approval it writes the status first and
//! the balance second; if the second write fails the interval is left
//! approved and the failure is returned as [`LeaveError::PartialApproval`]
//! for [`LeaveWorkflow::reconcile`] to repair.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::LeavePolicy;
use crate::error::{LeaveError, LeaveResult};
use crate::models::{
    BalanceRecord, ConflictRecord, DateRange, LeaveInterval, LeaveRequest, LeaveStatus,
    ScopeFilter, StatusMetadata, SuggestedWindow, ValidationResult,
};
use crate::scheduling::{
    MonthlyCalendar, detect, find_candidate_conflicts, month_range, suggest_alternatives,
    validate,
};
use crate::store::LeaveStore;

use super::BalanceLedger;

/// The validation outcome for a request, with suggestions when it conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCheck {
    /// The validator's verdict.
    pub validation: ValidationResult,
    /// Alternative windows, offered only when the request conflicts.
    pub suggestions: Vec<SuggestedWindow>,
}

/// A successfully submitted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    /// The newly created pending interval.
    pub interval: LeaveInterval,
    /// Other owners' approved leave the request overlaps.
    pub conflicts: Vec<ConflictRecord>,
    /// Alternative windows, offered only when the request conflicts.
    pub suggestions: Vec<SuggestedWindow>,
}

/// The result of approving an interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalOutcome {
    /// The approved interval.
    pub interval: LeaveInterval,
    /// The owner's balance after the debit.
    pub balance: BalanceRecord,
    /// Conflicts the approval created among approved leave.
    pub conflicts: Vec<ConflictRecord>,
}

/// Submits, reviews and reconciles leave against a store.
#[derive(Debug)]
pub struct LeaveWorkflow<S> {
    pub(super) store: S,
    pub(super) ledger: BalanceLedger,
    hr_recipient: String,
}

impl<S: LeaveStore> LeaveWorkflow<S> {
    /// Creates a workflow over `store` using the given policy.
    pub fn new(store: S, policy: &LeavePolicy) -> Self {
        Self {
            store,
            ledger: BalanceLedger::new(policy),
            hr_recipient: policy.hr_recipient().to_string(),
        }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the balance ledger.
    pub fn ledger(&self) -> &BalanceLedger {
        &self.ledger
    }

    /// Returns the owner's balance, creating it on first access.
    pub fn balance(&mut self, owner_id: &str) -> LeaveResult<BalanceRecord> {
        self.ledger.get_balance(&mut self.store, owner_id)
    }

    fn approved_overlapping(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> LeaveResult<Vec<LeaveInterval>> {
        match DateRange::new(start, end) {
            Ok(range) => self.store.fetch_approved_intervals(&range, &ScopeFilter::All),
            // Reversed requests fail validation before conflicts matter.
            Err(_) => Ok(Vec::new()),
        }
    }

    fn require_interval(&self, interval_id: &str) -> LeaveResult<LeaveInterval> {
        self.store
            .fetch_interval(interval_id)?
            .ok_or_else(|| LeaveError::IntervalNotFound {
                interval_id: interval_id.to_string(),
            })
    }

    fn require_pending(interval: &LeaveInterval, to: LeaveStatus) -> LeaveResult<()> {
        if interval.status() != LeaveStatus::Pending {
            return Err(LeaveError::InvalidTransition {
                interval_id: interval.id().to_string(),
                from: interval.status(),
                to,
            });
        }
        Ok(())
    }

    /// Validates a request against the owner's balance and current approved
    /// leave without storing anything (beyond creating a starter balance).
    pub fn check(
        &mut self,
        request: &LeaveRequest,
        today: NaiveDate,
    ) -> LeaveResult<RequestCheck> {
        let balance = self.balance(&request.owner_id)?;
        let approved = self.approved_overlapping(request.start_date, request.end_date)?;

        let validation = validate(request, &balance, &approved, today);
        let suggestions = suggest_alternatives(request, &validation.conflicts);

        Ok(RequestCheck {
            validation,
            suggestions,
        })
    }

    /// Validates and stores a new pending request, then notifies HR.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveError::Validation`] if the request fails validation;
    /// nothing is stored in that case.
    pub fn submit(&mut self, request: LeaveRequest, today: NaiveDate) -> LeaveResult<Submission> {
        let check = self.check(&request, today)?;
        if let Err(failure) = check.validation.into_result() {
            warn!(
                owner_id = %request.owner_id,
                code = failure.code(),
                reason = %failure,
                "Leave request rejected by validation"
            );
            return Err(failure.into());
        }

        let interval = LeaveInterval::from_request(Uuid::new_v4().to_string(), &request)?;
        let approved = self.approved_overlapping(request.start_date, request.end_date)?;
        let conflicts = find_candidate_conflicts(&interval, &approved);

        self.store.insert_interval(interval.clone())?;
        self.store.notify(
            &self.hr_recipient,
            &format!(
                "{} has submitted a {} leave request for {} to {}",
                interval.owner_id(),
                interval.category(),
                interval.start_date(),
                interval.end_date()
            ),
        );

        info!(
            interval_id = %interval.id(),
            owner_id = %interval.owner_id(),
            days = interval.days(),
            conflicts = conflicts.len(),
            "Leave request submitted"
        );

        Ok(Submission {
            interval,
            conflicts,
            suggestions: check.suggestions,
        })
    }

    /// Approves a pending interval and debits its owner's balance.
    ///
    /// # Errors
    ///
    /// - [`LeaveError::InvalidTransition`] if the interval is not pending,
    ///   which also prevents a second debit for the same approval
    /// - [`LeaveError::PartialApproval`] if the status was written but the
    ///   balance was not
    pub fn approve(
        &mut self,
        interval_id: &str,
        reviewer_id: &str,
        at: DateTime<Utc>,
    ) -> LeaveResult<ApprovalOutcome> {
        let interval = self.require_interval(interval_id)?;
        Self::require_pending(&interval, LeaveStatus::Approved)?;

        self.store.persist_interval_status(
            interval_id,
            LeaveStatus::Approved,
            StatusMetadata {
                actor_id: reviewer_id.to_string(),
                at,
                reason: None,
            },
        )?;

        let balance = match self.ledger.apply_interval_usage(&mut self.store, &interval) {
            Ok(balance) => balance,
            Err(err) => {
                error!(
                    interval_id,
                    owner_id = %interval.owner_id(),
                    error = %err,
                    "Interval approved but balance update failed"
                );
                return Err(LeaveError::PartialApproval {
                    interval_id: interval_id.to_string(),
                    message: err.to_string(),
                });
            }
        };

        let approved = self.require_interval(interval_id)?;
        self.store.notify(
            approved.owner_id(),
            &format!(
                "Your {} leave request for {} to {} has been approved",
                approved.category(),
                approved.start_date(),
                approved.end_date()
            ),
        );

        let conflicts: Vec<ConflictRecord> =
            detect(&self.approved_overlapping(approved.start_date(), approved.end_date())?)
                .into_iter()
                .filter(|c| c.involves(interval_id))
                .collect();

        info!(
            interval_id,
            reviewer_id,
            owner_id = %approved.owner_id(),
            conflicts = conflicts.len(),
            "Leave request approved"
        );

        Ok(ApprovalOutcome {
            interval: approved,
            balance,
            conflicts,
        })
    }

    /// Rejects a pending interval. The balance is not touched.
    pub fn reject(
        &mut self,
        interval_id: &str,
        reviewer_id: &str,
        reason: Option<String>,
        at: DateTime<Utc>,
    ) -> LeaveResult<LeaveInterval> {
        let interval = self.require_interval(interval_id)?;
        Self::require_pending(&interval, LeaveStatus::Rejected)?;

        let message = match &reason {
            Some(text) if !text.is_empty() => format!(
                "Your {} leave request for {} to {} has been rejected: {}",
                interval.category(),
                interval.start_date(),
                interval.end_date(),
                text
            ),
            _ => format!(
                "Your {} leave request for {} to {} has been rejected",
                interval.category(),
                interval.start_date(),
                interval.end_date()
            ),
        };

        self.store.persist_interval_status(
            interval_id,
            LeaveStatus::Rejected,
            StatusMetadata {
                actor_id: reviewer_id.to_string(),
                at,
                reason,
            },
        )?;
        self.store.notify(interval.owner_id(), &message);

        info!(interval_id, reviewer_id, "Leave request rejected");
        self.require_interval(interval_id)
    }

    /// Withdraws a pending interval on behalf of its owner. The balance is
    /// not touched.
    pub fn cancel(
        &mut self,
        interval_id: &str,
        requester_id: &str,
        at: DateTime<Utc>,
    ) -> LeaveResult<LeaveInterval> {
        let interval = self.require_interval(interval_id)?;
        if interval.owner_id() != requester_id {
            return Err(LeaveError::NotOwner {
                interval_id: interval_id.to_string(),
                actor_id: requester_id.to_string(),
            });
        }
        Self::require_pending(&interval, LeaveStatus::Cancelled)?;

        self.store.persist_interval_status(
            interval_id,
            LeaveStatus::Cancelled,
            StatusMetadata {
                actor_id: requester_id.to_string(),
                at,
                reason: None,
            },
        )?;

        info!(interval_id, requester_id, "Leave request cancelled");
        self.require_interval(interval_id)
    }

    /// Conflicts among approved leave overlapping `range` under `scope`.
    pub fn conflicts(
        &self,
        range: &DateRange,
        scope: &ScopeFilter,
    ) -> LeaveResult<Vec<ConflictRecord>> {
        Ok(detect(&self.store.fetch_approved_intervals(range, scope)?))
    }

    /// The calendar export for a month under `scope`.
    pub fn calendar(
        &self,
        year: i32,
        month: u32,
        scope: &ScopeFilter,
    ) -> LeaveResult<MonthlyCalendar> {
        let range = month_range(year, month)?;
        MonthlyCalendar::build(year, month, self.store.fetch_intervals(&range, scope)?)
    }
}
