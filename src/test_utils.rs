//! Shared test utilities.
//!
//! Builders for leave records, intervals, requests and balances with
//! sensible defaults, plus a store whose balance writes can be made to fail.

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::LeavePolicy;
use crate::error::{LeaveError, LeaveResult};
use crate::models::{
    BalanceRecord, DateRange, LeaveCategory, LeaveInterval, LeaveRecord, LeaveRequest,
    LeaveStatus, RequestFilter, ScopeFilter, StatusMetadata,
};
use crate::store::{InMemoryStore, LeaveStore, Notification};

/// Parses a `YYYY-MM-DD` date.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Decision metadata stamped now.
pub fn metadata(actor_id: &str) -> StatusMetadata {
    StatusMetadata {
        actor_id: actor_id.to_string(),
        at: Utc::now(),
        reason: None,
    }
}

/// A raw vacation record with the given dates and status.
pub fn record(
    id: &str,
    owner_id: &str,
    start: &str,
    end: &str,
    status: LeaveStatus,
) -> LeaveRecord {
    LeaveRecord {
        id: id.to_string(),
        owner_id: owner_id.to_string(),
        category: LeaveCategory::Vacation,
        start_date: start.to_string(),
        end_date: end.to_string(),
        status,
        reason: String::new(),
        decision: None,
        created_at: None,
    }
}

/// A pending vacation interval.
pub fn pending(id: &str, owner_id: &str, start: &str, end: &str) -> LeaveInterval {
    LeaveInterval::new(id, owner_id, LeaveCategory::Vacation, date(start), date(end)).unwrap()
}

/// An approved vacation interval.
pub fn approved(id: &str, owner_id: &str, start: &str, end: &str) -> LeaveInterval {
    let mut interval = pending(id, owner_id, start, end);
    interval
        .transition(LeaveStatus::Approved, metadata("hr_001"))
        .unwrap();
    interval
}

/// A leave request with no reason.
pub fn request(owner_id: &str, category: LeaveCategory, start: &str, end: &str) -> LeaveRequest {
    LeaveRequest {
        owner_id: owner_id.to_string(),
        category,
        start_date: date(start),
        end_date: date(end),
        reason: String::new(),
    }
}

/// A fresh balance with the default policy's entitlements.
pub fn default_balance(owner_id: &str) -> BalanceRecord {
    BalanceRecord::new(owner_id, LeavePolicy::default().entitlements().clone())
}

/// An [`InMemoryStore`] whose balance writes fail while
/// `fail_balance_writes` is set.
#[derive(Debug, Default)]
pub struct FlakyBalanceStore {
    pub inner: InMemoryStore,
    pub fail_balance_writes: bool,
}

impl LeaveStore for FlakyBalanceStore {
    fn fetch_approved_intervals(
        &self,
        range: &DateRange,
        scope: &ScopeFilter,
    ) -> LeaveResult<Vec<LeaveInterval>> {
        self.inner.fetch_approved_intervals(range, scope)
    }

    fn fetch_intervals(
        &self,
        range: &DateRange,
        scope: &ScopeFilter,
    ) -> LeaveResult<Vec<LeaveInterval>> {
        self.inner.fetch_intervals(range, scope)
    }

    fn fetch_requests(&self, filter: &RequestFilter) -> LeaveResult<Vec<LeaveInterval>> {
        self.inner.fetch_requests(filter)
    }

    fn fetch_interval(&self, interval_id: &str) -> LeaveResult<Option<LeaveInterval>> {
        self.inner.fetch_interval(interval_id)
    }

    fn insert_interval(&mut self, interval: LeaveInterval) -> LeaveResult<()> {
        self.inner.insert_interval(interval)
    }

    fn fetch_balance(&self, owner_id: &str) -> LeaveResult<Option<BalanceRecord>> {
        self.inner.fetch_balance(owner_id)
    }

    fn persist_balance(&mut self, owner_id: &str, record: &BalanceRecord) -> LeaveResult<()> {
        if self.fail_balance_writes {
            return Err(LeaveError::Store {
                message: "balance store unavailable".to_string(),
            });
        }
        self.inner.persist_balance(owner_id, record)
    }

    fn persist_interval_status(
        &mut self,
        interval_id: &str,
        status: LeaveStatus,
        metadata: StatusMetadata,
    ) -> LeaveResult<()> {
        self.inner.persist_interval_status(interval_id, status, metadata)
    }

    fn notify(&mut self, recipient_id: &str, message: &str) {
        self.inner.notify(recipient_id, message);
    }

    fn fetch_notifications(
        &self,
        recipient_id: &str,
        unread_only: bool,
        limit: usize,
    ) -> LeaveResult<Vec<Notification>> {
        self.inner.fetch_notifications(recipient_id, unread_only, limit)
    }

    fn mark_notification_read(
        &mut self,
        notification_id: &str,
        at: DateTime<Utc>,
    ) -> LeaveResult<Notification> {
        self.inner.mark_notification_read(notification_id, at)
    }

    fn mark_all_notifications_read(
        &mut self,
        recipient_id: &str,
        at: DateTime<Utc>,
    ) -> LeaveResult<usize> {
        self.inner.mark_all_notifications_read(recipient_id, at)
    }
}
