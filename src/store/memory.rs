//! In-memory implementation of [`LeaveStore`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::error::{LeaveError, LeaveResult};
use crate::models::{
    BalanceRecord, DateRange, LeaveInterval, LeaveStatus, RequestFilter, ScopeFilter,
    StatusMetadata,
};

use super::{LeaveStore, Notification};

/// A [`LeaveStore`] backed by hash maps.
///
/// Range queries are sorted by start date, then ID, so callers see a stable
/// order. Request listings are sorted newest first.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    intervals: HashMap<String, LeaveInterval>,
    balances: HashMap<String, BalanceRecord>,
    notifications: Vec<Notification>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications sent so far, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Notifications addressed to one recipient.
    pub fn notifications_for(&self, recipient_id: &str) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id)
            .collect()
    }

    fn query<F>(&self, range: &DateRange, scope: &ScopeFilter, keep: F) -> Vec<LeaveInterval>
    where
        F: Fn(&LeaveInterval) -> bool,
    {
        let mut found: Vec<LeaveInterval> = self
            .intervals
            .values()
            .filter(|i| scope.matches(i.owner_id()))
            .filter(|i| range.intersects(i.start_date(), i.end_date()))
            .filter(|i| keep(*i))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.start_date()
                .cmp(&b.start_date())
                .then_with(|| a.id().cmp(b.id()))
        });
        found
    }
}

impl LeaveStore for InMemoryStore {
    fn fetch_approved_intervals(
        &self,
        range: &DateRange,
        scope: &ScopeFilter,
    ) -> LeaveResult<Vec<LeaveInterval>> {
        Ok(self.query(range, scope, |i| i.is_approved()))
    }

    fn fetch_intervals(
        &self,
        range: &DateRange,
        scope: &ScopeFilter,
    ) -> LeaveResult<Vec<LeaveInterval>> {
        Ok(self.query(range, scope, |_| true))
    }

    fn fetch_requests(&self, filter: &RequestFilter) -> LeaveResult<Vec<LeaveInterval>> {
        let mut found: Vec<LeaveInterval> = self
            .intervals
            .values()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(found)
    }

    fn fetch_interval(&self, interval_id: &str) -> LeaveResult<Option<LeaveInterval>> {
        Ok(self.intervals.get(interval_id).cloned())
    }

    fn insert_interval(&mut self, interval: LeaveInterval) -> LeaveResult<()> {
        if self.intervals.contains_key(interval.id()) {
            return Err(LeaveError::Store {
                message: format!("leave interval '{}' already exists", interval.id()),
            });
        }
        self.intervals.insert(interval.id().to_string(), interval);
        Ok(())
    }

    fn fetch_balance(&self, owner_id: &str) -> LeaveResult<Option<BalanceRecord>> {
        Ok(self.balances.get(owner_id).cloned())
    }

    fn persist_balance(&mut self, owner_id: &str, record: &BalanceRecord) -> LeaveResult<()> {
        self.balances.insert(owner_id.to_string(), record.clone());
        Ok(())
    }

    fn persist_interval_status(
        &mut self,
        interval_id: &str,
        status: LeaveStatus,
        metadata: StatusMetadata,
    ) -> LeaveResult<()> {
        let interval =
            self.intervals
                .get_mut(interval_id)
                .ok_or_else(|| LeaveError::IntervalNotFound {
                    interval_id: interval_id.to_string(),
                })?;
        interval.transition(status, metadata)
    }

    fn notify(&mut self, recipient_id: &str, message: &str) {
        let id = Uuid::new_v4().to_string();
        debug!(recipient_id, notification_id = %id, "Queued notification");
        self.notifications.push(Notification {
            id,
            recipient_id: recipient_id.to_string(),
            message: message.to_string(),
            created_at: Utc::now(),
            read: false,
            read_at: None,
        });
    }

    fn fetch_notifications(
        &self,
        recipient_id: &str,
        unread_only: bool,
        limit: usize,
    ) -> LeaveResult<Vec<Notification>> {
        // Later pushes win ties on `created_at`.
        let mut found: Vec<Notification> = self
            .notifications
            .iter()
            .rev()
            .filter(|n| n.recipient_id == recipient_id && !(unread_only && n.read))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found.truncate(limit);
        Ok(found)
    }

    fn mark_notification_read(
        &mut self,
        notification_id: &str,
        at: DateTime<Utc>,
    ) -> LeaveResult<Notification> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
            .ok_or_else(|| LeaveError::NotificationNotFound {
                notification_id: notification_id.to_string(),
            })?;
        if !notification.read {
            notification.read = true;
            notification.read_at = Some(at);
        }
        Ok(notification.clone())
    }

    fn mark_all_notifications_read(
        &mut self,
        recipient_id: &str,
        at: DateTime<Utc>,
    ) -> LeaveResult<usize> {
        let mut marked = 0;
        for notification in self
            .notifications
            .iter_mut()
            .filter(|n| n.recipient_id == recipient_id && !n.read)
        {
            notification.read = true;
            notification.read_at = Some(at);
            marked += 1;
        }
        Ok(marked)
    }
}
