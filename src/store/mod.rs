//! Persistence boundary for the Leave Engine.
//!
//! The engine never owns leave or balance data. It reads and writes through
//! the [`LeaveStore`] trait, which stands in for the external document
//! store. [`InMemoryStore`] implements it for the service binary and tests.

mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LeaveResult;
use crate::models::{
    BalanceRecord, DateRange, LeaveInterval, LeaveStatus, RequestFilter, ScopeFilter,
    StatusMetadata,
};

pub use memory::InMemoryStore;

/// A message delivered to a user through the notification side channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Store-assigned ID.
    pub id: String,
    /// The recipient.
    pub recipient_id: String,
    /// The message text.
    pub message: String,
    /// When the notification was queued.
    pub created_at: DateTime<Utc>,
    /// Whether the recipient has read it.
    pub read: bool,
    /// When it was marked read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_at: Option<DateTime<Utc>>,
}

/// Operations the engine needs from its backing store.
///
/// Implementations are expected to apply each write atomically per record.
/// They are not expected to offer transactions across records; the
/// workflow sequences its writes and can repair a partial approval.
pub trait LeaveStore {
    /// Approved intervals overlapping `range` and visible under `scope`.
    fn fetch_approved_intervals(
        &self,
        range: &DateRange,
        scope: &ScopeFilter,
    ) -> LeaveResult<Vec<LeaveInterval>>;

    /// Intervals in any status overlapping `range` and visible under `scope`.
    fn fetch_intervals(
        &self,
        range: &DateRange,
        scope: &ScopeFilter,
    ) -> LeaveResult<Vec<LeaveInterval>>;

    /// Intervals matching `filter`, most recently submitted first.
    fn fetch_requests(&self, filter: &RequestFilter) -> LeaveResult<Vec<LeaveInterval>>;

    /// A single interval by ID.
    fn fetch_interval(&self, interval_id: &str) -> LeaveResult<Option<LeaveInterval>>;

    /// Stores a newly submitted interval.
    fn insert_interval(&mut self, interval: LeaveInterval) -> LeaveResult<()>;

    /// The owner's balance record, if one exists.
    fn fetch_balance(&self, owner_id: &str) -> LeaveResult<Option<BalanceRecord>>;

    /// Writes the owner's balance record.
    fn persist_balance(&mut self, owner_id: &str, record: &BalanceRecord) -> LeaveResult<()>;

    /// Moves an interval to a new status with its decision metadata.
    fn persist_interval_status(
        &mut self,
        interval_id: &str,
        status: LeaveStatus,
        metadata: StatusMetadata,
    ) -> LeaveResult<()>;

    /// Sends a notification. Delivery failures are not reported.
    fn notify(&mut self, recipient_id: &str, message: &str);

    /// Up to `limit` of the recipient's notifications, newest first.
    fn fetch_notifications(
        &self,
        recipient_id: &str,
        unread_only: bool,
        limit: usize,
    ) -> LeaveResult<Vec<Notification>>;

    /// Marks one notification read. Marking an already read notification
    /// keeps its original `read_at`.
    fn mark_notification_read(
        &mut self,
        notification_id: &str,
        at: DateTime<Utc>,
    ) -> LeaveResult<Notification>;

    /// Marks every unread notification for the recipient read and returns
    /// how many changed.
    fn mark_all_notifications_read(
        &mut self,
        recipient_id: &str,
        at: DateTime<Utc>,
    ) -> LeaveResult<usize>;
}
