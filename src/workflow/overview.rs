//! Read-side views over the store: request listings, the dashboard summary
//! and the notification inbox.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::LeaveResult;
use crate::models::{LeaveCategory, LeaveInterval, LeaveStatus, RequestFilter, ScopeFilter};
use crate::store::{LeaveStore, Notification};

use super::LeaveWorkflow;

/// How many of the newest requests the dashboard lists.
pub const RECENT_REQUESTS: usize = 5;

/// How many upcoming approved intervals the dashboard lists.
pub const UPCOMING_LEAVE: usize = 3;

/// The most notifications returned for one recipient.
pub const NOTIFICATION_LIMIT: usize = 50;

/// Summary figures for one user's landing view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    /// The user the balance figures belong to.
    pub owner_id: String,
    /// Vacation days left. Negative when overdrawn.
    pub available_vacation: i64,
    /// Days used across every category.
    pub total_used: u64,
    /// Pending requests visible under the dashboard's scope.
    pub pending_requests: usize,
    /// Every request in the store, present only for an all-owners scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_requests: Option<usize>,
    /// The newest visible requests.
    pub recent: Vec<LeaveInterval>,
    /// The next approved leave starting after today, soonest first.
    pub upcoming: Vec<LeaveInterval>,
}

impl<S: LeaveStore> LeaveWorkflow<S> {
    /// Requests matching `filter`, most recently submitted first.
    pub fn requests(&self, filter: &RequestFilter) -> LeaveResult<Vec<LeaveInterval>> {
        let found = self.store.fetch_requests(filter)?;
        debug!(found = found.len(), "Listed leave requests");
        Ok(found)
    }

    /// Builds the dashboard for `owner_id`.
    ///
    /// Balance figures are always the owner's own. The request counts and
    /// lists cover whatever `scope` makes visible, so a reviewer passing
    /// [`ScopeFilter::All`] sees the whole team.
    pub fn dashboard(
        &mut self,
        owner_id: &str,
        scope: &ScopeFilter,
        today: NaiveDate,
    ) -> LeaveResult<Dashboard> {
        let balance = self.ledger.get_balance(&mut self.store, owner_id)?;
        let visible = self.store.fetch_requests(&RequestFilter::scoped(scope.clone()))?;

        let pending_requests = visible
            .iter()
            .filter(|i| i.status() == LeaveStatus::Pending)
            .count();
        let team_requests = matches!(scope, ScopeFilter::All).then_some(visible.len());

        let mut upcoming: Vec<LeaveInterval> = visible
            .iter()
            .filter(|i| i.is_approved() && i.start_date() > today)
            .cloned()
            .collect();
        upcoming.sort_by(|a, b| {
            a.start_date()
                .cmp(&b.start_date())
                .then_with(|| a.id().cmp(b.id()))
        });
        upcoming.truncate(UPCOMING_LEAVE);

        let recent: Vec<LeaveInterval> = visible.into_iter().take(RECENT_REQUESTS).collect();

        Ok(Dashboard {
            owner_id: owner_id.to_string(),
            available_vacation: balance.available(LeaveCategory::Vacation),
            total_used: balance.total_used(),
            pending_requests,
            team_requests,
            recent,
            upcoming,
        })
    }

    /// The recipient's newest notifications, optionally unread only.
    pub fn notifications(
        &self,
        recipient_id: &str,
        unread_only: bool,
    ) -> LeaveResult<Vec<Notification>> {
        self.store.fetch_notifications(recipient_id, unread_only, NOTIFICATION_LIMIT)
    }

    /// Marks one notification read.
    pub fn mark_notification_read(
        &mut self,
        notification_id: &str,
        at: DateTime<Utc>,
    ) -> LeaveResult<Notification> {
        let notification = self.store.mark_notification_read(notification_id, at)?;
        info!(
            notification_id,
            recipient_id = %notification.recipient_id,
            "Notification marked read"
        );
        Ok(notification)
    }

    /// Marks all of the recipient's notifications read.
    pub fn mark_all_notifications_read(
        &mut self,
        recipient_id: &str,
        at: DateTime<Utc>,
    ) -> LeaveResult<usize> {
        let marked = self.store.mark_all_notifications_read(recipient_id, at)?;
        info!(recipient_id, marked, "Notifications marked read");
        Ok(marked)
    }
}
