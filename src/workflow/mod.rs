//! The leave request lifecycle.
//!
//! - [`BalanceLedger`]: per-owner entitlement and usage, with a journal of
//!   applied intervals
//! - [`LeaveWorkflow`]: submit, approve, reject and cancel against a
//!   [`LeaveStore`](crate::store::LeaveStore)
//! - [`ReconciliationReport`]: the result of repairing an owner's balance
//! - [`Dashboard`]: balance figures with recent and upcoming leave
//!
//! # Example
//!
//! ```
//! use chrono::{NaiveDate, Utc};
//! use leave_engine::config::LeavePolicy;
//! use leave_engine::models::{LeaveCategory, LeaveRequest};
//! use leave_engine::store::InMemoryStore;
//! use leave_engine::workflow::LeaveWorkflow;
//!
//! let mut workflow = LeaveWorkflow::new(InMemoryStore::new(), &LeavePolicy::default());
//! let request = LeaveRequest {
//!     owner_id: "emp_001".to_string(),
//!     category: LeaveCategory::Vacation,
//!     start_date: NaiveDate::from_ymd_opt(2024, 8, 10).unwrap(),
//!     end_date: NaiveDate::from_ymd_opt(2024, 8, 12).unwrap(),
//!     reason: "Family trip".to_string(),
//! };
//!
//! let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
//! let submission = workflow.submit(request, today).unwrap();
//! let outcome = workflow
//!     .approve(submission.interval.id(), "hr_001", Utc::now())
//!     .unwrap();
//!
//! assert_eq!(outcome.balance.available(LeaveCategory::Vacation), 22);
//! ```

mod approval;
mod ledger;
mod overview;
mod reconcile;

pub use approval::{ApprovalOutcome, LeaveWorkflow, RequestCheck, Submission};
pub use ledger::BalanceLedger;
pub use overview::{Dashboard, NOTIFICATION_LIMIT, RECENT_REQUESTS, UPCOMING_LEAVE};
pub use reconcile::ReconciliationReport;
