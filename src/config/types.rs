//! Configuration types for the leave policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::models::LeaveCategory;

/// Metadata about the policy.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyMetadata {
    /// Short policy code.
    pub code: String,
    /// Human-readable policy name.
    pub name: String,
    /// Version or effective date of the policy.
    pub version: String,
}

/// Notification routing.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Recipient ID for new-request notifications to HR.
    pub hr_recipient: String,
}

/// The leave policy file structure (`policy.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyFile {
    /// Policy metadata.
    pub policy: PolicyMetadata,
    /// Starter allocation per category, in days.
    pub entitlements: BTreeMap<LeaveCategory, u32>,
    /// Notification routing.
    pub notifications: NotificationConfig,
}

/// The leave policy the engine runs with.
///
/// # Example
///
/// ```
/// use leave_engine::config::LeavePolicy;
/// use leave_engine::models::LeaveCategory;
///
/// let policy = LeavePolicy::default();
/// assert_eq!(policy.default_entitlement(LeaveCategory::Vacation), 25);
/// assert_eq!(policy.default_entitlement(LeaveCategory::Maternity), 90);
/// ```
#[derive(Debug, Clone)]
pub struct LeavePolicy {
    metadata: PolicyMetadata,
    entitlements: BTreeMap<LeaveCategory, u32>,
    hr_recipient: String,
}

impl LeavePolicy {
    /// Creates a policy from its component parts.
    pub fn new(
        metadata: PolicyMetadata,
        entitlements: BTreeMap<LeaveCategory, u32>,
        hr_recipient: impl Into<String>,
    ) -> Self {
        Self {
            metadata,
            entitlements,
            hr_recipient: hr_recipient.into(),
        }
    }

    /// Returns the policy metadata.
    pub fn metadata(&self) -> &PolicyMetadata {
        &self.metadata
    }

    /// Returns the starter allocation for every category.
    pub fn entitlements(&self) -> &BTreeMap<LeaveCategory, u32> {
        &self.entitlements
    }

    /// Returns the starter allocation for one category (zero if absent).
    pub fn default_entitlement(&self, category: LeaveCategory) -> u32 {
        self.entitlements.get(&category).copied().unwrap_or(0)
    }

    /// Returns the recipient of new-request notifications.
    pub fn hr_recipient(&self) -> &str {
        &self.hr_recipient
    }
}

impl From<PolicyFile> for LeavePolicy {
    fn from(file: PolicyFile) -> Self {
        LeavePolicy::new(
            file.policy,
            file.entitlements,
            file.notifications.hr_recipient,
        )
    }
}

impl Default for LeavePolicy {
    /// The observed starter allocation: 25/10/5/90/3 days for
    /// vacation/sick/personal/maternity/emergency.
    fn default() -> Self {
        LeavePolicy::new(
            PolicyMetadata {
                code: "standard".to_string(),
                name: "Standard Leave Policy".to_string(),
                version: "1".to_string(),
            },
            BTreeMap::from([
                (LeaveCategory::Vacation, 25),
                (LeaveCategory::Sick, 10),
                (LeaveCategory::Personal, 5),
                (LeaveCategory::Maternity, 90),
                (LeaveCategory::Emergency, 3),
            ]),
            "hr",
        )
    }
}
