//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the leave
//! policy from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{LeaveError, LeaveResult};

use super::types::{LeavePolicy, PolicyFile};

/// Loads and provides access to the leave policy.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── policy.yaml   # Policy metadata, entitlements, notification routing
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_engine::config::ConfigLoader;
/// use leave_engine::models::LeaveCategory;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Vacation days: {}", loader.policy().default_entitlement(LeaveCategory::Vacation));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: LeavePolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns [`LeaveError::ConfigNotFound`] if `policy.yaml` is missing and
    /// [`LeaveError::ConfigParseError`] if it is not valid policy YAML or
    /// leaves every category without entitlement.
    pub fn load<P: AsRef<Path>>(path: P) -> LeaveResult<Self> {
        let policy_path = path.as_ref().join("policy.yaml");
        let file = Self::load_yaml::<PolicyFile>(&policy_path)?;

        if file.entitlements.is_empty() {
            return Err(LeaveError::ConfigParseError {
                path: policy_path.display().to_string(),
                message: "entitlements must list at least one category".to_string(),
            });
        }

        let policy = LeavePolicy::from(file);
        info!(
            policy = %policy.metadata().code,
            version = %policy.metadata().version,
            categories = policy.entitlements().len(),
            "Loaded leave policy"
        );

        Ok(Self { policy })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> LeaveResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| LeaveError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| LeaveError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded policy.
    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }

    /// Consumes the loader, returning the policy.
    pub fn into_policy(self) -> LeavePolicy {
        self.policy
    }
}
