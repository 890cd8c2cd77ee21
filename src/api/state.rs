//! Application state for the Leave Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::{ConfigLoader, LeavePolicy};
use crate::error::{LeaveError, LeaveResult};
use crate::store::InMemoryStore;
use crate::workflow::LeaveWorkflow;

/// Shared application state.
///
/// Holds the leave workflow behind a mutex so that each request sees and
/// applies a consistent sequence of store writes.
#[derive(Clone)]
pub struct AppState {
    workflow: Arc<Mutex<LeaveWorkflow<InMemoryStore>>>,
    policy: Arc<LeavePolicy>,
}

impl AppState {
    /// Creates a new application state with an empty store and the loaded policy.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_store(InMemoryStore::new(), config.into_policy())
    }

    /// Creates a new application state over an existing store.
    pub fn with_store(store: InMemoryStore, policy: LeavePolicy) -> Self {
        Self {
            workflow: Arc::new(Mutex::new(LeaveWorkflow::new(store, &policy))),
            policy: Arc::new(policy),
        }
    }

    /// Returns the active leave policy.
    pub fn policy(&self) -> &LeavePolicy {
        &self.policy
    }

    /// Locks the workflow for the duration of one request.
    pub fn workflow(&self) -> LeaveResult<MutexGuard<'_, LeaveWorkflow<InMemoryStore>>> {
        self.workflow.lock().map_err(|_| LeaveError::Store {
            message: "workflow lock poisoned".to_string(),
        })
    }
}
