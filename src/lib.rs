//! Leave Engine for HR leave management
//!
//! This crate detects overlapping approved leave, validates new leave
//! requests against date rules and per-category balances, and keeps the
//! balance ledger consistent through the approval workflow.
//!
//! - [`scheduling`]: conflict detection, validation, suggestions and the
//!   monthly calendar
//! - [`workflow`]: submission, review, balance bookkeeping and the
//!   dashboard
//! - [`store`]: the persistence boundary
//! - [`api`]: the HTTP surface

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduling;
pub mod store;
pub mod workflow;

#[cfg(test)]
mod test_utils;
