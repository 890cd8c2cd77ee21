//! Configuration loading and management for the Leave Engine.
//!
//! This module loads the leave policy (starter entitlements and
//! notification routing) from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded policy: {}", config.policy().metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{LeavePolicy, NotificationConfig, PolicyFile, PolicyMetadata};
