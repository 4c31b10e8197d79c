// Netswitch - Data Model
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Data Model
//!
//! Shared types used by the planner, the profile store and the applier:
//!
//! - **Adapter**: opaque references to host interfaces
//! - **Configuration**: the validated intent for one adapter
//! - **Provider**: the compiled-in DNS preset table
//! - **Command**: OS-level commands and ordered plans
//! - **Profile**: named, persisted configuration snapshots
//! - **Result**: per-step outcomes of applying a plan
//! - **Error**: shared error types

pub mod adapter;
pub mod command;
pub mod config;
pub mod configuration;
pub mod error;
pub mod profile;
pub mod provider;
pub mod result;
pub mod schema;
pub mod validation;

// Re-export main types for convenience
pub use adapter::AdapterRef;
pub use command::{AddressTarget, Command, CommandPlan, ConfigAction, DnsTarget};
pub use config::{AppConfig, CommandDialect, ToolPaths};
pub use configuration::{
    AdapterConfiguration, AddressConfig, AddressMode, ConfigurationForm, DnsConfig, DnsMode,
    StaticAddress,
};
pub use error::{Error, Result, StaticField, ValidationError};
pub use profile::Profile;
pub use provider::DnsProvider;
pub use result::{ApplyResult, FailureCause, StepResult, StepStatus};
pub use schema::SchemaVersion;

/// Configuration directory name (under XDG_CONFIG_HOME).
pub const CONFIG_DIR_NAME: &str = "netswitch";
