// Netswitch - Library Root
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Netswitch
//!
//! Switches network adapters between DHCP and static IPv4/DNS configurations
//! and keeps named profiles for reapplying them.
//!
//! The pipeline for one request is:
//!
//! 1. **Validate** raw input into an [`AdapterConfiguration`]
//!    ([`models::validation`])
//! 2. **Plan** the OS commands that realize it ([`ConfigurationPlanner`])
//! 3. **Persist** it as a named profile if asked ([`ProfileStore`])
//! 4. **Apply** the plan through an injected executor ([`services::apply`])
//!
//! Adapter enumeration and presentation are left to the caller.

pub mod models;
pub mod planner;
pub mod services;
pub mod storage;

pub use models::{
    AdapterConfiguration, AdapterRef, ApplyResult, CommandPlan, ConfigurationForm, DnsProvider,
    Error, Result,
};
pub use planner::ConfigurationPlanner;
pub use services::{CommandExecutor, Configurator, ProfileIntent, SystemExecutor};
pub use storage::ProfileStore;

/// Human-readable application name.
pub const APP_NAME: &str = "Netswitch";

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
