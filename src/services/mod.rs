// Netswitch - Services
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Execution-side services.
//!
//! - Executor: runs single commands on the host
//! - Applier: runs a plan in order, stopping at the first failure
//! - Configurator: the full validate, plan, persist and apply pipeline

pub mod applier;
pub mod configurator;
pub mod executor;

pub use applier::apply;
pub use configurator::{Configurator, ProfileIntent};
pub use executor::{CommandExecutor, CommandOutput, SystemExecutor};
