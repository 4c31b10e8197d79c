// Netswitch - Adapter References
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Network adapter references.
//!
//! Adapters are enumerated by the host, not by this crate. An [`AdapterRef`]
//! is an opaque key handed in by the caller and never modified.

use serde::{Deserialize, Serialize};

/// A host network interface, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdapterRef {
    /// Interface name (e.g., "Ethernet0", "Wi-Fi", "enp3s0").
    name: String,
}

impl AdapterRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Get the interface name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<&str> for AdapterRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for AdapterRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
