// Netswitch - Error Types
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Shared error types for adapter configuration.

use std::fmt;

use thiserror::Error;

/// Result type alias for Netswitch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which part of a static address was missing or unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticField {
    Ip,
    SubnetMask,
    Gateway,
}

impl StaticField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ip => "IP address",
            Self::SubnetMask => "subnet mask",
            Self::Gateway => "default gateway",
        }
    }
}

impl fmt::Display for StaticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input rejected before anything is planned, persisted or executed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid IPv4 address: {0:?}")]
    InvalidAddressFormat(String),

    #[error("Static configuration is incomplete: {field} is missing")]
    IncompleteStaticConfig { field: StaticField },

    #[error("Unknown DNS provider: {0:?}")]
    UnknownDnsProvider(String),

    #[error("Invalid DNS server list: {0}")]
    InvalidDnsAddress(String),

    #[error("Invalid profile name: {0}")]
    InvalidProfileName(String),
}

/// Main error type for Netswitch operations.
#[derive(Debug, Error)]
pub enum Error {
    // ========================================
    // Validation Errors
    // ========================================
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ========================================
    // Profile Store Errors
    // ========================================
    #[error("Profile store error for {profile:?}: {reason}")]
    Persistence { profile: String, reason: String },

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Profile schema version mismatch: expected {expected}, found {found}")]
    SchemaMismatch { expected: String, found: String },

    // ========================================
    // Execution Errors
    // ========================================
    #[error("Step {step} failed ({command}): {cause}")]
    Execution {
        step: usize,
        command: String,
        cause: String,
    },

    // ========================================
    // Settings Errors
    // ========================================
    #[error("Failed to read configuration: {0}")]
    ConfigReadFailed(String),

    #[error("Failed to write configuration: {0}")]
    ConfigWriteFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParseFailed(String),

    // ========================================
    // System Errors
    // ========================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new persistence error.
    pub fn persistence(profile: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Persistence {
            profile: profile.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if this error was raised by input validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from the profile store.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Persistence { .. } | Self::ProfileNotFound(_) | Self::SchemaMismatch { .. }
        )
    }
}

// Convert from toml parse errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}

// Convert from toml serialize errors
impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::ConfigWriteFailed(err.to_string())
    }
}

// Convert from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}
