// Netswitch - Record Format Version
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Format version stamped into every stored profile record.
//!
//! A record is readable when its major version equals ours and its minor
//! version is not newer. Patch versions never matter.

use semver::Version;
use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Version written by this build.
const RECORD_FORMAT: Version = Version::new(1, 0, 0);

/// Record format version, stored as a semver string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaVersion(Version);

impl SchemaVersion {
    /// The version this build writes.
    pub fn current() -> Self {
        Self(RECORD_FORMAT)
    }

    /// Fail with [`Error::SchemaMismatch`] unless a record carrying this
    /// version can be read.
    pub fn check(&self) -> Result<()> {
        let v = &self.0;
        if v.major == RECORD_FORMAT.major && v.minor <= RECORD_FORMAT.minor {
            return Ok(());
        }
        Err(Error::SchemaMismatch {
            expected: RECORD_FORMAT.to_string(),
            found: v.to_string(),
        })
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::current()
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
