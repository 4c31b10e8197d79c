// Netswitch - Profile Data Model
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Profile data model and serialization.
//!
//! A Profile is a named snapshot of an [`AdapterConfiguration`]. On disk it is
//! a flat [`ProfileRecord`] whose field names are stable within one schema
//! version.

use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::configuration::{AdapterConfiguration, AddressConfig, AddressMode, DnsConfig, DnsMode};
use super::error::Result;
use super::schema::SchemaVersion;
use super::validation::{self, StaticAddressInput};

/// A named configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Unique profile name, used as the storage key.
    pub name: String,
    pub configuration: AdapterConfiguration,
    /// When the profile was last written.
    pub saved_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(name: impl Into<String>, configuration: AdapterConfiguration) -> Self {
        Self {
            name: name.into(),
            configuration,
            saved_at: Utc::now(),
        }
    }

    /// Get the profile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(&ProfileRecord::from(self))?)
    }

    /// Deserialize from TOML string.
    pub fn from_toml(s: &str) -> Result<Self> {
        let record: ProfileRecord = toml::from_str(s)?;
        record.into_profile()
    }
}

/// Persisted layout of one profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub schema_version: SchemaVersion,
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub address_mode: AddressMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<Ipv4Addr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<Ipv4Addr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<Ipv4Addr>,
    pub dns_mode: DnsMode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dns_servers: Vec<Ipv4Addr>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_provider: Option<String>,
}

impl ProfileRecord {
    /// Rebuild the profile, re-checking every configuration invariant.
    pub fn into_profile(self) -> Result<Profile> {
        self.schema_version.check()?;

        let ip = self.ip.map(|a| a.to_string()).unwrap_or_default();
        let subnet = self.subnet.map(|a| a.to_string()).unwrap_or_default();
        let gateway = self.gateway.map(|a| a.to_string()).unwrap_or_default();
        let input = StaticAddressInput {
            ip: &ip,
            subnet_mask: &subnet,
            gateway: &gateway,
        };
        let address = validation::validate_address(self.address_mode, Some(&input))?;

        let servers: Vec<String> = self.dns_servers.iter().map(|s| s.to_string()).collect();
        let dns = validation::validate_dns(self.dns_mode, &servers, self.dns_provider.as_deref())?;

        Ok(Profile {
            name: self.name,
            configuration: AdapterConfiguration::new(address, dns),
            saved_at: self.saved_at,
        })
    }
}

impl From<&Profile> for ProfileRecord {
    fn from(profile: &Profile) -> Self {
        let config = &profile.configuration;
        let (ip, subnet, gateway) = match &config.address {
            AddressConfig::Static(addr) => (Some(addr.ip), Some(addr.subnet_mask), Some(addr.gateway)),
            AddressConfig::Dhcp => (None, None, None),
        };
        let (dns_servers, dns_provider) = match &config.dns {
            DnsConfig::Dhcp => (Vec::new(), None),
            DnsConfig::Manual(servers) => (servers.clone(), None),
            DnsConfig::Provider(provider) => (Vec::new(), Some(provider.key().to_string())),
        };

        Self {
            schema_version: SchemaVersion::current(),
            name: profile.name.clone(),
            saved_at: profile.saved_at,
            address_mode: config.address_mode(),
            ip,
            subnet,
            gateway,
            dns_mode: config.dns_mode(),
            dns_servers,
            dns_provider,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::configuration::StaticAddress;
    use crate::models::error::{Error, ValidationError};
    use crate::models::provider::DnsProvider;

    fn office() -> AdapterConfiguration {
        AdapterConfiguration::new(
            AddressConfig::Static(StaticAddress::new(
                Ipv4Addr::new(10, 1, 2, 30),
                Ipv4Addr::new(255, 255, 0, 0),
                Ipv4Addr::new(10, 1, 0, 1),
            )),
            DnsConfig::Provider(DnsProvider::OpenDns),
        )
    }

    #[test]
    fn test_record_layout() {
        let profile = Profile::new("office", office());
        let toml = profile.to_toml().expect("Profile should serialize to TOML");
        assert!(toml.contains("address_mode = \"static\""));
        assert!(toml.contains("subnet = \"255.255.0.0\""));
        assert!(toml.contains("dns_mode = \"provider\""));
        assert!(toml.contains("dns_provider = \"opendns\""));
        assert!(!toml.contains("dns_servers"));

        let restored = Profile::from_toml(&toml).expect("Profile should deserialize from TOML");
        assert_eq!(restored, profile);
    }

    #[test]
    fn test_record_for_dhcp_omits_address_fields() {
        let profile = Profile::new("roaming", AdapterConfiguration::dhcp());
        let toml = profile.to_toml().expect("Profile should serialize to TOML");
        assert!(!toml.contains("ip ="));
        assert!(!toml.contains("gateway"));
    }

    #[test]
    fn test_record_rejects_broken_invariants() {
        let toml = r#"
            schema_version = "1.0.0"
            name = "broken"
            saved_at = "2026-01-01T00:00:00Z"
            address_mode = "static"
            ip = "10.0.0.2"
            dns_mode = "dhcp"
        "#;
        match Profile::from_toml(toml) {
            Err(Error::Validation(ValidationError::IncompleteStaticConfig { .. })) => {}
            other => panic!("expected incomplete static config, got {:?}", other),
        }
    }

    #[test]
    fn test_record_rejects_newer_major_schema() {
        let toml = r#"
            schema_version = "2.0.0"
            name = "future"
            saved_at = "2026-01-01T00:00:00Z"
            address_mode = "dhcp"
            dns_mode = "dhcp"
        "#;
        assert!(matches!(Profile::from_toml(toml), Err(Error::SchemaMismatch { .. })));
    }
}
