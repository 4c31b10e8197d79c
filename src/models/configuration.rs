// Netswitch - Adapter Configuration
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Per-adapter configuration intent.
//!
//! [`AdapterConfiguration`] is the validated, typed form of what the operator
//! asked for. [`ConfigurationForm`] is the raw text a presentation layer
//! collects; [`ConfigurationForm::resolve`] turns one into the other.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::provider::DnsProvider;
use super::validation::{self, StaticAddressInput};

/// IPv4 address source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AddressMode {
    /// Obtain address via DHCP.
    #[default]
    Dhcp,
    /// Fixed address, mask and gateway.
    Static,
}

impl AddressMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dhcp => "dhcp",
            Self::Static => "static",
        }
    }
}

/// DNS server source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DnsMode {
    /// DNS servers supplied by DHCP.
    #[default]
    Dhcp,
    /// Servers entered by the operator.
    Manual,
    /// Servers taken from a provider preset.
    Provider,
}

impl DnsMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dhcp => "dhcp",
            Self::Manual => "manual",
            Self::Provider => "provider",
        }
    }
}

/// Static IPv4 settings. All three fields are always present together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticAddress {
    pub ip: Ipv4Addr,
    pub subnet_mask: Ipv4Addr,
    pub gateway: Ipv4Addr,
}

impl StaticAddress {
    pub fn new(ip: Ipv4Addr, subnet_mask: Ipv4Addr, gateway: Ipv4Addr) -> Self {
        Self {
            ip,
            subnet_mask,
            gateway,
        }
    }

    /// Prefix length implied by the mask (leading one bits).
    pub fn prefix_len(&self) -> u8 {
        u32::from(self.subnet_mask).leading_ones() as u8
    }
}

/// Address half of a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressConfig {
    Dhcp,
    Static(StaticAddress),
}

impl AddressConfig {
    pub fn mode(&self) -> AddressMode {
        match self {
            Self::Dhcp => AddressMode::Dhcp,
            Self::Static(_) => AddressMode::Static,
        }
    }
}

/// DNS half of a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsConfig {
    Dhcp,
    /// Operator-supplied servers, primary first. Never empty once validated.
    Manual(Vec<Ipv4Addr>),
    Provider(DnsProvider),
}

impl DnsConfig {
    pub fn mode(&self) -> DnsMode {
        match self {
            Self::Dhcp => DnsMode::Dhcp,
            Self::Manual(_) => DnsMode::Manual,
            Self::Provider(_) => DnsMode::Provider,
        }
    }

    /// Concrete server list, or `None` when DHCP supplies it.
    pub fn servers(&self) -> Option<Vec<Ipv4Addr>> {
        match self {
            Self::Dhcp => None,
            Self::Manual(servers) => Some(servers.clone()),
            Self::Provider(provider) => Some(provider.servers().to_vec()),
        }
    }
}

/// The full intent for one adapter.
///
/// Address and DNS settings are independent: any combination is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfiguration {
    pub address: AddressConfig,
    pub dns: DnsConfig,
}

impl AdapterConfiguration {
    pub fn new(address: AddressConfig, dns: DnsConfig) -> Self {
        Self { address, dns }
    }

    /// Address and DNS both from DHCP.
    pub fn dhcp() -> Self {
        Self::new(AddressConfig::Dhcp, DnsConfig::Dhcp)
    }

    pub fn address_mode(&self) -> AddressMode {
        self.address.mode()
    }

    pub fn dns_mode(&self) -> DnsMode {
        self.dns.mode()
    }

    pub fn static_address(&self) -> Option<&StaticAddress> {
        match &self.address {
            AddressConfig::Static(addr) => Some(addr),
            AddressConfig::Dhcp => None,
        }
    }

    pub fn dns_provider(&self) -> Option<DnsProvider> {
        match self.dns {
            DnsConfig::Provider(provider) => Some(provider),
            _ => None,
        }
    }
}

impl Default for AdapterConfiguration {
    fn default() -> Self {
        Self::dhcp()
    }
}

/// Raw field values as collected by a presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationForm {
    pub ip: String,
    pub subnet_mask: String,
    pub gateway: String,
    pub dns_mode: DnsMode,
    /// Manual DNS servers, separated by commas or whitespace.
    pub dns_servers: String,
    pub dns_provider: String,
}

impl ConfigurationForm {
    /// Leaving every address field empty means DHCP, whatever the DNS fields hold.
    pub fn address_mode(&self) -> AddressMode {
        let all_empty = [&self.ip, &self.subnet_mask, &self.gateway]
            .iter()
            .all(|field| field.trim().is_empty());
        if all_empty {
            AddressMode::Dhcp
        } else {
            AddressMode::Static
        }
    }

    /// Manual DNS entries in the order typed.
    pub fn manual_dns_entries(&self) -> Vec<&str> {
        self.dns_servers
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Validate the form and produce a typed configuration.
    pub fn resolve(&self) -> Result<AdapterConfiguration, ValidationError> {
        let input = StaticAddressInput {
            ip: &self.ip,
            subnet_mask: &self.subnet_mask,
            gateway: &self.gateway,
        };
        let address = validation::validate_address(self.address_mode(), Some(&input))?;

        let provider = Some(self.dns_provider.as_str()).filter(|p| !p.is_empty());
        let dns = validation::validate_dns(self.dns_mode, &self.manual_dns_entries(), provider)?;

        Ok(AdapterConfiguration::new(address, dns))
    }
}

impl From<&AdapterConfiguration> for ConfigurationForm {
    fn from(config: &AdapterConfiguration) -> Self {
        let mut form = ConfigurationForm {
            dns_mode: config.dns_mode(),
            ..Default::default()
        };

        if let Some(addr) = config.static_address() {
            form.ip = addr.ip.to_string();
            form.subnet_mask = addr.subnet_mask.to_string();
            form.gateway = addr.gateway.to_string();
        }

        match &config.dns {
            DnsConfig::Dhcp => {}
            DnsConfig::Manual(servers) => {
                form.dns_servers = servers
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
            }
            DnsConfig::Provider(provider) => {
                form.dns_provider = provider.key().to_string();
            }
        }

        form
    }
}
