// Netswitch - Validation Utilities
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Input validation for address, DNS and profile name fields.
//!
//! Everything here is pure. Validation runs before planning or persistence,
//! so a rejected input never has partial effects.

use std::net::Ipv4Addr;
use std::str::FromStr;

use super::configuration::{AddressConfig, AddressMode, DnsConfig, DnsMode, StaticAddress};
use super::error::{StaticField, ValidationError};
use super::provider::DnsProvider;

/// Maximum profile name length, in characters.
pub const MAX_PROFILE_NAME_LEN: usize = 100;

/// Raw static address fields as typed by the operator.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticAddressInput<'a> {
    pub ip: &'a str,
    pub subnet_mask: &'a str,
    pub gateway: &'a str,
}

/// Validate an IPv4 literal in dotted-quad form.
///
/// Surrounding whitespace, CIDR suffixes and alternate notations are rejected.
pub fn validate_ipv4(s: &str) -> Result<Ipv4Addr, ValidationError> {
    Ipv4Addr::from_str(s).map_err(|_| ValidationError::InvalidAddressFormat(s.to_string()))
}

/// Validate the address half of a configuration.
///
/// In DHCP mode the static fields are ignored. In static mode every field must
/// be present (`IncompleteStaticConfig`) and well-formed (`InvalidAddressFormat`).
pub fn validate_address(
    mode: AddressMode,
    input: Option<&StaticAddressInput<'_>>,
) -> Result<AddressConfig, ValidationError> {
    if mode == AddressMode::Dhcp {
        return Ok(AddressConfig::Dhcp);
    }

    let input = input.copied().unwrap_or_default();
    let fields = [
        (StaticField::Ip, input.ip),
        (StaticField::SubnetMask, input.subnet_mask),
        (StaticField::Gateway, input.gateway),
    ];

    if let Some((field, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ValidationError::IncompleteStaticConfig { field: *field });
    }

    Ok(AddressConfig::Static(StaticAddress {
        ip: validate_ipv4(input.ip)?,
        subnet_mask: validate_ipv4(input.subnet_mask)?,
        gateway: validate_ipv4(input.gateway)?,
    }))
}

/// Validate the DNS half of a configuration.
///
/// `servers` is only consulted in manual mode and `provider` only in provider
/// mode.
pub fn validate_dns<S: AsRef<str>>(
    mode: DnsMode,
    servers: &[S],
    provider: Option<&str>,
) -> Result<DnsConfig, ValidationError> {
    match mode {
        DnsMode::Dhcp => Ok(DnsConfig::Dhcp),
        DnsMode::Provider => {
            let name = provider.unwrap_or_default();
            DnsProvider::lookup(name)
                .map(DnsConfig::Provider)
                .ok_or_else(|| ValidationError::UnknownDnsProvider(name.to_string()))
        }
        DnsMode::Manual => {
            if servers.is_empty() {
                return Err(ValidationError::InvalidDnsAddress(
                    "at least one DNS server is required".to_string(),
                ));
            }
            let parsed = servers
                .iter()
                .map(|s| validate_ipv4(s.as_ref()))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(DnsConfig::Manual(parsed))
        }
    }
}

/// Validate a profile name, returning it trimmed.
pub fn validate_profile_name(s: &str) -> Result<String, ValidationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ValidationError::InvalidProfileName(
            "Profile name cannot be empty".to_string(),
        ));
    }
    if s.chars().count() > MAX_PROFILE_NAME_LEN {
        return Err(ValidationError::InvalidProfileName(format!(
            "Profile name must be {} characters or less",
            MAX_PROFILE_NAME_LEN
        )));
    }
    if s.chars().any(char::is_control) {
        return Err(ValidationError::InvalidProfileName(
            "Profile name cannot contain control characters".to_string(),
        ));
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(ip: &'a str, mask: &'a str, gw: &'a str) -> StaticAddressInput<'a> {
        StaticAddressInput {
            ip,
            subnet_mask: mask,
            gateway: gw,
        }
    }

    #[test]
    fn test_validate_ipv4_accepts_dotted_quads() {
        for s in ["0.0.0.0", "192.168.1.1", "255.255.255.255", "10.0.0.254"] {
            assert!(validate_ipv4(s).is_ok(), "{} should be accepted", s);
        }
    }

    #[test]
    fn test_validate_ipv4_rejects_malformed() {
        for s in [
            "256.1.1.1",
            "1.2.3",
            "1.2.3.4.5",
            "a.b.c.d",
            "1.2.3.x",
            " 1.2.3.4",
            "1.2.3.4 ",
            "10.0.0.0/24",
            "0x7f.0.0.1",
            "",
        ] {
            assert_eq!(
                validate_ipv4(s),
                Err(ValidationError::InvalidAddressFormat(s.to_string())),
                "{:?} should be rejected",
                s
            );
        }
    }

    #[test]
    fn test_dhcp_ignores_static_fields() {
        let garbage = input("not", "an", "address");
        assert_eq!(
            validate_address(AddressMode::Dhcp, Some(&garbage)),
            Ok(AddressConfig::Dhcp)
        );
        assert_eq!(validate_address(AddressMode::Dhcp, None), Ok(AddressConfig::Dhcp));
    }

    #[test]
    fn test_static_missing_any_field_is_incomplete() {
        let cases = [
            (input("", "255.255.255.0", "192.168.1.1"), StaticField::Ip),
            (input("192.168.1.50", "", "192.168.1.1"), StaticField::SubnetMask),
            (input("192.168.1.50", "255.255.255.0", ""), StaticField::Gateway),
            (input("192.168.1.50", "255.255.255.0", "   "), StaticField::Gateway),
        ];
        for (fields, missing) in cases {
            assert_eq!(
                validate_address(AddressMode::Static, Some(&fields)),
                Err(ValidationError::IncompleteStaticConfig { field: missing })
            );
        }
        assert_eq!(
            validate_address(AddressMode::Static, None),
            Err(ValidationError::IncompleteStaticConfig { field: StaticField::Ip })
        );
    }

    #[test]
    fn test_static_malformed_field_is_format_error() {
        let fields = input("192.168.1.50", "255.255.255.300", "192.168.1.1");
        assert_eq!(
            validate_address(AddressMode::Static, Some(&fields)),
            Err(ValidationError::InvalidAddressFormat("255.255.255.300".to_string()))
        );
    }

    #[test]
    fn test_static_valid() {
        let fields = input("192.168.1.50", "255.255.255.0", "192.168.1.1");
        let config = validate_address(AddressMode::Static, Some(&fields)).expect("should validate");
        assert_eq!(config.mode(), AddressMode::Static);
    }

    #[test]
    fn test_provider_dns() {
        let none: [&str; 0] = [];
        assert_eq!(
            validate_dns(DnsMode::Provider, &none, Some("Google")),
            Ok(DnsConfig::Provider(DnsProvider::Google))
        );
        assert_eq!(
            validate_dns(DnsMode::Provider, &none, Some("Quad9")),
            Err(ValidationError::UnknownDnsProvider("Quad9".to_string()))
        );
        assert_eq!(
            validate_dns(DnsMode::Provider, &none, None),
            Err(ValidationError::UnknownDnsProvider(String::new()))
        );
    }

    #[test]
    fn test_manual_dns() {
        assert_eq!(
            validate_dns(DnsMode::Manual, &["9.9.9.9", "149.112.112.112"], None),
            Ok(DnsConfig::Manual(vec![
                Ipv4Addr::new(9, 9, 9, 9),
                Ipv4Addr::new(149, 112, 112, 112),
            ]))
        );

        let empty: [&str; 0] = [];
        assert!(matches!(
            validate_dns(DnsMode::Manual, &empty, None),
            Err(ValidationError::InvalidDnsAddress(_))
        ));
        assert_eq!(
            validate_dns(DnsMode::Manual, &["9.9.9.9", "9.9.9"], None),
            Err(ValidationError::InvalidAddressFormat("9.9.9".to_string()))
        );
    }

    #[test]
    fn test_dhcp_dns_ignores_other_fields() {
        assert_eq!(
            validate_dns(DnsMode::Dhcp, &["junk"], Some("nope")),
            Ok(DnsConfig::Dhcp)
        );
    }

    #[test]
    fn test_validate_profile_name() {
        assert_eq!(validate_profile_name("  home  "), Ok("home".to_string()));
        assert!(validate_profile_name("").is_err());
        assert!(validate_profile_name("   ").is_err());
        assert!(validate_profile_name("bad\nname").is_err());
        assert!(validate_profile_name(&"x".repeat(101)).is_err());
        assert!(validate_profile_name(&"x".repeat(100)).is_ok());
    }
}
