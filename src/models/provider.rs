// Netswitch - DNS Provider Presets
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Compiled-in DNS provider presets.
//!
//! The table is closed: callers select a preset by its stable key, and the
//! display label is only for presentation.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

/// A named, fixed set of public DNS resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DnsProvider {
    Google,
    OpenDns,
    Cloudflare,
}

impl DnsProvider {
    /// Every preset, in presentation order.
    pub const ALL: [DnsProvider; 3] = [Self::Google, Self::OpenDns, Self::Cloudflare];

    /// Stable identifier used in profiles and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::OpenDns => "opendns",
            Self::Cloudflare => "cloudflare",
        }
    }

    /// Get human-readable name for this provider.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::OpenDns => "OpenDNS",
            Self::Cloudflare => "Cloudflare",
        }
    }

    /// Resolver addresses, primary first.
    pub fn servers(&self) -> &'static [Ipv4Addr] {
        static GOOGLE: [Ipv4Addr; 2] = [Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(8, 8, 4, 4)];
        static OPENDNS: [Ipv4Addr; 2] = [
            Ipv4Addr::new(208, 67, 222, 222),
            Ipv4Addr::new(208, 67, 220, 220),
        ];
        static CLOUDFLARE: [Ipv4Addr; 2] = [Ipv4Addr::new(1, 1, 1, 1), Ipv4Addr::new(1, 0, 0, 1)];

        match self {
            Self::Google => &GOOGLE,
            Self::OpenDns => &OPENDNS,
            Self::Cloudflare => &CLOUDFLARE,
        }
    }

    /// Look up a preset by exact key or exact display label.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.key() == name || p.display_name() == name)
    }
}

impl std::fmt::Display for DnsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_key_and_label() {
        assert_eq!(DnsProvider::lookup("google"), Some(DnsProvider::Google));
        assert_eq!(DnsProvider::lookup("OpenDNS"), Some(DnsProvider::OpenDns));
        assert_eq!(DnsProvider::lookup("Cloudflare"), Some(DnsProvider::Cloudflare));
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(DnsProvider::lookup("GOOGLE"), None);
        assert_eq!(DnsProvider::lookup(" google"), None);
        assert_eq!(DnsProvider::lookup("Quad9"), None);
        assert_eq!(DnsProvider::lookup(""), None);
    }

    #[test]
    fn test_google_servers_in_order() {
        assert_eq!(
            DnsProvider::Google.servers(),
            &[Ipv4Addr::new(8, 8, 8, 8), Ipv4Addr::new(8, 8, 4, 4)]
        );
    }

    #[test]
    fn test_every_preset_has_one_or_two_servers() {
        for provider in DnsProvider::ALL {
            let count = provider.servers().len();
            assert!((1..=2).contains(&count), "{} has {} servers", provider, count);
        }
    }
}
