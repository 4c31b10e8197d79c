// Netswitch - Configuration Planner
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Turns a configuration intent into an ordered command plan.
//!
//! Planning is pure and deterministic: nothing is executed and the same
//! adapter and configuration always produce the same commands. The address
//! step and the DNS step are planned independently, address first.

use tracing::debug;

use crate::models::{
    AdapterConfiguration, AdapterRef, AddressConfig, AddressTarget, AppConfig, Command,
    CommandDialect, CommandPlan, ConfigAction, DnsConfig, DnsTarget, ToolPaths,
};

/// Builds command plans for one host utility family.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationPlanner {
    dialect: CommandDialect,
    tools: ToolPaths,
}

impl ConfigurationPlanner {
    pub fn new(dialect: CommandDialect, tools: ToolPaths) -> Self {
        Self { dialect, tools }
    }

    /// Create a planner from application settings.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.dialect, config.tools.clone())
    }

    pub fn dialect(&self) -> CommandDialect {
        self.dialect
    }

    /// Plan the commands that realize `configuration` on `adapter`.
    pub fn plan(&self, adapter: &AdapterRef, configuration: &AdapterConfiguration) -> CommandPlan {
        let address = match &configuration.address {
            AddressConfig::Dhcp => AddressTarget::Dhcp,
            AddressConfig::Static(addr) => AddressTarget::Static(*addr),
        };
        let dns = match &configuration.dns {
            DnsConfig::Dhcp => DnsTarget::Automatic,
            DnsConfig::Manual(servers) => DnsTarget::Servers(servers.clone()),
            DnsConfig::Provider(provider) => DnsTarget::Servers(provider.servers().to_vec()),
        };

        let commands = vec![
            self.address_command(adapter.name(), address),
            self.dns_command(adapter.name(), dns),
        ];
        debug!(
            "Planned {} command(s) for {} ({}/{}, {})",
            commands.len(),
            adapter,
            configuration.address_mode().as_str(),
            configuration.dns_mode().as_str(),
            self.dialect.as_str()
        );
        CommandPlan::new(adapter.name(), commands)
    }

    /// Plan a full return to DHCP, ignoring any stored configuration.
    ///
    /// The plan is flagged so the caller clears cached form fields and
    /// profile selection for the adapter.
    pub fn plan_revert_to_dhcp(&self, adapter: &AdapterRef) -> CommandPlan {
        debug!("Planned revert to DHCP for {}", adapter);
        CommandPlan::new(
            adapter.name(),
            vec![
                self.address_command(adapter.name(), AddressTarget::Dhcp),
                self.dns_command(adapter.name(), DnsTarget::Automatic),
            ],
        )
        .resetting_form_state()
    }

    fn address_command(&self, adapter: &str, target: AddressTarget) -> Command {
        let args = match self.dialect {
            CommandDialect::Netsh => netsh_address_args(adapter, &target),
            CommandDialect::Nmcli => nmcli_address_args(adapter, &target),
        };
        let program = match self.dialect {
            CommandDialect::Netsh => &self.tools.netsh,
            CommandDialect::Nmcli => &self.tools.nmcli,
        };
        Command::new(ConfigAction::SetAddress(target), program.as_str(), args)
    }

    fn dns_command(&self, adapter: &str, target: DnsTarget) -> Command {
        let (program, args) = match self.dialect {
            CommandDialect::Netsh => (&self.tools.powershell, powershell_dns_args(adapter, &target)),
            CommandDialect::Nmcli => (&self.tools.nmcli, nmcli_dns_args(adapter, &target)),
        };
        Command::new(ConfigAction::SetDns(target), program.as_str(), args)
    }
}

fn netsh_address_args(adapter: &str, target: &AddressTarget) -> Vec<String> {
    let mut args: Vec<String> = ["interface", "ipv4", "set", "address"]
        .into_iter()
        .map(String::from)
        .collect();
    args.push(format!("name={}", adapter));
    match target {
        AddressTarget::Dhcp => args.push("source=dhcp".to_string()),
        AddressTarget::Static(addr) => {
            args.push("source=static".to_string());
            args.push(format!("addr={}", addr.ip));
            args.push(format!("mask={}", addr.subnet_mask));
            args.push(format!("gateway={}", addr.gateway));
        }
    }
    args
}

/// DNS goes through PowerShell, whose cmdlet accepts an ordered server list.
fn powershell_dns_args(adapter: &str, target: &DnsTarget) -> Vec<String> {
    let alias = powershell_quote(adapter);
    let script = match target {
        DnsTarget::Automatic => format!(
            "Set-DnsClientServerAddress -InterfaceAlias {} -ResetServerAddresses",
            alias
        ),
        DnsTarget::Servers(servers) => format!(
            "Set-DnsClientServerAddress -InterfaceAlias {} -ServerAddresses ({})",
            alias,
            servers
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(",")
        ),
    };
    vec![
        "-NoProfile".to_string(),
        "-NonInteractive".to_string(),
        "-Command".to_string(),
        script,
    ]
}

/// Single-quoted PowerShell literal; embedded quotes are doubled.
fn powershell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn nmcli_address_args(adapter: &str, target: &AddressTarget) -> Vec<String> {
    let mut args = vec!["device".to_string(), "modify".to_string(), adapter.to_string()];
    match target {
        AddressTarget::Dhcp => args.extend(
            ["ipv4.method", "auto", "ipv4.addresses", "", "ipv4.gateway", ""].map(String::from),
        ),
        AddressTarget::Static(addr) => {
            args.extend(["ipv4.method", "manual", "ipv4.addresses"].map(String::from));
            args.push(format!("{}/{}", addr.ip, addr.prefix_len()));
            args.push("ipv4.gateway".to_string());
            args.push(addr.gateway.to_string());
        }
    }
    args
}

fn nmcli_dns_args(adapter: &str, target: &DnsTarget) -> Vec<String> {
    let mut args = vec!["device".to_string(), "modify".to_string(), adapter.to_string()];
    match target {
        DnsTarget::Automatic => {
            args.extend(["ipv4.ignore-auto-dns", "no", "ipv4.dns", ""].map(String::from))
        }
        DnsTarget::Servers(servers) => {
            args.extend(["ipv4.ignore-auto-dns", "yes", "ipv4.dns"].map(String::from));
            args.push(
                servers
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(" "),
            );
        }
    }
    args
}
