// Netswitch - Commands and Plans
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! OS-level commands and the ordered plans built from them.

use std::fmt;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use super::configuration::StaticAddress;

/// Address source requested by a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum AddressTarget {
    Dhcp,
    Static(StaticAddress),
}

/// DNS servers requested by a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "servers", rename_all = "lowercase")]
pub enum DnsTarget {
    /// Reset to servers supplied by DHCP.
    Automatic,
    /// Fixed servers, primary first.
    Servers(Vec<Ipv4Addr>),
}

/// What a command does, independent of the host utility that does it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigAction {
    SetAddress(AddressTarget),
    SetDns(DnsTarget),
}

impl ConfigAction {
    /// Get a short name for the action.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetAddress(_) => "Set Address",
            Self::SetDns(_) => "Set DNS",
        }
    }

    /// Get a human-readable description.
    pub fn description(&self) -> String {
        match self {
            Self::SetAddress(AddressTarget::Dhcp) => "IPv4 address: DHCP".to_string(),
            Self::SetAddress(AddressTarget::Static(addr)) => format!(
                "IPv4 address: {} mask {} gateway {}",
                addr.ip, addr.subnet_mask, addr.gateway
            ),
            Self::SetDns(DnsTarget::Automatic) => "DNS servers: automatic".to_string(),
            Self::SetDns(DnsTarget::Servers(servers)) => format!(
                "DNS servers: {}",
                servers
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }
}

/// One program invocation: the action it realizes plus its argv.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub action: ConfigAction,
    pub program: String,
    pub args: Vec<String>,
}

impl Command {
    pub fn new<I, S>(action: ConfigAction, program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            action,
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Command {
    /// Shell-like rendering, for logs and dry runs only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() {
                f.write_str(" \"\"")?;
            } else if arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// An ordered, immutable sequence of commands for one adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandPlan {
    adapter: String,
    commands: Vec<Command>,
    /// Set by the revert shortcut: the caller should clear any cached form
    /// fields and profile selection for this adapter.
    #[serde(default)]
    resets_form_state: bool,
}

impl CommandPlan {
    pub(crate) fn new(adapter: impl Into<String>, commands: Vec<Command>) -> Self {
        Self {
            adapter: adapter.into(),
            commands,
            resets_form_state: false,
        }
    }

    pub(crate) fn resetting_form_state(mut self) -> Self {
        self.resets_form_state = true;
        self
    }

    /// Name of the adapter the plan targets.
    pub fn adapter(&self) -> &str {
        &self.adapter
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// The structured actions, in execution order.
    pub fn actions(&self) -> impl Iterator<Item = &ConfigAction> + '_ {
        self.commands.iter().map(|c| &c.action)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn resets_form_state(&self) -> bool {
        self.resets_form_state
    }
}

impl IntoIterator for CommandPlan {
    type Item = Command;
    type IntoIter = std::vec::IntoIter<Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display_quotes_arguments() {
        let cmd = Command::new(
            ConfigAction::SetDns(DnsTarget::Automatic),
            "nmcli",
            ["device", "modify", "Wired connection 1", "ipv4.dns", ""],
        );
        assert_eq!(
            cmd.to_string(),
            "nmcli device modify \"Wired connection 1\" ipv4.dns \"\""
        );
    }

    #[test]
    fn test_action_description() {
        let action = ConfigAction::SetDns(DnsTarget::Servers(vec![
            Ipv4Addr::new(1, 1, 1, 1),
            Ipv4Addr::new(1, 0, 0, 1),
        ]));
        assert_eq!(action.description(), "DNS servers: 1.1.1.1, 1.0.0.1");
        assert_eq!(action.name(), "Set DNS");
    }

    #[test]
    fn test_plan_serializes_to_json() {
        let plan = CommandPlan::new(
            "eth0",
            vec![Command::new(
                ConfigAction::SetAddress(AddressTarget::Dhcp),
                "nmcli",
                ["device", "modify", "eth0", "ipv4.method", "auto"],
            )],
        );
        let json = serde_json::to_string(&plan).expect("plan should serialize");
        let restored: CommandPlan = serde_json::from_str(&json).expect("plan should deserialize");
        assert_eq!(restored, plan);
    }
}
