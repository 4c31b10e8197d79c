// Netswitch - Application Configuration
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Application configuration model.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::CONFIG_DIR_NAME;

/// Host utility family used to realize plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommandDialect {
    /// `netsh` for addresses, PowerShell for DNS.
    #[default]
    Netsh,
    /// NetworkManager's `nmcli`.
    Nmcli,
}

impl CommandDialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Netsh => "netsh",
            Self::Nmcli => "nmcli",
        }
    }
}

/// Program names (or absolute paths) of the host utilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPaths {
    #[serde(default = "default_netsh")]
    pub netsh: String,
    #[serde(default = "default_powershell")]
    pub powershell: String,
    #[serde(default = "default_nmcli")]
    pub nmcli: String,
}

fn default_netsh() -> String {
    "netsh".to_string()
}

fn default_powershell() -> String {
    "powershell.exe".to_string()
}

fn default_nmcli() -> String {
    "nmcli".to_string()
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            netsh: default_netsh(),
            powershell: default_powershell(),
            nmcli: default_nmcli(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Profile directory override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles_dir: Option<PathBuf>,

    /// Which host utility family to emit commands for.
    #[serde(default)]
    pub dialect: CommandDialect,

    /// Host utility locations.
    #[serde(default)]
    pub tools: ToolPaths,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            profiles_dir: None,
            dialect: CommandDialect::default(),
            tools: ToolPaths::default(),
        }
    }
}

impl AppConfig {
    /// Default location of the settings file.
    pub fn default_path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join(CONFIG_DIR_NAME).join("settings.toml"))
    }

    /// Profile directory, falling back to the per-user config directory.
    pub fn profiles_dir(&self) -> PathBuf {
        self.profiles_dir.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(CONFIG_DIR_NAME)
                .join("profiles")
        })
    }

    /// Load configuration from TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, super::Error> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| super::Error::ConfigReadFailed(format!("{}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, using defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, super::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to TOML file with restrictive permissions (0600).
    pub fn save_to_file(&self, path: &Path) -> Result<(), super::Error> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            dialect = "nmcli"

            [tools]
            nmcli = "/usr/bin/nmcli"
            "#,
        )
        .expect("settings should parse");
        assert_eq!(config.dialect, CommandDialect::Nmcli);
        assert_eq!(config.tools.nmcli, "/usr/bin/nmcli");
        assert_eq!(config.tools.netsh, "netsh");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.profiles_dir, None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("settings.toml");
        let config = AppConfig {
            log_level: "debug".into(),
            profiles_dir: Some(dir.path().join("profiles")),
            ..Default::default()
        };
        config.save_to_file(&path).expect("settings should save");
        assert_eq!(AppConfig::load_from_file(&path).expect("settings should load"), config);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig::load_or_default(&dir.path().join("absent.toml"))
            .expect("missing settings are not an error");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_profiles_dir_override() {
        let config = AppConfig {
            profiles_dir: Some(PathBuf::from("/srv/netswitch")),
            ..Default::default()
        };
        assert_eq!(config.profiles_dir(), PathBuf::from("/srv/netswitch"));
    }
}
