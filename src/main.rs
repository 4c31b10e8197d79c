// Netswitch - Main Entry Point
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Netswitch
//!
//! Command-line front end: collects adapter and field values, hands them to
//! the configuration pipeline, and prints the outcome.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Args, Parser, Subcommand};
use serde::Serialize;

use netswitch::models::{AppConfig, DnsMode};
use netswitch::{
    AdapterRef, ApplyResult, CommandPlan, ConfigurationForm, ConfigurationPlanner, Configurator,
    DnsProvider, Error, ProfileIntent, ProfileStore, SystemExecutor, APP_NAME, VERSION,
};

#[derive(Parser)]
#[command(name = "netswitch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Switch network adapters between DHCP and static IPv4/DNS settings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Settings file (defaults to the per-user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply address and DNS settings to an adapter
    Set(SetArgs),

    /// Return an adapter to DHCP for both address and DNS
    Revert {
        adapter: String,
        /// Print the plan without executing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Apply a saved profile to an adapter
    Apply {
        adapter: String,
        profile: String,
        /// Print the plan without executing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage saved profiles
    #[command(subcommand)]
    Profiles(ProfileCommands),

    /// List DNS provider presets
    Providers,
}

#[derive(Args)]
#[command(group(ArgGroup::new("dns_source").args(["dns_dhcp", "dns", "dns_provider"])))]
struct SetArgs {
    adapter: String,

    /// Static IPv4 address (leave address fields out for DHCP)
    #[arg(long)]
    ip: Option<String>,

    /// Subnet mask
    #[arg(long)]
    mask: Option<String>,

    /// Default gateway
    #[arg(long)]
    gateway: Option<String>,

    /// Take DNS servers from DHCP (the default)
    #[arg(long)]
    dns_dhcp: bool,

    /// Manual DNS servers, comma separated, primary first
    #[arg(long)]
    dns: Option<String>,

    /// DNS provider preset (see `netswitch providers`)
    #[arg(long)]
    dns_provider: Option<String>,

    /// Save these settings as a named profile
    #[arg(long, conflicts_with = "forget")]
    save: Option<String>,

    /// Remove a previously saved profile
    #[arg(long)]
    forget: Option<String>,

    /// Print the plan without executing it
    #[arg(long)]
    dry_run: bool,
}

impl SetArgs {
    fn form(&self) -> ConfigurationForm {
        let dns_mode = match (&self.dns, &self.dns_provider) {
            _ if self.dns_dhcp => DnsMode::Dhcp,
            (_, Some(_)) => DnsMode::Provider,
            (Some(_), None) => DnsMode::Manual,
            (None, None) => DnsMode::Dhcp,
        };
        ConfigurationForm {
            ip: self.ip.clone().unwrap_or_default(),
            subnet_mask: self.mask.clone().unwrap_or_default(),
            gateway: self.gateway.clone().unwrap_or_default(),
            dns_mode,
            dns_servers: self.dns.clone().unwrap_or_default(),
            dns_provider: self.dns_provider.clone().unwrap_or_default(),
        }
    }

    fn intent(&self) -> ProfileIntent {
        match (&self.save, &self.forget) {
            (Some(name), _) => ProfileIntent::Save(name.clone()),
            (None, Some(name)) => ProfileIntent::Forget(name.clone()),
            (None, None) => ProfileIntent::Keep,
        }
    }
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// List saved profile names
    List,
    /// Show one profile
    Show { name: String },
    /// Delete a profile
    Delete { name: String },
}

#[derive(Serialize)]
struct ProviderView {
    key: &'static str,
    name: &'static str,
    servers: Vec<String>,
}

#[derive(Serialize)]
struct ProfileView {
    name: String,
    saved_at: String,
    address: String,
    dns: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings_path = cli.config.clone().or_else(AppConfig::default_path);
    let config = match settings_path.as_deref() {
        Some(path) => match AppConfig::load_or_default(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => AppConfig::default(),
    };

    // Initialize logging with appropriate level
    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        config.log_level.parse().unwrap_or(tracing::Level::INFO)
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .init();

    tracing::debug!("Starting {} v{} ({} dialect)", APP_NAME, VERSION, config.dialect.as_str());

    let configurator = Configurator::new(
        ConfigurationPlanner::from_config(&config),
        ProfileStore::from_config(&config),
        SystemExecutor,
    );

    match run(&cli, &configurator) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when a plan ran but one of its steps failed.
fn run(cli: &Cli, configurator: &Configurator<SystemExecutor>) -> Result<bool, Error> {
    match &cli.command {
        Commands::Set(args) => {
            let adapter = AdapterRef::new(args.adapter.as_str());
            let form = args.form();
            if args.dry_run {
                print_plan(cli.json, &configurator.preview(&adapter, &form)?)?;
                return Ok(true);
            }
            let result = configurator.apply_form(&adapter, &form, args.intent())?;
            print_result(cli.json, &result)
        }
        Commands::Revert { adapter, dry_run } => {
            let adapter = AdapterRef::new(adapter.as_str());
            if *dry_run {
                print_plan(cli.json, &configurator.planner().plan_revert_to_dhcp(&adapter))?;
                return Ok(true);
            }
            print_result(cli.json, &configurator.revert_to_dhcp(&adapter))
        }
        Commands::Apply {
            adapter,
            profile,
            dry_run,
        } => {
            let adapter = AdapterRef::new(adapter.as_str());
            if *dry_run {
                let configuration = configurator
                    .store()
                    .load(profile)?
                    .ok_or_else(|| Error::ProfileNotFound(profile.clone()))?;
                print_plan(cli.json, &configurator.planner().plan(&adapter, &configuration))?;
                return Ok(true);
            }
            print_result(cli.json, &configurator.apply_profile(&adapter, profile)?)
        }
        Commands::Profiles(cmd) => {
            run_profiles(cli.json, configurator.store(), cmd)?;
            Ok(true)
        }
        Commands::Providers => {
            let providers: Vec<ProviderView> = DnsProvider::ALL
                .iter()
                .map(|p| ProviderView {
                    key: p.key(),
                    name: p.display_name(),
                    servers: p.servers().iter().map(|s| s.to_string()).collect(),
                })
                .collect();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&providers)?);
            } else {
                for p in providers {
                    println!("{:<12} {:<12} {}", p.key, p.name, p.servers.join(", "));
                }
            }
            Ok(true)
        }
    }
}

fn run_profiles(json: bool, store: &ProfileStore, cmd: &ProfileCommands) -> Result<(), Error> {
    match cmd {
        ProfileCommands::List => {
            let names = store.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&names)?);
            } else {
                for name in names {
                    println!("{}", name);
                }
            }
        }
        ProfileCommands::Show { name } => {
            let profile = store
                .load_profile(name)?
                .ok_or_else(|| Error::ProfileNotFound(name.clone()))?;
            let form = ConfigurationForm::from(&profile.configuration);
            let address = match profile.configuration.static_address() {
                Some(addr) => format!("static {} mask {} gateway {}", addr.ip, addr.subnet_mask, addr.gateway),
                None => "dhcp".to_string(),
            };
            let dns = match profile.configuration.dns_mode() {
                DnsMode::Dhcp => "dhcp".to_string(),
                DnsMode::Manual => format!("manual {}", form.dns_servers),
                DnsMode::Provider => format!("provider {}", form.dns_provider),
            };
            let view = ProfileView {
                name: profile.name.clone(),
                saved_at: profile.saved_at.to_rfc3339(),
                address,
                dns,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("Profile:  {}", view.name);
                println!("Saved:    {}", view.saved_at);
                println!("Address:  {}", view.address);
                println!("DNS:      {}", view.dns);
            }
        }
        ProfileCommands::Delete { name } => {
            store.delete(name)?;
            if !json {
                println!("Deleted profile {}", name);
            }
        }
    }
    Ok(())
}

fn print_plan(json: bool, plan: &CommandPlan) -> Result<(), Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(plan)?);
        return Ok(());
    }
    println!("Plan for {}:", plan.adapter());
    for (i, command) in plan.commands().iter().enumerate() {
        println!("  {}. [{}] {}", i + 1, command.action.name(), command.action.description());
        println!("     {}", command);
    }
    Ok(())
}

fn print_result(json: bool, result: &ApplyResult) -> Result<bool, Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        for step in &result.steps {
            let detail = step
                .cause
                .as_ref()
                .map(|c| format!(": {}", c))
                .unwrap_or_default();
            println!(
                "  [{}] {}{}",
                step.status.as_str(),
                step.command.action.description(),
                detail
            );
        }
        println!("{}", result.message());
    }
    Ok(result.is_success())
}
