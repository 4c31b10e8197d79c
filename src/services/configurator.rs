// Netswitch - Configuration Pipeline
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! The validate → plan → persist → apply pipeline.
//!
//! Presentation layers call into [`Configurator`] with an adapter, the raw
//! form fields and what to do with the profile. Validation and persistence
//! failures are returned before any command runs. Calls are synchronous and
//! the caller must serialize them per adapter.

use tracing::info;

use super::applier;
use super::executor::CommandExecutor;
use crate::models::{
    AdapterConfiguration, AdapterRef, ApplyResult, CommandPlan, ConfigurationForm, Error, Result,
};
use crate::planner::ConfigurationPlanner;
use crate::storage::ProfileStore;

/// What to do with the named profile alongside an apply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProfileIntent {
    /// Leave stored profiles alone.
    #[default]
    Keep,
    /// Store the configuration under this name, overwriting any existing one.
    Save(String),
    /// The operator opted out of keeping this profile: remove it.
    Forget(String),
}

/// Wires the planner, the profile store and an executor together.
#[derive(Debug)]
pub struct Configurator<E> {
    planner: ConfigurationPlanner,
    store: ProfileStore,
    executor: E,
}

impl<E: CommandExecutor> Configurator<E> {
    pub fn new(planner: ConfigurationPlanner, store: ProfileStore, executor: E) -> Self {
        Self {
            planner,
            store,
            executor,
        }
    }

    pub fn planner(&self) -> &ConfigurationPlanner {
        &self.planner
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Validate and plan without executing anything.
    pub fn preview(&self, adapter: &AdapterRef, form: &ConfigurationForm) -> Result<CommandPlan> {
        let configuration = form.resolve()?;
        Ok(self.planner.plan(adapter, &configuration))
    }

    /// Validate the form, update profiles per `intent`, then apply.
    pub fn apply_form(
        &self,
        adapter: &AdapterRef,
        form: &ConfigurationForm,
        intent: ProfileIntent,
    ) -> Result<ApplyResult> {
        let configuration = form.resolve()?;
        self.apply_configuration(adapter, &configuration, intent)
    }

    /// Apply an already validated configuration.
    pub fn apply_configuration(
        &self,
        adapter: &AdapterRef,
        configuration: &AdapterConfiguration,
        intent: ProfileIntent,
    ) -> Result<ApplyResult> {
        let plan = self.planner.plan(adapter, configuration);

        match intent {
            ProfileIntent::Keep => {}
            ProfileIntent::Save(name) => {
                self.store.save(&name, configuration)?;
            }
            ProfileIntent::Forget(name) => {
                self.store.delete(&name)?;
            }
        }

        Ok(self.run(plan))
    }

    /// Apply a stored profile to `adapter`.
    pub fn apply_profile(&self, adapter: &AdapterRef, name: &str) -> Result<ApplyResult> {
        let configuration = self
            .store
            .load(name)?
            .ok_or_else(|| Error::ProfileNotFound(name.to_string()))?;
        info!("Applying profile {:?} to {}", name, adapter);
        Ok(self.run(self.planner.plan(adapter, &configuration)))
    }

    /// Put the adapter back on DHCP for both address and DNS.
    ///
    /// The result has `resets_form_state` set; the caller should clear its
    /// cached fields and profile selection.
    pub fn revert_to_dhcp(&self, adapter: &AdapterRef) -> ApplyResult {
        info!("Reverting {} to DHCP", adapter);
        self.run(self.planner.plan_revert_to_dhcp(adapter))
    }

    fn run(&self, plan: CommandPlan) -> ApplyResult {
        let result = applier::apply(plan, &self.executor);
        info!("{}", result.message());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AddressConfig, AddressTarget, Command, ConfigAction, DnsConfig, DnsMode, DnsProvider,
        DnsTarget, StaticField, ValidationError,
    };
    use crate::services::executor::{CommandOutput, MockCommandExecutor};

    fn configurator(executor: MockCommandExecutor) -> (tempfile::TempDir, Configurator<MockCommandExecutor>) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ProfileStore::new(dir.path().join("profiles"));
        (dir, Configurator::new(ConfigurationPlanner::default(), store, executor))
    }

    fn cloudflare_form() -> ConfigurationForm {
        ConfigurationForm {
            ip: "192.168.1.50".into(),
            subnet_mask: "255.255.255.0".into(),
            gateway: "192.168.1.1".into(),
            dns_mode: DnsMode::Provider,
            dns_provider: "Cloudflare".into(),
            ..Default::default()
        }
    }

    fn succeeding(times: usize) -> MockCommandExecutor {
        let mut executor = MockCommandExecutor::new();
        executor
            .expect_execute()
            .times(times)
            .returning(|_| Ok(CommandOutput::ok()));
        executor
    }

    #[test]
    fn test_invalid_form_runs_nothing() {
        let mut executor = MockCommandExecutor::new();
        executor.expect_execute().never();
        let (_dir, configurator) = configurator(executor);

        let mut form = cloudflare_form();
        form.subnet_mask.clear();
        let err = configurator
            .apply_form(&AdapterRef::new("Ethernet0"), &form, ProfileIntent::Save("home".into()))
            .expect_err("incomplete form must be rejected");

        assert!(matches!(
            err,
            Error::Validation(ValidationError::IncompleteStaticConfig { field: StaticField::SubnetMask })
        ));
        assert_eq!(configurator.store().list().expect("list"), Vec::<String>::new());
    }

    #[test]
    fn test_apply_and_save_profile() {
        let (_dir, configurator) = configurator(succeeding(2));
        let adapter = AdapterRef::new("Ethernet0");

        let result = configurator
            .apply_form(&adapter, &cloudflare_form(), ProfileIntent::Save("home".into()))
            .expect("apply should succeed");
        assert!(result.is_success());

        let stored = configurator.store().load("home").expect("load").expect("profile saved");
        assert_eq!(stored.dns, DnsConfig::Provider(DnsProvider::Cloudflare));
        assert!(matches!(stored.address, AddressConfig::Static(_)));
    }

    #[test]
    fn test_forget_removes_profile() {
        let (_dir, configurator) = configurator(succeeding(4));
        let adapter = AdapterRef::new("Ethernet0");

        configurator
            .apply_form(&adapter, &cloudflare_form(), ProfileIntent::Save("home".into()))
            .expect("apply should succeed");
        configurator
            .apply_form(&adapter, &cloudflare_form(), ProfileIntent::Forget("home".into()))
            .expect("apply should succeed");

        assert_eq!(configurator.store().load("home").expect("load"), None);
    }

    #[test]
    fn test_apply_profile() {
        let mut executor = MockCommandExecutor::new();
        executor
            .expect_execute()
            .withf(|cmd: &Command| {
                cmd.action
                    == ConfigAction::SetDns(DnsTarget::Servers(DnsProvider::Google.servers().to_vec()))
            })
            .times(1)
            .returning(|_| Ok(CommandOutput::ok()));
        executor
            .expect_execute()
            .withf(|cmd: &Command| cmd.action == ConfigAction::SetAddress(AddressTarget::Dhcp))
            .times(1)
            .returning(|_| Ok(CommandOutput::ok()));
        let (_dir, configurator) = configurator(executor);

        let config = AdapterConfiguration::new(AddressConfig::Dhcp, DnsConfig::Provider(DnsProvider::Google));
        configurator.store().save("cafe", &config).expect("save");

        let result = configurator
            .apply_profile(&AdapterRef::new("Wi-Fi"), "cafe")
            .expect("apply should succeed");
        assert!(result.is_success());
    }

    #[test]
    fn test_apply_missing_profile() {
        let mut executor = MockCommandExecutor::new();
        executor.expect_execute().never();
        let (_dir, configurator) = configurator(executor);

        let err = configurator
            .apply_profile(&AdapterRef::new("Wi-Fi"), "nowhere")
            .expect_err("missing profile");
        assert!(err.is_persistence());
        assert!(matches!(err, Error::ProfileNotFound(name) if name == "nowhere"));
    }

    #[test]
    fn test_execution_failure_is_reported_not_raised() {
        let mut executor = MockCommandExecutor::new();
        executor
            .expect_execute()
            .times(1)
            .returning(|_| Ok(CommandOutput::failed(1, "denied")));
        let (_dir, configurator) = configurator(executor);

        let result = configurator
            .apply_form(&AdapterRef::new("Ethernet0"), &cloudflare_form(), ProfileIntent::Keep)
            .expect("validation passed");
        assert_eq!(result.failed_at(), Some(0));
        assert!(result.into_result().is_err());
    }

    #[test]
    fn test_revert_to_dhcp() {
        let (_dir, configurator) = configurator(succeeding(2));
        let result = configurator.revert_to_dhcp(&AdapterRef::new("Ethernet0"));
        assert!(result.is_success());
        assert!(result.resets_form_state);
    }

    #[test]
    fn test_preview_executes_nothing() {
        let mut executor = MockCommandExecutor::new();
        executor.expect_execute().never();
        let (_dir, configurator) = configurator(executor);

        let plan = configurator
            .preview(&AdapterRef::new("Ethernet0"), &cloudflare_form())
            .expect("preview should succeed");
        assert_eq!(plan.len(), 2);
    }
}
