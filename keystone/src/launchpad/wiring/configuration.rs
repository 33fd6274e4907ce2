use crate::{AppConfig, AppConfigError, DotEnv};
use config::ConfigBuilder;
use config::builder::DefaultState;
use keystone_config::{Assembler, AssemblerChoices};

/// Defines the **configuration** wiring stage: collects the external inputs
/// and resolves the initial [`AppConfig`].
///
/// Every step has a default implementation, so custom wirings override only
/// the steps they need:
///
/// ```
/// use keystone::{App, ConfigurationWiring};
///
/// /// Ignores the dot-env files.
/// struct ProcessEnvOnly;
///
/// impl ConfigurationWiring for ProcessEnvOnly {
///     fn prepare_environment(&self) {}
/// }
///
/// let _launchpad = App::launchpad(async {}).with_configuration_wiring(ProcessEnvOnly);
/// ```
pub trait ConfigurationWiring {
    /// Runs every step of this stage and returns the initial configuration.
    fn run(&self, choices: &AssemblerChoices) -> Result<&'static AppConfig, AppConfigError> {
        // Prepare the environment
        self.prepare_environment();

        // Make the config builder
        let builder = self.make_config_builder(choices);

        // Seed the initial application configuration
        self.seed_initial_config(builder)?;

        // Resolve the initial config
        self.get_config()
    }

    /// Loads the dot-env files into the process environment.
    fn prepare_environment(&self) {
        DotEnv::tap();
    }

    /// Assembles the builder of the configuration files and the environment.
    fn make_config_builder(&self, choices: &AssemblerChoices) -> ConfigBuilder<DefaultState> {
        Assembler::make_builder(choices)
    }

    /// Builds and stores the initial configuration.
    fn seed_initial_config(&self, builder: ConfigBuilder<DefaultState>) -> Result<(), AppConfigError> {
        AppConfig::seed(builder)
    }

    /// Returns the stored initial configuration.
    fn get_config(&self) -> Result<&'static AppConfig, AppConfigError> {
        AppConfig::try_get().ok_or(AppConfigError::NotSeeded)
    }
}

/// The default [`ConfigurationWiring`].
pub(crate) struct DefaultConfigurationWiring;

impl ConfigurationWiring for DefaultConfigurationWiring {}
