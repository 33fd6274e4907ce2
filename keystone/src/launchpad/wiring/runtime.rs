use crate::{AppConfig, AppError};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Defines the **runtime** wiring stage: installs the global `tracing`
/// subscriber and builds the Tokio [`Runtime`] that hosts the application.
pub trait RuntimeWiring {
    /// Runs every step of this stage and returns the runtime.
    fn run(&self, config: &'static AppConfig) -> Result<Runtime, AppError> {
        // Start logging as early as possible
        self.install_tracing(config);

        // Build the runtime
        self.make_runtime(config)
    }

    /// Installs the formatted `tracing` layer described by
    /// [`AppConfig::tracing`]. An already installed global subscriber is left
    /// in place.
    fn install_tracing(&self, config: &'static AppConfig) {
        if let Err(error) = keystone_tracing::install(config.tracing()) {
            debug!(error = %error, "Keeping the existing tracing subscriber");
        }
    }

    /// Builds a multi-threaded runtime with all drivers enabled, naming its
    /// worker threads after the application.
    fn make_runtime(&self, config: &'static AppConfig) -> Result<Runtime, AppError> {
        Builder::new_multi_thread()
            .enable_all()
            .thread_name(config.name())
            .build()
            .map_err(AppError::Runtime)
    }
}

/// The default [`RuntimeWiring`].
pub(crate) struct DefaultRuntimeWiring;

impl RuntimeWiring for DefaultRuntimeWiring {}
