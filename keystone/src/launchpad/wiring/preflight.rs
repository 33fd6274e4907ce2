use crate::AppConfig;
use tokio::runtime::Runtime;

/// Defines the **preflight** wiring stage: the last chance to act on the
/// configuration and the runtime before the application boots.
pub trait PreflightWiring {
    /// Runs every step of this stage.
    fn run(&self, config: &'static AppConfig, runtime: &Runtime) {
        // Announce startup
        self.announce_startup(config, runtime);
    }

    /// Logs the startup of the application.
    fn announce_startup(&self, config: &'static AppConfig, runtime: &Runtime) {
        tracing::info!(
            workers = runtime.metrics().num_workers(),
            protocol = %config.http().protocol,
            port = config.http().port,
            "Starting {}",
            config.name(),
        );
    }
}

/// The default [`PreflightWiring`].
pub(crate) struct DefaultPreflightWiring;

impl PreflightWiring for DefaultPreflightWiring {}
