use crate::launchpad::wiring::configuration::DefaultConfigurationWiring;
use crate::launchpad::wiring::preflight::DefaultPreflightWiring;
use crate::launchpad::wiring::runtime::DefaultRuntimeWiring;
use crate::{AppConfig, AppError, Application, ConfigurationWiring, PreflightWiring, RuntimeWiring};
use keystone_boot::{Booter, Bootstrapper, ClassRegistry, LifecycleScriptBooter};
use keystone_config::AssemblerChoices;
use keystone_core::{AppContext, BindingScope, CoreBindings, ProjectRoot};
use keystone_http::{DefaultHttpServerFactory, HttpServerFactory, Router};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::select;
use tracing::error;

pub mod wiring {
    pub mod configuration;
    pub mod preflight;
    pub mod runtime;
}

/// Assembles and launches an [`Application`].
///
/// Everything is customized up front, through `with_*` methods, and then
/// [`boot`](Launchpad::boot) takes over the calling thread.
///
/// ## Wiring stages
///
/// Before the application exists, three replaceable stages prepare its
/// surroundings:
///
/// 1.  [`ConfigurationWiring`] loads the dot-env files and seeds the initial
///     [`AppConfig`] from the configuration directory and the environment.
/// 2.  [`RuntimeWiring`] installs logging and builds the Tokio
///     [`Runtime`](tokio::runtime::Runtime).
/// 3.  [`PreflightWiring`] gets a last look at both before the boot.
///
/// ## Application lifecycle
///
/// Once the wiring is done, the `Launchpad` assembles an [`Application`]:
/// the registered [classes](Launchpad::with_classes) are discovered through
/// the lifecycle script booter, any [custom booters](Launchpad::with_booter)
/// run after it, and the [router](Launchpad::with_router), if any, is served
/// by an HTTP listener configured by the `http` section.
///
/// The application is then booted and started, the main future runs until it
/// completes or the [`AppContext`] is terminated (e.g., by `SIGTERM`), and the
/// application is stopped.
pub struct Launchpad<Main>
where
    Main: Future<Output = ()>,
{
    /// Runs while the application is started.
    async_main: Main,

    /// Where and how the configuration is looked up.
    configuration_choices: AssemblerChoices,

    /// Candidate classes for the lifecycle script booter.
    classes: ClassRegistry,

    /// Booters to run after the lifecycle script booter.
    booters: Vec<Box<dyn Booter>>,

    /// The HTTP handler, if the application serves HTTP.
    router: Option<Router>,

    /// Creates the HTTP listener.
    server_factory: Box<dyn HttpServerFactory>,

    configuration_wiring: Box<dyn ConfigurationWiring>,
    runtime_wiring: Box<dyn RuntimeWiring>,
    preflight_wiring: Box<dyn PreflightWiring>,
}

impl<Main> Launchpad<Main>
where
    Main: Future<Output = ()>,
{
    /// Creates a launchpad with the default wiring, no classes, no custom
    /// booters, and no HTTP router. The application stays up until
    /// `async_main` completes or the context is terminated.
    pub fn new(async_main: Main) -> Self {
        Self {
            async_main,
            configuration_choices: AssemblerChoices::default(),
            classes: ClassRegistry::new(),
            booters: Vec::new(),
            router: None,
            server_factory: Box::new(DefaultHttpServerFactory),
            configuration_wiring: Box::new(DefaultConfigurationWiring),
            runtime_wiring: Box::new(DefaultRuntimeWiring),
            preflight_wiring: Box::new(DefaultPreflightWiring),
        }
    }
}

impl<Main> Launchpad<Main>
where
    Main: Future<Output = ()>,
{
    /// Pins the project root instead of [resolving](ProjectRoot::resolve)
    /// it. For the boot, the `boot.project_root` configuration key still
    /// wins.
    pub fn with_project_root(self, path: impl Into<PathBuf>) -> Self {
        let project_root = Some(path.into());

        self.choose(|choices| AssemblerChoices {
            project_root,
            ..choices
        })
    }

    /// Looks for configuration files in the given directory, relative to the
    /// project root unless absolute. Defaults to `config`.
    pub fn with_config_dir(self, name: impl Into<String>) -> Self {
        let dir_name = Some(name.into());

        self.choose(|choices| AssemblerChoices { dir_name, ..choices })
    }

    /// Toggles the environment variables as the highest-precedence
    /// configuration source. Enabled by default.
    pub fn with_env(self, env_enabled: bool) -> Self {
        self.choose(|choices| AssemblerChoices {
            env_enabled,
            ..choices
        })
    }

    /// Only environment variables starting with this prefix are considered,
    /// with the prefix stripped: `APP_HTTP_PORT` sets `http.port`. Defaults
    /// to `APP`.
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        let env_prefix = Some(prefix.into());

        self.choose(|choices| AssemblerChoices {
            env_prefix,
            ..choices
        })
    }

    /// Splits environment variable names into nested keys on this separator.
    /// Defaults to `_`.
    pub fn with_env_separator(self, separator: impl Into<String>) -> Self {
        let env_separator = Some(separator.into());

        self.choose(|choices| AssemblerChoices {
            env_separator,
            ..choices
        })
    }

    fn choose<F>(self, choose: F) -> Self
    where
        F: FnOnce(AssemblerChoices) -> AssemblerChoices,
    {
        Self {
            configuration_choices: choose(self.configuration_choices),
            ..self
        }
    }

    /// Specifies the classes that script artifacts may export.
    pub fn with_classes(self, classes: ClassRegistry) -> Self {
        Self { classes, ..self }
    }

    /// Appends a custom booter, run after the lifecycle script booter within
    /// each boot phase.
    pub fn with_booter<B>(mut self, booter: B) -> Self
    where
        B: Booter + 'static,
    {
        self.booters.push(Box::new(booter));
        self
    }

    /// Serves the given router over HTTP while the application runs.
    pub fn with_router(self, router: Router) -> Self {
        Self {
            router: Some(router),
            ..self
        }
    }

    /// Swaps in a custom [`HttpServerFactory`].
    pub fn with_server_factory<F>(mut self, factory: F) -> Self
    where
        F: HttpServerFactory + 'static,
    {
        self.server_factory = Box::new(factory);
        self
    }

    /// Swaps in a custom [`ConfigurationWiring`].
    pub fn with_configuration_wiring<W>(mut self, wiring: W) -> Self
    where
        W: ConfigurationWiring + 'static,
    {
        self.configuration_wiring = Box::new(wiring);
        self
    }

    /// Swaps in a custom [`RuntimeWiring`].
    pub fn with_runtime_wiring<W>(mut self, wiring: W) -> Self
    where
        W: RuntimeWiring + 'static,
    {
        self.runtime_wiring = Box::new(wiring);
        self
    }

    /// Swaps in a custom [`PreflightWiring`].
    pub fn with_preflight_wiring<W>(mut self, wiring: W) -> Self
    where
        W: PreflightWiring + 'static,
    {
        self.preflight_wiring = Box::new(wiring);
        self
    }
}

impl<Main> Launchpad<Main>
where
    Main: Future<Output = ()>,
{
    /// Runs the wiring stages, then boots, starts, and eventually stops the
    /// application on a fresh runtime, blocking the calling thread meanwhile.
    ///
    /// A failed start stops whatever did start before the error is returned.
    /// A failed stop is returned after every participant was asked to stop.
    pub fn boot(self) -> Result<(), AppError> {
        // Resolve the initial application configuration
        let config = self.configuration_wiring.run(&self.configuration_choices)?;

        // Make the asynchronous runtime
        let runtime = self.runtime_wiring.run(config)?;

        // Run the preflight steps
        self.preflight_wiring.run(config, &runtime);

        // Proceed to the application’s lifecycle
        runtime.block_on(self.run_async_main(config))
    }

    /// Runs the application around the main future.
    async fn run_async_main(self, config: &'static AppConfig) -> Result<(), AppError> {
        let Self {
            async_main,
            configuration_choices,
            classes,
            booters,
            router,
            server_factory,
            ..
        } = self;

        let project_root = match (&config.boot().project_root, configuration_choices.project_root) {
            (Some(root), _) => root.clone(),
            (None, Some(root)) => root,
            (None, None) => ProjectRoot::resolve().map_err(AppError::ProjectRoot)?,
        };

        // Assemble the application
        let mut bootstrapper = Bootstrapper::new(project_root.as_path(), config.boot().clone());
        bootstrapper.add(LifecycleScriptBooter::new(
            project_root.as_path(),
            config.boot().scripts.clone(),
            Arc::new(classes),
        ));
        for booter in booters {
            bootstrapper.add_boxed(booter);
        }

        let mut application = Application::new(bootstrapper);

        if let Some(router) = router {
            let server = server_factory.create(router, config.http().clone())?;
            application = application.with_server(server);
        }

        application
            .container_mut()
            .bind(CoreBindings::APPLICATION_NAME)
            .to_value(config.name().to_string())
            .in_scope(BindingScope::Singleton);

        // Terminate the context on shutdown signals
        AppContext::auto_terminate().await;

        // Start everything, winding down what did start on failure
        if let Err(start_error) = application.start().await {
            if let Err(stop_error) = application.stop().await {
                error!(error = %stop_error, "Failed to wind down a partially started application");
            }

            return Err(start_error);
        }

        // Run the application’s main asynchronous logic, keeping an eye on the context
        select! {
            biased;
            _ = AppContext::terminated() => {},
            _ = async_main => {},
        }

        // Terminate the context in case it is not terminated yet
        AppContext::terminate();

        application.stop().await
    }
}
