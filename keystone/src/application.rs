use crate::{AppError, StopFailure};
use keystone_boot::Bootstrapper;
use keystone_core::{Container, LIFE_CYCLE_OBSERVER_TAG, LifecycleObserver};
use keystone_http::HttpServer;
use std::sync::Arc;
use tracing::{error, info, warn};

pub mod error;

/// Hosts the lifecycle of an application: boots the [`Container`], starts
/// every tagged lifecycle observer and then the HTTP listener, and stops them
/// all in reverse.
///
/// ## Ordering
///
/// Observers are started one by one, in the order of their binding keys, and
/// each start is awaited before the next one is issued. Stopping goes the
/// other way: the HTTP listener first, then the started observers from the
/// last one to the first one. An observer whose start never completed is
/// never stopped.
///
/// ## Example
///
/// ```
/// use keystone::boot::{BootOptions, Bootstrapper};
/// use keystone::Application;
///
/// #[tokio::main]
/// async fn main() {
///     let bootstrapper = Bootstrapper::new("/srv/app", BootOptions::default());
///     let mut application = Application::new(bootstrapper);
///
///     application.start().await.unwrap();
///     application.stop().await.unwrap();
/// }
/// ```
pub struct Application {
    container: Container,
    bootstrapper: Bootstrapper,
    server: Option<HttpServer>,
    booted: bool,
    started: Vec<(String, Arc<dyn LifecycleObserver>)>,
}

impl Application {
    /// Creates an application over an empty container, booted by the given
    /// bootstrapper.
    pub fn new(bootstrapper: Bootstrapper) -> Self {
        Self {
            container: Container::new(),
            bootstrapper,
            server: None,
            booted: false,
            started: Vec::new(),
        }
    }

    /// Attaches the HTTP listener to start after the observers.
    pub fn with_server(self, server: HttpServer) -> Self {
        Self {
            server: Some(server),
            ..self
        }
    }
}

impl Application {
    /// Returns the container.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Returns the container for binding things before the boot.
    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    /// Returns the HTTP listener, if one is attached.
    pub fn server(&self) -> Option<&HttpServer> {
        self.server.as_ref()
    }

    /// Reports whether the boot has completed.
    pub fn is_booted(&self) -> bool {
        self.booted
    }

    /// Iterates over the keys of the currently started observers, in start
    /// order.
    pub fn started(&self) -> impl Iterator<Item = &str> {
        self.started.iter().map(|(key, _)| key.as_str())
    }
}

impl Application {
    /// Runs the boot phases over the container. Subsequent calls do nothing.
    pub fn boot(&mut self) -> Result<(), AppError> {
        if self.booted {
            return Ok(());
        }

        self.bootstrapper.boot(&mut self.container)?;
        self.booted = true;

        Ok(())
    }

    /// Boots if needed, starts every lifecycle observer, then starts the HTTP
    /// listener.
    ///
    /// The first failure aborts the start and is returned. Observers started
    /// before the failure stay started, so that a following
    /// [`stop`](Application::stop) winds them down.
    pub async fn start(&mut self) -> Result<(), AppError> {
        self.boot()?;

        let keys: Vec<String> = self
            .container
            .find_by_tag(LIFE_CYCLE_OBSERVER_TAG)
            .into_iter()
            .map(|binding| binding.key().to_string())
            .collect();

        for key in keys {
            if self.started.iter().any(|(started, _)| *started == key) {
                continue;
            }

            let instance = self.container.get(&key)?;

            let Some(observer) = instance.as_lifecycle_observer() else {
                warn!(key = key.as_str(), "Skipping tagged binding that is not a lifecycle observer");
                continue;
            };
            let observer = Arc::clone(observer);

            info!(key = key.as_str(), "Starting lifecycle observer");

            if let Err(source) = observer.start().await {
                error!(key = key.as_str(), error = %source, "Lifecycle observer failed to start");
                return Err(AppError::Start { key, source });
            }

            self.started.push((key, observer));
        }

        if let Some(server) = self.server.as_mut() {
            if !server.listening() {
                server.start().await?;
                info!(url = %server.url(), "HTTP listener started");
            }
        }

        info!(observers = self.started.len(), "Application started");

        Ok(())
    }

    /// Stops the HTTP listener, then every started observer in reverse start
    /// order.
    ///
    /// A failure does not interrupt the sequence: it is logged and collected,
    /// and all collected failures are returned together once every
    /// participant has been asked to stop.
    pub async fn stop(&mut self) -> Result<(), AppError> {
        let mut failures = Vec::new();

        if let Some(server) = self.server.as_mut() {
            if server.listening() {
                match server.stop().await {
                    Ok(()) => info!("HTTP listener stopped"),
                    Err(error) => {
                        error!(error = %error, "HTTP listener failed to stop");
                        failures.push(StopFailure::Http(error));
                    }
                }
            }
        }

        while let Some((key, observer)) = self.started.pop() {
            info!(key = key.as_str(), "Stopping lifecycle observer");

            if let Err(source) = observer.stop().await {
                error!(key = key.as_str(), error = %source, "Lifecycle observer failed to stop");
                failures.push(StopFailure::Observer { key, source });
            }
        }

        if !failures.is_empty() {
            return Err(AppError::Stop { failures });
        }

        info!("Application stopped");

        Ok(())
    }
}
