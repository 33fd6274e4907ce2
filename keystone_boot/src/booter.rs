use crate::{BootBindings, BootError, BootOptions};
use keystone_core::{BindingScope, Container};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use tracing::{debug, info};

/// One of the three phases every [`Booter`] goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootPhase {
    /// Prepares options.
    Configure,
    /// Finds artifacts.
    Discover,
    /// Binds the findings into the container.
    Load,
}

impl BootPhase {
    /// All phases, in execution order.
    pub const ALL: [BootPhase; 3] = [Self::Configure, Self::Discover, Self::Load];

    /// Reports the lowercase name of this phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configure => "configure",
            Self::Discover => "discover",
            Self::Load => "load",
        }
    }
}

impl Display for BootPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A participant in the application boot.
///
/// Every phase defaults to doing nothing, so implementations only override
/// the phases they need. Only [`load`](Booter::load) may touch the
/// container.
pub trait Booter: Send {
    /// Names this booter in logs and errors.
    fn name(&self) -> &str;

    /// Prepares this booter’s options.
    fn configure(&mut self) -> Result<(), BootError> {
        Ok(())
    }

    /// Finds this booter’s artifacts.
    fn discover(&mut self) -> Result<(), BootError> {
        Ok(())
    }

    /// Binds the discovered artifacts into the given container.
    fn load(&mut self, _container: &mut Container) -> Result<(), BootError> {
        Ok(())
    }
}

/// Runs a set of [`Booter`]s phase-major: all of them are configured, then all
/// of them discover, then all of them load. The first failure aborts the
/// boot.
pub struct Bootstrapper {
    project_root: PathBuf,
    options: BootOptions,
    booters: Vec<Box<dyn Booter>>,
}

impl Bootstrapper {
    /// Creates a bootstrapper with no booters.
    pub fn new(project_root: impl Into<PathBuf>, options: BootOptions) -> Self {
        Self {
            project_root: project_root.into(),
            options,
            booters: Vec::new(),
        }
    }

    /// Appends a booter. Booters run in the order they were added within each
    /// phase.
    pub fn add(&mut self, booter: impl Booter + 'static) -> &mut Self {
        self.booters.push(Box::new(booter));
        self
    }

    /// Appends an already boxed booter.
    pub fn add_boxed(&mut self, booter: Box<dyn Booter>) -> &mut Self {
        self.booters.push(booter);
        self
    }

    /// Reports the number of booters.
    pub fn len(&self) -> usize {
        self.booters.len()
    }

    /// Reports whether there are no booters.
    pub fn is_empty(&self) -> bool {
        self.booters.is_empty()
    }

    /// Records the boot inputs under [`BootBindings`], then runs every phase
    /// of every booter.
    pub fn boot(&mut self, container: &mut Container) -> Result<(), BootError> {
        container
            .bind(BootBindings::PROJECT_ROOT)
            .to_value(self.project_root.clone())
            .in_scope(BindingScope::Singleton);
        container
            .bind(BootBindings::BOOT_OPTIONS)
            .to_value(self.options.clone())
            .in_scope(BindingScope::Singleton);

        for phase in BootPhase::ALL {
            info!(phase = %phase, booters = self.booters.len(), "Running boot phase");

            for booter in &mut self.booters {
                debug!(phase = %phase, booter = booter.name(), "Booter entering phase");

                match phase {
                    BootPhase::Configure => booter.configure()?,
                    BootPhase::Discover => booter.discover()?,
                    BootPhase::Load => booter.load(container)?,
                }
            }
        }

        info!(bindings = container.len(), "Boot completed");

        Ok(())
    }
}
