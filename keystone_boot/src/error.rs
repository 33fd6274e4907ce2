use crate::BootPhase;
use std::error::Error;
use std::path::PathBuf;
use thiserror::Error;

/// Represents the ways in which booting may fail. Any of these aborts the
/// boot: no observer is started with part of the artifacts missing.
#[derive(Error, Debug)]
pub enum BootError {
    /// A discovered artifact file could not be loaded.
    #[error("failed to load artifact '{}': {source}", .path.display())]
    DiscoveryLoad {
        /// Path of the offending artifact file.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: LoadError,
    },

    /// A custom [`Booter`](crate::Booter) failed in one of its phases.
    #[error("booter '{booter}' failed to {phase}: {source}")]
    Booter {
        /// Name of the failed booter.
        booter: String,
        /// The failed phase.
        phase: BootPhase,
        /// The underlying failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

/// Represents the ways in which loading a single artifact file may fail.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The final extension of the file name is neither TOML nor YAML.
    #[error("unsupported artifact format")]
    UnsupportedFormat,

    /// The file could not be read or parsed.
    #[error("unreadable manifest: {0}")]
    Manifest(#[from] config::ConfigError),

    /// The manifest exports a class that is not in the
    /// [`ClassRegistry`](crate::ClassRegistry).
    #[error("unknown exported class '{name}'")]
    UnknownClass {
        /// The exported name.
        name: String,
    },
}
