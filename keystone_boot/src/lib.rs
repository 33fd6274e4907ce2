#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![cfg_attr(test, deny(warnings))]

/// Artifact discovery options and their defaults.
mod options;
pub use self::options::{ArtifactOptions, BootOptions};

/// Filesystem discovery of artifact files.
mod scanner;
pub use self::scanner::ArtifactScanner;

/// Script artifact manifests.
mod manifest;
pub use self::manifest::ScriptManifest;

/// The explicit registry of candidate classes.
mod registry;
pub use self::registry::ClassRegistry;

/// The [`Booter`] contract and the phase-major [`Bootstrapper`].
mod booter;
pub use self::booter::{BootPhase, Booter, Bootstrapper};

/// Discovery and registration of lifecycle observer classes.
mod lifecycle;
pub use self::lifecycle::LifecycleScriptBooter;

/// Well-known binding keys of the boot machinery.
mod keys;
pub use self::keys::BootBindings;

/// Error types.
mod error;
pub use self::error::{BootError, LoadError};
