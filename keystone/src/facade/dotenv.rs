use keystone_core::ProjectRoot;
use std::path::Path;
use std::sync::Once;
use tracing::debug;

const FILE_DOT_ENV_LOCAL: &str = ".env.local";
const FILE_DOT_ENV_GLOBAL: &str = ".env";

/// A facade for loading environment variables from `.env` files.
///
/// Keystone supports loading variables from `.env.local` and `.env` files
/// located in the [project root](ProjectRoot).
///
/// Use [`tap`] for a safe, one-time load operation, or [`load`] to perform the
/// operation directly.
///
/// [`tap`]: DotEnv::tap
/// [`load`]: DotEnv::load
pub struct DotEnv;

impl DotEnv {
    /// Ensures environment variables from dot-env files are loaded. The
    /// loading is performed at most once per process.
    pub fn tap() {
        static INIT: Once = Once::new();

        INIT.call_once(Self::load);
    }

    /// Loads environment variables from the dot-env files in the project
    /// root. If the project root cannot be resolved, nothing is loaded.
    pub fn load() {
        match ProjectRoot::resolve() {
            Ok(root) => Self::load_from(&root),
            Err(error) => debug!(error = %error, "Skipping dot-env files: no project root"),
        }
    }

    /// Loads environment variables from the dot-env files in the given
    /// directory.
    ///
    /// Variables that are already set are never overridden. Between the two
    /// files, `.env.local` takes precedence over `.env`. Missing files are
    /// silently ignored.
    pub fn load_from(dir: &Path) {
        for file_name in [FILE_DOT_ENV_LOCAL, FILE_DOT_ENV_GLOBAL] {
            if dotenvy::from_path(dir.join(file_name)).is_ok() {
                debug!(file = file_name, "Loaded dot-env file");
            }
        }
    }
}
