use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the [project root](ProjectRoot::resolve).
pub const APP_PROJECT_ROOT: &str = "APP_PROJECT_ROOT";

/// Owns the logic for [resolving](ProjectRoot::resolve) the project root
/// directory at runtime.
///
/// ## Project root
///
/// The project root is the directory relative to which artifact directories
/// (e.g., `scripts`) and the configuration directory are resolved. It is:
///
/// 1. the value of the `APP_PROJECT_ROOT` environment variable, if set;
/// 2. otherwise the directory containing `Cargo.toml` when running under Cargo
///    (`cargo run`, `cargo test`, IDE runners), detected via
///    `CARGO_MANIFEST_DIR`;
/// 3. otherwise the process’s [current](env::current_dir) working directory.
pub struct ProjectRoot;

impl ProjectRoot {
    /// Resolves the project root directory.
    ///
    /// Fails only if the current working directory is inaccessible and no
    /// environment variable points elsewhere.
    pub fn resolve() -> io::Result<PathBuf> {
        if let Some(path) = Self::from_env(APP_PROJECT_ROOT) {
            return Ok(path);
        }

        if let Some(path) = Self::from_env("CARGO_MANIFEST_DIR") {
            return Ok(path);
        }

        env::current_dir()
    }

    /// Joins the given `path` onto the given `root`, unless the `path` is
    /// already absolute.
    pub fn join(root: impl AsRef<Path>, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.as_ref().join(path)
        }
    }

    fn from_env(key: &str) -> Option<PathBuf> {
        env::var_os(key)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    }
}
