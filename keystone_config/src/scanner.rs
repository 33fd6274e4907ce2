use crate::ConfigFile;
use keystone_core::ProjectRoot;
use std::env;
use std::path::{Path, PathBuf};

pub mod file;

/// Environment variable that overrides the configuration directory.
pub const APP_CONFIG_DIR: &str = "APP_CONFIG_DIR";

/// A small facade for finding the [`ConfigFile`]s relevant for the current
/// application.
pub struct Scanner;

impl Scanner {
    /// Discovers and returns all [`ConfigFile`]s in the resolved
    /// [configuration directory](Self::resolve_config_dir).
    ///
    /// The returned vector is **ordered for precedence**: later files in the
    /// list should override earlier files when keys overlap.
    ///
    /// ## Supported Formats
    ///
    /// The following file formats are recognized by the final extension of the
    /// file name, case-insensitively:
    /// - TOML (`.toml`)
    /// - YAML (`.yml`, `.yaml`)
    ///
    /// ## Ordering
    ///
    /// Files are ordered lexicographically by full path. Nested directories are
    /// not scanned. A missing or unreadable directory yields no files.
    pub fn find_config_files(project_root: &Path, dir_name: Option<&str>) -> Vec<ConfigFile> {
        let config_dir = Self::resolve_config_dir(project_root, dir_name);

        let mut config_files = std::fs::read_dir(&config_dir)
            .into_iter()
            .flat_map(|read_dir| {
                read_dir
                    .filter_map(Result::ok)
                    .map(|entry| entry.path())
                    .filter(|path| path.is_file())
                    .filter_map(ConfigFile::try_at)
            })
            .collect::<Vec<_>>();

        config_files.sort();

        config_files
    }

    /// Resolves the application’s **configuration directory**: where the
    /// framework looks for configuration files.
    ///
    /// Resolution order:
    /// 1. If the `APP_CONFIG_DIR` environment variable is set, its value is
    ///    used.
    /// 2. Otherwise, if a non-empty `dir_name` argument is provided, it is used.
    /// 3. Otherwise, defaults to a directory named `"config"`.
    ///
    /// A relative result is joined onto the given `project_root`.
    pub fn resolve_config_dir(project_root: &Path, dir_name: Option<&str>) -> PathBuf {
        let input_path = env::var(APP_CONFIG_DIR) // environment takes highest priority
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| {
                dir_name
                    .map(str::trim) // if no environment, then argument
                    .filter(|s| !s.is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from("config")); // if no argument, then global default

        ProjectRoot::join(project_root, input_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn finds_supported_files_in_order() {
        // Given
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("settings");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("b.yaml"), "").unwrap();
        fs::write(dir.join("a.toml"), "").unwrap();
        fs::write(dir.join("c.YML"), "").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();
        fs::write(dir.join("nested").join("d.toml"), "").unwrap();

        // When
        let files = Scanner::find_config_files(root.path(), Some("settings"));

        // Then
        let names: Vec<&str> = files
            .iter()
            .filter_map(|file| file.path().file_name())
            .filter_map(|name| name.to_str())
            .collect();
        assert_eq!(names, vec!["a.toml", "b.yaml", "c.YML"]);
    }

    #[test]
    fn missing_dir_yields_nothing() {
        // Given
        let root = tempfile::tempdir().unwrap();

        // When
        let files = Scanner::find_config_files(root.path(), Some("absent"));

        // Then
        assert!(files.is_empty());
    }
}
