use crate::ArtifactOptions;
use keystone_core::ProjectRoot;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Finds artifact files under a project root.
#[derive(Debug, Clone)]
pub struct ArtifactScanner {
    project_root: PathBuf,
    options: ArtifactOptions,
}

impl ArtifactScanner {
    /// Creates a scanner over the given project root with the given
    /// (already merged) options.
    pub fn new(project_root: impl Into<PathBuf>, options: ArtifactOptions) -> Self {
        Self {
            project_root: project_root.into(),
            options,
        }
    }

    /// Reports the options of this scanner.
    pub fn options(&self) -> &ArtifactOptions {
        &self.options
    }

    /// Returns the paths of all matching files.
    ///
    /// Directories are visited in the configured order. Within one directory,
    /// paths are sorted lexicographically, nested ones included. A file
    /// matches when its name ends with one of the configured extensions.
    ///
    /// Symbolic links are followed. Missing or unreadable directories and
    /// entries, dangling links included, are skipped without error.
    pub fn scan(&self) -> Vec<PathBuf> {
        self.options
            .dirs()
            .iter()
            .flat_map(|dir| self.scan_dir(&ProjectRoot::join(&self.project_root, dir)))
            .collect()
    }

    fn scan_dir(&self, dir: &Path) -> Vec<PathBuf> {
        let max_depth = if self.options.nested() { usize::MAX } else { 1 };

        let mut files = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| self.matches(entry.path()))
            .map(|entry| entry.into_path())
            .collect::<Vec<_>>();

        files.sort();

        debug!(
            dir = %dir.display(),
            count = files.len(),
            "Scanned artifact directory",
        );

        files
    }

    fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(std::ffi::OsStr::to_str) else {
            return false;
        };

        self.options
            .extensions()
            .iter()
            .any(|extension| name.ends_with(extension.as_str()))
    }
}
