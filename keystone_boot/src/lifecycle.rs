use crate::{ArtifactOptions, ArtifactScanner, BootError, Booter, ClassRegistry, LoadError, ScriptManifest};
use keystone_core::{
    as_lifecycle_observer_binding, is_lifecycle_observer_class, Class, Container, CoreBindings,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Discovers script artifacts and binds the lifecycle observer classes they
/// export.
pub struct LifecycleScriptBooter {
    scanner: ArtifactScanner,
    registry: Arc<ClassRegistry>,
    classes: Vec<Class>,
}

impl LifecycleScriptBooter {
    /// Directories searched by default.
    pub const DEFAULT_DIRS: [&'static str; 1] = ["scripts"];

    /// File name suffixes matched by default.
    pub const DEFAULT_EXTENSIONS: [&'static str; 1] = [".script.toml"];

    /// Whether the search is recursive by default.
    pub const DEFAULT_NESTED: bool = true;

    /// Creates a booter over the given project root. The given `overrides` are
    /// merged over the [defaults](Self::defaults) key by key.
    pub fn new(
        project_root: impl Into<PathBuf>,
        overrides: ArtifactOptions,
        registry: Arc<ClassRegistry>,
    ) -> Self {
        let options = overrides.merged_over(&Self::defaults());

        Self {
            scanner: ArtifactScanner::new(project_root, options),
            registry,
            classes: Vec::new(),
        }
    }

    /// Returns the default options.
    pub fn defaults() -> ArtifactOptions {
        ArtifactOptions::default()
            .with_dirs(Self::DEFAULT_DIRS)
            .with_extensions(Self::DEFAULT_EXTENSIONS)
            .with_nested(Self::DEFAULT_NESTED)
    }

    /// Reports the effective options.
    pub fn options(&self) -> &ArtifactOptions {
        self.scanner.options()
    }

    /// Returns the classes found by the latest [discovery](Self::discover).
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }
}

impl LifecycleScriptBooter {
    /// Scans for artifact files, loads each one, and resolves its exports in
    /// the [`ClassRegistry`]. The classes are kept in discovery order and
    /// returned.
    ///
    /// A file that fails to load aborts the discovery.
    pub fn discover(&mut self) -> Result<&[Class], BootError> {
        let mut classes = Vec::new();

        for path in self.scanner.scan() {
            classes.extend(self.load_artifact(&path)?);
        }

        info!(count = classes.len(), "Discovered script classes");

        self.classes = classes;

        Ok(self.classes.as_slice())
    }

    /// Binds every discovered class that is a lifecycle observer class under
    /// `lifeCycleObservers.<ClassName>`, tagged and in singleton scope. Other
    /// classes are skipped. A later class with the same name replaces an
    /// earlier one.
    ///
    /// Returns the bound keys, in binding order.
    pub fn register(&self, container: &mut Container) -> Vec<String> {
        let mut keys = Vec::new();

        for class in &self.classes {
            if !is_lifecycle_observer_class(class) {
                debug!(class = class.name(), "Skipping non-observer class");
                continue;
            }

            let key = CoreBindings::observer_key(class.name());

            container
                .bind(key.as_str())
                .to_class(class.clone())
                .apply(as_lifecycle_observer_binding);

            info!(key = key.as_str(), "Registered lifecycle observer");

            keys.push(key);
        }

        keys
    }

    fn load_artifact(&self, path: &Path) -> Result<Vec<Class>, BootError> {
        let into_boot_error = |source: LoadError| BootError::DiscoveryLoad {
            path: path.to_path_buf(),
            source,
        };

        let manifest = ScriptManifest::load(path).map_err(into_boot_error)?;

        manifest
            .exports
            .into_iter()
            .map(|name| match self.registry.resolve(&name) {
                Some(class) => Ok(class.clone()),
                None => Err(into_boot_error(LoadError::UnknownClass { name })),
            })
            .collect()
    }
}

impl Booter for LifecycleScriptBooter {
    fn name(&self) -> &str {
        "lifecycle-scripts"
    }

    fn discover(&mut self) -> Result<(), BootError> {
        LifecycleScriptBooter::discover(self).map(|_| ())
    }

    fn load(&mut self, container: &mut Container) -> Result<(), BootError> {
        self.register(container);

        Ok(())
    }
}
