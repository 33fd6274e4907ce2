#[cfg(test)]
mod tests {
    use keystone_boot::{
        ArtifactOptions, BootError, BootOptions, Bootstrapper, ClassRegistry, LifecycleScriptBooter,
        LoadError,
    };
    use keystone_core::{
        BindingScope, Class, Container, LIFE_CYCLE_OBSERVER_TAG, LifecycleObserver, ObserverError,
    };
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct AuditTrail;

    #[async_trait::async_trait]
    impl LifecycleObserver for AuditTrail {
        async fn start(&self) -> Result<(), ObserverError> {
            Ok(())
        }

        async fn stop(&self) -> Result<(), ObserverError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct AuditSettings;

    fn registry() -> Arc<ClassRegistry> {
        Arc::new(
            ClassRegistry::new()
                .with(Class::observer::<AuditTrail>())
                .with(Class::component::<AuditSettings>())
                .with(Class::declared("AuditHelper")),
        )
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn tagged_keys(container: &Container) -> Vec<String> {
        container
            .find_by_tag(LIFE_CYCLE_OBSERVER_TAG)
            .iter()
            .map(|binding| binding.key().to_string())
            .collect()
    }

    #[test]
    fn only_observers_are_registered() {
        // Given
        let sandbox = tempfile::tempdir().unwrap();
        write(
            sandbox.path(),
            "scripts/audit.script.toml",
            "exports = [\"AuditTrail\", \"AuditSettings\", \"AuditHelper\"]\n",
        );
        let mut booter =
            LifecycleScriptBooter::new(sandbox.path(), ArtifactOptions::default(), registry());
        let mut container = Container::new();

        // When
        let discovered: Vec<String> = booter
            .discover()
            .unwrap()
            .iter()
            .map(|class| class.name().to_string())
            .collect();
        let registered = booter.register(&mut container);

        // Then
        assert_eq!(discovered, vec!["AuditTrail", "AuditSettings", "AuditHelper"]);
        assert_eq!(registered, vec!["lifeCycleObservers.AuditTrail"]);
        assert_eq!(tagged_keys(&container), registered);
        assert_eq!(
            container
                .binding("lifeCycleObservers.AuditTrail")
                .unwrap()
                .scope(),
            BindingScope::Singleton,
        );
    }

    #[test]
    fn overrides_merge_over_defaults() {
        // Given
        let sandbox = tempfile::tempdir().unwrap();
        write(sandbox.path(), "scripts/nested/a.script.toml", "exports = []\n");
        let overrides = ArtifactOptions::default().with_nested(false);

        // When
        let mut booter = LifecycleScriptBooter::new(sandbox.path(), overrides, registry());

        // Then
        assert_eq!(booter.options().dirs(), ["scripts".to_string()]);
        assert_eq!(booter.options().extensions(), [".script.toml".to_string()]);
        assert!(!booter.options().nested());
        assert!(booter.discover().unwrap().is_empty());
    }

    /// An `AuditTrail` observer class whose instances note where they come
    /// from upon construction.
    fn audit_trail(origin: &'static str, built: &Arc<Mutex<Vec<&'static str>>>) -> Class {
        let built = Arc::clone(built);

        Class::observer_with("AuditTrail", move || {
            built.lock().unwrap().push(origin);
            AuditTrail
        })
    }

    #[test]
    fn duplicates_last_write_wins() {
        // Given
        let sandbox = tempfile::tempdir().unwrap();
        write(sandbox.path(), "scripts/a.script.toml", "exports = [\"AuditTrail\"]\n");
        write(sandbox.path(), "plugins/b.script.yaml", "exports: [AuditTrail]\n");
        let built = Arc::new(Mutex::new(Vec::new()));
        let mut bootstrapper = Bootstrapper::new(sandbox.path(), BootOptions::default());
        bootstrapper.add(LifecycleScriptBooter::new(
            sandbox.path(),
            ArtifactOptions::default(),
            Arc::new(ClassRegistry::new().with(audit_trail("a.script.toml", &built))),
        ));
        bootstrapper.add(LifecycleScriptBooter::new(
            sandbox.path(),
            ArtifactOptions::default()
                .with_dirs(["plugins"])
                .with_extensions([".script.yaml"]),
            Arc::new(ClassRegistry::new().with(audit_trail("b.script.yaml", &built))),
        ));
        let mut container = Container::new();

        // When
        bootstrapper.boot(&mut container).unwrap();
        let instance = container.get("lifeCycleObservers.AuditTrail").unwrap();

        // Then
        assert!(instance.as_lifecycle_observer().is_some());
        assert_eq!(tagged_keys(&container), vec!["lifeCycleObservers.AuditTrail"]);
        assert_eq!(*built.lock().unwrap(), vec!["b.script.yaml"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_scripts_are_discovered() {
        // Given
        let sandbox = tempfile::tempdir().unwrap();
        write(sandbox.path(), "shared/audit.toml", "exports = [\"AuditTrail\"]\n");
        fs::create_dir_all(sandbox.path().join("scripts")).unwrap();
        std::os::unix::fs::symlink(
            sandbox.path().join("shared/audit.toml"),
            sandbox.path().join("scripts/link.script.toml"),
        )
        .unwrap();
        let mut booter =
            LifecycleScriptBooter::new(sandbox.path(), ArtifactOptions::default(), registry());
        let mut container = Container::new();

        // When
        let discovered = booter.discover().unwrap().len();
        let registered = booter.register(&mut container);

        // Then
        assert_eq!(discovered, 1);
        assert_eq!(registered, vec!["lifeCycleObservers.AuditTrail"]);
    }

    #[test]
    fn unknown_export_is_fatal() {
        // Given
        let sandbox = tempfile::tempdir().unwrap();
        write(sandbox.path(), "scripts/x.script.toml", "exports = [\"Missing\"]\n");
        let mut bootstrapper = Bootstrapper::new(sandbox.path(), BootOptions::default());
        bootstrapper.add(LifecycleScriptBooter::new(
            sandbox.path(),
            ArtifactOptions::default(),
            registry(),
        ));
        let mut container = Container::new();

        // When
        let result = bootstrapper.boot(&mut container);

        // Then
        match result {
            Err(BootError::DiscoveryLoad { path, source }) => {
                assert_eq!(path, sandbox.path().join("scripts/x.script.toml"));
                assert!(matches!(source, LoadError::UnknownClass { name } if name == "Missing"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(tagged_keys(&container).is_empty());
    }

    #[test]
    fn missing_scripts_dir_boots_empty() {
        // Given
        let sandbox = tempfile::tempdir().unwrap();
        let mut bootstrapper = Bootstrapper::new(sandbox.path(), BootOptions::default());
        bootstrapper.add(LifecycleScriptBooter::new(
            sandbox.path(),
            ArtifactOptions::default(),
            registry(),
        ));
        let mut container = Container::new();

        // When
        bootstrapper.boot(&mut container).unwrap();

        // Then
        assert!(tagged_keys(&container).is_empty());
    }
}
