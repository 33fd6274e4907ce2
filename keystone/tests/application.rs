#[cfg(test)]
mod tests {
    use keystone::boot::{
        ArtifactOptions, BootError, BootOptions, Booter, Bootstrapper, ClassRegistry,
        LifecycleScriptBooter,
    };
    use keystone::http::{HttpServer, HttpServerConfig, Router};
    use keystone::{
        AppError, Application, Class, Container, CoreBindings, LifecycleObserver, ObserverError,
        as_lifecycle_observer_binding,
    };
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    type Journal = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        journal: Journal,
        fail_start: bool,
        fail_stop: bool,
    }

    #[async_trait::async_trait]
    impl LifecycleObserver for Recorder {
        async fn start(&self) -> Result<(), ObserverError> {
            self.journal.lock().push(format!("start:{}", self.name));

            if self.fail_start {
                return Err(format!("{} refused to start", self.name).into());
            }

            Ok(())
        }

        async fn stop(&self) -> Result<(), ObserverError> {
            self.journal.lock().push(format!("stop:{}", self.name));

            if self.fail_stop {
                return Err(format!("{} refused to stop", self.name).into());
            }

            Ok(())
        }
    }

    fn recorder(name: &'static str, journal: &Journal, fail_start: bool, fail_stop: bool) -> Class {
        let journal = Arc::clone(journal);

        Class::observer_with(name, move || Recorder {
            name,
            journal: Arc::clone(&journal),
            fail_start,
            fail_stop,
        })
    }

    /// Binds the given classes directly, bypassing discovery.
    struct Binder {
        classes: Vec<Class>,
        loads: Arc<AtomicUsize>,
    }

    impl Booter for Binder {
        fn name(&self) -> &str {
            "binder"
        }

        fn load(&mut self, container: &mut Container) -> Result<(), BootError> {
            self.loads.fetch_add(1, Ordering::SeqCst);

            for class in &self.classes {
                container
                    .bind(CoreBindings::observer_key(class.name()))
                    .to_class(class.clone())
                    .apply(as_lifecycle_observer_binding);
            }

            Ok(())
        }
    }

    fn application(classes: Vec<Class>) -> (Application, Arc<AtomicUsize>) {
        let loads = Arc::new(AtomicUsize::new(0));
        let mut bootstrapper = Bootstrapper::new("/srv/app", BootOptions::default());
        bootstrapper.add(Binder {
            classes,
            loads: Arc::clone(&loads),
        });

        (Application::new(bootstrapper), loads)
    }

    fn entries(journal: &Journal) -> Vec<String> {
        journal.lock().clone()
    }

    #[tokio::test]
    async fn stop_reverses_start_order() {
        // Given
        let journal = Journal::default();
        let (mut application, _) = application(vec![
            recorder("Charlie", &journal, false, false),
            recorder("Alpha", &journal, false, false),
            recorder("Bravo", &journal, false, false),
        ]);

        // When
        application.start().await.unwrap();

        // Then
        assert_eq!(
            entries(&journal),
            vec!["start:Alpha", "start:Bravo", "start:Charlie"],
        );
        assert_eq!(
            application.started().collect::<Vec<_>>(),
            vec![
                "lifeCycleObservers.Alpha",
                "lifeCycleObservers.Bravo",
                "lifeCycleObservers.Charlie",
            ],
        );

        // When
        application.stop().await.unwrap();

        // Then
        assert_eq!(
            entries(&journal)[3..],
            ["stop:Charlie", "stop:Bravo", "stop:Alpha"],
        );
        assert_eq!(application.started().count(), 0);
    }

    #[tokio::test]
    async fn stop_continues_past_failure() {
        // Given
        let journal = Journal::default();
        let (mut application, _) = application(vec![
            recorder("Alpha", &journal, false, false),
            recorder("Bravo", &journal, false, true),
            recorder("Charlie", &journal, false, false),
        ]);
        application.start().await.unwrap();

        // When
        let error = application.stop().await.unwrap_err();

        // Then
        assert_eq!(
            entries(&journal)[3..],
            ["stop:Charlie", "stop:Bravo", "stop:Alpha"],
        );
        match error {
            AppError::Stop { failures } => {
                let keys: Vec<Option<&str>> = failures.iter().map(|failure| failure.key()).collect();
                assert_eq!(keys, vec![Some("lifeCycleObservers.Bravo")]);
                assert_eq!(
                    failures[0].to_string(),
                    "lifecycle observer 'lifeCycleObservers.Bravo': Bravo refused to stop",
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn failed_start_aborts_and_only_started_observers_stop() {
        // Given
        let journal = Journal::default();
        let (mut application, _) = application(vec![
            recorder("Alpha", &journal, false, false),
            recorder("Bravo", &journal, true, false),
            recorder("Charlie", &journal, false, false),
        ]);

        // When
        let error = application.start().await.unwrap_err();

        // Then
        assert!(matches!(
            error,
            AppError::Start { ref key, .. } if key == "lifeCycleObservers.Bravo"
        ));
        assert_eq!(entries(&journal), vec!["start:Alpha", "start:Bravo"]);
        assert_eq!(
            application.started().collect::<Vec<_>>(),
            vec!["lifeCycleObservers.Alpha"],
        );

        // When
        application.stop().await.unwrap();

        // Then
        assert_eq!(entries(&journal)[2..], ["stop:Alpha"]);
    }

    #[tokio::test]
    async fn boot_runs_once() {
        // Given
        let journal = Journal::default();
        let (mut application, loads) = application(vec![recorder("Alpha", &journal, false, false)]);

        // When
        application.boot().unwrap();
        application.boot().unwrap();
        application.start().await.unwrap();

        // Then
        assert!(application.is_booted());
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(application.container().contains("lifeCycleObservers.Alpha"));
        assert!(application.container().contains("application.projectRoot"));

        application.stop().await.unwrap();
    }

    #[tokio::test]
    async fn repeated_start_does_not_restart_observers() {
        // Given
        let journal = Journal::default();
        let (mut application, _) = application(vec![recorder("Alpha", &journal, false, false)]);

        // When
        application.start().await.unwrap();
        application.start().await.unwrap();

        // Then
        assert_eq!(entries(&journal), vec!["start:Alpha"]);

        application.stop().await.unwrap();
    }

    #[tokio::test]
    async fn http_listener_runs_between_start_and_stop() {
        // Given
        let journal = Journal::default();
        let (application, _) = application(vec![recorder("Alpha", &journal, false, false)]);
        let server = HttpServer::new(
            Router::new(),
            HttpServerConfig::default().with_host("127.0.0.1"),
        )
        .unwrap();
        let mut application = application.with_server(server);

        // When
        application.start().await.unwrap();

        // Then
        let server = application.server().unwrap();
        assert!(server.listening());
        assert_ne!(server.port(), 0);
        assert!(server.url().starts_with("http://127.0.0.1:"));

        // When
        application.stop().await.unwrap();

        // Then
        assert!(!application.server().unwrap().listening());
        assert_eq!(entries(&journal), vec!["start:Alpha", "stop:Alpha"]);
    }

    #[tokio::test]
    async fn discovered_scripts_are_started() {
        // Given
        let journal = Journal::default();
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("scripts/cache")).unwrap();
        fs::write(
            root.path().join("scripts/cache/warmer.script.toml"),
            "exports = [\"CacheWarmer\", \"Settings\"]\n",
        )
        .unwrap();
        let registry = ClassRegistry::new()
            .with(recorder("CacheWarmer", &journal, false, false))
            .with(Class::component_with("Settings", || 42_u16));
        let mut bootstrapper = Bootstrapper::new(root.path(), BootOptions::default());
        bootstrapper.add(LifecycleScriptBooter::new(
            root.path(),
            ArtifactOptions::default(),
            Arc::new(registry),
        ));
        let mut application = Application::new(bootstrapper);

        // When
        application.start().await.unwrap();
        application.stop().await.unwrap();

        // Then
        assert_eq!(
            entries(&journal),
            vec!["start:CacheWarmer", "stop:CacheWarmer"],
        );
        assert!(!application.container().contains("lifeCycleObservers.Settings"));
    }
}
