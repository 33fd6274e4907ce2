use crate::{AppError, Launchpad};

/// The entrypoint of a Keystone application.
///
/// ```no_run
/// use keystone::boot::ClassRegistry;
/// use keystone::{App, AppContext, Class, LifecycleObserver, ObserverError};
///
/// #[derive(Default)]
/// struct CacheWarmer;
///
/// #[async_trait::async_trait]
/// impl LifecycleObserver for CacheWarmer {
///     async fn start(&self) -> Result<(), ObserverError> {
///         Ok(())
///     }
///
///     async fn stop(&self) -> Result<(), ObserverError> {
///         Ok(())
///     }
/// }
///
/// fn main() -> Result<(), keystone::AppError> {
///     App::launchpad(AppContext::terminated())
///         .with_classes(ClassRegistry::new().with(Class::observer::<CacheWarmer>()))
///         .boot()
/// }
/// ```
pub struct App;

impl App {
    /// Launches the application with the default [`Launchpad`] around the
    /// given main future, and blocks until it is stopped.
    pub fn boot<Main>(async_main: Main) -> Result<(), AppError>
    where
        Main: Future<Output = ()>,
    {
        Self::launchpad(async_main).boot()
    }

    /// Creates a [`Launchpad`] around the given main future for further
    /// customization.
    pub fn launchpad<Main>(async_main: Main) -> Launchpad<Main>
    where
        Main: Future<Output = ()>,
    {
        Launchpad::new(async_main)
    }
}
