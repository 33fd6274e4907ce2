use crate::{Class, Instance};
use async_trait::async_trait;
use std::error::Error;

/// The error type returned by a failed [`LifecycleObserver`] transition.
pub type ObserverError = Box<dyn Error + Send + Sync>;

/// Observes the application’s start and stop events.
///
/// The application host calls [`start`](LifecycleObserver::start) once while
/// the application starts, and [`stop`](LifecycleObserver::stop) once while it
/// shuts down. The stop is only ever issued after the observer’s own start has
/// completed. Implementations that have nothing asynchronous to do simply
/// don’t await anything.
///
/// Observers are resolved from singleton bindings, so the same instance sees
/// both transitions. Keep any mutable state behind interior mutability.
///
/// ## Example
///
/// ```
/// use keystone_core::{LifecycleObserver, ObserverError};
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// #[derive(Default)]
/// struct CacheWarmer {
///     warm: AtomicBool,
/// }
///
/// #[async_trait::async_trait]
/// impl LifecycleObserver for CacheWarmer {
///     async fn start(&self) -> Result<(), ObserverError> {
///         self.warm.store(true, Ordering::SeqCst);
///         Ok(())
///     }
///
///     async fn stop(&self) -> Result<(), ObserverError> {
///         self.warm.store(false, Ordering::SeqCst);
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait LifecycleObserver: Send + Sync {
    /// Handles the application’s start event.
    async fn start(&self) -> Result<(), ObserverError>;

    /// Handles the application’s stop event.
    async fn stop(&self) -> Result<(), ObserverError>;
}

/// Reports whether the given resolved [`Instance`] exposes both the start and
/// the stop operation.
pub fn is_lifecycle_observer(instance: &Instance) -> bool {
    instance.as_lifecycle_observer().is_some()
}

/// Reports whether instances of the given [`Class`] would expose both the
/// start and the stop operation.
///
/// The check is made against the class’s [constructor](Class::constructor)
/// rather than an instance, so nothing is constructed. A class without a
/// constructor is never an observer class.
pub fn is_lifecycle_observer_class(class: &Class) -> bool {
    class
        .constructor()
        .is_some_and(|constructor| constructor.is_lifecycle_observer())
}
