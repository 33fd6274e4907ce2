#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![cfg_attr(test, deny(warnings))]

/// Application context.
mod context;
pub use self::context::AppContext;

/// Implements a [`ProjectRoot`] facade for centralized resolution of the
/// project root directory.
mod root;
pub use self::root::{APP_PROJECT_ROOT, ProjectRoot};

/// Lifecycle observer contract and capability predicates.
mod lifecycle;
pub use self::lifecycle::{
    is_lifecycle_observer, is_lifecycle_observer_class, LifecycleObserver, ObserverError,
};

/// Class descriptors and resolved instances.
mod class;
pub use self::class::{Class, Constructor, Instance};

/// Binding records and the lifecycle binding decorator.
mod binding;
pub use self::binding::{as_lifecycle_observer_binding, Binding, BindingScope};

/// The binding container.
mod container;
pub use self::container::{Container, ContainerError};

/// Well-known binding keys and tags.
mod keys;
pub use self::keys::{CoreBindings, LIFE_CYCLE_OBSERVER_TAG};
