use crate::LifecycleObserver;
use std::any::{Any, type_name};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

type ObserverFactory = dyn Fn() -> Arc<dyn LifecycleObserver> + Send + Sync;
type ComponentFactory = dyn Fn() -> Arc<dyn Any + Send + Sync> + Send + Sync;

/// A named descriptor of a type that can be bound into a
/// [`Container`](crate::Container).
///
/// Classes are registered explicitly at startup (there is no runtime
/// reflection), and each one declares up front what its instances are able to
/// do via its optional [`Constructor`]:
///
/// - [`Class::observer`] builds [lifecycle observers](LifecycleObserver),
/// - [`Class::component`] builds arbitrary components,
/// - [`Class::declared`] has no constructor at all and cannot be instantiated.
///
/// Cloning a class is cheap: the name and the constructor are shared.
#[derive(Clone)]
pub struct Class {
    name: Arc<str>,
    constructor: Option<Constructor>,
}

/// Builds instances of a [`Class`].
#[derive(Clone)]
pub enum Constructor {
    /// Builds instances that implement [`LifecycleObserver`].
    Observer(Arc<ObserverFactory>),

    /// Builds instances that don’t take part in the application lifecycle.
    Component(Arc<ComponentFactory>),
}

/// A value produced by resolving a [`Binding`](crate::Binding).
#[derive(Clone)]
pub enum Instance {
    /// An instance of an observer [`Class`].
    Observer(Arc<dyn LifecycleObserver>),

    /// An instance of a component [`Class`].
    Component(Arc<dyn Any + Send + Sync>),
}

impl Class {
    /// Declares an observer class named after `T`, constructed with
    /// [`Default`].
    pub fn observer<T>() -> Self
    where
        T: LifecycleObserver + Default + 'static,
    {
        Self::observer_with(short_type_name::<T>(), T::default)
    }

    /// Declares an observer class with the given `name`, constructed by the
    /// given `factory`.
    pub fn observer_with<T, F>(name: impl AsRef<str>, factory: F) -> Self
    where
        T: LifecycleObserver + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let constructor = Constructor::Observer(Arc::new(move || {
            let observer: Arc<dyn LifecycleObserver> = Arc::new(factory());
            observer
        }));

        Self {
            name: Arc::from(name.as_ref()),
            constructor: Some(constructor),
        }
    }

    /// Declares a component class named after `T`, constructed with
    /// [`Default`].
    pub fn component<T>() -> Self
    where
        T: Default + Send + Sync + 'static,
    {
        Self::component_with(short_type_name::<T>(), T::default)
    }

    /// Declares a component class with the given `name`, constructed by the
    /// given `factory`.
    pub fn component_with<T, F>(name: impl AsRef<str>, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let constructor = Constructor::Component(Arc::new(move || {
            let component: Arc<dyn Any + Send + Sync> = Arc::new(factory());
            component
        }));

        Self {
            name: Arc::from(name.as_ref()),
            constructor: Some(constructor),
        }
    }

    /// Declares a class with the given `name` and no constructor.
    pub fn declared(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            constructor: None,
        }
    }
}

impl Class {
    /// Reports the name of this class, case-preserved.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the constructor of this class, if any.
    pub fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }

    /// Constructs a fresh [`Instance`] of this class, unless the class has no
    /// constructor.
    pub fn instantiate(&self) -> Option<Instance> {
        self.constructor.as_ref().map(Constructor::construct)
    }
}

impl Constructor {
    /// Reports whether the instances built by this constructor implement
    /// [`LifecycleObserver`].
    pub fn is_lifecycle_observer(&self) -> bool {
        matches!(self, Self::Observer(_))
    }

    /// Builds a fresh [`Instance`].
    pub fn construct(&self) -> Instance {
        match *self {
            Self::Observer(ref factory) => Instance::Observer(factory()),
            Self::Component(ref factory) => Instance::Component(factory()),
        }
    }
}

impl Instance {
    /// Returns the observer behind this instance, if it is one.
    pub fn as_lifecycle_observer(&self) -> Option<&Arc<dyn LifecycleObserver>> {
        match *self {
            Self::Observer(ref observer) => Some(observer),
            Self::Component(_) => None,
        }
    }

    /// Downcasts a [component](Instance::Component) instance to its concrete
    /// type.
    pub fn downcast<T>(&self) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        match *self {
            Self::Observer(_) => None,
            Self::Component(ref component) => Arc::clone(component).downcast::<T>().ok(),
        }
    }
}

impl Debug for Class {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("constructor", &self.constructor)
            .finish()
    }
}

impl Debug for Constructor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Observer(_) => f.write_str("Observer"),
            Self::Component(_) => f.write_str("Component"),
        }
    }
}

impl Debug for Instance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Observer(_) => f.write_str("Instance::Observer"),
            Self::Component(_) => f.write_str("Instance::Component"),
        }
    }
}

/// Returns the last path segment of `T`’s type name, without generics.
fn short_type_name<T>() -> &'static str
where
    T: ?Sized,
{
    let full = type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);

    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Settings {
        retries: u8,
    }

    #[allow(dead_code)]
    struct Wrapper<T>(T);

    #[test]
    fn names_follow_types() {
        assert_eq!(Class::component::<Settings>().name(), "Settings");
        assert_eq!(short_type_name::<Wrapper<Settings>>(), "Wrapper");
        assert_eq!(Class::declared("Ghost").name(), "Ghost");
    }

    #[test]
    fn component_downcast() {
        // Given
        let class = Class::component_with("Settings", || Settings { retries: 3 });

        // When
        let instance = class.instantiate().unwrap();

        // Then
        assert_eq!(instance.downcast::<Settings>().unwrap().retries, 3);
        assert!(instance.downcast::<String>().is_none());
        assert!(instance.as_lifecycle_observer().is_none());
    }

    #[test]
    fn declared_cannot_instantiate() {
        assert!(Class::declared("Ghost").instantiate().is_none());
    }
}
