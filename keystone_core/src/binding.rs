use crate::{Class, LIFE_CYCLE_OBSERVER_TAG};
use std::any::type_name;
use std::collections::BTreeSet;

/// Instantiation scope of a [`Binding`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingScope {
    /// A fresh instance is constructed on every resolution.
    #[default]
    Transient,

    /// Exactly one instance is constructed and shared for the lifetime of the
    /// owning [`Container`](crate::Container).
    Singleton,
}

/// A registration record inside a [`Container`](crate::Container).
///
/// Bindings are configured fluently: every mutator returns the same binding,
/// so calls can be chained in any order. Tags form a set, so tagging is
/// idempotent and commutative.
#[derive(Debug, Clone)]
pub struct Binding {
    key: String,
    target: Option<Class>,
    scope: BindingScope,
    tags: BTreeSet<String>,
}

impl Binding {
    /// Creates an empty, [transient](BindingScope::Transient), untagged
    /// binding under the given `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            target: None,
            scope: BindingScope::default(),
            tags: BTreeSet::new(),
        }
    }
}

impl Binding {
    /// Targets this binding at the given [`Class`].
    pub fn to_class(&mut self, class: Class) -> &mut Self {
        self.target = Some(class);
        self
    }

    /// Targets this binding at a constant `value`. Every resolution yields a
    /// clone of the value as a component instance.
    pub fn to_value<T>(&mut self, value: T) -> &mut Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.to_class(Class::component_with(type_name::<T>(), move || {
            value.clone()
        }))
    }

    /// Adds the given tag.
    pub fn tag(&mut self, name: impl Into<String>) -> &mut Self {
        self.tags.insert(name.into());
        self
    }

    /// Adds all the given tags.
    pub fn tags<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(names.into_iter().map(Into::into));
        self
    }

    /// Sets the instantiation scope.
    pub fn in_scope(&mut self, scope: BindingScope) -> &mut Self {
        self.scope = scope;
        self
    }

    /// Applies a reusable configuration template, such as
    /// [`as_lifecycle_observer_binding`].
    pub fn apply<F>(&mut self, template: F) -> &mut Self
    where
        F: for<'a> FnOnce(&'a mut Binding) -> &'a mut Binding,
    {
        template(self)
    }
}

impl Binding {
    /// Reports the key of this binding.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the target class, if one has been set.
    pub fn target(&self) -> Option<&Class> {
        self.target.as_ref()
    }

    /// Reports the instantiation scope.
    pub fn scope(&self) -> BindingScope {
        self.scope
    }

    /// Iterates over the tag names in lexicographic order.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Reports whether this binding carries the given tag.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains(name)
    }
}

/// Marks the given binding as a lifecycle observer: adds the
/// [`LIFE_CYCLE_OBSERVER_TAG`] and fixes the scope to
/// [`Singleton`](BindingScope::Singleton), so that the same instance receives
/// both the start and the stop event.
///
/// Returns the same binding. Applying it more than once changes nothing.
///
/// ```
/// use keystone_core::{as_lifecycle_observer_binding, Binding, BindingScope};
///
/// let mut binding = Binding::new("lifeCycleObservers.CacheWarmer");
/// binding.tag("cache").apply(as_lifecycle_observer_binding);
///
/// assert!(binding.has_tag("lifeCycleObserver"));
/// assert!(binding.has_tag("cache"));
/// assert_eq!(binding.scope(), BindingScope::Singleton);
/// ```
pub fn as_lifecycle_observer_binding(binding: &mut Binding) -> &mut Binding {
    binding
        .tag(LIFE_CYCLE_OBSERVER_TAG)
        .in_scope(BindingScope::Singleton)
}
