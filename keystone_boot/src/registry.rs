use keystone_core::Class;
use std::collections::HashMap;

/// The explicit set of candidate classes that artifact manifests may export,
/// keyed by class name.
///
/// Registering a class under a name that is already taken replaces the
/// earlier class.
#[derive(Debug, Default, Clone)]
pub struct ClassRegistry {
    classes: HashMap<String, Class>,
}

impl ClassRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the given class, consuming and returning the registry.
    pub fn with(mut self, class: Class) -> Self {
        self.register(class);
        self
    }

    /// Adds the given class.
    pub fn register(&mut self, class: Class) -> &mut Self {
        self.classes.insert(class.name().to_string(), class);
        self
    }

    /// Looks up a class by its exact name.
    pub fn resolve(&self, name: &str) -> Option<&Class> {
        self.classes.get(name)
    }

    /// Reports the number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Reports whether no class is registered.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl FromIterator<Class> for ClassRegistry {
    fn from_iter<T: IntoIterator<Item = Class>>(iter: T) -> Self {
        let mut registry = Self::new();

        for class in iter {
            registry.register(class);
        }

        registry
    }
}

impl Extend<Class> for ClassRegistry {
    fn extend<T: IntoIterator<Item = Class>>(&mut self, iter: T) {
        for class in iter {
            self.register(class);
        }
    }
}
