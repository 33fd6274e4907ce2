use crate::{Binding, BindingScope, Instance};
use parking_lot::Mutex;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// A narrow binding container: stores [`Binding`]s by key, enumerates them by
/// tag, and resolves them into [`Instance`]s.
///
/// Bindings are mutated only while the application boots (which requires
/// `&mut self`), and resolved afterwards through a shared reference.
/// [Singleton](BindingScope::Singleton) instances are constructed lazily on
/// first resolution and cached until the container is dropped.
#[derive(Debug, Default)]
pub struct Container {
    bindings: BTreeMap<String, Binding>,
    singletons: Mutex<HashMap<String, Instance>>,
}

/// Represents the ways in which resolving a [`Binding`] may fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// Nothing is bound under the key.
    #[error("no binding under key '{key}'")]
    NotBound {
        /// The requested key.
        key: String,
    },

    /// The binding exists but was never targeted at a class.
    #[error("binding '{key}' has no target")]
    NoTarget {
        /// The requested key.
        key: String,
    },

    /// The target class has no constructor.
    #[error("class '{class}' bound under '{key}' cannot be constructed")]
    NotConstructible {
        /// The requested key.
        key: String,
        /// Name of the target class.
        class: String,
    },
}

impl Container {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Container {
    /// Creates a fresh binding under the given `key` and returns it for
    /// configuration.
    ///
    /// An existing binding under the same key is replaced (the last write
    /// wins), and its cached singleton instance, if any, is discarded.
    pub fn bind(&mut self, key: impl Into<String>) -> &mut Binding {
        let key = key.into();

        self.singletons.get_mut().remove(&key);

        match self.bindings.entry(key) {
            Entry::Occupied(mut entry) => {
                let fresh = Binding::new(entry.key().as_str());
                entry.insert(fresh);
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                let fresh = Binding::new(entry.key().as_str());
                entry.insert(fresh)
            }
        }
    }

    /// Returns the binding under the given `key`, if any.
    pub fn binding(&self, key: &str) -> Option<&Binding> {
        self.bindings.get(key)
    }

    /// Returns all bindings carrying the given tag, ordered by key.
    pub fn find_by_tag(&self, tag: &str) -> Vec<&Binding> {
        self.bindings
            .values()
            .filter(|binding| binding.has_tag(tag))
            .collect()
    }

    /// Reports whether anything is bound under the given `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }

    /// Reports the number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Reports whether the container has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterates over the bound keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Resolves the binding under the given `key`.
    ///
    /// Singleton bindings construct their instance once and return clones of
    /// the cached handle thereafter. Transient bindings construct a fresh
    /// instance every time.
    pub fn get(&self, key: &str) -> Result<Instance, ContainerError> {
        let binding = self
            .bindings
            .get(key)
            .ok_or_else(|| ContainerError::NotBound {
                key: key.to_string(),
            })?;

        let class = binding.target().ok_or_else(|| ContainerError::NoTarget {
            key: key.to_string(),
        })?;

        let construct = || {
            class
                .instantiate()
                .ok_or_else(|| ContainerError::NotConstructible {
                    key: key.to_string(),
                    class: class.name().to_string(),
                })
        };

        match binding.scope() {
            BindingScope::Transient => construct(),
            BindingScope::Singleton => {
                let mut singletons = self.singletons.lock();

                if let Some(instance) = singletons.get(key) {
                    return Ok(instance.clone());
                }

                let instance = construct()?;
                singletons.insert(key.to_string(), instance.clone());

                Ok(instance)
            }
        }
    }
}
