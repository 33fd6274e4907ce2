/// The tag carried by every lifecycle observer binding.
pub const LIFE_CYCLE_OBSERVER_TAG: &str = "lifeCycleObserver";

/// Well-known binding keys shared across the Keystone crates.
pub struct CoreBindings;

impl CoreBindings {
    /// Namespace under which lifecycle observer classes are bound.
    pub const LIFE_CYCLE_OBSERVERS: &'static str = "lifeCycleObservers";

    /// Key of the application name.
    pub const APPLICATION_NAME: &'static str = "application.name";

    /// Composes the binding key of the lifecycle observer class with the
    /// given name. The name is used verbatim.
    pub fn observer_key(class_name: &str) -> String {
        format!("{}.{}", Self::LIFE_CYCLE_OBSERVERS, class_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn observer_key_preserves_case() {
        assert_eq!(
            CoreBindings::observer_key("MyLifeCycleObserver"),
            "lifeCycleObservers.MyLifeCycleObserver",
        );
    }
}
