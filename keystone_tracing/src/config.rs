use crate::{FormatFlavor, Verbosity};
use serde::Deserialize;
use std::collections::BTreeMap;

pub mod flavor;
pub mod verbosity;

/// The `tracing` section of the application configuration: everything about
/// the formatted log output.
///
/// Missing keys take their [default](TracingConfig::default) values; unknown
/// keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    #[serde(alias = "level")]
    verbosity: Verbosity,
    #[serde(alias = "flavour")]
    flavor: FormatFlavor,
    #[serde(alias = "colour", alias = "with_color")]
    color: bool,
    #[serde(alias = "with_timestamp")]
    show_timestamp: bool,
    #[serde(alias = "with_target")]
    show_target: bool,
    #[serde(alias = "with_file")]
    show_file: bool,
    #[serde(alias = "show_line", alias = "with_line_number")]
    show_line_number: bool,
    #[serde(alias = "with_level")]
    show_level: bool,
    #[serde(alias = "with_thread_id")]
    show_thread_id: bool,
    #[serde(alias = "with_thread_name")]
    show_thread_name: bool,
    #[serde(alias = "custom_targets")]
    targets: BTreeMap<String, Verbosity>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            flavor: FormatFlavor::default(),
            color: true,
            show_timestamp: true,
            show_target: true,
            show_file: false,
            show_line_number: false,
            show_level: true,
            show_thread_id: false,
            show_thread_name: false,
            targets: BTreeMap::new(),
        }
    }
}

impl TracingConfig {
    /// Replaces the root [`Verbosity`].
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Replaces the [`FormatFlavor`].
    pub fn with_flavor(mut self, flavor: FormatFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    /// Merges an extra per-target [`Verbosity`] into this config.
    pub fn with_target(mut self, target: impl Into<String>, verbosity: Verbosity) -> Self {
        self.targets.insert(target.into(), verbosity);
        self
    }
}

impl TracingConfig {
    /// Reports the root verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Reports the formatting flavor.
    pub fn flavor(&self) -> FormatFlavor {
        self.flavor
    }

    /// Reports whether ANSI colors are enabled. Always `false` for the JSON
    /// flavor.
    pub fn color(&self) -> bool {
        #[cfg(feature = "json")]
        if self.flavor == FormatFlavor::Json {
            return false;
        }

        self.color
    }

    /// Reports whether events include a timestamp.
    pub fn show_timestamp(&self) -> bool {
        self.show_timestamp
    }

    /// Reports whether events include their target.
    pub fn show_target(&self) -> bool {
        self.show_target
    }

    /// Reports whether events include the source file.
    pub fn show_file(&self) -> bool {
        self.show_file
    }

    /// Reports whether events include the source line number.
    pub fn show_line_number(&self) -> bool {
        self.show_line_number
    }

    /// Reports whether events include their level.
    pub fn show_level(&self) -> bool {
        self.show_level
    }

    /// Reports whether events include the thread ID.
    pub fn show_thread_id(&self) -> bool {
        self.show_thread_id
    }

    /// Reports whether events include the thread name.
    pub fn show_thread_name(&self) -> bool {
        self.show_thread_name
    }

    /// Reports the per-target verbosity overrides.
    pub fn targets(&self) -> &BTreeMap<String, Verbosity> {
        &self.targets
    }
}

impl AsRef<TracingConfig> for TracingConfig {
    fn as_ref(&self) -> &TracingConfig {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_empty() {
        // Given
        let input = "{}";

        // When
        let actual = serde_yml::from_str::<TracingConfig>(input).unwrap();

        // Then
        assert_eq!(actual, TracingConfig::default());
    }

    #[test]
    fn from_sparse_with_aliases() {
        // Given
        let input = r#"
level: debug
flavour: compact
colour: false
"#;

        // When
        let actual = serde_yml::from_str::<TracingConfig>(input).unwrap();

        // Then
        assert_eq!(
            actual,
            TracingConfig {
                verbosity: Verbosity::Debug,
                flavor: FormatFlavor::Compact,
                color: false,
                ..TracingConfig::default()
            },
        );
    }

    #[test]
    fn from_full() {
        // Given
        let input = r#"
verbosity: warn
flavor: pretty
color: false
show_timestamp: false
show_target: false
show_file: true
show_line_number: true
show_level: false
show_thread_id: true
show_thread_name: true
unknown_key: 1
targets:
  hyper: off
  keystone_http::server: trace
"#;

        // When
        let actual = serde_yml::from_str::<TracingConfig>(input).unwrap();

        // Then
        assert_eq!(
            actual,
            TracingConfig {
                verbosity: Verbosity::Warn,
                flavor: FormatFlavor::Pretty,
                color: false,
                show_timestamp: false,
                show_target: false,
                show_file: true,
                show_line_number: true,
                show_level: false,
                show_thread_id: true,
                show_thread_name: true,
                targets: BTreeMap::from([
                    ("hyper".to_string(), Verbosity::Off),
                    ("keystone_http::server".to_string(), Verbosity::Trace),
                ]),
            },
        );
    }
}
