use crate::AppConfigError;
use crate::facade::config::initial::statics::StaticInitialConfig;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use keystone_boot::BootOptions;
use keystone_http::HttpServerConfig;
use keystone_tracing::TracingConfig;
use serde::Deserialize;
use serde::de::DeserializeOwned;

pub mod statics;

/// Represents the application’s externalized [configuration][factor-config].
///
/// This struct is the root of the configuration tree. Each field corresponds
/// to a top-level key in the configuration sources (e.g., a
/// `config/app.toml` file, or an `APP_HTTP_PORT` environment variable):
///
/// ```toml
/// name = "inventory"
///
/// [tracing]
/// verbosity = "debug"
///
/// [http]
/// port = 3000
/// host = "localhost"
///
/// [boot.scripts]
/// dirs = ["scripts", "plugins"]
/// nested = false
/// ```
///
/// Missing sections fall back to their defaults. Unknown top-level keys are
/// left for [`AppConfig::section`].
///
/// ## Initial configuration
///
/// The configuration is resolved once, while the application is
/// [launched](crate::Launchpad), and is immutable afterwards. Access it via
/// [`AppConfig::get`].
///
/// [factor-config]: https://www.12factor.net/config
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    name: String,
    tracing: TracingConfig,
    http: HttpServerConfig,
    boot: BootOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name().to_string(),
            tracing: TracingConfig::default(),
            http: HttpServerConfig::default(),
            boot: BootOptions::default(),
        }
    }
}

/// Methods that use [`AppConfig`] as a facade.
impl AppConfig {
    /// Returns a static reference to the **initial**, immutable `AppConfig`.
    ///
    /// # Panics
    ///
    /// Panics if called before the configuration has been
    /// [seeded](AppConfig::seed), which the [`Launchpad`](crate::Launchpad)
    /// does before anything else. See [`try_get`](AppConfig::try_get) for a
    /// non-panicking alternative.
    pub fn get() -> &'static Self {
        match Self::try_get() {
            Some(config) => config,
            None => panic!("the initial application configuration should not be accessed before initialization"),
        }
    }

    /// Returns a static reference to the initial `AppConfig`, unless it is not
    /// seeded yet.
    pub fn try_get() -> Option<&'static Self> {
        StaticInitialConfig::app_config()
    }

    /// Deserializes a custom section of the initial configuration by its
    /// `key`, falling back to `T::default()` if the key is absent.
    ///
    /// # Panics
    ///
    /// Panics if the section exists but fails to deserialize, or if the
    /// configuration is not seeded yet. See
    /// [`try_section`](AppConfig::try_section).
    pub fn section<T>(key: impl AsRef<str>) -> T
    where
        T: DeserializeOwned + Default,
    {
        let key = key.as_ref();

        Self::try_section(key).unwrap_or_else(|error| {
            panic!(
                "failed to load or parse the application configuration section '{}': {}",
                key, error,
            );
        })
    }

    /// Deserializes a custom section of the initial configuration by its
    /// `key`, falling back to `T::default()` if the key is absent.
    pub fn try_section<T>(key: impl AsRef<str>) -> Result<T, AppConfigError>
    where
        T: DeserializeOwned + Default,
    {
        StaticInitialConfig::proxy_config()
            .ok_or(AppConfigError::NotSeeded)?
            .get(key.as_ref())
            .or_else(|error| match error {
                ConfigError::NotFound(_) => Ok(T::default()),
                _ => Err(AppConfigError::from(error)),
            })
    }

    /// Seeds the **initial configuration** from the given builder.
    ///
    /// Called by the [`ConfigurationWiring`](crate::ConfigurationWiring);
    /// fails if the configuration is already seeded.
    pub fn seed(config_builder: ConfigBuilder<DefaultState>) -> Result<(), AppConfigError> {
        let proxy_config = config_builder.build()?;

        StaticInitialConfig::seed(proxy_config)
    }
}

impl AppConfig {
    /// Returns the name of the application. Defaults to `"app"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the configuration of the `tracing` (logging) layer.
    pub fn tracing(&self) -> &TracingConfig {
        &self.tracing
    }

    /// Returns the configuration of the HTTP listener.
    pub fn http(&self) -> &HttpServerConfig {
        &self.http
    }

    /// Returns the boot options: project root and script discovery
    /// overrides.
    pub fn boot(&self) -> &BootOptions {
        &self.boot
    }
}

impl AppConfig {
    fn default_name() -> &'static str {
        "app"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};
    use keystone_http::HttpProtocol;
    use keystone_tracing::Verbosity;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn parse(input: &str, format: FileFormat) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(input, format))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_falls_back_to_defaults() {
        // When
        let config = parse("", FileFormat::Toml);

        // Then
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.name(), "app");
        assert_eq!(config.http().port, 0);
        assert_eq!(config.boot().scripts.dirs, None);
    }

    #[test]
    fn sections_from_yaml() {
        // Given
        let input = r#"
name: inventory
unknown: ignored
tracing:
  verbosity: debug
http:
  port: 3000
  hostname: localhost
boot:
  project_root: /srv/inventory
  scripts:
    dirs: [scripts, plugins]
    recursive: false
"#;

        // When
        let config = parse(input, FileFormat::Yaml);

        // Then
        assert_eq!(config.name(), "inventory");
        assert_eq!(config.tracing().verbosity(), Verbosity::Debug);
        assert_eq!(config.http().port, 3000);
        assert_eq!(config.http().host.as_deref(), Some("localhost"));
        assert_eq!(config.http().protocol, HttpProtocol::Http);
        assert_eq!(
            config.boot().project_root,
            Some(PathBuf::from("/srv/inventory")),
        );
        assert_eq!(config.boot().scripts.dirs(), ["scripts", "plugins"]);
        assert!(!config.boot().scripts.nested());
        assert_eq!(config.boot().scripts.extensions, None);
    }

    #[test]
    fn partial_sections_from_toml() {
        // Given
        let input = r#"
[http]
protocol = "https"

[boot.scripts]
extensions = [".script.yaml"]
"#;

        // When
        let config = parse(input, FileFormat::Toml);

        // Then
        assert_eq!(config.name(), "app");
        assert_eq!(config.http().protocol, HttpProtocol::Https);
        assert_eq!(config.http().port, 0);
        assert_eq!(config.boot().project_root, None);
        assert_eq!(config.boot().scripts.extensions(), [".script.yaml"]);
    }
}
