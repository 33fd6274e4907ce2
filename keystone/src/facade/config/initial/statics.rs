use crate::{AppConfig, AppConfigError};
use config::Config as ProxyConfig;
use std::sync::OnceLock;

/// The statically stored initial [`AppConfig`].
static INITIAL_APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// The statically stored initial [`ProxyConfig`].
static INITIAL_PROXY_CONFIG: OnceLock<ProxyConfig> = OnceLock::new();

/// An internal facade for working with the statically stored **initial**,
/// **immutable** application configuration: resolved no more than once,
/// eagerly, during the application start-up.
pub(crate) struct StaticInitialConfig;

impl StaticInitialConfig {
    /// Returns the statically stored initial [`AppConfig`], if seeded.
    pub(crate) fn app_config() -> Option<&'static AppConfig> {
        INITIAL_APP_CONFIG.get()
    }

    /// Returns the statically stored initial [`ProxyConfig`], if seeded.
    pub(crate) fn proxy_config() -> Option<&'static ProxyConfig> {
        INITIAL_PROXY_CONFIG.get()
    }

    /// Eagerly deserializes [`AppConfig`] from the given [`ProxyConfig`] and
    /// stores both statically.
    pub(crate) fn seed(proxy_config: ProxyConfig) -> Result<(), AppConfigError> {
        if INITIAL_PROXY_CONFIG.get().is_some() {
            return Err(AppConfigError::AlreadySeeded);
        }

        // Deserialize a clone: the proxy is kept for custom sections
        let app_config = proxy_config.clone().try_deserialize::<AppConfig>()?;

        INITIAL_PROXY_CONFIG
            .set(proxy_config)
            .map_err(|_| AppConfigError::AlreadySeeded)?;

        INITIAL_APP_CONFIG
            .set(app_config)
            .map_err(|_| AppConfigError::AlreadySeeded)
    }
}
