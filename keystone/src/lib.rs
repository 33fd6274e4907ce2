#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![cfg_attr(test, deny(warnings))]

/// Implements component-specific facades.
mod facade {
    /// Implements the application configuration facades.
    pub mod config {
        /// Implements the [`AppConfig`] facade.
        pub mod initial;

        /// Implements the custom [`AppConfigError`] type.
        pub mod error;
    }

    /// Implements the [`DotEnv`] facade.
    pub mod dotenv;
}

/// Re-exports the [`AppConfig`]-related types.
pub use self::facade::config::error::AppConfigError;
pub use self::facade::config::initial::AppConfig;

/// Re-exports the [`DotEnv`] facade.
pub use self::facade::dotenv::DotEnv;

/// Re-exports the public API of `keystone-core` in the root of this crate for
/// convenience.
pub use keystone_core::*;

/// Re-exports the public API of `tokio` for convenience.
pub use tokio;

/// Re-exports the public API of `keystone-config` for convenience.
pub use keystone_config as config;

/// Partly re-exports the public API of `tracing` for convenience.
pub use tracing;

/// Re-exports the public API of `keystone-boot` for convenience.
pub use keystone_boot as boot;

/// Re-exports the public API of `keystone-http` for convenience.
pub use keystone_http as http;

/// Implements the [`Application`] host.
mod application;
pub use self::application::error::{AppError, StopFailure};
pub use self::application::Application;

/// Implements the [`Launchpad`] utility for building an [`App`].
mod launchpad;
pub use self::launchpad::Launchpad;
pub use self::launchpad::wiring::configuration::ConfigurationWiring;
pub use self::launchpad::wiring::preflight::PreflightWiring;
pub use self::launchpad::wiring::runtime::RuntimeWiring;

/// Implements the [`App`] facade.
mod app;
pub use self::app::App;
