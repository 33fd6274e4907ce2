#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![cfg_attr(test, deny(warnings))]

/// Implements the [`HttpServerConfig`] application configuration section.
mod config;
pub use self::config::{HttpProtocol, HttpServerConfig, TlsConfig};

/// Bound address records and URL composition.
mod address;
pub use self::address::{AddressFamily, ServerAddress};

/// The restartable listener.
mod server;
pub use self::server::HttpServer;

/// Server construction seam.
mod factory;
pub use self::factory::{DefaultHttpServerFactory, HttpServerFactory};

/// Error types.
mod error;
pub use self::error::HttpServerError;

/// Re-exports the request handler type for convenience.
pub use axum::Router;
