use crate::AppConfigError;
use keystone_boot::BootError;
use keystone_core::{ContainerError, ObserverError};
use keystone_http::HttpServerError;
use std::io;
use thiserror::Error;

/// Represents the ways in which launching, starting, or stopping an
/// [`Application`](crate::Application) may fail.
#[derive(Error, Debug)]
pub enum AppError {
    /// The initial configuration could not be resolved.
    #[error("failed to resolve the application configuration: {0}")]
    Config(#[from] AppConfigError),

    /// The asynchronous runtime could not be built.
    #[error("failed to build the asynchronous runtime: {0}")]
    Runtime(#[source] io::Error),

    /// Neither the configuration nor the process provided a project root.
    #[error("failed to resolve the project root: {0}")]
    ProjectRoot(#[source] io::Error),

    /// A boot phase failed.
    #[error(transparent)]
    Boot(#[from] BootError),

    /// A tagged binding could not be resolved.
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// A lifecycle observer failed to start.
    #[error("lifecycle observer '{key}' failed to start: {source}")]
    Start {
        /// Binding key of the observer.
        key: String,
        /// The observer’s error.
        source: ObserverError,
    },

    /// The HTTP listener could not be created or started.
    #[error(transparent)]
    Http(#[from] HttpServerError),

    /// One or more participants failed to stop. Every participant was still
    /// asked to stop.
    #[error("{} lifecycle participant(s) failed to stop", .failures.len())]
    Stop {
        /// The individual failures, in stop order.
        failures: Vec<StopFailure>,
    },
}

/// A single failure collected while stopping an
/// [`Application`](crate::Application).
#[derive(Error, Debug)]
pub enum StopFailure {
    /// The HTTP listener failed to close.
    #[error("HTTP listener: {0}")]
    Http(#[source] HttpServerError),

    /// A lifecycle observer failed to stop.
    #[error("lifecycle observer '{key}': {source}")]
    Observer {
        /// Binding key of the observer.
        key: String,
        /// The observer’s error.
        source: ObserverError,
    },
}

impl StopFailure {
    /// Reports the binding key of the failed observer, or `None` for the
    /// HTTP listener.
    pub fn key(&self) -> Option<&str> {
        match *self {
            Self::Http(_) => None,
            Self::Observer { ref key, .. } => Some(key),
        }
    }
}
