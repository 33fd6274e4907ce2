use crate::{HttpServer, HttpServerConfig, HttpServerError};
use axum::Router;

/// Creates [`HttpServer`]s. The application host depends on this seam rather
/// than on the constructor, so that tests and embedders can substitute their
/// own construction.
pub trait HttpServerFactory: Send + Sync {
    /// Creates a server for the given handler and config.
    fn create(&self, router: Router, config: HttpServerConfig) -> Result<HttpServer, HttpServerError>;
}

/// Creates servers with [`HttpServer::new`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHttpServerFactory;

impl HttpServerFactory for DefaultHttpServerFactory {
    fn create(&self, router: Router, config: HttpServerConfig) -> Result<HttpServer, HttpServerError> {
        HttpServer::new(router, config)
    }
}
