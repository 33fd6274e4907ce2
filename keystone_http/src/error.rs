use crate::HttpProtocol;
use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Represents the ways in which an [`HttpServer`](crate::HttpServer) may fail.
#[derive(Error, Debug)]
pub enum HttpServerError {
    /// The protocol is declared but not implemented.
    #[error("protocol '{0}' is not implemented")]
    UnimplementedProtocol(HttpProtocol),

    /// HTTPS was requested, but TLS support is not compiled in.
    #[error("HTTPS requires the `tls` feature of keystone-http")]
    TlsUnavailable,

    /// HTTPS was requested without certificate material.
    #[error("HTTPS requires the `tls.cert` and `tls.key` settings")]
    MissingTls,

    /// The certificate material could not be loaded.
    #[error("failed to load TLS material: {0}")]
    Tls(#[source] io::Error),

    /// The host name could not be resolved to an address.
    #[error("failed to resolve host '{host}': {source}")]
    Resolve {
        /// The configured host.
        host: String,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },

    /// The transport failed to bind.
    #[error("failed to listen on {address}: {source}")]
    Listen {
        /// The requested address.
        address: SocketAddr,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },

    /// The server is already listening.
    #[error("the server is already listening")]
    AlreadyListening,

    /// The transport reported an error while closing.
    #[error("failed to close the listener: {0}")]
    Close(#[source] io::Error),
}
