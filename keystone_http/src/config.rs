use serde::Deserialize;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// The `http` section of the application configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpServerConfig {
    /// Port to bind; `0` lets the OS assign an ephemeral port.
    pub port: u16,

    /// Host name or IP address to bind; all IPv4 interfaces when absent.
    #[serde(alias = "hostname")]
    pub host: Option<String>,

    /// Protocol to serve.
    pub protocol: HttpProtocol,

    /// Certificate material for [`Https`](HttpProtocol::Https), passed to the
    /// transport as is.
    pub tls: Option<TlsConfig>,
}

impl HttpServerConfig {
    /// Sets the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the protocol.
    pub fn with_protocol(mut self, protocol: HttpProtocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Sets the TLS material.
    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }
}

/// Protocol served by an [`HttpServer`](crate::HttpServer).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpProtocol {
    /// Plain HTTP/1.1.
    #[default]
    Http,

    /// HTTP over TLS.
    Https,

    /// Declared but not implemented: every server refuses it.
    #[serde(alias = "h2")]
    Http2,
}

impl HttpProtocol {
    /// Reports the URL scheme of this protocol.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
            Self::Http2 => "http2",
        }
    }
}

impl Display for HttpProtocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PEM-encoded certificate chain and private key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TlsConfig {
    /// Path to the certificate chain.
    #[serde(alias = "certificate")]
    pub cert: PathBuf,

    /// Path to the private key.
    #[serde(alias = "private_key")]
    pub key: PathBuf,
}
