use crate::address::compose_url;
use crate::{HttpProtocol, HttpServerConfig, HttpServerError, ServerAddress};
use axum::Router;
use axum_server::Handle;
use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info};

/// A running transport: the handle used to request its shutdown and the task
/// that completes once it has fully closed.
struct Transport {
    handle: Handle,
    task: JoinHandle<io::Result<()>>,
}

/// A restartable HTTP or HTTPS listener serving an [`axum::Router`].
///
/// The server moves through `Created → Starting → Listening → Stopping →
/// Created`. Both transitions take `&mut self`, so at most one is ever in
/// flight.
pub struct HttpServer {
    router: Router,
    config: HttpServerConfig,
    transport: Option<Transport>,
    address: Option<ServerAddress>,
}

impl HttpServer {
    /// Creates a server that is not yet listening.
    ///
    /// Refuses [`Http2`](HttpProtocol::Http2), and refuses
    /// [`Https`](HttpProtocol::Https) unless TLS is compiled in and configured.
    pub fn new(router: Router, config: HttpServerConfig) -> Result<Self, HttpServerError> {
        check_protocol(&config)?;

        Ok(Self {
            router,
            config,
            transport: None,
            address: None,
        })
    }
}

impl HttpServer {
    /// Reports the served protocol.
    pub fn protocol(&self) -> HttpProtocol {
        self.config.protocol
    }

    /// Reports whether the transport currently accepts connections.
    pub fn listening(&self) -> bool {
        self.address.is_some()
    }

    /// Reports the bound port while listening, else the configured one.
    pub fn port(&self) -> u16 {
        match self.address {
            Some(ref address) => address.port,
            None => self.config.port,
        }
    }

    /// Reports the bound IP address while listening, else the configured host.
    pub fn host(&self) -> Option<String> {
        match self.address {
            Some(ref address) => Some(address.ip.to_string()),
            None => self.config.host.clone(),
        }
    }

    /// Returns the bound address, only while listening.
    pub fn address(&self) -> Option<ServerAddress> {
        self.address
    }

    /// Composes a client-usable URL from the protocol, host and port.
    pub fn url(&self) -> String {
        let host = self.host();
        let family = self.address.map(|address| address.family);

        compose_url(self.protocol(), host.as_deref(), self.port(), family)
    }
}

impl HttpServer {
    /// Binds the transport and returns once it accepts connections.
    ///
    /// Fails if the server is already listening, if the host cannot be
    /// resolved, or if the transport cannot bind.
    pub async fn start(&mut self) -> Result<(), HttpServerError> {
        check_protocol(&self.config)?;

        if self.transport.is_some() {
            return Err(HttpServerError::AlreadyListening);
        }

        let requested = self.resolve_bind_address().await?;
        let handle = Handle::new();

        debug!(address = %requested, protocol = %self.protocol(), "Binding HTTP server");

        let mut task = self.spawn_transport(requested, handle.clone()).await?;

        // A transport that fails to bind may finish before the listening
        // notification is awaited
        let bound = tokio::select! {
            biased;
            bound = handle.listening() => bound,
            outcome = &mut task => return Err(listen_failure(requested, outcome)),
        };

        let Some(bound) = bound else {
            return Err(listen_failure(requested, task.await));
        };

        self.address = Some(ServerAddress::from(bound));
        self.transport = Some(Transport { handle, task });

        info!(url = %self.url(), "HTTP server listening");

        Ok(())
    }

    /// Requests a graceful shutdown and returns once the transport has fully
    /// closed. Open connections are awaited without a deadline.
    ///
    /// Does nothing if there is no transport.
    pub async fn stop(&mut self) -> Result<(), HttpServerError> {
        let Some(Transport { handle, task }) = self.transport.take() else {
            return Ok(());
        };

        debug!(url = %self.url(), "Closing HTTP server");

        handle.graceful_shutdown(None);
        let outcome = task.await;

        self.address = None;

        match outcome {
            Ok(Ok(())) => {
                info!("HTTP server closed");
                Ok(())
            }
            Ok(Err(error)) => Err(HttpServerError::Close(error)),
            Err(error) => Err(HttpServerError::Close(io::Error::other(error))),
        }
    }

    async fn resolve_bind_address(&self) -> Result<SocketAddr, HttpServerError> {
        let port = self.config.port;

        let Some(ref host) = self.config.host else {
            return Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port));
        };

        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, port));
        }

        let into_resolve_error = |source: io::Error| HttpServerError::Resolve {
            host: host.clone(),
            source,
        };

        tokio::net::lookup_host((host.as_str(), port))
            .await
            .map_err(into_resolve_error)?
            .next()
            .ok_or_else(|| into_resolve_error(io::Error::from(io::ErrorKind::NotFound)))
    }

    async fn spawn_transport(
        &self,
        address: SocketAddr,
        handle: Handle,
    ) -> Result<JoinHandle<io::Result<()>>, HttpServerError> {
        let service = self.router.clone().into_make_service();

        match self.config.protocol {
            HttpProtocol::Http => Ok(tokio::spawn(
                axum_server::bind(address).handle(handle).serve(service),
            )),
            #[cfg(feature = "tls")]
            HttpProtocol::Https => {
                use axum_server::tls_rustls::{RustlsConfig, bind_rustls};

                let tls = self.config.tls.as_ref().ok_or(HttpServerError::MissingTls)?;
                let rustls = RustlsConfig::from_pem_file(&tls.cert, &tls.key)
                    .await
                    .map_err(HttpServerError::Tls)?;

                Ok(tokio::spawn(
                    bind_rustls(address, rustls).handle(handle).serve(service),
                ))
            }
            #[cfg(not(feature = "tls"))]
            HttpProtocol::Https => Err(HttpServerError::TlsUnavailable),
            HttpProtocol::Http2 => Err(HttpServerError::UnimplementedProtocol(HttpProtocol::Http2)),
        }
    }
}

/// Describes why a transport task ended without ever listening.
fn listen_failure(
    address: SocketAddr,
    outcome: Result<io::Result<()>, JoinError>,
) -> HttpServerError {
    let source = match outcome {
        Ok(Err(error)) => error,
        Ok(Ok(())) => io::Error::other("transport exited before listening"),
        Err(error) => io::Error::other(error),
    };

    HttpServerError::Listen { address, source }
}

/// Rejects configurations that no transport can serve.
fn check_protocol(config: &HttpServerConfig) -> Result<(), HttpServerError> {
    match config.protocol {
        HttpProtocol::Http => Ok(()),
        HttpProtocol::Http2 => Err(HttpServerError::UnimplementedProtocol(HttpProtocol::Http2)),
        HttpProtocol::Https if !cfg!(feature = "tls") => Err(HttpServerError::TlsUnavailable),
        HttpProtocol::Https if config.tls.is_none() => Err(HttpServerError::MissingTls),
        HttpProtocol::Https => Ok(()),
    }
}
