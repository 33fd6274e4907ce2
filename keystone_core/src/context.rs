use std::io;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

// Global singleton token that represents the application context
static TOKEN: OnceLock<CancellationToken> = OnceLock::new();

/// Facade representing the global (singleton) application context.
///
/// The context starts out “alive” and is [terminated](AppContext::terminate)
/// exactly once: repeated termination produces no additional effect. The
/// application host waits on [`terminated`](AppContext::terminated) before it
/// begins stopping the lifecycle observers and the HTTP listener.
///
/// ## Example
///
/// ```rust
/// use keystone_core::AppContext;
///
/// #[tokio::main]
/// async fn main() {
///     let stopper = tokio::spawn(async {
///         AppContext::terminated().await;
///         // stop observers here...
///     });
///
///     AppContext::terminate();
///
///     stopper.await.unwrap();
/// }
/// ```
pub struct AppContext;

impl AppContext {
    /// Internal chokepoint for accessing the global singleton [`TOKEN`].
    fn token() -> &'static CancellationToken {
        TOKEN.get_or_init(CancellationToken::new)
    }

    /// Waits until the global application context is terminated. Completes
    /// immediately if the context is already terminated.
    pub async fn terminated() {
        Self::token().cancelled().await;
    }

    /// Terminates the global application context, unblocking every task that
    /// [waits](AppContext::terminated) on it.
    pub fn terminate() {
        info!("Terminating application context");

        Self::token().cancel();
    }

    /// Reports whether the global application context has been terminated as
    /// of this moment.
    pub fn is_terminated() -> bool {
        Self::token().is_cancelled()
    }

    /// Reports whether the global application context has **not** yet been
    /// terminated as of this moment.
    pub fn is_alive() -> bool {
        !Self::is_terminated()
    }

    /// Starts listening for OS shutdown signals in the background. The first
    /// intercepted signal terminates this context; a repeated signal exits the
    /// process with a non-zero status code.
    ///
    /// Repeated calls produce no additional effect. Awaiting the returned
    /// future guarantees that the listener task has had a chance to start.
    pub async fn auto_terminate() {
        static CALLED: AtomicBool = AtomicBool::new(false);

        if CALLED.swap(true, Ordering::Relaxed) {
            return;
        }

        tokio::spawn(Self::listen_for_shutdown_signals());

        // Let the listener subscribe before returning
        tokio::task::yield_now().await;
    }

    /// Replaces the default shutdown behavior of this process: the first
    /// signal cancels the context, the second one exits immediately.
    ///
    /// If the signal handlers cannot be installed, the context is left alone
    /// and the failure is logged.
    async fn listen_for_shutdown_signals() {
        if let Err(error) = Self::wait_for_shutdown_signal().await {
            error!(
                alert = true,
                error = %error,
                "Failed to listen for shutdown signals",
            );
            return;
        }

        info!("Shutdown signal intercepted");
        Self::token().cancel();

        if Self::wait_for_shutdown_signal().await.is_ok() {
            warn!("Repeated shutdown signal intercepted; exiting");
            std::process::exit(1);
        }
    }

    /// Waits for the next `SIGINT` or `SIGTERM` on a Unix platform.
    #[cfg(unix)]
    async fn wait_for_shutdown_signal() -> io::Result<()> {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            biased;
            _ = sigint.recv() => {}
            _ = sigterm.recv() => {}
        }

        Ok(())
    }

    /// Waits for the next `ctrl_c` action on a non-Unix platform.
    #[cfg(not(unix))]
    async fn wait_for_shutdown_signal() -> io::Result<()> {
        tokio::signal::ctrl_c().await
    }
}
