//! Certificate API server.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::routes::{CERTIFICATES_PATH, create_router};
use crate::state::AppState;

/// HTTP server exposing the certificate issuance endpoint.
#[derive(Debug, Clone)]
pub struct CertificateServer {
    state: Arc<AppState>,
}

impl CertificateServer {
    /// Create a new server with the given configuration.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            state: Arc::new(AppState::new(config)),
        }
    }

    /// Get the server state.
    #[must_use]
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Start the server and listen for connections.
    ///
    /// Runs until the server encounters a fatal error.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve(&self, addr: SocketAddr) -> ServerResult<()> {
        let listener = bind(addr).await?;

        axum::serve(listener, self.router())
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        Ok(())
    }

    /// Start the server with graceful shutdown support.
    ///
    /// The server shuts down when `shutdown` completes.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve_with_shutdown<F>(&self, addr: SocketAddr, shutdown: F) -> ServerResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = bind(addr).await?;

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        info!("Certificate API shut down");
        Ok(())
    }

    /// Create the router without starting the server.
    pub fn router(&self) -> axum::Router {
        create_router(self.state.clone())
    }
}

async fn bind(addr: SocketAddr) -> ServerResult<TcpListener> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::BindFailed(addr, e))?;

    let local = listener.local_addr().unwrap_or(addr);
    info!(addr = %local, path = CERTIFICATES_PATH, "Certificate API listening");
    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SharedSecret;

    fn make_test_server() -> CertificateServer {
        let addr = SocketAddr::from(([127, 0, 0, 1], 0));
        CertificateServer::new(ServerConfig::new(addr, SharedSecret::new("k").unwrap()))
    }

    #[test]
    fn test_server_state() {
        let server = make_test_server();
        assert!(server.state().config().api_key.matches("k"));
    }

    #[test]
    fn test_server_clone_shares_state() {
        let server = make_test_server();
        let cloned = server.clone();

        assert!(Arc::ptr_eq(&server.state(), &cloned.state()));
    }

    #[tokio::test]
    async fn test_serve_with_shutdown() {
        let server = make_test_server();
        let addr = SocketAddr::from(([127, 0, 0, 1], 0));

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let server_handle = tokio::spawn(async move {
            server
                .serve_with_shutdown(addr, async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let _ = shutdown_tx.send(());

        let result = tokio::time::timeout(std::time::Duration::from_secs(1), server_handle).await;

        assert!(matches!(result, Ok(Ok(Ok(())))));
    }

    #[tokio::test]
    async fn test_bind_conflict() {
        let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = occupied.local_addr().unwrap();

        let result = make_test_server().serve(addr).await;

        assert!(matches!(result, Err(ServerError::BindFailed(a, _)) if a == addr));
    }
}
