//! HTTP server lifecycle: configured, then listening.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::error::{Result, ServiceError};

/// A configured server. Routes are registered but nothing is bound.
#[derive(Debug, Clone)]
pub struct Server {
    config: Config,
    router: Router,
}

impl Server {
    /// Build the router for `state`. Never touches the network.
    pub fn new(config: Config, state: AppState) -> Self {
        let router = create_router(state);
        Self { config, router }
    }

    /// The request-handling router, usable without binding.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Configuration this server was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Bind the configured address and start listening.
    pub async fn bind(self) -> Result<BoundServer> {
        let addr = self.config.listen_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServiceError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServiceError::Bind { addr, source })?;

        info!("Server is running on port {}", local_addr.port());
        info!("Environment: {}", self.config.node_env);

        Ok(BoundServer {
            listener,
            local_addr,
            router: self.router,
        })
    }
}

/// A server bound to its port.
#[derive(Debug)]
pub struct BoundServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    router: Router,
}

impl BoundServer {
    /// Address actually bound (resolves port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve requests until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(ServiceError::Serve)?;

        info!("Server stopped");
        Ok(())
    }
}
