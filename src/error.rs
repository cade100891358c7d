//! Unified error types for the service.

use std::net::SocketAddr;

use thiserror::Error;

/// Unified error type for the service.
///
/// Request handling is infallible; every variant here is a startup or
/// transport failure that ends the process.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Environment variables could not be deserialized into a config.
    #[error("invalid environment configuration: {0}")]
    Config(#[from] envy::Error),

    /// The HTTP listener could not bind its address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address that was requested.
        addr: SocketAddr,
        /// Underlying transport error.
        #[source]
        source: std::io::Error,
    },

    /// The accept loop failed after binding.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// Prometheus exporter installation failed.
    #[error("metrics exporter error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
