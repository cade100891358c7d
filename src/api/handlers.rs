//! HTTP API handlers.

use std::time::Instant;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::config::Config;
use crate::metrics::RequestTimer;
use crate::utils::iso_timestamp;

/// Greeting returned by the root route.
pub const GREETING_MESSAGE: &str = "Hello from CI/CD Pipeline!";

/// Status reported by the health route.
pub const HEALTH_STATUS_OK: &str = "OK";

/// Application state shared with handlers.
///
/// Immutable after construction; each request sees a clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// When the process started, for uptime reporting.
    pub started_at: Instant,
    /// Deployment environment label.
    pub environment: String,
}

impl AppState {
    /// Create app state with the start time taken now.
    pub fn new(config: &Config) -> Self {
        Self::with_start(config, Instant::now())
    }

    /// Create app state with an explicit process start time.
    pub fn with_start(config: &Config, started_at: Instant) -> Self {
        Self {
            started_at,
            environment: config.node_env.clone(),
        }
    }

    /// Seconds elapsed since start.
    pub fn uptime(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// Root route response.
#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    /// Always [`GREETING_MESSAGE`].
    pub message: &'static str,
    /// Current time, ISO-8601.
    pub timestamp: String,
    /// Deployment environment label.
    pub environment: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "OK".
    pub status: &'static str,
    /// Seconds since process start.
    pub uptime: f64,
    /// Current time, ISO-8601.
    pub timestamp: String,
}

/// Greeting handler - returns the fixed message and the environment label.
pub async fn greeting(State(state): State<AppState>) -> Json<GreetingResponse> {
    let _timer = RequestTimer::new("/");

    Json(GreetingResponse {
        message: GREETING_MESSAGE,
        timestamp: iso_timestamp(),
        environment: state.environment,
    })
}

/// Health check handler - always returns 200.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let _timer = RequestTimer::new("/health");

    Json(HealthResponse {
        status: HEALTH_STATUS_OK,
        uptime: state.uptime(),
        timestamp: iso_timestamp(),
    })
}
