//! Application configuration loaded from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use strum::{Display, EnumString};
use tracing::warn;

use crate::error::Result;

/// Port used when `PORT` is unset or unusable.
pub const DEFAULT_PORT: u16 = 3000;

/// Interface bound when `HOST` is unset or not an IP address.
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Environment label used when `NODE_ENV` is unset or empty.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP port to listen on.
    #[serde(default = "default_port", deserialize_with = "lenient_port")]
    pub port: u16,

    /// Interface to bind, as given. Resolved by [`Config::listen_addr`].
    #[serde(default = "default_host")]
    pub host: String,

    // === Deployment ===
    /// Deployment environment label, surfaced in responses and startup logs.
    #[serde(default = "default_environment")]
    pub node_env: String,

    // === Observability ===
    /// Log output format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Port for the Prometheus exporter, as given. Disabled when unset.
    #[serde(default)]
    pub metrics_port: Option<String>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

fn default_log_format() -> String {
    LogFormat::default().to_string()
}

/// Anything that isn't a valid port number falls back to the default.
fn lenient_port<'de, D>(deserializer: D) -> std::result::Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().unwrap_or(DEFAULT_PORT))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            node_env: default_environment(),
            log_format: default_log_format(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(envy::from_env::<Self>()?.normalized())
    }

    /// Parse configuration from explicit key/value pairs.
    ///
    /// Keys are matched case-insensitively, exactly as [`Config::load`] matches
    /// process environment variables.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter::<_, Self>(vars)?.normalized())
    }

    fn normalized(mut self) -> Self {
        if self.node_env.is_empty() {
            self.node_env = default_environment();
        }
        self
    }

    /// Interface to bind. A `HOST` that isn't an IP address falls back to
    /// all interfaces.
    pub fn host_ip(&self) -> IpAddr {
        match self.host.trim().parse() {
            Ok(ip) => ip,
            Err(_) => {
                warn!(
                    "HOST={:?} is not an IP address, binding {} instead",
                    self.host, DEFAULT_HOST
                );
                DEFAULT_HOST
            }
        }
    }

    /// Address the HTTP server binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host_ip(), self.port)
    }

    /// Effective log format; unknown values fall back to text.
    pub fn log_format(&self) -> LogFormat {
        LogFormat::from_str(self.log_format.trim()).unwrap_or_default()
    }

    /// Address for the Prometheus exporter, if enabled and valid.
    pub fn metrics_addr(&self) -> Option<SocketAddr> {
        let raw = self.metrics_port.as_deref()?;
        match raw.trim().parse::<u16>() {
            Ok(port) => Some(SocketAddr::new(self.host_ip(), port)),
            Err(_) => {
                warn!("METRICS_PORT={:?} is not a port number, exporter disabled", raw);
                None
            }
        }
    }
}
