use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::history::DEFAULT_MAX_SESSIONS;

pub const DEFAULT_MODEL_PATH: &str = "model/salary_model.json";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub model: ModelConfig,
    pub history: HistoryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let artifact_path = env::var("APP_MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH));

        let max_records = match env::var("APP_HISTORY_LIMIT") {
            Ok(raw) if !raw.trim().is_empty() => Some(parse_limit(&raw, |value| {
                ConfigError::InvalidHistoryLimit { value }
            })?),
            _ => None,
        };

        let max_sessions = match env::var("APP_MAX_SESSIONS") {
            Ok(raw) if !raw.trim().is_empty() => {
                parse_limit(&raw, |value| ConfigError::InvalidSessionLimit { value })?
            }
            _ => DEFAULT_MAX_SESSIONS,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            model: ModelConfig { artifact_path },
            history: HistoryConfig {
                max_records,
                max_sessions,
            },
        })
    }
}

fn parse_limit(
    raw: &str,
    invalid: impl FnOnce(String) -> ConfigError,
) -> Result<NonZeroUsize, ConfigError> {
    raw.trim()
        .parse::<NonZeroUsize>()
        .map_err(|_| invalid(raw.to_string()))
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the trained model artifact loaded at startup.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub artifact_path: PathBuf,
}

/// History bounds. `max_records` is per session; `None` keeps every
/// prediction. `max_sessions` caps concurrently open sessions.
#[derive(Debug, Clone, Copy)]
pub struct HistoryConfig {
    pub max_records: Option<NonZeroUsize>,
    pub max_sessions: NonZeroUsize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidHistoryLimit { value: String },
    InvalidSessionLimit { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidHistoryLimit { value } => write!(
                f,
                "APP_HISTORY_LIMIT must be a positive integer, got '{value}'"
            ),
            ConfigError::InvalidSessionLimit { value } => write!(
                f,
                "APP_MAX_SESSIONS must be a positive integer, got '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidHistoryLimit { .. }
            | ConfigError::InvalidSessionLimit { .. } => None,
        }
    }
}

/// Serializes tests that touch process environment variables.
#[cfg(test)]
pub(crate) fn env_guard() -> &'static std::sync::Mutex<()> {
    use std::sync::{Mutex, OnceLock};

    static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
    GUARD.get_or_init(|| Mutex::new(()))
}
