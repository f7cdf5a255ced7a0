use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::prediction::PredictionMode;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub prediction: PredictionConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port = match non_blank_var("APP_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort)?,
            None => DEFAULT_PORT,
        };
        let mode = match non_blank_var("APP_PREDICTION_MODE") {
            Some(raw) => parse_prediction_mode(&raw)?,
            None => PredictionMode::default(),
        };
        let seed = non_blank_var("APP_PREDICTION_SEED")
            .map(|raw| {
                raw.parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed { value: raw })
            })
            .transpose()?;

        Ok(Self {
            server: ServerConfig {
                host: non_blank_var("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port,
            },
            telemetry: TelemetryConfig {
                log_level: non_blank_var("APP_LOG_LEVEL")
                    .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            },
            prediction: PredictionConfig { mode, seed },
        })
    }
}

/// Trimmed value of `key`; unset and blank both read as `None`.
fn non_blank_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_prediction_mode(raw: &str) -> Result<PredictionMode, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "lenient" => Ok(PredictionMode::Lenient),
        "strict" => Ok(PredictionMode::Strict),
        _ => Err(ConfigError::InvalidPredictionMode {
            value: raw.to_string(),
        }),
    }
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

/// How the prediction endpoint validates input and seeds its draws.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PredictionConfig {
    pub mode: PredictionMode,
    /// Fixed seed for every request; `None` derives one from the input tuple.
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPredictionMode { value: String },
    InvalidSeed { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPredictionMode { value } => write!(
                f,
                "APP_PREDICTION_MODE must be 'lenient' or 'strict' (got '{value}')"
            ),
            ConfigError::InvalidSeed { value } => {
                write!(f, "APP_PREDICTION_SEED must be a valid u64 (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidPredictionMode { .. }
            | ConfigError::InvalidSeed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_PREDICTION_MODE");
        env::remove_var("APP_PREDICTION_SEED");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.prediction, PredictionConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_prediction_settings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PREDICTION_MODE", " Strict ");
        env::set_var("APP_PREDICTION_SEED", "42");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.prediction.mode, PredictionMode::Strict);
        assert_eq!(config.prediction.seed, Some(42));
        reset_env();
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "   ");
        env::set_var("APP_PORT", "");
        env::set_var("APP_PREDICTION_MODE", " ");
        env::set_var("APP_PREDICTION_SEED", "");
        let config = AppConfig::load().expect("blank values ignored");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.prediction, PredictionConfig::default());
        reset_env();
    }

    #[test]
    fn rejects_unknown_prediction_mode() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PREDICTION_MODE", "quantum");
        let err = AppConfig::load().expect_err("unknown mode rejected");
        assert!(matches!(err, ConfigError::InvalidPredictionMode { ref value } if value == "quantum"));
        reset_env();
    }

    #[test]
    fn rejects_malformed_seed_and_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PREDICTION_SEED", "-1");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidSeed { .. })
        ));
        reset_env();
        env::set_var("APP_PORT", "70000");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPort)));
        reset_env();
    }

    #[test]
    fn rejects_unparseable_host() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            port: 3000,
        };
        let err = config.socket_addr().expect_err("host rejected");
        assert!(std::error::Error::source(&err).is_some());
    }
}
