use reqwest::Url;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const ENDPOINT_VAR: &str = "CREDIT_SCORE_API_ENDPOINT";
const API_KEY_VAR: &str = "CREDIT_SCORE_API_KEY";
const TIMEOUT_VAR: &str = "CREDIT_SCORE_TIMEOUT_SECS";

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

/// Process settings shared by every front-end command.
///
/// The scoring service coordinates are loaded separately through [`PredictionConfig::load`]
/// so that offline commands (the history calculator, option listings) run without secrets.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
        })
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

/// Coordinates of the remote classification service.
///
/// Built once and handed to the prediction client at construction time. The API key is
/// redacted from `Debug` output.
#[derive(Clone)]
pub struct PredictionConfig {
    endpoint: Url,
    api_key: String,
    timeout: Option<Duration>,
}

impl PredictionConfig {
    pub fn new(endpoint: &str, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let endpoint = parse_endpoint(endpoint)?;
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }

        Ok(Self {
            endpoint,
            api_key,
            timeout: None,
        })
    }

    /// Bound every request by `timeout`. Without it the transport defaults apply.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let endpoint = env::var(ENDPOINT_VAR).map_err(|_| ConfigError::MissingVar {
            name: ENDPOINT_VAR,
        })?;
        let api_key = env::var(API_KEY_VAR).map_err(|_| ConfigError::MissingVar {
            name: API_KEY_VAR,
        })?;

        let config = Self::new(&endpoint, api_key)?;

        match env::var(TIMEOUT_VAR) {
            Ok(raw) => {
                let seconds = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|seconds| *seconds > 0)
                    .ok_or(ConfigError::InvalidTimeout { value: raw })?;
                Ok(config.with_timeout(Duration::from_secs(seconds)))
            }
            Err(_) => Ok(config),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl fmt::Debug for PredictionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictionConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|err| ConfigError::InvalidEndpoint {
        value: trimmed.to_string(),
        reason: err.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEndpoint {
            value: trimmed.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingVar { name: &'static str },
    InvalidEndpoint { value: String, reason: String },
    EmptyApiKey,
    InvalidTimeout { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingVar { name } => write!(f, "{name} must be set"),
            ConfigError::InvalidEndpoint { value, reason } => {
                write!(f, "{ENDPOINT_VAR} '{value}' is not a usable URL: {reason}")
            }
            ConfigError::EmptyApiKey => write!(f, "{API_KEY_VAR} must not be empty"),
            ConfigError::InvalidTimeout { value } => write!(
                f,
                "{TIMEOUT_VAR} must be a positive number of seconds, found '{value}'"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
