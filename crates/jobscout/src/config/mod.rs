use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

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
    pub cache: CacheConfig,
    pub matching: MatchingConfig,
    pub providers: ProviderConfig,
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

        let cache_ttl_secs = env::var("JOB_CACHE_TTL_SECS")
            .unwrap_or_else(|_| "900".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidCacheTtl)?;

        let provider_timeout_secs = env::var("PROVIDER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidProviderTimeout)?;

        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            // The starter .env ships a placeholder value; treat it as unset.
            .filter(|key| !key.is_empty() && key != "your_openai_api_key");

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            cache: CacheConfig {
                ttl: Duration::from_secs(cache_ttl_secs),
            },
            matching: MatchingConfig {
                provider_timeout: Duration::from_secs(provider_timeout_secs),
                ..MatchingConfig::default()
            },
            providers: ProviderConfig {
                openai_api_key,
                ..ProviderConfig::default()
            },
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Lifetime of cached job-source results.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15 * 60),
        }
    }
}

/// Knobs for the match scoring pipeline.
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Scores above this value are eligible for a provider-written explanation.
    pub notable_score_threshold: u8,
    pub best_matches_limit: usize,
    /// Character cap applied to the resume before embedding.
    pub resume_embed_limit: usize,
    /// Character cap applied to "title + description" before embedding.
    pub job_embed_limit: usize,
    pub provider_timeout: Duration,
    /// Maximum in-flight provider calls while scoring a batch.
    pub scoring_fan_out: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            notable_score_threshold: 50,
            best_matches_limit: 8,
            resume_embed_limit: 8000,
            job_embed_limit: 4000,
            provider_timeout: Duration::from_secs(10),
            scoring_fan_out: 4,
        }
    }
}

/// External AI provider settings. The semantic strategy is selected when an
/// API key is present; otherwise scoring stays on the lexical fallback.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub openai_api_key: Option<String>,
    pub api_base: String,
    pub embedding_model: String,
    pub chat_model: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            api_base: "https://api.openai.com/v1".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidCacheTtl,
    InvalidProviderTimeout,
    InvalidHost { source: std::net::AddrParseError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidCacheTtl => {
                write!(f, "JOB_CACHE_TTL_SECS must be a number of seconds")
            }
            ConfigError::InvalidProviderTimeout => {
                write!(f, "PROVIDER_TIMEOUT_SECS must be a number of seconds")
            }
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidCacheTtl
            | ConfigError::InvalidProviderTimeout => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
