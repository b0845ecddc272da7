//! Server configuration loading from file and environment variables.

use handoff_rooms::LiveKitConfig;
use handoff_summary::LlmConfig;
use handoff_telephony::TwilioConfig;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
///
/// Every provider section is optional: missing credentials degrade that
/// provider's operations instead of preventing startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Cross-origin settings for browser clients.
    #[serde(default)]
    pub cors: CorsConfig,

    /// Media-room provider credentials.
    #[serde(default)]
    pub livekit: LiveKitConfig,

    /// Completion-provider credentials.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Telephony provider credentials.
    #[serde(default)]
    pub twilio: TwilioConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "handoff_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// CORS configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    /// Origins allowed to call the API. Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `HANDOFF_HOST` / `HANDOFF_PORT` override `server.host` / `server.port`
/// - `HANDOFF_LOG_LEVEL` / `HANDOFF_LOG_JSON` override `logging.*`
/// - `LIVEKIT_URL` / `LIVEKIT_API_KEY` / `LIVEKIT_API_SECRET` override `livekit.*`
/// - `OPENAI_API_KEY` / `GROQ_API_KEY` override `llm.*`
/// - `TWILIO_ACCOUNT_SID` / `TWILIO_AUTH_TOKEN` / `TWILIO_PHONE_NUMBER` override `twilio.*`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(host) = std::env::var("HANDOFF_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Ok(port) = std::env::var("HANDOFF_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Ok(level) = std::env::var("HANDOFF_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("HANDOFF_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Ok(url) = std::env::var("LIVEKIT_URL") {
        config.livekit.url = url;
    }
    if let Ok(key) = std::env::var("LIVEKIT_API_KEY") {
        config.livekit.api_key = key;
    }
    if let Ok(secret) = std::env::var("LIVEKIT_API_SECRET") {
        config.livekit.api_secret = secret;
    }
    if let Ok(key) = std::env::var("OPENAI_API_KEY") {
        config.llm.openai_api_key = key;
    }
    if let Ok(key) = std::env::var("GROQ_API_KEY") {
        config.llm.groq_api_key = key;
    }
    if let Ok(sid) = std::env::var("TWILIO_ACCOUNT_SID") {
        config.twilio.account_sid = sid;
    }
    if let Ok(token) = std::env::var("TWILIO_AUTH_TOKEN") {
        config.twilio.auth_token = token;
    }
    if let Ok(number) = std::env::var("TWILIO_PHONE_NUMBER") {
        config.twilio.phone_number = number;
    }

    Ok(config)
}
