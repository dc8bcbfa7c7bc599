use crate::application::ports::auth::roles;
use crate::domain::errors::{ConfigError, DomainResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Configuration port for accessing application configuration
pub trait ConfigurationPort: Send + Sync {
    /// Get Keycloak server configuration
    fn get_keycloak_config(&self) -> &KeycloakConfig;

    /// Get request authentication configuration
    fn get_auth_config(&self) -> &AuthConfig;

    /// Get HTTP configuration
    fn get_http_config(&self) -> &HttpConfig;

    /// Get logging configuration
    fn get_logging_config(&self) -> &LoggingConfig;

    /// Validate all configuration
    fn validate(&self) -> DomainResult<()>;
}

/// Keycloak server configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct KeycloakConfig {
    pub url: String,
    pub admin_realm: String,
    pub admin_client_id: String,
    pub admin_username: String,
    pub admin_password: String,
    /// Realm whose users this service manages
    pub realm: String,
}

impl KeycloakConfig {
    pub fn validate(&self) -> DomainResult<()> {
        if self.url.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "KEYCLOAK_URL".to_string(),
            }
            .into());
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "KEYCLOAK_URL".to_string(),
                message: "Must start with http:// or https://".to_string(),
            }
            .into());
        }

        if self.admin_username.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "KEYCLOAK_ADMIN_USERNAME".to_string(),
            }
            .into());
        }

        if self.admin_password.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "KEYCLOAK_ADMIN_PASSWORD".to_string(),
            }
            .into());
        }

        if self.realm.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "KEYCLOAK_REALM".to_string(),
            }
            .into());
        }

        Ok(())
    }

    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

impl std::fmt::Debug for KeycloakConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeycloakConfig")
            .field("url", &self.url)
            .field("admin_realm", &self.admin_realm)
            .field("admin_client_id", &self.admin_client_id)
            .field("admin_username", &self.admin_username)
            .field("realm", &self.realm)
            .finish_non_exhaustive()
    }
}

/// Upper bound for refreshing the admin token ahead of its expiry
pub const MAX_TOKEN_REFRESH_THRESHOLD_SECONDS: u64 = 3600;

/// Authentication of incoming requests
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Client used against the token introspection endpoint
    pub client_id: String,
    pub client_secret: Option<String>,
    pub required_role: String,
    pub token_refresh_threshold_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            client_id: "backend-resources".to_string(),
            client_secret: None,
            required_role: roles::MODERATOR.to_string(),
            token_refresh_threshold_seconds: 30,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> DomainResult<()> {
        if self.client_id.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "AUTH_CLIENT_ID".to_string(),
            }
            .into());
        }

        if self.required_role.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "AUTH_REQUIRED_ROLE".to_string(),
                message: "Must not be empty".to_string(),
            }
            .into());
        }

        if self.token_refresh_threshold_seconds > MAX_TOKEN_REFRESH_THRESHOLD_SECONDS {
            return Err(ConfigError::InvalidValue {
                key: "AUTH_TOKEN_REFRESH_THRESHOLD_SECONDS".to_string(),
                message: format!("Must be at most {MAX_TOKEN_REFRESH_THRESHOLD_SECONDS}"),
            }
            .into());
        }

        Ok(())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("client_id", &self.client_id)
            .field("required_role", &self.required_role)
            .field(
                "token_refresh_threshold_seconds",
                &self.token_refresh_threshold_seconds,
            )
            .finish_non_exhaustive()
    }
}

/// HTTP server and client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub port: u16,
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
        }
    }
}

impl HttpConfig {
    pub fn validate(&self) -> DomainResult<()> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HTTP_TIMEOUT_SECONDS".to_string(),
                message: "Must be greater than 0".to_string(),
            }
            .into());
        }

        if self.connect_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HTTP_CONNECT_TIMEOUT_SECONDS".to_string(),
                message: "Must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn get_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
        }
    }
}

/// Log level enumeration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Log format enumeration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub keycloak: KeycloakConfig,
    pub auth: AuthConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> DomainResult<()> {
        self.keycloak.validate()?;
        self.auth.validate()?;
        self.http.validate()?;
        Ok(())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> DomainResult<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_source<F>(source: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            source(key).ok_or_else(|| ConfigError::MissingRequired {
                key: key.to_string(),
            })
        };
        let or_default = |key: &str, default: &str| source(key).unwrap_or_else(|| default.to_string());

        let keycloak = KeycloakConfig {
            url: required("KEYCLOAK_URL")?,
            admin_realm: or_default("KEYCLOAK_ADMIN_REALM", "master"),
            admin_client_id: or_default("KEYCLOAK_ADMIN_CLIENT_ID", "admin-cli"),
            admin_username: required("KEYCLOAK_ADMIN_USERNAME")?,
            admin_password: required("KEYCLOAK_ADMIN_PASSWORD")?,
            realm: or_default("KEYCLOAK_REALM", "master"),
        };

        let auth_defaults = AuthConfig::default();
        let auth = AuthConfig {
            client_id: or_default("AUTH_CLIENT_ID", &auth_defaults.client_id),
            client_secret: source("AUTH_CLIENT_SECRET"),
            required_role: or_default("AUTH_REQUIRED_ROLE", &auth_defaults.required_role),
            token_refresh_threshold_seconds: parse_or(
                &source,
                "AUTH_TOKEN_REFRESH_THRESHOLD_SECONDS",
                auth_defaults.token_refresh_threshold_seconds,
            )?,
        };

        let http_defaults = HttpConfig::default();
        let http = HttpConfig {
            port: parse_or(&source, "PORT", http_defaults.port)?,
            timeout_seconds: parse_or(&source, "HTTP_TIMEOUT_SECONDS", http_defaults.timeout_seconds)?,
            connect_timeout_seconds: parse_or(
                &source,
                "HTTP_CONNECT_TIMEOUT_SECONDS",
                http_defaults.connect_timeout_seconds,
            )?,
        };

        let logging = LoggingConfig {
            level: parse_or(&source, "LOG_LEVEL", LogLevel::Info)?,
            format: parse_or(&source, "LOG_FORMAT", LogFormat::Compact)?,
        };

        let config = AppConfig {
            keycloak,
            auth,
            http,
            logging,
        };

        config.validate()?;
        Ok(config)
    }
}

fn parse_or<F, T>(source: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match source(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// String parsing implementations
impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {s}")),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {s}")),
        }
    }
}
