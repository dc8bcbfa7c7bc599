use thiserror::Error;

/// Domain-specific errors for user operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{}", creation_message(*status, reason))]
    UserCreation { status: Option<u16>, reason: String },

    #[error("Failed to load user {user_id}: {source}")]
    UserLookup {
        user_id: String,
        #[source]
        source: RepositoryError,
    },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

fn creation_message(status: Option<u16>, reason: &str) -> String {
    match status {
        Some(status) => format!("User creation failed with status {status}: {reason}"),
        None => format!("User creation failed: {reason}"),
    }
}

impl DomainError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Authentication-specific errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Token acquisition failed: {reason}")]
    TokenAcquisitionFailed { reason: String },

    #[error("Token validation failed: {reason}")]
    TokenValidationFailed { reason: String },

    #[error("Insufficient permissions: role {role} required")]
    InsufficientPermissions { role: String },
}

/// Errors reported by the identity-provider adapter
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Keycloak responded with status {status}: {message}")]
    HttpFailure { status: u16, message: String },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Serialization failed: {message}")]
    SerializationFailed { message: String },
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl From<ConfigError> for DomainError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingRequired { key } => DomainError::Configuration {
                message: format!("Missing required configuration: {key}"),
            },
            ConfigError::InvalidValue { key, message } => DomainError::Configuration {
                message: format!("Invalid value for {key}: {message}"),
            },
        }
    }
}
