use crate::domain::errors::AuthError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authentication token
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
    pub token_type: String,
}

impl AuthToken {
    pub fn new(access_token: String, expires_in: i64, token_type: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            access_token,
            expires_at: offset_from(now, expires_in).unwrap_or(now),
            token_type: token_type.unwrap_or_else(|| "Bearer".to_string()),
        }
    }

    /// True when the token expires within `seconds`. A window too large to
    /// represent counts as expiring.
    pub fn is_expiring_soon(&self, seconds: i64) -> bool {
        offset_from(Utc::now(), seconds).map_or(true, |deadline| deadline >= self.expires_at)
    }
}

fn offset_from(instant: DateTime<Utc>, seconds: i64) -> Option<DateTime<Utc>> {
    chrono::Duration::try_seconds(seconds).and_then(|delta| instant.checked_add_signed(delta))
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("expires_at", &self.expires_at)
            .field("token_type", &self.token_type)
            .finish_non_exhaustive()
    }
}

/// Admin account used with the password grant
#[derive(Clone, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
    pub realm: String,
    pub client_id: String,
}

impl AdminCredentials {
    pub fn new(username: String, password: String, realm: String, client_id: String) -> Self {
        Self {
            username,
            password,
            realm,
            client_id,
        }
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("realm", &self.realm)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

/// Token management port
#[async_trait]
pub trait TokenManager: Send + Sync {
    /// Acquire a new token using credentials
    async fn acquire_token(&self, credentials: &AdminCredentials) -> Result<AuthToken, AuthError>;

    /// Get token info/introspection
    async fn introspect_token(&self, token: &str) -> Result<TokenInfo, AuthError>;
}

/// Token introspection information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenInfo {
    pub active: bool,
    pub username: Option<String>,
    pub realm_roles: Vec<String>,
}

/// Authenticated principal of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationContext {
    pub username: String,
    pub realm: String,
    pub roles: Vec<String>,
}

impl AuthorizationContext {
    pub fn new(username: String, realm: String) -> Self {
        Self {
            username,
            realm,
            roles: Vec::new(),
        }
    }

    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Fail unless the principal holds `role`
    pub fn require_role(&self, role: &str) -> Result<(), AuthError> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions {
                role: role.to_string(),
            })
        }
    }
}

/// Authentication provider port
#[async_trait]
pub trait AuthenticationProvider: Send + Sync {
    /// Validate a bearer token and build the principal it stands for
    async fn create_context_from_token(&self, token: &str)
        -> Result<AuthorizationContext, AuthError>;
}

/// Role names used by this service
pub mod roles {
    pub const MODERATOR: &str = "MODERATOR";
}
