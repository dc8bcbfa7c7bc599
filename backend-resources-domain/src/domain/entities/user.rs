use super::common::*;
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

pub const USERNAME_MIN_LENGTH: usize = 2;
pub const USERNAME_MAX_LENGTH: usize = 30;
pub const PASSWORD_MIN_LENGTH: usize = 4;

/// Domain entity mirroring a Keycloak user representation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: Option<EntityId>,
    pub username: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub enabled: bool,
    pub credentials: Vec<Credential>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            enabled: true,
            ..Default::default()
        }
    }
}

/// Request to create a new user
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Validate every field, reporting the first violation
    pub fn validate(&self) -> DomainResult<()> {
        Self::validate_username(&self.username)?;
        Self::validate_email(&self.email)?;
        Self::validate_password(&self.password)?;
        require_not_blank("firstName", &self.first_name)?;
        require_not_blank("lastName", &self.last_name)?;
        Ok(())
    }

    pub fn validate_username(username: &str) -> DomainResult<()> {
        require_not_blank("username", username)?;

        let length = username.chars().count();
        if !(USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&length) {
            return Err(DomainError::validation(
                "username",
                format!(
                    "must be between {USERNAME_MIN_LENGTH} and {USERNAME_MAX_LENGTH} characters"
                ),
            ));
        }

        Ok(())
    }

    pub fn validate_email(email: &str) -> DomainResult<()> {
        require_not_blank("email", email)?;

        let mut parts = email.split('@');
        let well_formed = match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) => {
                !local.is_empty()
                    && !domain.is_empty()
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !email.chars().any(char::is_whitespace)
            }
            _ => false,
        };

        if !well_formed {
            return Err(DomainError::validation(
                "email",
                "must be a well-formed email address",
            ));
        }

        Ok(())
    }

    pub fn validate_password(password: &str) -> DomainResult<()> {
        require_not_blank("password", password)?;

        if password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(DomainError::validation(
                "password",
                format!("must be at least {PASSWORD_MIN_LENGTH} characters"),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for UserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

fn require_not_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "must not be blank"));
    }
    Ok(())
}

/// Aggregated read view of a user with role and group names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}
