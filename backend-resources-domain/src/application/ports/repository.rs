use crate::domain::{entities::*, errors::RepositoryError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result type for identity-provider calls
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository port for the Keycloak user sub-resources
///
/// Every call targets a single realm. Implementations hold no per-request
/// state and are shared across requests.
#[async_trait]
pub trait KeycloakRepository: Send + Sync {
    /// Submit a new user. A non-success answer from the provider is
    /// reported through the returned outcome, not as an error.
    async fn create_user(&self, realm: &str, user: &User) -> RepositoryResult<CreationOutcome>;

    async fn find_user_by_id(&self, realm: &str, user_id: &str) -> RepositoryResult<User>;

    async fn get_user_role_mappings(
        &self,
        realm: &str,
        user_id: &str,
    ) -> RepositoryResult<RoleMapping>;

    async fn get_user_groups(&self, realm: &str, user_id: &str) -> RepositoryResult<Vec<Group>>;
}

/// Provider's answer to a create call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationOutcome {
    pub status: u16,
    pub reason: Option<String>,
    pub user_id: Option<String>,
}

impl CreationOutcome {
    pub fn created(user_id: Option<String>) -> Self {
        Self {
            status: 201,
            reason: None,
            user_id,
        }
    }

    pub fn failed(status: u16, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: Some(reason.into()),
            user_id: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
