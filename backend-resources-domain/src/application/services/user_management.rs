use crate::{
    application::{
        ports::*,
        services::UserMapper,
    },
    domain::{
        entities::*,
        errors::{DomainError, DomainResult, RepositoryError},
    },
};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// User service orchestrating identity-provider calls for one realm
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn KeycloakRepository>,
    realm: String,
}

impl UserService {
    pub fn new(repository: Arc<dyn KeycloakRepository>, realm: impl Into<String>) -> Self {
        Self {
            repository,
            realm: realm.into(),
        }
    }

    /// Create a new user.
    ///
    /// Single attempt: a non-success status from the provider, or a failed
    /// call, ends in [`DomainError::UserCreation`].
    #[instrument(skip(self, request), fields(realm = %self.realm, username = %request.username))]
    pub async fn create_user(&self, request: &UserRequest) -> DomainResult<Option<EntityId>> {
        request.validate()?;

        info!("Creating user");

        let user = UserMapper::user_request_to_user(request);

        let outcome = self
            .repository
            .create_user(&self.realm, &user)
            .await
            .map_err(|e| {
                warn!(error = %e, "Create call failed");
                DomainError::UserCreation {
                    status: None,
                    reason: e.to_string(),
                }
            })?;

        if !outcome.is_success() {
            warn!(status = outcome.status, "Keycloak rejected user");
            return Err(DomainError::UserCreation {
                status: Some(outcome.status),
                reason: outcome
                    .reason
                    .unwrap_or_else(|| "no reason given".to_string()),
            });
        }

        let user_id = outcome.user_id.map(EntityId::from);
        info!(
            created_id = user_id.as_ref().map(|id| id.as_str()).unwrap_or("unknown"),
            "Created user"
        );
        Ok(user_id)
    }

    /// Load a user's profile together with its realm roles and groups.
    ///
    /// The three reads are sequential and independent; any failure among
    /// them surfaces as [`DomainError::UserLookup`] with the original cause.
    #[instrument(skip(self), fields(realm = %self.realm, user_id = %user_id))]
    pub async fn get_user_by_id(&self, user_id: &str) -> DomainResult<UserResponse> {
        let lookup: RepositoryResult<UserResponse> = async {
            let user = self.repository.find_user_by_id(&self.realm, user_id).await?;
            let roles = self
                .repository
                .get_user_role_mappings(&self.realm, user_id)
                .await?;
            let groups = self.repository.get_user_groups(&self.realm, user_id).await?;
            Ok::<_, RepositoryError>(UserMapper::user_to_response(user, &roles, &groups))
        }
        .await;

        match lookup {
            Ok(response) => {
                info!(
                    roles = response.roles.len(),
                    groups = response.groups.len(),
                    "Found user"
                );
                Ok(response)
            }
            Err(source) => {
                error!(error = %source, "Failed to load user");
                Err(DomainError::UserLookup {
                    user_id: user_id.to_string(),
                    source,
                })
            }
        }
    }
}

impl fmt::Debug for UserService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserService")
            .field("realm", &self.realm)
            .finish_non_exhaustive()
    }
}
