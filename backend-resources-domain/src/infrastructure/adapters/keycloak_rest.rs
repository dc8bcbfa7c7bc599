use async_trait::async_trait;
use keycloak::types::*;
use keycloak::{KeycloakAdmin, KeycloakError};
use tracing::debug;

use super::cached_token_supplier::CachedAdminTokenSupplier;
use crate::application::ports::repository::*;
use crate::domain::{entities::*, errors::RepositoryError};

/// Keycloak REST API adapter implementing the KeycloakRepository port
pub struct KeycloakRestAdapter {
    admin: KeycloakAdmin<CachedAdminTokenSupplier>,
    token_supplier: CachedAdminTokenSupplier,
}

impl KeycloakRestAdapter {
    pub fn new(url: &str, token_supplier: CachedAdminTokenSupplier, client: reqwest::Client) -> Self {
        Self {
            admin: KeycloakAdmin::new(url, token_supplier.clone(), client),
            token_supplier,
        }
    }

    /// Fails when no admin token can be obtained, so that the error is not
    /// mistaken for an answer from Keycloak.
    async fn ensure_admin_token(&self) -> RepositoryResult<()> {
        self.token_supplier
            .access_token()
            .await
            .map(|_| ())
            .map_err(|e| RepositoryError::NetworkError {
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl KeycloakRepository for KeycloakRestAdapter {
    async fn create_user(&self, realm: &str, user: &User) -> RepositoryResult<CreationOutcome> {
        self.ensure_admin_token().await?;
        let keycloak_user = convert_user_to_keycloak(user);

        match self.admin.realm_users_post(realm, keycloak_user).await {
            Ok(response) => Ok(CreationOutcome::created(response.to_id().map(str::to_string))),
            Err(KeycloakError::HttpFailure { status, text, .. }) => {
                debug!("Keycloak refused user '{}' with status {}", user.username, status);
                Ok(CreationOutcome::failed(status, text))
            }
            Err(e) => Err(repository_error("User", e)),
        }
    }

    async fn find_user_by_id(&self, realm: &str, user_id: &str) -> RepositoryResult<User> {
        self.ensure_admin_token().await?;
        let keycloak_user = self
            .admin
            .realm_users_with_user_id_get(realm, user_id, None)
            .await
            .map_err(|e| repository_error("User", e))?;

        Ok(convert_user_from_keycloak(keycloak_user))
    }

    async fn get_user_role_mappings(
        &self,
        realm: &str,
        user_id: &str,
    ) -> RepositoryResult<RoleMapping> {
        self.ensure_admin_token().await?;
        let mappings = self
            .admin
            .realm_users_with_user_id_role_mappings_get(realm, user_id)
            .await
            .map_err(|e| repository_error("Role mappings", e))?;

        Ok(convert_role_mapping_from_keycloak(&mappings))
    }

    async fn get_user_groups(&self, realm: &str, user_id: &str) -> RepositoryResult<Vec<Group>> {
        self.ensure_admin_token().await?;
        let keycloak_groups = self
            .admin
            .realm_users_with_user_id_groups_get(realm, user_id, None, None, None, None)
            .await
            .map_err(|e| repository_error("Groups", e))?;

        Ok(keycloak_groups
            .iter()
            .filter_map(convert_group_from_keycloak)
            .collect())
    }
}

fn repository_error(resource: &str, err: KeycloakError) -> RepositoryError {
    match err {
        KeycloakError::HttpFailure { status: 404, .. } => RepositoryError::NotFound {
            resource: resource.to_string(),
        },
        KeycloakError::HttpFailure { status, text, .. } => RepositoryError::HttpFailure {
            status,
            message: text,
        },
        KeycloakError::ReqwestFailure(e) if e.is_decode() => RepositoryError::SerializationFailed {
            message: e.to_string(),
        },
        other => RepositoryError::NetworkError {
            message: other.to_string(),
        },
    }
}

// Conversion methods between domain entities and Keycloak types

fn convert_user_from_keycloak(keycloak_user: UserRepresentation) -> User {
    User {
        id: keycloak_user.id.map(|id| EntityId::from_string(id.to_string())),
        username: keycloak_user
            .username
            .map(|u| u.to_string())
            .unwrap_or_default(),
        email: keycloak_user.email.map(|e| e.to_string()),
        email_verified: keycloak_user.email_verified.unwrap_or(false),
        first_name: keycloak_user.first_name.map(|f| f.to_string()),
        last_name: keycloak_user.last_name.map(|l| l.to_string()),
        enabled: keycloak_user.enabled.unwrap_or(true),
        credentials: Vec::new(),
    }
}

fn convert_user_to_keycloak(user: &User) -> UserRepresentation {
    let mut keycloak_user = UserRepresentation::default();

    keycloak_user.id = user.id.as_ref().map(|id| id.to_string().into());
    keycloak_user.username = Some(user.username.clone().into());
    keycloak_user.email = user.email.as_ref().map(|e| e.clone().into());
    keycloak_user.email_verified = Some(user.email_verified);
    keycloak_user.first_name = user.first_name.as_ref().map(|f| f.clone().into());
    keycloak_user.last_name = user.last_name.as_ref().map(|l| l.clone().into());
    keycloak_user.enabled = Some(user.enabled);

    if !user.credentials.is_empty() {
        let credentials: Vec<CredentialRepresentation> = user
            .credentials
            .iter()
            .map(convert_credential_to_keycloak)
            .collect();
        keycloak_user.credentials = Some(credentials.into());
    }

    keycloak_user
}

fn convert_credential_to_keycloak(credential: &Credential) -> CredentialRepresentation {
    let mut keycloak_credential = CredentialRepresentation::default();
    keycloak_credential.type_ = Some(credential.type_.clone().into());
    keycloak_credential.value = credential.value.as_ref().map(|v| v.clone().into());
    keycloak_credential.temporary = Some(credential.temporary);
    keycloak_credential
}

// A missing realm mapping list means the user holds no realm roles.
fn convert_role_mapping_from_keycloak(mappings: &MappingsRepresentation) -> RoleMapping {
    RoleMapping::with_realm_roles(
        mappings
            .realm_mappings
            .iter()
            .flatten()
            .filter_map(convert_role_from_keycloak)
            .collect(),
    )
}

fn convert_role_from_keycloak(keycloak_role: &RoleRepresentation) -> Option<Role> {
    let name = keycloak_role.name.as_ref()?.to_string();
    Some(Role {
        id: keycloak_role
            .id
            .as_ref()
            .map(|id| EntityId::from_string(id.to_string())),
        name,
        description: keycloak_role.description.as_ref().map(|d| d.to_string()),
        composite: keycloak_role.composite.unwrap_or(false),
    })
}

fn convert_group_from_keycloak(keycloak_group: &GroupRepresentation) -> Option<Group> {
    let name = keycloak_group.name.as_ref()?.to_string();
    let path = keycloak_group
        .path
        .as_ref()
        .map(|p| p.to_string())
        .unwrap_or_else(|| format!("/{name}"));
    Some(Group {
        id: keycloak_group
            .id
            .as_ref()
            .map(|id| EntityId::from_string(id.to_string())),
        name,
        path,
    })
}
