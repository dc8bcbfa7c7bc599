use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::application::ports::auth::*;
use crate::domain::errors::*;

/// Resolves bearer tokens into principals through Keycloak token introspection
pub struct KeycloakTokenIntrospector {
    token_manager: Arc<dyn TokenManager>,
    realm: String,
}

impl KeycloakTokenIntrospector {
    pub fn new(token_manager: Arc<dyn TokenManager>, realm: String) -> Self {
        Self {
            token_manager,
            realm,
        }
    }
}

#[async_trait]
impl AuthenticationProvider for KeycloakTokenIntrospector {
    async fn create_context_from_token(
        &self,
        token: &str,
    ) -> Result<AuthorizationContext, AuthError> {
        let token_info = self.token_manager.introspect_token(token).await?;

        if !token_info.active {
            return Err(AuthError::TokenValidationFailed {
                reason: "Token is not active".to_string(),
            });
        }

        let username = token_info
            .username
            .ok_or_else(|| AuthError::TokenValidationFailed {
                reason: "Token carries no username".to_string(),
            })?;

        debug!("Authenticated '{}' in realm '{}'", username, self.realm);

        Ok(AuthorizationContext::new(username, self.realm.clone()).with_roles(token_info.realm_roles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticTokenManager(TokenInfo);

    #[async_trait]
    impl TokenManager for StaticTokenManager {
        async fn acquire_token(&self, _: &AdminCredentials) -> Result<AuthToken, AuthError> {
            Err(AuthError::TokenAcquisitionFailed {
                reason: "not used".to_string(),
            })
        }

        async fn introspect_token(&self, _: &str) -> Result<TokenInfo, AuthError> {
            Ok(self.0.clone())
        }
    }

    fn introspector(info: TokenInfo) -> KeycloakTokenIntrospector {
        KeycloakTokenIntrospector::new(Arc::new(StaticTokenManager(info)), "itm".to_string())
    }

    #[tokio::test]
    async fn active_token_yields_principal_with_roles() {
        let info = TokenInfo {
            active: true,
            username: Some("Selmeg".to_string()),
            realm_roles: vec!["MODERATOR".to_string()],
            ..Default::default()
        };

        let context = introspector(info).create_context_from_token("t").await.unwrap();

        assert_eq!(context.username, "Selmeg");
        assert_eq!(context.realm, "itm");
        assert!(context.has_role(roles::MODERATOR));
    }

    #[tokio::test]
    async fn inactive_token_is_rejected() {
        let info = TokenInfo {
            active: false,
            username: Some("Selmeg".to_string()),
            ..Default::default()
        };

        let err = introspector(info).create_context_from_token("t").await.unwrap_err();
        assert!(matches!(err, AuthError::TokenValidationFailed { .. }));
    }

    #[tokio::test]
    async fn token_without_username_is_rejected() {
        let info = TokenInfo {
            active: true,
            ..Default::default()
        };

        assert!(introspector(info).create_context_from_token("t").await.is_err());
    }
}
