use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::auth::*;
use crate::domain::errors::*;

/// Raw token response from Keycloak
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTokenResponse {
    access_token: String,
    expires_in: i64,
    token_type: Option<String>,
}

/// Raw introspection response from Keycloak
#[derive(Debug, Clone, Default, Deserialize)]
struct RawIntrospection {
    #[serde(default)]
    active: bool,
    username: Option<String>,
    preferred_username: Option<String>,
    #[serde(default)]
    realm_access: RealmAccess,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RealmAccess {
    #[serde(default)]
    roles: Vec<String>,
}

/// Keycloak token manager implementation
pub struct KeycloakTokenManager {
    keycloak_url: String,
    client: reqwest::Client,
    introspection: Option<IntrospectionClient>,
}

/// Confidential client allowed to call the introspection endpoint
struct IntrospectionClient {
    realm: String,
    client_id: String,
    client_secret: Option<String>,
}

impl KeycloakTokenManager {
    pub fn new_with_client(keycloak_url: String, client: reqwest::Client) -> Self {
        Self {
            keycloak_url: keycloak_url.trim_end_matches('/').to_string(),
            client,
            introspection: None,
        }
    }

    pub fn with_introspection_client(
        mut self,
        realm: String,
        client_id: String,
        client_secret: Option<String>,
    ) -> Self {
        self.introspection = Some(IntrospectionClient {
            realm,
            client_id,
            client_secret,
        });
        self
    }

    fn token_url(&self, realm: &str) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.keycloak_url, realm
        )
    }

    /// Convert raw token response to our domain AuthToken
    fn convert_raw_token(&self, raw_token: RawTokenResponse) -> AuthToken {
        AuthToken::new(raw_token.access_token, raw_token.expires_in, raw_token.token_type)
    }

    fn convert_introspection(raw: RawIntrospection) -> TokenInfo {
        TokenInfo {
            active: raw.active,
            username: raw.preferred_username.or(raw.username),
            realm_roles: raw.realm_access.roles,
        }
    }
}

#[async_trait]
impl TokenManager for KeycloakTokenManager {
    async fn acquire_token(&self, credentials: &AdminCredentials) -> Result<AuthToken, AuthError> {
        let form_data = [
            ("client_id", credentials.client_id.as_str()),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("grant_type", "password"),
        ];

        let response = self
            .client
            .post(self.token_url(&credentials.realm))
            .form(&form_data)
            .send()
            .await
            .map_err(|e| AuthError::TokenAcquisitionFailed {
                reason: format!("HTTP request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AuthError::TokenAcquisitionFailed {
                reason: format!("HTTP error {}: {}", status, error_text),
            });
        }

        let raw_token: RawTokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::TokenAcquisitionFailed {
                reason: format!("Failed to parse token response: {}", e),
            })?;

        Ok(self.convert_raw_token(raw_token))
    }

    async fn introspect_token(&self, token: &str) -> Result<TokenInfo, AuthError> {
        let introspection =
            self.introspection
                .as_ref()
                .ok_or_else(|| AuthError::TokenValidationFailed {
                    reason: "No introspection client configured".to_string(),
                })?;

        let response = self
            .client
            .post(format!("{}/introspect", self.token_url(&introspection.realm)))
            .basic_auth(&introspection.client_id, introspection.client_secret.as_deref())
            .form(&[("token", token), ("token_type_hint", "access_token")])
            .send()
            .await
            .map_err(|e| AuthError::TokenValidationFailed {
                reason: format!("HTTP request failed: {}", e),
            })?;

        if !response.status().is_success() {
            return Err(AuthError::TokenValidationFailed {
                reason: format!("HTTP error: {}", response.status()),
            });
        }

        let raw: RawIntrospection =
            response
                .json()
                .await
                .map_err(|e| AuthError::TokenValidationFailed {
                    reason: format!("Failed to parse response: {}", e),
                })?;

        Ok(Self::convert_introspection(raw))
    }
}
