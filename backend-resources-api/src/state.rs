use backend_resources_domain::{
    application::{
        ports::{
            auth::{AdminCredentials, AuthenticationProvider, TokenManager},
            config::ConfigurationPort,
        },
        services::UserService,
    },
    infrastructure::adapters::{
        CachedAdminTokenSupplier, KeycloakRestAdapter, KeycloakTokenIntrospector,
        KeycloakTokenManager,
    },
};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub auth_provider: Arc<dyn AuthenticationProvider>,
    /// Role every authenticated caller must hold
    pub required_role: String,
}

impl AppState {
    pub fn new(config: &dyn ConfigurationPort) -> Result<Self, Box<dyn std::error::Error>> {
        config.validate()?;

        let keycloak_config = config.get_keycloak_config();
        let auth_config = config.get_auth_config();
        let http_config = config.get_http_config();

        let reqwest_client = reqwest::Client::builder()
            .timeout(http_config.get_timeout())
            .connect_timeout(http_config.get_connect_timeout())
            .build()?;

        let token_manager: Arc<dyn TokenManager> = Arc::new(
            KeycloakTokenManager::new_with_client(keycloak_config.url.clone(), reqwest_client.clone())
                .with_introspection_client(
                    keycloak_config.realm.clone(),
                    auth_config.client_id.clone(),
                    auth_config.client_secret.clone(),
                ),
        );

        // Admin tokens are fetched lazily on the first provider call
        let token_supplier = CachedAdminTokenSupplier::new(
            token_manager.clone(),
            AdminCredentials::new(
                keycloak_config.admin_username.clone(),
                keycloak_config.admin_password.clone(),
                keycloak_config.admin_realm.clone(),
                keycloak_config.admin_client_id.clone(),
            ),
            auth_config.token_refresh_threshold_seconds,
        );

        let repository = Arc::new(KeycloakRestAdapter::new(
            keycloak_config.base_url(),
            token_supplier,
            reqwest_client,
        ));
        let user_service = UserService::new(repository, keycloak_config.realm.clone());
        let auth_provider = Arc::new(KeycloakTokenIntrospector::new(
            token_manager,
            keycloak_config.realm.clone(),
        ));

        info!(
            "Managing users of realm '{}' at {}",
            keycloak_config.realm,
            keycloak_config.base_url()
        );

        Ok(Self::with_services(
            user_service,
            auth_provider,
            auth_config.required_role.clone(),
        ))
    }

    pub fn with_services(
        user_service: UserService,
        auth_provider: Arc<dyn AuthenticationProvider>,
        required_role: impl Into<String>,
    ) -> Self {
        Self {
            user_service,
            auth_provider,
            required_role: required_role.into(),
        }
    }
}
