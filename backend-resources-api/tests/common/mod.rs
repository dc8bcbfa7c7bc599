use async_trait::async_trait;
use axum::Router;
use backend_resources_api::{build_router, AppState};
use backend_resources_domain::{
    application::{
        ports::{
            auth::{AuthenticationProvider, AuthorizationContext},
            repository::{CreationOutcome, KeycloakRepository, RepositoryResult},
        },
        services::UserService,
    },
    domain::{entities::*, errors::{AuthError, RepositoryError}},
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const REALM: &str = "itm";
pub const MODERATOR_TOKEN: &str = "moderator-token";
pub const VIEWER_TOKEN: &str = "viewer-token";

/// Identity provider double with a single configurable profile
#[derive(Default)]
pub struct MockKeycloakRepository {
    pub users: Mutex<HashMap<String, (User, RoleMapping, Vec<Group>)>>,
    pub create_outcome: Mutex<Option<CreationOutcome>>,
    pub create_calls: Mutex<usize>,
    pub fail_lookups: Mutex<bool>,
    pub lookups: Mutex<Vec<String>>, // user id, one entry per call
}

impl MockKeycloakRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: User, roles: &[&str], groups: &[&str]) -> Self {
        let id = user.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        let mapping = RoleMapping::with_realm_roles(roles.iter().map(|r| Role::new(*r)).collect());
        let groups = groups.iter().map(|g| Group::new(*g)).collect();
        self.users.lock().unwrap().insert(id, (user, mapping, groups));
        self
    }

    pub fn respond_to_create_with(&self, outcome: CreationOutcome) {
        *self.create_outcome.lock().unwrap() = Some(outcome);
    }

    pub fn fail_lookups(&self) {
        *self.fail_lookups.lock().unwrap() = true;
    }

    pub fn create_calls(&self) -> usize {
        *self.create_calls.lock().unwrap()
    }

    pub fn lookup_calls_for(&self, user_id: &str) -> usize {
        self.lookups
            .lock()
            .unwrap()
            .iter()
            .filter(|id| id.as_str() == user_id)
            .count()
    }

    fn entry(&self, user_id: &str) -> RepositoryResult<(User, RoleMapping, Vec<Group>)> {
        self.lookups.lock().unwrap().push(user_id.to_string());
        if *self.fail_lookups.lock().unwrap() {
            return Err(RepositoryError::HttpFailure {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        self.users
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound {
                resource: "User".to_string(),
            })
    }
}

#[async_trait]
impl KeycloakRepository for MockKeycloakRepository {
    async fn create_user(&self, _realm: &str, _user: &User) -> RepositoryResult<CreationOutcome> {
        *self.create_calls.lock().unwrap() += 1;
        let configured = self.create_outcome.lock().unwrap().clone();
        Ok(configured.unwrap_or_else(|| CreationOutcome::created(Some("user_id".to_string()))))
    }

    async fn find_user_by_id(&self, _realm: &str, user_id: &str) -> RepositoryResult<User> {
        self.entry(user_id).map(|(user, _, _)| user)
    }

    async fn get_user_role_mappings(&self, _realm: &str, user_id: &str) -> RepositoryResult<RoleMapping> {
        self.entry(user_id).map(|(_, roles, _)| roles)
    }

    async fn get_user_groups(&self, _realm: &str, user_id: &str) -> RepositoryResult<Vec<Group>> {
        self.entry(user_id).map(|(_, _, groups)| groups)
    }
}

/// Accepts two fixed tokens: one for a moderator, one for a caller without roles
pub struct StaticAuthProvider;

#[async_trait]
impl AuthenticationProvider for StaticAuthProvider {
    async fn create_context_from_token(&self, token: &str) -> Result<AuthorizationContext, AuthError> {
        match token {
            MODERATOR_TOKEN => Ok(AuthorizationContext::new("Selmeg".to_string(), REALM.to_string())
                .with_roles(vec!["MODERATOR".to_string()])),
            VIEWER_TOKEN => Ok(AuthorizationContext::new("viewer".to_string(), REALM.to_string())),
            _ => Err(AuthError::TokenValidationFailed {
                reason: "Token is not active".to_string(),
            }),
        }
    }
}

pub fn app(repository: Arc<MockKeycloakRepository>) -> Router {
    let state = AppState::with_services(
        UserService::new(repository, REALM),
        Arc::new(StaticAuthProvider),
        "MODERATOR",
    );
    build_router(state)
}

pub fn selmeg(id: &str) -> User {
    let mut user = User::new("selmeg");
    user.id = Some(EntityId::from(id));
    user.first_name = Some("Selmeg".to_string());
    user.last_name = Some("Ts".to_string());
    user.email = Some("selmeg@mail.ru".to_string());
    user
}
