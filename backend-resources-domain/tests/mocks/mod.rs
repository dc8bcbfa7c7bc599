use async_trait::async_trait;
use backend_resources_domain::{
    application::ports::repository::{CreationOutcome, KeycloakRepository, RepositoryResult},
    domain::{entities::*, errors::RepositoryError},
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Repository call that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailingCall {
    Create,
    Profile,
    Roles,
    Groups,
}

/// Mock repository implementation for testing
#[derive(Default)]
pub struct MockKeycloakRepository {
    pub users: Arc<Mutex<HashMap<String, User>>>, // user id -> user
    pub role_mappings: Arc<Mutex<HashMap<String, RoleMapping>>>,
    pub groups: Arc<Mutex<HashMap<String, Vec<Group>>>>,
    pub created: Arc<Mutex<Vec<(String, User)>>>, // realm -> submitted user
    pub create_outcome: Arc<Mutex<Option<CreationOutcome>>>,
    pub failing: Arc<Mutex<Option<FailingCall>>>,
    pub lookups: Arc<Mutex<Vec<(String, String)>>>, // realm -> user id, one entry per call
}

impl MockKeycloakRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user together with its realm roles and groups
    pub fn with_user(self, user: User, realm_roles: &[&str], groups: &[&str]) -> Self {
        let id = user
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default();

        let roles = RoleMapping::with_realm_roles(realm_roles.iter().map(|r| Role::new(*r)).collect());
        let groups: Vec<Group> = groups.iter().map(|g| Group::new(*g)).collect();

        self.role_mappings.lock().unwrap().insert(id.clone(), roles);
        self.groups.lock().unwrap().insert(id.clone(), groups);
        self.users.lock().unwrap().insert(id, user);
        self
    }

    pub fn respond_to_create_with(&self, outcome: CreationOutcome) {
        *self.create_outcome.lock().unwrap() = Some(outcome);
    }

    pub fn fail_on(&self, call: FailingCall) {
        *self.failing.lock().unwrap() = Some(call);
    }

    pub fn create_calls(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn lookup_calls_for(&self, user_id: &str) -> usize {
        self.lookups
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, id)| id == user_id)
            .count()
    }

    fn check_failing(&self, call: FailingCall) -> RepositoryResult<()> {
        if *self.failing.lock().unwrap() == Some(call) {
            Err(RepositoryError::NetworkError {
                message: "Mock failure enabled".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn record_lookup(&self, realm: &str, user_id: &str) {
        self.lookups
            .lock()
            .unwrap()
            .push((realm.to_string(), user_id.to_string()));
    }

    fn not_found(resource: &str) -> RepositoryError {
        RepositoryError::NotFound {
            resource: resource.to_string(),
        }
    }
}

#[async_trait]
impl KeycloakRepository for MockKeycloakRepository {
    async fn create_user(&self, realm: &str, user: &User) -> RepositoryResult<CreationOutcome> {
        self.created
            .lock()
            .unwrap()
            .push((realm.to_string(), user.clone()));
        self.check_failing(FailingCall::Create)?;

        let configured = self.create_outcome.lock().unwrap().clone();
        Ok(configured.unwrap_or_else(|| CreationOutcome::created(Some("created-id".to_string()))))
    }

    async fn find_user_by_id(&self, realm: &str, user_id: &str) -> RepositoryResult<User> {
        self.record_lookup(realm, user_id);
        self.check_failing(FailingCall::Profile)?;

        self.users
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .ok_or_else(|| Self::not_found("User"))
    }

    async fn get_user_role_mappings(
        &self,
        realm: &str,
        user_id: &str,
    ) -> RepositoryResult<RoleMapping> {
        self.record_lookup(realm, user_id);
        self.check_failing(FailingCall::Roles)?;

        self.role_mappings
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .ok_or_else(|| Self::not_found("Role mappings"))
    }

    async fn get_user_groups(&self, realm: &str, user_id: &str) -> RepositoryResult<Vec<Group>> {
        self.record_lookup(realm, user_id);
        self.check_failing(FailingCall::Groups)?;

        self.groups
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .ok_or_else(|| Self::not_found("Groups"))
    }
}

/// Profile used across the user service tests
pub fn selmeg(id: &str) -> User {
    let mut user = User::new("selmeg");
    user.id = Some(EntityId::from(id));
    user.first_name = Some("Selmeg".to_string());
    user.last_name = Some("Ts".to_string());
    user.email = Some("selmeg@mail.ru".to_string());
    user
}
