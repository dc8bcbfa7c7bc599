use super::common::*;
use serde::{Deserialize, Serialize};

/// Domain entity representing a Keycloak role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Option<EntityId>,
    pub name: String,
    pub description: Option<String>,
    pub composite: bool,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            composite: false,
        }
    }
}

/// Realm role mappings of a user, in the provider's order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMapping {
    pub realm_roles: Vec<Role>,
}

impl RoleMapping {
    pub fn with_realm_roles(realm_roles: Vec<Role>) -> Self {
        Self { realm_roles }
    }

    /// Names of the realm-level roles
    pub fn realm_role_names(&self) -> Vec<String> {
        self.realm_roles.iter().map(|r| r.name.clone()).collect()
    }
}
