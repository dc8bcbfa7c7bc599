use super::common::*;
use serde::{Deserialize, Serialize};

/// Domain entity representing a Keycloak group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: Option<EntityId>,
    pub name: String,
    pub path: String,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let path = format!("/{name}");
        Self {
            id: None,
            name,
            path,
        }
    }
}
