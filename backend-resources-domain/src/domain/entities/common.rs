use serde::{Deserialize, Serialize};

/// Unique identifier for entities
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User credential
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub type_: String,
    pub value: Option<String>,
    pub temporary: bool,
}

impl Credential {
    pub fn password(value: String, temporary: bool) -> Self {
        Self {
            type_: "password".to_string(),
            value: Some(value),
            temporary,
        }
    }
}

// Credential values never reach logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("type_", &self.type_)
            .field("value", &self.value.as_ref().map(|_| "***"))
            .field("temporary", &self.temporary)
            .finish()
    }
}
