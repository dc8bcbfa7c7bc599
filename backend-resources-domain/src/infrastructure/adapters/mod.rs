pub mod cached_token_supplier;
pub mod env_config;
pub mod keycloak_auth_provider;
pub mod keycloak_rest;
pub mod keycloak_token_manager;

pub use cached_token_supplier::*;
pub use env_config::*;
pub use keycloak_auth_provider::*;
pub use keycloak_rest::*;
pub use keycloak_token_manager::*;
