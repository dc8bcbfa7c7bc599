/*!
# Backend Resources Domain

Domain layer for a small user façade over the Keycloak admin API, organised
along hexagonal architecture lines.

This crate provides:
- Domain models for users, roles and groups, plus the wire-level
  `UserRequest` / `UserResponse` shapes
- Port definitions for the identity provider, authentication and configuration
- The `UserService` use cases (create a user, load a user with roles and groups)
- Infrastructure adapters backed by the `keycloak` crate and Keycloak's
  OpenID Connect endpoints

## Architecture

```text
┌─────────────────────────────────────────────────────────────┐
│                    Primary Adapter                          │
│               HTTP Server (Axum Handlers)                   │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│                Application Layer                            │
│          • UserService            • UserMapper              │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│                 Domain Layer (Ports)                        │
│  • KeycloakRepository     • AuthenticationProvider          │
│  • TokenManager           • ConfigurationPort               │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│              Infrastructure Layer (Adapters)                │
│  • KeycloakRestAdapter    • CachedAdminTokenSupplier        │
│  • KeycloakTokenManager   • KeycloakTokenIntrospector       │
│  • EnvConfigurationAdapter                                  │
└─────────────────────────────────────────────────────────────┘
```

## Usage

```rust,ignore
use backend_resources_domain::{
    application::services::UserService,
    infrastructure::adapters::KeycloakRestAdapter,
};

let user_service = UserService::new(
    Arc::new(KeycloakRestAdapter::new(admin)),
    "my-realm",
);

let user = user_service.get_user_by_id("5f0c...").await?;
```
*/

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::ports::*;
pub use application::services::*;
pub use domain::entities::*;
pub use domain::errors::*;
