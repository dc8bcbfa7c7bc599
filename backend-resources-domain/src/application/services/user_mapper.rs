use crate::domain::entities::*;

/// Converts between the wire-level user shapes and identity-provider entities
pub struct UserMapper;

impl UserMapper {
    /// Build the user to submit for a creation request.
    ///
    /// The user is enabled and carries the requested password as a
    /// non-temporary credential.
    pub fn user_request_to_user(request: &UserRequest) -> User {
        User {
            id: None,
            username: request.username.clone(),
            email: Some(request.email.clone()),
            email_verified: false,
            first_name: Some(request.first_name.clone()),
            last_name: Some(request.last_name.clone()),
            enabled: true,
            credentials: vec![Credential::password(request.password.clone(), false)],
        }
    }

    /// Assemble the read view from the three lookups, keeping provider order
    pub fn user_to_response(user: User, roles: &RoleMapping, groups: &[Group]) -> UserResponse {
        UserResponse {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            roles: roles.realm_role_names(),
            groups: groups.iter().map(|g| g.name.clone()).collect(),
        }
    }
}
