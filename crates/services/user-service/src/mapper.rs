//! Provider representation to API response mapping.

use domain::UserResponse;

use crate::client::{GroupRepresentation, RoleRepresentation, UserRepresentation};

/// Build the caller-facing view of a user.
///
/// Names and email are passed through untouched. Role and group names keep
/// the provider's order; nothing is filtered or deduplicated.
pub fn representation_to_response(
    user: UserRepresentation,
    roles: Vec<RoleRepresentation>,
    groups: Vec<GroupRepresentation>,
) -> UserResponse {
    UserResponse {
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        roles: roles.into_iter().map(|role| role.name).collect(),
        groups: groups.into_iter().map(|group| group.name).collect(),
    }
}
