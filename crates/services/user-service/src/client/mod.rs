//! Identity provider client.
//!
//! [`IdentityProvider`] is the seam the user service talks to;
//! [`KeycloakAdminClient`] implements it over the Keycloak Admin REST API.

mod error;
mod keycloak;
mod representation;

use async_trait::async_trait;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub use error::{ProviderError, ProviderResult};
pub use keycloak::KeycloakAdminClient;
pub use representation::{
    CredentialRepresentation, GroupRepresentation, MappingsRepresentation, RealmInfo,
    RoleRepresentation, UserRepresentation,
};

/// Realm-scoped admin operations of the identity provider.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a user; returns the provider-assigned id when it is reported
    async fn create_user(&self, realm: &str, user: &UserRepresentation)
        -> ProviderResult<Option<String>>;

    /// Fetch a user by id
    async fn get_user(&self, realm: &str, id: &str) -> ProviderResult<UserRepresentation>;

    /// Realm-level roles mapped to the user, in provider order
    async fn realm_role_mappings(&self, realm: &str, id: &str)
        -> ProviderResult<Vec<RoleRepresentation>>;

    /// Groups the user is a member of, in provider order
    async fn user_groups(&self, realm: &str, id: &str) -> ProviderResult<Vec<GroupRepresentation>>;

    /// Public realm document (also used as a liveness probe)
    async fn realm_info(&self, realm: &str) -> ProviderResult<RealmInfo>;
}
