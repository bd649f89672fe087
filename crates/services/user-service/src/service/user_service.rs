//! User service - Handles user-related use cases.
//!
//! SOLID (SRP): one identity provider exchange per operation, plus mapping.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{info, warn};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{UserRequest, UserResponse};

use crate::client::{IdentityProvider, ProviderError, UserRepresentation};
use crate::mapper::representation_to_response;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create an enabled user with a permanent password
    async fn create_user(&self, request: UserRequest) -> AppResult<()>;

    /// Get a user together with its realm roles and groups
    async fn get_user_by_id(&self, id: Uuid) -> AppResult<UserResponse>;
}

/// Concrete implementation of UserService on top of an identity provider.
pub struct UserManager {
    provider: Arc<dyn IdentityProvider>,
    realm: String,
}

impl UserManager {
    /// Create new user service bound to one realm
    pub fn new(provider: Arc<dyn IdentityProvider>, realm: impl Into<String>) -> Self {
        Self {
            provider,
            realm: realm.into(),
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, request: UserRequest) -> AppResult<()> {
        let user = UserRepresentation::from(&request);

        match self.provider.create_user(&self.realm, &user).await {
            Ok(id) => {
                info!(
                    realm = %self.realm,
                    username = %request.username,
                    id = id.as_deref().unwrap_or("unknown"),
                    "Created user"
                );
                Ok(())
            }
            Err(err) => {
                warn!(realm = %self.realm, username = %request.username, "User creation failed: {}", err);
                Err(creation_failure(err))
            }
        }
    }

    async fn get_user_by_id(&self, id: Uuid) -> AppResult<UserResponse> {
        let id = id.to_string();

        let user = self
            .provider
            .get_user(&self.realm, &id)
            .await
            .map_err(|err| lookup_failure(&id, err))?;

        let (roles, groups) = futures::try_join!(
            self.provider.realm_role_mappings(&self.realm, &id),
            self.provider.user_groups(&self.realm, &id),
        )
        .map_err(|err| lookup_failure(&id, err))?;

        Ok(representation_to_response(user, roles, groups))
    }
}

/// Translate a failed creation into the caller-facing error.
///
/// Provider statuses are kept when they are error codes; anything else the
/// provider reports with a status is a bad request.
fn creation_failure(err: ProviderError) -> AppError {
    match err {
        ProviderError::Status { status, message } => {
            let status = StatusCode::from_u16(status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_REQUEST);
            AppError::identity_provider(status, message)
        }
        other => AppError::identity_provider(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

/// Translate a failed lookup into the caller-facing error.
///
/// Only "not found" is preserved; every other failure is a server error.
fn lookup_failure(id: &str, err: ProviderError) -> AppError {
    warn!(user_id = %id, "User lookup failed: {}", err);
    match err {
        ProviderError::Status { status: 404, .. } => AppError::NotFound,
        other => AppError::identity_provider(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}
