//! Application state for dependency injection.

use std::sync::Arc;

use user_service_lib::{IdentityProvider, UserService};

use crate::middleware::TokenVerifier;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub token_verifier: Arc<TokenVerifier>,
    /// Realm the identity provider is queried in
    pub realm: String,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        identity_provider: Arc<dyn IdentityProvider>,
        token_verifier: Arc<TokenVerifier>,
        realm: impl Into<String>,
    ) -> Self {
        Self {
            user_service,
            identity_provider,
            token_verifier,
            realm: realm.into(),
        }
    }
}
