//! API Gateway Library
//!
//! This crate provides the HTTP REST API that fronts the identity provider's
//! admin API.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use common::{AppError, AppResult};
use user_service_lib::{IdentityProvider, KeycloakAdminClient, UserManager};

use crate::config::GatewayConfig;
use crate::middleware::TokenVerifier;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let realm = config.keycloak.realm.clone();

    // Identity provider client
    let provider = Arc::new(KeycloakAdminClient::new(config.keycloak.clone())?);

    // Caller token verification
    let token_verifier = Arc::new(token_verifier(&config, provider.as_ref()).await?);

    // Create app state
    let user_service = Arc::new(UserManager::new(provider.clone(), realm.clone()));
    let state = AppState::new(user_service, provider, token_verifier, realm);

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Build address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Use the configured key, or fall back to the key the realm publishes.
async fn token_verifier(
    config: &GatewayConfig,
    provider: &dyn IdentityProvider,
) -> AppResult<TokenVerifier> {
    if let Some(verifier) = TokenVerifier::from_config(&config.jwt)? {
        return Ok(verifier);
    }

    let realm = &config.keycloak.realm;
    info!("No token key configured, fetching signing key of realm {}", realm);

    let info = provider.realm_info(realm).await.map_err(|e| {
        AppError::service_unavailable(format!("identity provider ({})", e))
    })?;
    let pem = info
        .public_key_pem()
        .ok_or_else(|| AppError::internal(format!("Realm {} publishes no public key", realm)))?;

    TokenVerifier::from_rsa_pem(&pem, config.jwt.issuer.as_deref())
}
