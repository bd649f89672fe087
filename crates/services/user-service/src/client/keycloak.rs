//! Keycloak Admin REST API client.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::{header::LOCATION, Client, Response};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use common::KeycloakConfig;

use super::{
    GroupRepresentation, IdentityProvider, MappingsRepresentation, ProviderError, ProviderResult,
    RealmInfo, RoleRepresentation, UserRepresentation,
};

/// Tokens this close to expiry are refreshed before use
const TOKEN_REFRESH_MARGIN_SECS: i64 = 30;

/// HTTP client wrapper for the Keycloak admin API.
pub struct KeycloakAdminClient {
    config: KeycloakConfig,
    http_client: Client,
    token: RwLock<Option<AdminToken>>,
}

#[derive(Debug, Clone)]
struct AdminToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

impl KeycloakAdminClient {
    /// Create a client for the configured Keycloak server.
    pub fn new(config: KeycloakConfig) -> ProviderResult<Self> {
        let http_client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ProviderError::unknown(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Keycloak admin client targeting {}", config.base_url());

        Ok(Self {
            config,
            http_client,
            token: RwLock::new(None),
        })
    }

    fn admin_url(&self, realm: &str, path: &str) -> String {
        format!("{}/admin/realms/{}{}", self.config.base_url(), realm, path)
    }

    /// Get admin access token (with caching).
    async fn admin_token(&self) -> ProviderResult<String> {
        {
            let token = self.token.read().await;
            if let Some(ref t) = *token {
                if t.expires_at > Utc::now() + Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) {
                    return Ok(t.access_token.clone());
                }
            }
        }

        let token_url = format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.config.base_url(),
            self.config.admin_realm
        );

        let mut params: Vec<(&str, &str)> = vec![("client_id", self.config.client_id.as_str())];
        if self.config.uses_password_grant() {
            params.push(("grant_type", "password"));
            params.push(("username", self.config.username.as_deref().unwrap_or_default()));
            params.push(("password", self.config.password.as_deref().unwrap_or_default()));
        } else {
            params.push(("grant_type", "client_credentials"));
        }
        if let Some(ref secret) = self.config.client_secret {
            params.push(("client_secret", secret.as_str()));
        }

        debug!("Requesting admin token from {}", token_url);
        let response = self.http_client.post(&token_url).form(&params).send().await?;

        // A rejected admin login is a deployment problem, never the caller's
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Admin token request rejected: {} - {}", status, body);
            return Err(ProviderError::unknown(format!(
                "Admin token request rejected: {} - {}",
                status,
                error_message(&body)
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::unknown(format!("Failed to parse token response: {}", e)))?;

        let expires_at = Duration::try_seconds(token_response.expires_in)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                ProviderError::unknown(format!(
                    "Admin token lifetime out of range: {}",
                    token_response.expires_in
                ))
            })?;
        let admin_token = AdminToken {
            access_token: token_response.access_token.clone(),
            expires_at,
        };

        {
            let mut token = self.token.write().await;
            *token = Some(admin_token);
        }

        Ok(token_response.access_token)
    }

    async fn get_json<T>(&self, url: &str) -> ProviderResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let token = self.admin_token().await?;
        debug!("GET {}", url);

        let response = self.http_client.get(url).bearer_auth(&token).send().await?;
        let response = ensure_success(response).await?;

        response
            .json()
            .await
            .map_err(|e| ProviderError::unknown(format!("Failed to parse response from {}: {}", url, e)))
    }
}

#[async_trait]
impl IdentityProvider for KeycloakAdminClient {
    async fn create_user(
        &self,
        realm: &str,
        user: &UserRepresentation,
    ) -> ProviderResult<Option<String>> {
        let token = self.admin_token().await?;
        let url = self.admin_url(realm, "/users");
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&token)
            .json(user)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        // Get user ID from Location header
        let id = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|location| location.trim_end_matches('/').rsplit('/').next())
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        Ok(id)
    }

    async fn get_user(&self, realm: &str, id: &str) -> ProviderResult<UserRepresentation> {
        let url = self.admin_url(realm, &format!("/users/{}", id));
        self.get_json(&url).await
    }

    async fn realm_role_mappings(
        &self,
        realm: &str,
        id: &str,
    ) -> ProviderResult<Vec<RoleRepresentation>> {
        let url = self.admin_url(realm, &format!("/users/{}/role-mappings", id));
        let mappings: MappingsRepresentation = self.get_json(&url).await?;
        Ok(mappings.realm_mappings.unwrap_or_default())
    }

    async fn user_groups(&self, realm: &str, id: &str) -> ProviderResult<Vec<GroupRepresentation>> {
        let url = self.admin_url(realm, &format!("/users/{}/groups", id));
        self.get_json(&url).await
    }

    async fn realm_info(&self, realm: &str) -> ProviderResult<RealmInfo> {
        // Public endpoint, no admin token needed
        let url = format!("{}/realms/{}", self.config.base_url(), realm);
        debug!("GET {}", url);

        let response = self.http_client.get(&url).send().await?;
        let response = ensure_success(response).await?;

        response
            .json()
            .await
            .map_err(|e| ProviderError::unknown(format!("Failed to parse realm info: {}", e)))
    }
}

/// Turn a non-2xx response into [`ProviderError::Status`].
async fn ensure_success(response: Response) -> ProviderResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match error_message(&body) {
        msg if msg.is_empty() => status.canonical_reason().unwrap_or_default().to_string(),
        msg => msg,
    };

    Err(ProviderError::status(status.as_u16(), message))
}

/// Extract Keycloak's error text from a response body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["errorMessage", "error_description", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|m| m.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}
