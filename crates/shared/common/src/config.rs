//! Shared configuration structures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Keycloak admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeycloakConfig {
    /// Base URL of the Keycloak server (e.g., "http://localhost:8180")
    pub server_url: String,
    /// Realm whose users are managed
    pub realm: String,
    /// Realm the admin client authenticates against
    pub admin_realm: String,
    /// Client used to obtain admin tokens
    pub client_id: String,
    /// Secret for confidential admin clients
    #[serde(skip_serializing)]
    pub client_secret: Option<String>,
    /// Admin username (password grant); client credentials are used when unset
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl KeycloakConfig {
    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Whether admin tokens are requested with the password grant.
    pub fn uses_password_grant(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }

    /// Server URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }
}

impl Default for KeycloakConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8180".to_string(),
            realm: "ITM".to_string(),
            admin_realm: "master".to_string(),
            client_id: "admin-cli".to_string(),
            client_secret: None,
            username: None,
            password: None,
            request_timeout_ms: 10_000,
        }
    }
}

/// Bearer token verification configuration.
///
/// `public_key` takes precedence over `secret`. With neither set the realm's
/// published signing key is used.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JwtConfig {
    /// RSA public key (PEM) for RS256 tokens
    pub public_key: Option<String>,
    /// Shared secret for HS256 tokens
    #[serde(skip_serializing)]
    pub secret: Option<String>,
    /// Expected `iss` claim
    pub issuer: Option<String>,
}
