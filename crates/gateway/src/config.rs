//! Gateway configuration.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use tracing::warn;

use common::{JwtConfig, KeycloakConfig};
use domain::DEFAULT_REALM;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Identity provider admin API
    pub keycloak: KeycloakConfig,
    /// Caller token verification
    pub jwt: JwtConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = KeycloakConfig::default();

        Self {
            host: env::var("GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parsed_var("GATEWAY_PORT", 8080),
            keycloak: KeycloakConfig {
                server_url: env::var("KEYCLOAK_URL").unwrap_or(defaults.server_url),
                realm: env::var("KEYCLOAK_REALM").unwrap_or_else(|_| DEFAULT_REALM.to_string()),
                admin_realm: env::var("KEYCLOAK_ADMIN_REALM").unwrap_or(defaults.admin_realm),
                client_id: env::var("KEYCLOAK_CLIENT_ID").unwrap_or(defaults.client_id),
                client_secret: non_empty_var("KEYCLOAK_CLIENT_SECRET"),
                username: non_empty_var("KEYCLOAK_ADMIN"),
                password: non_empty_var("KEYCLOAK_ADMIN_PASSWORD"),
                request_timeout_ms: parsed_var("KEYCLOAK_TIMEOUT_MS", defaults.request_timeout_ms),
            },
            jwt: JwtConfig {
                public_key: non_empty_var("JWT_PUBLIC_KEY"),
                secret: non_empty_var("JWT_SECRET"),
                issuer: non_empty_var("JWT_ISSUER"),
            },
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            keycloak: KeycloakConfig::default(),
            jwt: JwtConfig::default(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse a variable, keeping the default when it is unset or malformed.
fn parsed_var<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match non_empty_var(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_var_reads_value() {
        env::set_var("GATEWAY_TEST_PORT_VALID", " 9090 ");
        assert_eq!(parsed_var("GATEWAY_TEST_PORT_VALID", 8080u16), 9090);
    }

    #[test]
    fn test_parsed_var_falls_back_on_invalid_value() {
        env::set_var("GATEWAY_TEST_PORT_INVALID", "eighty");
        assert_eq!(parsed_var("GATEWAY_TEST_PORT_INVALID", 8080u16), 8080);
    }

    #[test]
    fn test_parsed_var_falls_back_when_unset() {
        env::remove_var("GATEWAY_TEST_PORT_UNSET");
        assert_eq!(parsed_var("GATEWAY_TEST_PORT_UNSET", 8080u16), 8080);
    }
}
