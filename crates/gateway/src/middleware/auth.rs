//! Authentication and role-based access middleware.

use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use common::{AppError, AppResult, JwtConfig};
use domain::{BEARER_TOKEN_PREFIX, ROLE_MODERATOR, ROLE_PREFIX};

use crate::state::AppState;

/// Claims read from an access token issued by the identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub realm_access: Option<RealmAccess>,
    pub exp: i64,
}

/// Realm roles granted to the token subject.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Verifies bearer tokens locally with a fixed key.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// RS256 verifier for a PEM-encoded public key.
    pub fn from_rsa_pem(pem: &str, issuer: Option<&str>) -> AppResult<Self> {
        let key = DecodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| AppError::internal(format!("Invalid token public key: {}", e)))?;
        Ok(Self::new(key, Algorithm::RS256, issuer))
    }

    /// HS256 verifier for a shared secret.
    pub fn from_secret(secret: &str, issuer: Option<&str>) -> Self {
        Self::new(DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256, issuer)
    }

    /// Build a verifier from locally configured keys, if there are any.
    pub fn from_config(config: &JwtConfig) -> AppResult<Option<Self>> {
        let issuer = config.issuer.as_deref();
        if let Some(ref pem) = config.public_key {
            return Self::from_rsa_pem(pem, issuer).map(Some);
        }
        Ok(config
            .secret
            .as_deref()
            .map(|secret| Self::from_secret(secret, issuer)))
    }

    fn new(key: DecodingKey, algorithm: Algorithm, issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_aud = false;
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        Self { key, validation }
    }

    /// Verify signature and expiry and return the claims.
    pub fn verify(&self, token: &str) -> AppResult<AccessClaims> {
        let token_data = decode::<AccessClaims>(token, &self.key, &self.validation)?;
        Ok(token_data.claims)
    }
}

/// Current authenticated caller.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub username: Option<String>,
    pub roles: Vec<String>,
}

impl CurrentUser {
    /// Check if the caller holds a realm role (`ROLE_`-prefixed names count).
    pub fn has_role(&self, role: &str) -> bool {
        self.roles
            .iter()
            .any(|r| r.strip_prefix(ROLE_PREFIX).unwrap_or(r) == role)
    }
}

impl From<AccessClaims> for CurrentUser {
    fn from(claims: AccessClaims) -> Self {
        Self {
            id: claims.sub,
            username: claims.preferred_username,
            roles: claims.realm_access.unwrap_or_default().roles,
        }
    }
}

/// Check that the caller holds a role, returns Forbidden otherwise.
pub fn require_role(user: &CurrentUser, role: &str) -> AppResult<()> {
    if user.has_role(role) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Authentication middleware that validates bearer tokens.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&request)?;

    let claims = state.token_verifier.verify(token)?;
    let current_user = CurrentUser::from(claims);

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Reject callers without the moderator role before any handler runs.
pub async fn moderator_middleware(request: Request, next: Next) -> Result<Response, AppError> {
    let current_user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;

    if let Err(err) = require_role(current_user, ROLE_MODERATOR) {
        tracing::debug!(
            user_id = %current_user.id,
            username = current_user.username.as_deref().unwrap_or("unknown"),
            "Caller lacks {} role",
            ROLE_MODERATOR
        );
        return Err(err);
    }

    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header.
fn extract_token(request: &Request<Body>) -> AppResult<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_roles(roles: &[&str]) -> CurrentUser {
        CurrentUser {
            id: "42".to_string(),
            username: Some("user".to_string()),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_has_role() {
        let user = user_with_roles(&["offline_access", "MODERATOR"]);
        assert!(user.has_role(ROLE_MODERATOR));
        assert!(!user.has_role("ADMIN"));
    }

    #[test]
    fn test_has_role_accepts_prefixed_names() {
        let user = user_with_roles(&["ROLE_MODERATOR"]);
        assert!(user.has_role(ROLE_MODERATOR));
    }

    #[test]
    fn test_role_names_are_case_sensitive() {
        let user = user_with_roles(&["moderator"]);
        assert!(require_role(&user, ROLE_MODERATOR).is_err());
    }

    #[test]
    fn test_claims_without_realm_access() {
        let claims = AccessClaims {
            sub: "42".to_string(),
            preferred_username: None,
            realm_access: None,
            exp: 0,
        };
        assert!(CurrentUser::from(claims).roles.is_empty());
    }

    #[test]
    fn test_current_user_from_claims() {
        let claims = AccessClaims {
            sub: "42".to_string(),
            preferred_username: Some("jdoe".to_string()),
            realm_access: Some(RealmAccess {
                roles: vec!["MODERATOR".to_string()],
            }),
            exp: 0,
        };

        let user = CurrentUser::from(claims);
        assert_eq!(user.id, "42");
        assert_eq!(user.username.as_deref(), Some("jdoe"));
        assert!(user.has_role(ROLE_MODERATOR));
    }

    #[test]
    fn test_extract_token() {
        let request = Request::builder()
            .header(AUTHORIZATION, "Bearer abc.def.ghi")
            .body(Body::empty())
            .unwrap();
        assert_eq!(extract_token(&request).unwrap(), "abc.def.ghi");

        let request = Request::builder()
            .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();
        assert!(matches!(extract_token(&request), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_from_config_without_keys() {
        assert!(TokenVerifier::from_config(&JwtConfig::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_from_config_rejects_bad_pem() {
        let config = JwtConfig {
            public_key: Some("not a key".to_string()),
            ..Default::default()
        };
        assert!(TokenVerifier::from_config(&config).is_err());
    }
}
