//! Domain-level constants.
//!
//! These constants define access rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Realm role required for every `/api/users` operation
pub const ROLE_MODERATOR: &str = "MODERATOR";

/// Prefix some token issuers put in front of role names
pub const ROLE_PREFIX: &str = "ROLE_";

/// Body returned by the hello endpoint
pub const HELLO_RESPONSE: &str = "user";

// =============================================================================
// Identity provider
// =============================================================================

/// Realm users are managed in unless configured otherwise
pub const DEFAULT_REALM: &str = "ITM";

/// Credential type for password credentials
pub const CREDENTIAL_TYPE_PASSWORD: &str = "password";

// =============================================================================
// Authentication
// =============================================================================

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";
