//! Middleware for authentication and role-based access.

mod auth;

pub use auth::{
    auth_middleware, moderator_middleware, require_role, AccessClaims, CurrentUser, RealmAccess,
    TokenVerifier,
};
