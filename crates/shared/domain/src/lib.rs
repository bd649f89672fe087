//! Domain layer - request and response shapes exchanged with API callers.
//!
//! This crate has no infrastructure dependencies. The identity provider's own
//! wire representations live next to the client in `user-service`.

pub mod constants;
pub mod user;

pub use constants::*;
pub use user::{UserRequest, UserResponse};
