//! User Service Library
//!
//! This crate provides user management on top of a realm-based identity
//! provider: the provider client, the response mapper and the user service
//! that ties them together.

pub mod client;
pub mod mapper;
pub mod service;

pub use client::{IdentityProvider, KeycloakAdminClient, ProviderError, ProviderResult};
pub use service::{UserManager, UserService};
