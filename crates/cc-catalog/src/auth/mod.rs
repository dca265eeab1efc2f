//! Authentication and authorization.

pub mod auth_service;
pub mod authorization_service;

pub use auth_service::{AuthService, AuthConfig, AccessTokenClaims};
pub use authorization_service::{AuthorizationService, AuthContext, checks};
