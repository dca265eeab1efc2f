//! CourseCat Catalog
//!
//! Core catalog platform providing:
//! - People management with nested positions, works, and social networks
//! - Partner (tenant) scoping with per-partner marketing site credentials
//! - Permission-gated mutations resolved from group membership
//! - Feature-flag gated publishing to the external marketing site
//!
//! ## Module Organization (Aggregate-based)
//!
//! Each aggregate contains:
//! - `entity` - Domain entities
//! - `repository` - Data access
//! - `api` - REST endpoints
//! - `operations` - Use case operations (where applicable)

// Core aggregates
pub mod person;
pub mod organization;
pub mod partner;
pub mod group;

// Authentication & authorization
pub mod auth;
pub mod audit;

// Cross-cutting concerns
pub mod flags;
pub mod marketing;
pub mod seed;

// Shared infrastructure
pub mod shared;

// Re-export common types from shared
pub use shared::error::{CatalogError, Result};

// Re-export main entity types for convenience
pub use person::entity::{Person, Position, PersonNetwork, NetworkType};
pub use organization::entity::Organization;
pub use partner::entity::{Partner, MarketingCredentials};
pub use group::entity::{Group, permissions};
pub use audit::entity::{AuditLog, AuditAction};

// Re-export repositories
pub use person::repository::{PersonRepository, PersonStore};
pub use organization::repository::{OrganizationRepository, OrganizationLookup};
pub use partner::repository::PartnerRepository;
pub use group::repository::GroupRepository;
pub use audit::repository::AuditLogRepository;

// Re-export services
pub use audit::service::AuditService;
pub use auth::auth_service::{AuthService, AuthConfig, AccessTokenClaims};
pub use auth::authorization_service::{AuthorizationService, AuthContext, checks};

// Re-export cross-cutting concerns
pub use flags::{FeatureFlagProvider, InMemoryFlags, PUBLISH_PERSON_TO_MARKETING_SITE};
pub use marketing::{MarketingPublisher, MarketingSitePeople, MarketingError, NodeRef};

/// API surface re-exports
pub mod api {
    pub use crate::shared::middleware::{Authenticated, AppState, AuthLayer, OptionalAuth};
    pub use crate::shared::api_common::{
        ApiError, PaginationParams, ResultsPage, SuccessResponse,
    };
    pub use crate::shared::health_api::{health_router, HealthState};
    pub use crate::person::api::{people_router, PeopleState};
}
