//! Catalog Error Types

use thiserror::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response, Json},
};
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Duplicate entity: {entity_type} with {field}={value}")]
    Duplicate { entity_type: String, field: String, value: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Feature disabled: {switch}")]
    FeatureDisabled { switch: String },

    #[error("Marketing site error: {message}")]
    MarketingSite { message: String },

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bson::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Partner not found: {id}")]
    PartnerNotFound { id: String },

    #[error("Organization not found: {id}")]
    OrganizationNotFound { id: String },

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {message}")]
    InvalidToken { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CatalogError {
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    pub fn duplicate(entity_type: impl Into<String>, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type: entity_type.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden { message: message.into() }
    }

    pub fn feature_disabled(switch: impl Into<String>) -> Self {
        Self::FeatureDisabled { switch: switch.into() }
    }

    pub fn marketing_site(message: impl Into<String>) -> Self {
        Self::MarketingSite { message: message.into() }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Error response body
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            CatalogError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            CatalogError::Duplicate { .. } => (StatusCode::CONFLICT, "DUPLICATE"),
            CatalogError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            // Authentication and permission failures share a status on this API
            CatalogError::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            CatalogError::TokenExpired => (StatusCode::FORBIDDEN, "TOKEN_EXPIRED"),
            CatalogError::InvalidToken { .. } => (StatusCode::FORBIDDEN, "INVALID_TOKEN"),
            CatalogError::FeatureDisabled { .. } => (StatusCode::BAD_REQUEST, "FEATURE_DISABLED"),
            CatalogError::MarketingSite { .. } => (StatusCode::BAD_REQUEST, "MARKETING_SITE_ERROR"),
            CatalogError::PartnerNotFound { .. } => (StatusCode::NOT_FOUND, "PARTNER_NOT_FOUND"),
            CatalogError::OrganizationNotFound { .. } => (StatusCode::BAD_REQUEST, "ORGANIZATION_NOT_FOUND"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CatalogError::not_found("Person", "abc123");
        assert!(err.to_string().contains("Person"));
        assert!(err.to_string().contains("abc123"));

        let err = CatalogError::feature_disabled("publish_person_to_marketing_site");
        assert!(err.to_string().contains("publish_person_to_marketing_site"));
    }

    #[test]
    fn test_validation_constructor() {
        let err = CatalogError::validation("given_name is required");
        assert!(matches!(err, CatalogError::Validation { .. }));
    }
}
