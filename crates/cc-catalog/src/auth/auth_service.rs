//! Authentication Service
//!
//! JWT token generation and validation (HS256). Tokens are issued by the
//! surrounding identity infrastructure; this service validates them and, in
//! development mode, can mint tokens for seeded users.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation, Algorithm};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::shared::error::{CatalogError, Result};

/// JWT Claims for access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// JWT ID (unique identifier)
    pub jti: String,

    /// User email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Display name
    pub name: String,

    /// Home partner ID (tenant the user acts on behalf of)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,

    /// Partner IDs this user can access ("*" for staff)
    #[serde(default)]
    pub partners: Vec<String>,

    /// Group codes assigned to this user
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Configuration for the auth service
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret key for HS256
    pub secret_key: String,

    /// Token issuer
    pub issuer: String,

    /// Token audience
    pub audience: String,

    /// Access token expiration in seconds
    pub token_expiry_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            issuer: "coursecat".to_string(),
            audience: "coursecat".to_string(),
            token_expiry_secs: 3600,
        }
    }
}

/// Authentication service for token management
pub struct AuthService {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        info!("AuthService initialized with HS256");

        Self {
            config,
            encoding_key,
            decoding_key,
            algorithm: Algorithm::HS256,
        }
    }

    /// Generate an access token for a user
    pub fn generate_access_token(
        &self,
        user_id: &str,
        name: &str,
        email: Option<&str>,
        partner_id: Option<&str>,
        groups: Vec<String>,
    ) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.token_expiry_secs);

        let partners = match partner_id {
            Some(p) => vec![p.to_string()],
            None => vec!["*".to_string()],
        };

        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            email: email.map(String::from),
            name: name.to_string(),
            partner_id: partner_id.map(String::from),
            partners,
            groups,
        };

        let header = Header::new(self.algorithm);
        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| CatalogError::Internal { message: format!("Failed to encode JWT: {}", e) })
    }

    /// Validate an access token and extract claims
    pub fn validate_token(&self, token: &str) -> Result<AccessTokenClaims> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);

        decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => CatalogError::TokenExpired,
                _ => CatalogError::InvalidToken { message: format!("{}", e) },
            })
    }
}

/// Extract bearer token from Authorization header
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    if auth_header.starts_with("Bearer ") {
        Some(&auth_header[7..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> AuthService {
        AuthService::new(AuthConfig {
            secret_key: "test-secret".to_string(),
            ..AuthConfig::default()
        })
    }

    #[test]
    fn test_generate_and_validate_token() {
        let service = test_service();

        let token = service
            .generate_access_token(
                "user-1",
                "Test User",
                Some("test@example.com"),
                Some("partner-1"),
                vec!["internal-editors".to_string()],
            )
            .unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.partner_id.as_deref(), Some("partner-1"));
        assert_eq!(claims.partners, vec!["partner-1".to_string()]);
        assert_eq!(claims.groups, vec!["internal-editors".to_string()]);
    }

    #[test]
    fn test_staff_token_gets_wildcard_partner_access() {
        let service = test_service();

        let token = service
            .generate_access_token("admin-1", "Admin", None, None, vec![])
            .unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert!(claims.partner_id.is_none());
        assert_eq!(claims.partners, vec!["*".to_string()]);
    }

    #[test]
    fn test_tampered_token_rejected() {
        let service = test_service();
        let other = AuthService::new(AuthConfig {
            secret_key: "other-secret".to_string(),
            ..AuthConfig::default()
        });

        let token = other
            .generate_access_token("user-1", "Test User", None, None, vec![])
            .unwrap();

        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(extract_bearer_token("bearer abc123"), None);
        assert_eq!(extract_bearer_token("Basic abc123"), None);
    }
}
