//! Catalog API Integration Tests
//!
//! Tests for catalog domain models, authorization, and error handling.

use std::collections::HashSet;

use cc_catalog::{Group, NetworkType, Partner, Person, permissions};

// Unit tests for domain models
mod domain_tests {
    use super::*;

    #[test]
    fn test_person_creation() {
        let person = Person::new("partner-1", "Robert", "Ford")
            .with_email("test@example.com")
            .with_bio("The maze is not for him.");

        assert_eq!(person.full_name(), "Robert Ford");
        assert_eq!(person.slug, "robert-ford");
        assert_eq!(person.email.as_deref(), Some("test@example.com"));
        assert!(person.position.is_none());
    }

    #[test]
    fn test_person_position() {
        let mut person = Person::new("partner-1", "Robert", "Ford");
        person.set_position("Park Director", "org-1");

        let position = person.position.as_ref().unwrap();
        assert_eq!(position.title, "Park Director");
        assert_eq!(position.organization_id, "org-1");
    }

    #[test]
    fn test_person_works_are_ordered() {
        let mut person = Person::new("partner-1", "Robert", "Ford");
        person.set_works(vec!["Delores".into(), "Teddy".into(), "Maive".into()]);

        assert_eq!(person.works[0], "Delores");
        assert_eq!(person.works[1], "Teddy");
        assert_eq!(person.works[2], "Maive");
    }

    #[test]
    fn test_person_networks_unique_per_type() {
        let mut person = Person::new("partner-1", "Robert", "Ford");
        person.sync_networks(&[
            (NetworkType::Twitter, "http://www.twitter.com/hopkins".into()),
        ]);
        person.sync_networks(&[
            (NetworkType::Twitter, "http://www.twitter.com/new".into()),
        ]);

        assert_eq!(person.networks.len(), 1);
        assert_eq!(person.network(NetworkType::Twitter), Some("http://www.twitter.com/new"));
    }

    #[test]
    fn test_removing_network_type_on_sync() {
        let mut person = Person::new("partner-1", "Robert", "Ford");
        person.sync_networks(&[
            (NetworkType::Facebook, "http://www.facebook.com/hopkins".into()),
            (NetworkType::Twitter, "http://www.twitter.com/hopkins".into()),
            (NetworkType::Blog, "http://www.blog.com/hopkins".into()),
        ]);

        // Resubmitting without blog deletes the blog network
        person.sync_networks(&[
            (NetworkType::Facebook, "http://www.facebook.com/new".into()),
            (NetworkType::Twitter, "http://www.twitter.com/new".into()),
        ]);

        assert!(person.network(NetworkType::Blog).is_none());
        assert!(person.network(NetworkType::Facebook).is_some());
        assert!(person.network(NetworkType::Twitter).is_some());
    }

    #[test]
    fn test_partner_marketing_credentials() {
        let partner = Partner::new("Test Partner", "test");
        assert!(!partner.has_marketing_credentials());

        let partner = partner.with_marketing_site("https://www.example.org", "api-user", "secret");
        assert!(partner.has_marketing_credentials());
    }

    #[test]
    fn test_group_permissions() {
        let group = Group::new("internal-test", "Internal Test")
            .with_permissions(permissions::people::ALL.iter().copied());

        assert!(group.grants(permissions::people::ADD));
        assert!(group.grants(permissions::people::CHANGE));
        assert!(group.grants(permissions::people::DELETE));
        assert!(!group.grants("courses:add"));
    }
}

// Authorization context tests
mod authorization_tests {
    use super::*;
    use cc_catalog::{checks, AuthContext};

    fn create_auth_context(permissions: Vec<&str>, partners: Vec<&str>) -> AuthContext {
        AuthContext {
            user_id: "user-1".to_string(),
            email: Some("test@example.com".to_string()),
            name: "Test User".to_string(),
            partner_id: partners.first().map(|p| p.to_string()),
            accessible_partners: partners.into_iter().map(String::from).collect(),
            groups: vec!["internal-test".to_string()],
            permissions: permissions.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_direct_permission() {
        let ctx = create_auth_context(vec!["people:add"], vec!["partner1"]);
        assert!(ctx.has_permission("people:add"));
        assert!(!ctx.has_permission("people:change"));
    }

    #[test]
    fn test_wildcard_permission() {
        let ctx = create_auth_context(vec!["people:*"], vec!["partner1"]);
        assert!(ctx.has_permission("people:add"));
        assert!(ctx.has_permission("people:change"));
        assert!(!ctx.has_permission("courses:add"));
    }

    #[test]
    fn test_superuser_permission() {
        let ctx = create_auth_context(vec!["*:*"], vec!["*"]);
        assert!(ctx.has_permission("people:add"));
        assert!(ctx.has_permission("anything:everything"));
    }

    #[test]
    fn test_partner_access() {
        let ctx = create_auth_context(vec![], vec!["partner1", "partner2"]);
        assert!(ctx.can_access_partner("partner1"));
        assert!(ctx.can_access_partner("partner2"));
        assert!(!ctx.can_access_partner("partner3"));
    }

    #[test]
    fn test_wildcard_partner_access() {
        let ctx = create_auth_context(vec![], vec!["*"]);
        assert!(ctx.can_access_partner("any_partner"));
    }

    #[test]
    fn test_mutation_checks() {
        let editor = create_auth_context(
            vec!["people:add", "people:change", "people:delete"],
            vec!["partner1"],
        );
        assert!(checks::can_add_people(&editor).is_ok());
        assert!(checks::can_change_people(&editor).is_ok());
        assert!(checks::can_delete_people(&editor).is_ok());

        let reader = create_auth_context(vec![], vec!["partner1"]);
        assert!(checks::can_add_people(&reader).is_err());
        assert!(checks::can_change_people(&reader).is_err());
        assert!(checks::can_delete_people(&reader).is_err());
    }

    #[test]
    fn test_has_any_permission() {
        let ctx = create_auth_context(vec!["people:add"], vec!["partner1"]);
        assert!(ctx.has_any_permission(&["people:add", "people:change"]));
        assert!(!ctx.has_any_permission(&["people:change", "people:delete"]));
    }

    #[test]
    fn test_has_all_permissions() {
        let ctx = create_auth_context(vec!["people:add", "people:change"], vec!["partner1"]);
        assert!(ctx.has_all_permissions(&["people:add", "people:change"]));
        assert!(!ctx.has_all_permissions(&["people:add", "people:delete"]));
    }
}

// Token round-trip tests
mod auth_service_tests {
    use cc_catalog::{AuthConfig, AuthService};

    fn service() -> AuthService {
        AuthService::new(AuthConfig {
            secret_key: "integration-test-secret".to_string(),
            ..AuthConfig::default()
        })
    }

    #[test]
    fn test_token_round_trip() {
        let service = service();
        let token = service
            .generate_access_token(
                "user-1",
                "Test User",
                Some("test@example.com"),
                Some("partner-1"),
                vec!["internal-test".to_string()],
            )
            .unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.groups, vec!["internal-test".to_string()]);
        assert_eq!(claims.partner_id.as_deref(), Some("partner-1"));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = service();
        assert!(service.validate_token("not-a-jwt").is_err());
    }
}

// Error handling tests
mod error_tests {
    use cc_catalog::CatalogError;

    #[test]
    fn test_not_found_error() {
        let err = CatalogError::not_found("Person", "abc123");
        let msg = err.to_string();
        assert!(msg.contains("Person"));
        assert!(msg.contains("abc123"));
    }

    #[test]
    fn test_duplicate_error() {
        let err = CatalogError::duplicate("Person", "slug", "robert-ford");
        let msg = err.to_string();
        assert!(msg.contains("Person"));
        assert!(msg.contains("slug"));
        assert!(msg.contains("robert-ford"));
    }

    #[test]
    fn test_feature_disabled_error() {
        let err = CatalogError::feature_disabled("publish_person_to_marketing_site");
        assert!(err.to_string().contains("publish_person_to_marketing_site"));
    }

    #[test]
    fn test_error_variants_display() {
        let errors = vec![
            CatalogError::validation("Invalid email format"),
            CatalogError::forbidden("Insufficient permissions"),
            CatalogError::marketing_site("publish failed"),
            CatalogError::configuration("Missing key"),
            CatalogError::internal("Unexpected error"),
            CatalogError::TokenExpired,
            CatalogError::InvalidToken { message: "Malformed JWT".to_string() },
            CatalogError::PartnerNotFound { id: "partner-1".to_string() },
            CatalogError::OrganizationNotFound { id: "org-1".to_string() },
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }
}

// Slug generation tests
mod slug_tests {
    use super::*;
    use cc_catalog::person::entity::slugify;

    #[test]
    fn test_slug_format() {
        let slug = slugify("Robert Ford");
        assert_eq!(slug, "robert-ford");
        assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn test_slug_uniqueness_over_uuid() {
        // Same name, distinct people: identities stay unique even when slugs collide
        let ids: HashSet<String> = (0..100)
            .map(|_| Person::new("partner-1", "Robert", "Ford").uuid)
            .collect();
        assert_eq!(ids.len(), 100);
    }
}
