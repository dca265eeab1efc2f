//! Create Person Operation
//!
//! Creation is gated by the `publish_person_to_marketing_site` switch and
//! performs a two-phase side effect: the person is published to the
//! partner's marketing site first, then persisted locally. If the local
//! persist fails, the published node is deleted again (best effort).

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use regex::Regex;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::flags::{FeatureFlagProvider, PUBLISH_PERSON_TO_MARKETING_SITE};
use crate::marketing::MarketingPublisher;
use crate::organization::repository::OrganizationLookup;
use crate::partner::entity::Partner;
use crate::person::entity::{slugify, NetworkType, Person};
use crate::person::repository::PersonStore;
use crate::shared::error::{CatalogError, Result};

/// Email validation pattern
pub(crate) fn email_pattern() -> &'static Regex {
    static PATTERN: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
    })
}

/// Position submitted with a person
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PositionPayload {
    /// Position title, e.g. "Park Director"
    pub title: String,

    /// Organization ID the position is held at
    pub organization: String,
}

/// Social network URLs submitted with a person, keyed by network type.
/// The map shape enforces at most one URL per type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UrlsPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog: Option<String>,
}

impl UrlsPayload {
    /// Typed entries for the networks present in the map.
    pub fn entries(&self) -> Vec<(NetworkType, String)> {
        let mut entries = Vec::new();
        if let Some(ref url) = self.facebook {
            entries.push((NetworkType::Facebook, url.clone()));
        }
        if let Some(ref url) = self.twitter {
            entries.push((NetworkType::Twitter, url.clone()));
        }
        if let Some(ref url) = self.blog {
            entries.push((NetworkType::Blog, url.clone()));
        }
        entries
    }
}

/// Command for creating a new person.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePersonCommand {
    pub given_name: String,
    pub family_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionPayload>,

    #[serde(default)]
    pub works: Vec<String>,

    #[serde(default)]
    pub urls: UrlsPayload,
}

/// Operation for creating a new person.
pub struct CreatePerson {
    store: Arc<dyn PersonStore>,
    organizations: Arc<dyn OrganizationLookup>,
    publisher: Arc<dyn MarketingPublisher>,
    flags: Arc<dyn FeatureFlagProvider>,
}

impl CreatePerson {
    pub fn new(
        store: Arc<dyn PersonStore>,
        organizations: Arc<dyn OrganizationLookup>,
        publisher: Arc<dyn MarketingPublisher>,
        flags: Arc<dyn FeatureFlagProvider>,
    ) -> Self {
        Self {
            store,
            organizations,
            publisher,
            flags,
        }
    }

    pub async fn execute(&self, command: CreatePersonCommand, partner: &Partner) -> Result<Person> {
        // The switch is checked before anything else: when it is off the
        // endpoint rejects every payload without touching the marketing site.
        if !self.flags.is_enabled(PUBLISH_PERSON_TO_MARKETING_SITE) {
            return Err(CatalogError::feature_disabled(PUBLISH_PERSON_TO_MARKETING_SITE));
        }

        let given_name = command.given_name.trim().to_string();
        let family_name = command.family_name.trim().to_string();
        if given_name.is_empty() {
            return Err(CatalogError::validation("given_name is required"));
        }
        if family_name.is_empty() {
            return Err(CatalogError::validation("family_name is required"));
        }

        if let Some(ref email) = command.email {
            if !email_pattern().is_match(email) {
                return Err(CatalogError::validation(format!(
                    "Invalid email address: {}",
                    email
                )));
            }
        }

        if let Some(ref position) = command.position {
            if position.title.trim().is_empty() {
                return Err(CatalogError::validation("position.title is required"));
            }
            if !self.organizations.exists(&position.organization).await? {
                return Err(CatalogError::OrganizationNotFound {
                    id: position.organization.clone(),
                });
            }
        }

        let mut person = Person::new(&partner.id, &given_name, &family_name);
        let slug = self.next_available_slug(&person.slug).await?;
        person.slug = slug;

        if let Some(email) = command.email {
            person = person.with_email(email);
        }
        if let Some(bio) = command.bio {
            person = person.with_bio(bio);
        }
        if let Some(position) = command.position {
            person.set_position(position.title.trim(), position.organization);
        }
        person.set_works(command.works);
        person.sync_networks(&command.urls.entries());

        // Phase one: publish to the marketing site.
        let node = match self.publisher.publish_person(partner, &person).await {
            Ok(node) => node,
            Err(e) => {
                error!(
                    target: "people",
                    "An error occurred while adding the person [{}]-[{}] to the marketing site.",
                    given_name, family_name
                );
                return Err(CatalogError::marketing_site(e.to_string()));
            }
        };

        // Phase two: persist locally. The node just created is the
        // compensating action if this fails.
        if let Err(e) = self.store.insert(&person).await {
            error!(
                target: "people",
                "An error occurred while adding the person [{}]-[{}]-[{}].",
                given_name, family_name, node.id
            );
            if let Err(delete_err) = self.publisher.delete_person(partner, &node.id).await {
                warn!(
                    target: "people",
                    node_id = %node.id,
                    "Failed to roll back marketing site node: {}",
                    delete_err
                );
            }
            return Err(CatalogError::marketing_site(e.to_string()));
        }

        Ok(person)
    }

    /// First free slug for the generated base: the base itself, then -2, -3, ...
    async fn next_available_slug(&self, base: &str) -> Result<String> {
        debug_assert_eq!(base, slugify(base));

        if !self.store.slug_exists(base).await? {
            return Ok(base.to_string());
        }
        let mut n = 2u32;
        loop {
            let candidate = format!("{}-{}", base, n);
            if !self.store.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use crate::flags::InMemoryFlags;
    use crate::marketing::MockMarketingSite;

    /// In-memory person store with failure injection.
    struct InMemoryPersonStore {
        people: Mutex<Vec<Person>>,
        fail_insert: AtomicBool,
    }

    impl InMemoryPersonStore {
        fn new() -> Self {
            Self {
                people: Mutex::new(Vec::new()),
                fail_insert: AtomicBool::new(false),
            }
        }

        fn count(&self) -> usize {
            self.people.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl PersonStore for InMemoryPersonStore {
        async fn insert(&self, person: &Person) -> Result<()> {
            if self.fail_insert.load(Ordering::SeqCst) {
                return Err(CatalogError::duplicate("Person", "slug", &person.slug));
            }
            self.people.lock().unwrap().push(person.clone());
            Ok(())
        }

        async fn slug_exists(&self, slug: &str) -> Result<bool> {
            Ok(self.people.lock().unwrap().iter().any(|p| p.slug == slug))
        }
    }

    struct AllOrganizations;

    #[async_trait]
    impl OrganizationLookup for AllOrganizations {
        async fn exists(&self, _id: &str) -> Result<bool> {
            Ok(true)
        }
    }

    struct NoOrganizations;

    #[async_trait]
    impl OrganizationLookup for NoOrganizations {
        async fn exists(&self, _id: &str) -> Result<bool> {
            Ok(false)
        }
    }

    fn command() -> CreatePersonCommand {
        CreatePersonCommand {
            given_name: "Robert".to_string(),
            family_name: "Ford".to_string(),
            email: Some("test@example.com".to_string()),
            bio: Some("The maze is not for him.".to_string()),
            position: Some(PositionPayload {
                title: "Park Director".to_string(),
                organization: "org-1".to_string(),
            }),
            works: vec!["Delores".to_string(), "Teddy".to_string(), "Maive".to_string()],
            urls: UrlsPayload {
                facebook: Some("http://www.facebook.com/hopkins".to_string()),
                twitter: Some("http://www.twitter.com/hopkins".to_string()),
                blog: Some("http://www.blog.com/hopkins".to_string()),
            },
        }
    }

    fn partner_with_credentials() -> Partner {
        Partner::new("Test Partner", "test")
            .with_marketing_site("https://www.example.org", "api-user", "secret")
    }

    struct Fixture {
        store: Arc<InMemoryPersonStore>,
        site: Arc<MockMarketingSite>,
        flags: Arc<InMemoryFlags>,
        operation: CreatePerson,
    }

    fn fixture(organizations: Arc<dyn OrganizationLookup>) -> Fixture {
        let store = Arc::new(InMemoryPersonStore::new());
        let site = Arc::new(MockMarketingSite::new());
        let flags = Arc::new(InMemoryFlags::from_names([PUBLISH_PERSON_TO_MARKETING_SITE]));
        let operation = CreatePerson::new(
            store.clone(),
            organizations,
            site.clone(),
            flags.clone(),
        );
        Fixture { store, site, flags, operation }
    }

    #[tokio::test]
    async fn test_create_publishes_then_persists() {
        let f = fixture(Arc::new(AllOrganizations));
        let partner = partner_with_credentials();

        let person = f.operation.execute(command(), &partner).await.unwrap();

        assert_eq!(person.given_name, "Robert");
        assert_eq!(person.family_name, "Ford");
        assert_eq!(person.bio, "The maze is not for him.");
        assert_eq!(person.position.as_ref().unwrap().title, "Park Director");
        assert_eq!(person.works, vec!["Delores", "Teddy", "Maive"]);
        assert_eq!(person.networks.len(), 3);

        assert_eq!(f.store.count(), 1);
        assert_eq!(f.site.publish_count(), 1);
        assert!(f.site.deleted_node_ids().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_switch_rejects_without_publishing() {
        let f = fixture(Arc::new(AllOrganizations));
        f.flags.set(PUBLISH_PERSON_TO_MARKETING_SITE, false);
        let partner = partner_with_credentials();

        let result = f.operation.execute(command(), &partner).await;

        assert!(matches!(result, Err(CatalogError::FeatureDisabled { .. })));
        assert_eq!(f.site.publish_count(), 0);
        assert_eq!(f.store.count(), 0);
    }

    #[tokio::test]
    async fn test_missing_credentials_persists_nothing() {
        let f = fixture(Arc::new(AllOrganizations));
        let partner = Partner::new("Test Partner", "test");

        let result = f.operation.execute(command(), &partner).await;

        assert!(matches!(result, Err(CatalogError::MarketingSite { .. })));
        assert_eq!(f.site.publish_count(), 0);
        assert_eq!(f.store.count(), 0);
    }

    #[tokio::test]
    async fn test_insert_conflict_rolls_back_published_node() {
        let f = fixture(Arc::new(AllOrganizations));
        f.store.fail_insert.store(true, Ordering::SeqCst);
        let partner = partner_with_credentials();

        let result = f.operation.execute(command(), &partner).await;

        assert!(matches!(result, Err(CatalogError::MarketingSite { .. })));
        assert_eq!(f.site.publish_count(), 1);
        // Compensating delete runs exactly once, with the published node id
        assert_eq!(f.site.deleted_node_ids(), vec![f.site.node.id.clone()]);
        assert_eq!(f.store.count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_organization_rejected_before_publish() {
        let f = fixture(Arc::new(NoOrganizations));
        let partner = partner_with_credentials();

        let result = f.operation.execute(command(), &partner).await;

        assert!(matches!(result, Err(CatalogError::OrganizationNotFound { .. })));
        assert_eq!(f.site.publish_count(), 0);
        assert_eq!(f.store.count(), 0);
    }

    #[tokio::test]
    async fn test_blank_names_rejected() {
        let f = fixture(Arc::new(AllOrganizations));
        let partner = partner_with_credentials();

        let mut cmd = command();
        cmd.given_name = "   ".to_string();

        let result = f.operation.execute(cmd, &partner).await;
        assert!(matches!(result, Err(CatalogError::Validation { .. })));
        assert_eq!(f.site.publish_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let f = fixture(Arc::new(AllOrganizations));
        let partner = partner_with_credentials();

        let mut cmd = command();
        cmd.email = Some("not-an-email".to_string());

        let result = f.operation.execute(cmd, &partner).await;
        assert!(matches!(result, Err(CatalogError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_slug_collision_gets_numeric_suffix() {
        let f = fixture(Arc::new(AllOrganizations));
        let partner = partner_with_credentials();

        let first = f.operation.execute(command(), &partner).await.unwrap();
        let second = f.operation.execute(command(), &partner).await.unwrap();

        assert_eq!(first.slug, "robert-ford");
        assert_eq!(second.slug, "robert-ford-2");
    }

    #[test]
    fn test_email_pattern() {
        assert!(email_pattern().is_match("user@example.com"));
        assert!(email_pattern().is_match("user.name@example.co.uk"));
        assert!(!email_pattern().is_match("invalid"));
        assert!(!email_pattern().is_match("@example.com"));
    }

    #[test]
    fn test_urls_entries_skip_absent_types() {
        let urls = UrlsPayload {
            facebook: Some("http://www.facebook.com/new".to_string()),
            twitter: None,
            blog: None,
        };
        let entries = urls.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, NetworkType::Facebook);
    }
}
