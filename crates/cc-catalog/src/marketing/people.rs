//! Marketing Site People Client
//!
//! Publishes person records as nodes on a partner's marketing site and
//! deletes them again when a local persist fails after publishing.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::partner::entity::Partner;
use crate::person::entity::Person;

/// Reference to a published node on the marketing site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRef {
    /// Resource kind, e.g. "node"
    pub resource: String,
    /// Node ID assigned by the marketing site
    pub id: String,
    /// Node UUID assigned by the marketing site
    pub uuid: String,
    /// Full URI of the node
    pub uri: String,
}

/// Marketing site errors
#[derive(Error, Debug)]
pub enum MarketingError {
    #[error("Marketing site credentials are not configured for partner {partner}")]
    CredentialsMissing { partner: String },

    #[error("Marketing site request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Marketing site returned unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

pub type MarketingResult<T> = std::result::Result<T, MarketingError>;

/// Seam for the marketing site. The create flow publishes a person before
/// persisting it locally and deletes the node again if that persist fails.
#[async_trait]
pub trait MarketingPublisher: Send + Sync {
    /// Publish a person to the partner's marketing site, returning the
    /// created node reference.
    async fn publish_person(&self, partner: &Partner, person: &Person) -> MarketingResult<NodeRef>;

    /// Delete a previously published node.
    async fn delete_person(&self, partner: &Partner, node_id: &str) -> MarketingResult<()>;
}

/// HTTP client for the marketing site's people endpoints.
pub struct MarketingSitePeople {
    http: reqwest::Client,
}

#[derive(Serialize)]
struct PublishNodeBody<'a> {
    #[serde(rename = "type")]
    node_type: &'a str,
    title: String,
    uuid: &'a str,
    slug: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    body: &'a str,
}

impl MarketingSitePeople {
    pub fn new(timeout_secs: u64, user_agent: &str) -> MarketingResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .user_agent(user_agent.to_string())
            .build()?;
        Ok(Self { http })
    }

    fn credentials(partner: &Partner) -> MarketingResult<crate::partner::entity::MarketingCredentials> {
        partner.marketing_credentials().ok_or_else(|| MarketingError::CredentialsMissing {
            partner: partner.short_code.clone(),
        })
    }
}

#[async_trait]
impl MarketingPublisher for MarketingSitePeople {
    async fn publish_person(&self, partner: &Partner, person: &Person) -> MarketingResult<NodeRef> {
        let creds = Self::credentials(partner)?;

        let body = PublishNodeBody {
            node_type: "person",
            title: person.full_name(),
            uuid: &person.uuid,
            slug: &person.slug,
            body: &person.bio,
        };

        let response = self.http
            .post(format!("{}/node.json", creds.base_url))
            .basic_auth(&creds.username, Some(&creds.password))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketingError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let node: NodeRef = response.json().await?;
        debug!(node_id = %node.id, person_uuid = %person.uuid, "Published person to marketing site");
        Ok(node)
    }

    async fn delete_person(&self, partner: &Partner, node_id: &str) -> MarketingResult<()> {
        let creds = Self::credentials(partner)?;

        let response = self.http
            .delete(format!("{}/node/{}.json", creds.base_url, node_id))
            .basic_auth(&creds.username, Some(&creds.password))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketingError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        debug!(node_id = %node_id, "Deleted person node from marketing site");
        Ok(())
    }
}

/// In-memory marketing site for tests: records calls and injects failures.
#[cfg(test)]
pub struct MockMarketingSite {
    pub node: NodeRef,
    pub fail_publish: std::sync::atomic::AtomicBool,
    pub fail_delete: std::sync::atomic::AtomicBool,
    pub published: std::sync::Mutex<Vec<String>>,
    pub deleted: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockMarketingSite {
    pub fn new() -> Self {
        Self {
            node: NodeRef {
                resource: "node".to_string(),
                id: "28691".to_string(),
                uuid: "18d5542f-fa80-418e-b416-455cfdeb4d4e".to_string(),
                uri: "https://stage.example.org/node/28691".to_string(),
            },
            fail_publish: std::sync::atomic::AtomicBool::new(false),
            fail_delete: std::sync::atomic::AtomicBool::new(false),
            published: std::sync::Mutex::new(Vec::new()),
            deleted: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn publish_count(&self) -> usize {
        self.published.lock().unwrap().len()
    }

    pub fn deleted_node_ids(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl MarketingPublisher for MockMarketingSite {
    async fn publish_person(&self, partner: &Partner, person: &Person) -> MarketingResult<NodeRef> {
        if !partner.has_marketing_credentials() {
            return Err(MarketingError::CredentialsMissing {
                partner: partner.short_code.clone(),
            });
        }
        if self.fail_publish.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(MarketingError::UnexpectedStatus {
                status: 500,
                body: "injected failure".to_string(),
            });
        }
        self.published.lock().unwrap().push(person.uuid.clone());
        Ok(self.node.clone())
    }

    async fn delete_person(&self, _partner: &Partner, node_id: &str) -> MarketingResult<()> {
        if self.fail_delete.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(MarketingError::UnexpectedStatus {
                status: 500,
                body: "injected failure".to_string(),
            });
        }
        self.deleted.lock().unwrap().push(node_id.to_string());
        Ok(())
    }
}
