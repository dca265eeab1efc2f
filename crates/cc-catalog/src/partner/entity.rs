//! Partner Entity
//!
//! Tenant scoping for catalog content. Each partner optionally carries
//! credentials for its marketing site, used when publishing people.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use uuid::Uuid;

/// Credentials needed to talk to a partner's marketing site
#[derive(Debug, Clone)]
pub struct MarketingCredentials {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

/// Partner entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    /// UUID string
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name
    pub name: String,

    /// Short code used in URLs and config, e.g. "acme"
    pub short_code: String,

    /// Marketing site root URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_site_url: Option<String>,

    /// Marketing site API username
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_site_api_username: Option<String>,

    /// Marketing site API password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_site_api_password: Option<String>,

    /// Audit fields
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Partner {
    pub fn new(name: impl Into<String>, short_code: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            short_code: short_code.into(),
            marketing_site_url: None,
            marketing_site_api_username: None,
            marketing_site_api_password: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_marketing_site(
        mut self,
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.marketing_site_url = Some(url.into());
        self.marketing_site_api_username = Some(username.into());
        self.marketing_site_api_password = Some(password.into());
        self
    }

    /// Credentials for the marketing site, if fully configured.
    /// Publishing requires at least a URL and a username.
    pub fn marketing_credentials(&self) -> Option<MarketingCredentials> {
        let base_url = self.marketing_site_url.as_deref()?;
        let username = self.marketing_site_api_username.as_deref()?;

        Some(MarketingCredentials {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.to_string(),
            password: self.marketing_site_api_password.clone().unwrap_or_default(),
        })
    }

    pub fn has_marketing_credentials(&self) -> bool {
        self.marketing_credentials().is_some()
    }
}
