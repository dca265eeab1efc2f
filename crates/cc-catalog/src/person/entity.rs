//! Person Entity
//!
//! A person owns an optional position (referencing an organization), an
//! ordered list of published works, and at most one social network entry
//! per network type.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use uuid::Uuid;

/// Social network type. A person holds at most one entry per type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Facebook,
    Twitter,
    Blog,
}

impl NetworkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Twitter => "twitter",
            Self::Blog => "blog",
        }
    }
}

impl std::fmt::Display for NetworkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Social network entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonNetwork {
    #[serde(rename = "type")]
    pub network_type: NetworkType,
    pub value: String,
}

/// Position held by a person at an organization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub title: String,
    pub organization_id: String,
}

/// Person entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// UUID string
    #[serde(rename = "_id")]
    pub uuid: String,

    /// URL slug (unique)
    pub slug: String,

    /// Partner this person belongs to
    pub partner_id: String,

    pub given_name: String,
    pub family_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default)]
    pub bio: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// Published works, order-preserving, duplicates allowed
    #[serde(default)]
    pub works: Vec<String>,

    /// Social networks, at most one per type
    #[serde(default)]
    pub networks: Vec<PersonNetwork>,

    /// Audit fields
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Person {
    pub fn new(
        partner_id: impl Into<String>,
        given_name: impl Into<String>,
        family_name: impl Into<String>,
    ) -> Self {
        let given_name = given_name.into();
        let family_name = family_name.into();
        let slug = slugify(&format!("{} {}", given_name, family_name));
        let now = Utc::now();

        Self {
            uuid: Uuid::new_v4().to_string(),
            slug,
            partner_id: partner_id.into(),
            given_name,
            family_name,
            email: None,
            bio: String::new(),
            position: None,
            works: Vec::new(),
            networks: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.given_name, self.family_name)
    }

    pub fn set_position(&mut self, title: impl Into<String>, organization_id: impl Into<String>) {
        self.position = Some(Position {
            title: title.into(),
            organization_id: organization_id.into(),
        });
        self.updated_at = Utc::now();
    }

    /// Replace the works list wholesale, preserving the submitted order.
    pub fn set_works(&mut self, works: Vec<String>) {
        self.works = works;
        self.updated_at = Utc::now();
    }

    /// Synchronize networks with the submitted entries, keyed by type:
    /// present types are upserted, absent types are deleted.
    pub fn sync_networks(&mut self, entries: &[(NetworkType, String)]) {
        self.networks
            .retain(|n| entries.iter().any(|(t, _)| *t == n.network_type));

        for (network_type, value) in entries {
            match self.networks.iter_mut().find(|n| n.network_type == *network_type) {
                Some(existing) => existing.value = value.clone(),
                None => self.networks.push(PersonNetwork {
                    network_type: *network_type,
                    value: value.clone(),
                }),
            }
        }

        self.updated_at = Utc::now();
    }

    /// URL for a network type, if the person has one.
    pub fn network(&self, network_type: NetworkType) -> Option<&str> {
        self.networks
            .iter()
            .find(|n| n.network_type == network_type)
            .map(|n| n.value.as_str())
    }
}

/// Build a URL slug from a display name: lowercase, non-alphanumeric runs
/// collapsed to single dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;

    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    slug.trim_end_matches('-').to_string()
}
