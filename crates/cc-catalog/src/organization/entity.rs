//! Organization Entity

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use uuid::Uuid;

/// Organization entity. Referenced by a person's position, never owned by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// UUID string
    #[serde(rename = "_id")]
    pub id: String,

    /// Partner this organization belongs to
    pub partner_id: String,

    /// Unique short key, e.g. "MITx"
    pub key: String,

    /// Display name
    pub name: String,

    /// Audit fields
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    pub fn new(
        partner_id: impl Into<String>,
        key: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            partner_id: partner_id.into(),
            key: key.into(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
