//! Audit Log Entity

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use uuid::Uuid;

/// Audited action kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

/// Audit log entry for a mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    /// UUID string
    #[serde(rename = "_id")]
    pub id: String,

    /// Entity type, e.g. "Person"
    pub entity_type: String,

    /// Entity ID, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,

    pub action: AuditAction,

    /// Human-readable operation summary
    pub operation: String,

    /// User who performed the action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_by: Option<String>,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub performed_at: DateTime<Utc>,
}

impl AuditLog {
    pub fn new(
        entity_type: impl Into<String>,
        entity_id: Option<String>,
        action: AuditAction,
        operation: impl Into<String>,
        performed_by: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            entity_type: entity_type.into(),
            entity_id,
            action,
            operation: operation.into(),
            performed_by,
            performed_at: Utc::now(),
        }
    }
}
