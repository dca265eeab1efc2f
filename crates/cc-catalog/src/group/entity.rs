//! Group and Permission Entities
//!
//! Authorization model: users belong to groups, groups grant permissions.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use std::collections::HashSet;

/// Group definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Group code (unique), e.g. "internal-editors"
    #[serde(rename = "_id")]
    pub code: String,

    /// Human-readable display name
    pub name: String,

    /// Permissions granted by this group
    #[serde(default)]
    pub permissions: HashSet<String>,

    /// Audit fields
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Group {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            code: code.into(),
            name: name.into(),
            permissions: HashSet::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    pub fn grant(&mut self, permission: impl Into<String>) {
        self.permissions.insert(permission.into());
        self.updated_at = Utc::now();
    }

    pub fn revoke(&mut self, permission: &str) {
        if self.permissions.remove(permission) {
            self.updated_at = Utc::now();
        }
    }

    pub fn grants(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

/// Well-known permission strings
pub mod permissions {
    /// Superuser wildcard
    pub const ADMIN_ALL: &str = "*:*";

    /// People management permissions
    pub mod people {
        pub const ADD: &str = "people:add";
        pub const CHANGE: &str = "people:change";
        pub const DELETE: &str = "people:delete";

        /// All people permissions
        pub const ALL: &[&str] = &[ADD, CHANGE, DELETE];
    }
}
