//! Audit Log Repository

use mongodb::{Collection, Database, bson::doc};
use futures::TryStreamExt;
use crate::audit::entity::AuditLog;
use crate::shared::error::Result;

pub struct AuditLogRepository {
    collection: Collection<AuditLog>,
}

impl AuditLogRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("audit_logs"),
        }
    }

    pub async fn insert(&self, log: &AuditLog) -> Result<()> {
        self.collection.insert_one(log).await?;
        Ok(())
    }

    pub async fn find_by_entity(&self, entity_type: &str, entity_id: &str) -> Result<Vec<AuditLog>> {
        let cursor = self.collection
            .find(doc! { "entityType": entity_type, "entityId": entity_id })
            .sort(doc! { "performedAt": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_recent(&self, limit: i64) -> Result<Vec<AuditLog>> {
        let cursor = self.collection
            .find(doc! {})
            .sort(doc! { "performedAt": -1 })
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
