//! Organization Repository

use async_trait::async_trait;
use mongodb::{Collection, Database, bson::doc};
use futures::TryStreamExt;
use crate::organization::entity::Organization;
use crate::shared::error::Result;

/// Lookup seam used by person operations to validate references
/// without pulling in a live database.
#[async_trait]
pub trait OrganizationLookup: Send + Sync {
    async fn exists(&self, id: &str) -> Result<bool>;
}

pub struct OrganizationRepository {
    collection: Collection<Organization>,
}

impl OrganizationRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("organizations"),
        }
    }

    pub async fn insert(&self, organization: &Organization) -> Result<()> {
        self.collection.insert_one(organization).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Organization>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_by_key(&self, key: &str) -> Result<Option<Organization>> {
        Ok(self.collection.find_one(doc! { "key": key }).await?)
    }

    pub async fn find_by_partner(&self, partner_id: &str) -> Result<Vec<Organization>> {
        let cursor = self.collection
            .find(doc! { "partnerId": partner_id })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn update(&self, organization: &Organization) -> Result<()> {
        self.collection
            .replace_one(doc! { "_id": &organization.id }, organization)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl OrganizationLookup for OrganizationRepository {
    async fn exists(&self, id: &str) -> Result<bool> {
        let count = self.collection
            .count_documents(doc! { "_id": id })
            .await?;
        Ok(count > 0)
    }
}
