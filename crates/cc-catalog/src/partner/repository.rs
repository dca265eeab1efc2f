//! Partner Repository

use mongodb::{Collection, Database, bson::doc};
use futures::TryStreamExt;
use crate::partner::entity::Partner;
use crate::shared::error::Result;

pub struct PartnerRepository {
    collection: Collection<Partner>,
}

impl PartnerRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("partners"),
        }
    }

    pub async fn insert(&self, partner: &Partner) -> Result<()> {
        self.collection.insert_one(partner).await?;
        Ok(())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Partner>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    pub async fn find_by_short_code(&self, short_code: &str) -> Result<Option<Partner>> {
        Ok(self.collection.find_one(doc! { "shortCode": short_code }).await?)
    }

    pub async fn find_all(&self) -> Result<Vec<Partner>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn update(&self, partner: &Partner) -> Result<()> {
        self.collection
            .replace_one(doc! { "_id": &partner.id }, partner)
            .await?;
        Ok(())
    }
}
