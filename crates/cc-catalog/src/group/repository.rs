//! Group Repository

use mongodb::{Collection, Database, bson::doc};
use futures::TryStreamExt;
use crate::group::entity::Group;
use crate::shared::error::Result;

pub struct GroupRepository {
    collection: Collection<Group>,
}

impl GroupRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("groups"),
        }
    }

    pub async fn insert(&self, group: &Group) -> Result<()> {
        self.collection.insert_one(group).await?;
        Ok(())
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<Group>> {
        Ok(self.collection.find_one(doc! { "_id": code }).await?)
    }

    pub async fn find_by_codes(&self, codes: &[String]) -> Result<Vec<Group>> {
        let cursor = self.collection
            .find(doc! { "_id": { "$in": codes } })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_all(&self) -> Result<Vec<Group>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn update(&self, group: &Group) -> Result<()> {
        self.collection
            .replace_one(doc! { "_id": &group.code }, group)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, code: &str) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": code }).await?;
        Ok(result.deleted_count > 0)
    }
}
