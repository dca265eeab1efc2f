//! Person Repository

use async_trait::async_trait;
use mongodb::{Collection, Database, IndexModel, bson::doc, options::IndexOptions};
use futures::TryStreamExt;
use crate::person::entity::Person;
use crate::shared::error::{CatalogError, Result};

/// Persistence seam used by the create operation. Lets the
/// publish-then-persist flow run against an in-memory store in tests.
#[async_trait]
pub trait PersonStore: Send + Sync {
    async fn insert(&self, person: &Person) -> Result<()>;
    async fn slug_exists(&self, slug: &str) -> Result<bool>;
}

pub struct PersonRepository {
    collection: Collection<Person>,
}

impl PersonRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("people"),
        }
    }

    /// Create the unique slug index. Called once at startup.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let slug_index = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(slug_index).await?;
        Ok(())
    }

    pub async fn find_by_uuid(&self, uuid: &str) -> Result<Option<Person>> {
        Ok(self.collection.find_one(doc! { "_id": uuid }).await?)
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Vec<Person>> {
        let cursor = self.collection.find(doc! { "slug": slug }).await?;
        Ok(cursor.try_collect().await?)
    }

    /// All people ordered by creation time, with skip/limit paging.
    pub async fn find_page(&self, skip: u64, limit: i64) -> Result<Vec<Person>> {
        let cursor = self.collection
            .find(doc! {})
            .sort(doc! { "createdAt": 1 })
            .skip(skip)
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    pub async fn update(&self, person: &Person) -> Result<()> {
        self.collection
            .replace_one(doc! { "_id": &person.uuid }, person)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, uuid: &str) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": uuid }).await?;
        Ok(result.deleted_count > 0)
    }
}

/// True when the mongodb error is a unique-index violation (E11000).
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) => we.code == 11000,
        ErrorKind::Command(ce) => ce.code == 11000,
        _ => false,
    }
}

#[async_trait]
impl PersonStore for PersonRepository {
    async fn insert(&self, person: &Person) -> Result<()> {
        self.collection.insert_one(person).await.map_err(|e| {
            if is_duplicate_key(&e) {
                CatalogError::duplicate("Person", "slug", &person.slug)
            } else {
                CatalogError::Database(e)
            }
        })?;
        Ok(())
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool> {
        let count = self.collection
            .count_documents(doc! { "slug": slug })
            .await?;
        Ok(count > 0)
    }
}
