use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::Collection;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{parse_object_id, StoreError};

/// Result of an insert as the driver reports it. `insertedId` is the minted
/// id in hex, or null when nothing was inserted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertReceipt {
    pub inserted_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReceipt {
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReceipt {
    pub deleted_count: u64,
}

/// Typed access to a single collection. Filters are equality documents built
/// by the callers; updates are `$set` documents carrying only changed fields.
/// Every id-addressed operation parses the id before any query runs.
pub struct Repo<T: Send + Sync> {
    collection: Collection<T>,
}

impl<T> Repo<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + Unpin,
{
    pub fn new(collection: Collection<T>) -> Self {
        Self { collection }
    }

    pub async fn find_any(&self, filter: Document) -> Result<Vec<T>, StoreError> {
        let cursor = self.collection.find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn find_one(&self, filter: Document) -> Result<Option<T>, StoreError> {
        Ok(self.collection.find_one(filter).await?)
    }

    pub async fn find_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        let oid = parse_object_id(id)?;
        Ok(self.collection.find_one(doc! { "_id": oid }).await?)
    }

    pub async fn insert_one(&self, item: &T) -> Result<InsertReceipt, StoreError> {
        let result = self.collection.insert_one(item).await?;
        let inserted_id = result.inserted_id.as_object_id().map(|oid| oid.to_hex());
        Ok(InsertReceipt { inserted_id })
    }

    pub async fn update_id(&self, id: &str, set: Document) -> Result<UpdateReceipt, StoreError> {
        let oid = parse_object_id(id)?;
        let result = self
            .collection
            .update_one(doc! { "_id": oid }, doc! { "$set": set })
            .await?;
        Ok(UpdateReceipt {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    pub async fn update_one_by(
        &self,
        filter: Document,
        set: Document,
    ) -> Result<UpdateReceipt, StoreError> {
        let result = self
            .collection
            .update_one(filter, doc! { "$set": set })
            .await?;
        Ok(UpdateReceipt {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    pub async fn delete_id(&self, id: &str) -> Result<DeleteReceipt, StoreError> {
        let oid = parse_object_id(id)?;
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        Ok(DeleteReceipt {
            deleted_count: result.deleted_count,
        })
    }

    pub async fn delete_ids(&self, ids: &[String]) -> Result<DeleteReceipt, StoreError> {
        let mut oids = Vec::with_capacity(ids.len());
        for id in ids {
            oids.push(parse_object_id(id)?);
        }

        let result = self
            .collection
            .delete_many(doc! { "_id": { "$in": oids } })
            .await?;
        Ok(DeleteReceipt {
            deleted_count: result.deleted_count,
        })
    }

    pub async fn count(&self, filter: Document) -> Result<u64, StoreError> {
        Ok(self.collection.count_documents(filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipts_use_driver_field_names() {
        let insert = serde_json::to_value(InsertReceipt {
            inserted_id: Some("65f0a1b2c3d4e5f6a7b8c9d0".to_string()),
        })
        .unwrap();
        assert_eq!(insert["insertedId"], "65f0a1b2c3d4e5f6a7b8c9d0");

        let update = serde_json::to_value(UpdateReceipt {
            matched_count: 1,
            modified_count: 0,
        })
        .unwrap();
        assert_eq!(update["matchedCount"], 1);
        assert_eq!(update["modifiedCount"], 0);

        let delete = serde_json::to_value(DeleteReceipt { deleted_count: 2 }).unwrap();
        assert_eq!(delete["deletedCount"], 2);
    }

    #[test]
    fn empty_insert_receipt_reports_null_id() {
        let insert = serde_json::to_value(InsertReceipt { inserted_id: None }).unwrap();
        assert!(insert["insertedId"].is_null());
    }
}
