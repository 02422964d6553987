use std::collections::HashMap;

use mongodb::bson::{oid::ObjectId, Document};
use tokio::sync::RwLock;

use super::{
    id_to_string, Collection, DeleteOutcome, DocumentStore, Filter, InsertOutcome, StoreResult,
    Update, UpdateOutcome,
};

/// In-process stand-in for MongoDB with the same equality-filter semantics.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

fn matches(filter: &Filter, document: &Document) -> bool {
    filter
        .clauses()
        .iter()
        .all(|(field, value)| document.get(field) == Some(value))
}

#[rocket::async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: Collection, filter: Filter) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| matches(&filter, d)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(&self, collection: Collection, filter: Filter) -> StoreResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| matches(&filter, d)).cloned()))
    }

    async fn insert_one(&self, collection: Collection, mut document: Document) -> StoreResult<InsertOutcome> {
        if !document.contains_key("_id") {
            document.insert("_id", ObjectId::new());
        }
        let inserted_id = document.get("_id").map(id_to_string).unwrap_or_default();
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .push(document);
        Ok(InsertOutcome { acknowledged: true, inserted_id })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        update: Update,
    ) -> StoreResult<UpdateOutcome> {
        let mut collections = self.collections.write().await;
        let target = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| matches(&filter, d)));

        let Some(document) = target else {
            return Ok(UpdateOutcome { acknowledged: true, matched_count: 0, modified_count: 0 });
        };

        let before = document.clone();
        for (field, value) in update.set {
            document.insert(field, value);
        }
        for field in &update.unset {
            document.remove(field);
        }

        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: 1,
            modified_count: u64::from(*document != before),
        })
    }

    async fn delete_one(&self, collection: Collection, filter: Filter) -> StoreResult<DeleteOutcome> {
        let mut collections = self.collections.write().await;
        let position = collections
            .get(&collection)
            .and_then(|docs| docs.iter().position(|d| matches(&filter, d)));

        let deleted_count = match (position, collections.get_mut(&collection)) {
            (Some(index), Some(docs)) => {
                docs.remove(index);
                1
            }
            _ => 0,
        };
        Ok(DeleteOutcome { acknowledged: true, deleted_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[rocket::async_test]
    async fn insert_assigns_an_object_id() {
        let store = MemoryStore::new();
        let outcome = store.insert_one(Collection::Jobs, doc! { "email": "a@x.com" }).await.unwrap();
        let id = ObjectId::parse_str(&outcome.inserted_id).unwrap();

        let found = store.find_one(Collection::Jobs, Filter::by_id(id)).await.unwrap().unwrap();
        assert_eq!(found.get_str("email").unwrap(), "a@x.com");
    }

    #[rocket::async_test]
    async fn unchanged_update_matches_without_modifying() {
        let store = MemoryStore::new();
        store.insert_one(Collection::Bids, doc! { "biddingEmail": "b@x.com" }).await.unwrap();

        let update = Update { set: doc! { "biddingEmail": "b@x.com" }, unset: vec![] };
        let outcome = store
            .update_one(Collection::Bids, Filter::where_eq("biddingEmail", "b@x.com"), update)
            .await
            .unwrap();
        assert_eq!(outcome.matched_count, 1);
        assert_eq!(outcome.modified_count, 0);
    }

    #[rocket::async_test]
    async fn collections_are_isolated() {
        let store = MemoryStore::new();
        store.insert_one(Collection::Jobs, doc! { "email": "a@x.com" }).await.unwrap();
        assert!(store.find(Collection::Bids, Filter::all()).await.unwrap().is_empty());
        let deleted = store.delete_one(Collection::Bids, Filter::all()).await.unwrap();
        assert_eq!(deleted.deleted_count, 0);
    }
}
