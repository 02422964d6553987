use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Database};
use rocket::futures::TryStreamExt;

use super::{
    id_to_string, Collection, DeleteOutcome, DocumentStore, Filter, InsertOutcome, StoreResult,
    Update, UpdateOutcome,
};

pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(uri).await?;

        // Test connection
        client
            .database("admin")
            .run_command(doc! {"ping": 1}, None)
            .await?;

        Ok(MongoStore { db: client.database(database) })
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.db.collection::<Document>(collection.name())
    }
}

fn filter_document(filter: &Filter) -> Document {
    filter
        .clauses()
        .iter()
        .map(|(field, value)| (field.clone(), value.clone()))
        .collect()
}

fn update_document(update: Update) -> Document {
    let mut operators = Document::new();
    if !update.set.is_empty() {
        operators.insert("$set", update.set);
    }
    if !update.unset.is_empty() {
        let unset: Document = update
            .unset
            .into_iter()
            .map(|field| (field, Bson::String(String::new())))
            .collect();
        operators.insert("$unset", unset);
    }
    operators
}

#[rocket::async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: Collection, filter: Filter) -> StoreResult<Vec<Document>> {
        let documents = self
            .collection(collection)
            .find(filter_document(&filter), None)
            .await?
            .try_collect()
            .await?;
        Ok(documents)
    }

    async fn find_one(&self, collection: Collection, filter: Filter) -> StoreResult<Option<Document>> {
        Ok(self
            .collection(collection)
            .find_one(filter_document(&filter), None)
            .await?)
    }

    async fn insert_one(&self, collection: Collection, document: Document) -> StoreResult<InsertOutcome> {
        let res = self.collection(collection).insert_one(document, None).await?;
        Ok(InsertOutcome {
            acknowledged: true,
            inserted_id: id_to_string(&res.inserted_id),
        })
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        update: Update,
    ) -> StoreResult<UpdateOutcome> {
        let res = self
            .collection(collection)
            .update_one(filter_document(&filter), update_document(update), None)
            .await?;
        Ok(UpdateOutcome {
            acknowledged: true,
            matched_count: res.matched_count,
            modified_count: res.modified_count,
        })
    }

    async fn delete_one(&self, collection: Collection, filter: Filter) -> StoreResult<DeleteOutcome> {
        let res = self
            .collection(collection)
            .delete_one(filter_document(&filter), None)
            .await?;
        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: res.deleted_count,
        })
    }
}
