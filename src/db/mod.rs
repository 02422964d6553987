use std::fmt;
use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, Bson, Document};
use rocket::fairing::AdHoc;
use rocket_okapi::okapi::schemars::JsonSchema;
use serde::Serialize;
use log::{error, info};

use crate::config::Settings;

mod mongo;
#[cfg(test)]
pub mod memory;

pub use mongo::MongoStore;

/// Handle to the document store shared by every handler.
pub type Store = Arc<dyn DocumentStore>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Jobs,
    Bids,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Jobs => "jobs",
            Collection::Bids => "bids",
        }
    }
}

/// Conjunction of equality clauses. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, Bson)>,
}

impl Filter {
    pub fn all() -> Self {
        Filter::default()
    }

    pub fn by_id(id: ObjectId) -> Self {
        Filter::where_eq("_id", id)
    }

    pub fn where_eq(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Filter::all().and(field, value)
    }

    pub fn and(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        self.clauses.push((field.into(), value.into()));
        self
    }

    pub fn clauses(&self) -> &[(String, Bson)] {
        &self.clauses
    }
}

/// Fields to overwrite plus fields to remove.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    pub set: Document,
    pub unset: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    pub inserted_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

#[derive(Debug)]
pub struct StoreError(mongodb::error::Error);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "database error: {}", self.0)
    }
}

impl std::error::Error for StoreError {}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        StoreError(e)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The five operations the handlers need from a document database.
#[rocket::async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: Collection, filter: Filter) -> StoreResult<Vec<Document>>;

    async fn find_one(&self, collection: Collection, filter: Filter) -> StoreResult<Option<Document>>;

    async fn insert_one(&self, collection: Collection, document: Document) -> StoreResult<InsertOutcome>;

    async fn update_one(
        &self,
        collection: Collection,
        filter: Filter,
        update: Update,
    ) -> StoreResult<UpdateOutcome>;

    async fn delete_one(&self, collection: Collection, filter: Filter) -> StoreResult<DeleteOutcome>;
}

/// Renders a stored document the way clients expect it: `_id` as a hex
/// string, everything else as relaxed extended JSON.
pub fn to_json(mut document: Document) -> serde_json::Value {
    if let Ok(id) = document.get_object_id("_id") {
        document.insert("_id", id.to_hex());
    }
    Bson::Document(document).into_relaxed_extjson()
}

pub(crate) fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn init() -> AdHoc {
    AdHoc::try_on_ignite("MongoDB", |rocket| async move {
        let Some(settings) = rocket.state::<Settings>().cloned() else {
            error!("✗ Settings must be managed before the MongoDB fairing runs");
            return Err(rocket);
        };

        match MongoStore::connect(&settings.mongodb_uri, &settings.database_name).await {
            Ok(store) => {
                info!("✓ MongoDB connected successfully");
                let store: Store = Arc::new(store);
                Ok(rocket.manage(store))
            }
            Err(e) => {
                error!("✗ Failed to connect to MongoDB: {}", e);
                Err(rocket)
            }
        }
    })
}
