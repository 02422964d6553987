use mongodb::bson::{self, Document};
use serde_json::{Map, Value};

use crate::db::Update;
use crate::utils::ApiError;

pub const OWNER_FIELD: &str = "email";

/// The only fields an update may touch.
pub const UPDATABLE_FIELDS: [&str; 7] = [
    "email",
    "jobTitle",
    "deadline",
    "description",
    "category",
    "minimumPrice",
    "maximumPrice",
];

/// Builds the update for a posted job: whitelisted fields present in the body
/// are overwritten, whitelisted fields missing from it are unset, and
/// everything else in the body is dropped.
pub fn whitelisted_update(body: &Map<String, Value>) -> Result<Update, ApiError> {
    let mut set = Document::new();
    let mut unset = Vec::new();

    for field in UPDATABLE_FIELDS {
        match body.get(field) {
            Some(value) => {
                let value = bson::to_bson(value)
                    .map_err(|_| ApiError::bad_request(format!("{} is not storable", field)))?;
                set.insert(field, value);
            }
            None => unset.push(field.to_string()),
        }
    }

    Ok(Update { set, unset })
}
