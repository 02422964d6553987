pub mod job;
pub mod bid;

use mongodb::bson::{self, Document};
use serde_json::{Map, Value};

use crate::utils::ApiError;

/// Request bodies are stored as sent; this only changes the representation.
pub fn body_to_document(body: &Map<String, Value>) -> Result<Document, ApiError> {
    bson::to_document(body).map_err(|_| ApiError::bad_request("body is not a storable document"))
}

/// String value of `field` in a request body, if it is a string.
pub fn body_str<'a>(body: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    body.get(field).and_then(Value::as_str)
}
