use rocket::serde::json::Json;
use rocket::State;
use rocket::form::FromForm;
use rocket_okapi::openapi;
use serde_json::{Map, Value};

use crate::config::Settings;
use crate::db::{to_json, Collection, InsertOutcome, Store};
use crate::guards::AuthGuard;
use crate::models::bid::{BIDDER_FIELD, CLIENT_FIELD};
use crate::models::{body_str, body_to_document};
use crate::routes::identity_filter;
use crate::utils::ApiError;

#[derive(FromForm, serde::Deserialize, rocket_okapi::okapi::schemars::JsonSchema)]
pub struct BidderQuery {
    #[field(name = "biddingEmail")]
    #[serde(rename = "biddingEmail")]
    pub bidding_email: Option<String>,
}

#[derive(FromForm, serde::Deserialize, rocket_okapi::okapi::schemars::JsonSchema)]
pub struct ClientQuery {
    #[field(name = "clientEmail")]
    #[serde(rename = "clientEmail")]
    pub client_email: Option<String>,
}

/// Bids the caller has placed.
#[openapi(tag = "Bid")]
#[get("/my-bids?<query..>")]
pub async fn get_my_bids(
    store: &State<Store>,
    settings: &State<Settings>,
    auth: AuthGuard,
    query: BidderQuery,
) -> Result<Json<Vec<Value>>, ApiError> {
    auth.check_query(query.bidding_email.as_deref())?;

    let filter = identity_filter(BIDDER_FIELD, query.bidding_email, &auth, settings);
    let bids = store.find(Collection::Bids, filter).await?;
    Ok(Json(bids.into_iter().map(to_json).collect()))
}

/// Bids placed on the caller's postings.
#[openapi(tag = "Bid")]
#[get("/bid-request?<query..>")]
pub async fn get_bid_requests(
    store: &State<Store>,
    settings: &State<Settings>,
    auth: AuthGuard,
    query: ClientQuery,
) -> Result<Json<Vec<Value>>, ApiError> {
    auth.check_query(query.client_email.as_deref())?;

    let filter = identity_filter(CLIENT_FIELD, query.client_email, &auth, settings);
    let bids = store.find(Collection::Bids, filter).await?;
    Ok(Json(bids.into_iter().map(to_json).collect()))
}

#[openapi(tag = "Bid")]
#[post("/bid-on-the-project", data = "<bid>")]
pub async fn bid_on_the_project(
    store: &State<Store>,
    auth: AuthGuard,
    bid: Json<Map<String, Value>>,
) -> Result<Json<InsertOutcome>, ApiError> {
    auth.check_body(body_str(&bid, BIDDER_FIELD))?;

    let document = body_to_document(&bid)?;
    Ok(Json(store.insert_one(Collection::Bids, document).await?))
}
