use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use serde_json::{Map, Value};

use crate::config::Settings;
use crate::db::{to_json, Collection, DeleteOutcome, Filter, InsertOutcome, Store, UpdateOutcome};
use crate::guards::{AuthGuard, OwnerGuard};
use crate::models::job::{whitelisted_update, OWNER_FIELD};
use crate::models::{body_str, body_to_document};
use crate::routes::{identity_filter, parse_id};
use crate::utils::ApiError;

// ============================================================================
// PUBLIC LISTINGS
// ============================================================================

/// Every posted job. Any `category` query parameter is ignored.
#[openapi(tag = "Job")]
#[get("/job-category")]
pub async fn get_jobs_by_category(store: &State<Store>) -> Result<Json<Vec<Value>>, ApiError> {
    let jobs = store.find(Collection::Jobs, Filter::all()).await?;
    Ok(Json(jobs.into_iter().map(to_json).collect()))
}

#[openapi(tag = "Job")]
#[get("/<job_id>/job-details")]
pub async fn get_job_details(
    store: &State<Store>,
    job_id: String,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&job_id)?;

    store
        .find_one(Collection::Jobs, Filter::by_id(id))
        .await?
        .map(|job| Json(to_json(job)))
        .ok_or_else(ApiError::not_found)
}

// ============================================================================
// POSTER ENDPOINTS
// ============================================================================

#[openapi(tag = "Job")]
#[get("/my-posted-jobs?<email>")]
pub async fn get_my_posted_jobs(
    store: &State<Store>,
    settings: &State<Settings>,
    auth: AuthGuard,
    email: Option<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    auth.check_query(email.as_deref())?;

    let filter = identity_filter(OWNER_FIELD, email, &auth, settings);
    let jobs = store.find(Collection::Jobs, filter).await?;
    Ok(Json(jobs.into_iter().map(to_json).collect()))
}

/// Stores the posted document as-is once its `email` matches the caller.
#[openapi(tag = "Job")]
#[post("/add-job", data = "<job>")]
pub async fn add_job(
    store: &State<Store>,
    auth: AuthGuard,
    job: Json<Map<String, Value>>,
) -> Result<Json<InsertOutcome>, ApiError> {
    auth.check_body(body_str(&job, OWNER_FIELD))?;

    let document = body_to_document(&job)?;
    Ok(Json(store.insert_one(Collection::Jobs, document).await?))
}

#[openapi(tag = "Job")]
#[patch("/<posted_job_id>/update-posted-job", data = "<job>")]
pub async fn update_posted_job(
    store: &State<Store>,
    owner: OwnerGuard,
    posted_job_id: String,
    job: Json<Map<String, Value>>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let id = parse_id(&posted_job_id)?;
    let mut filter = Filter::by_id(id);
    let mut update = whitelisted_update(&job)?;

    if let Some(auth) = &owner.auth {
        auth.check_query(body_str(&job, OWNER_FIELD))?;
        filter = filter.and(OWNER_FIELD, auth.email.clone());
        // ownership cannot be dropped by leaving email out
        update.set.insert(OWNER_FIELD, auth.email.clone());
        update.unset.retain(|field| field != OWNER_FIELD);
    }

    Ok(Json(store.update_one(Collection::Jobs, filter, update).await?))
}

#[openapi(tag = "Job")]
#[delete("/<posted_job_id>/delete-posted-job")]
pub async fn delete_posted_job(
    store: &State<Store>,
    owner: OwnerGuard,
    posted_job_id: String,
) -> Result<Json<DeleteOutcome>, ApiError> {
    let id = parse_id(&posted_job_id)?;
    let mut filter = Filter::by_id(id);

    if let Some(auth) = &owner.auth {
        filter = filter.and(OWNER_FIELD, auth.email.clone());
    }

    Ok(Json(store.delete_one(Collection::Jobs, filter).await?))
}
