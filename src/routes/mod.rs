pub mod root;
pub mod job;
pub mod bid;

use mongodb::bson::oid::ObjectId;

use crate::config::Settings;
use crate::db::Filter;
use crate::guards::AuthGuard;
use crate::utils::ApiError;

pub(crate) fn parse_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::invalid_id())
}

/// Filter for the "my ..." listings. A present identity parameter has already
/// been checked against the token; an omitted one lists everything unless
/// `strict_ownership` narrows it to the token owner.
pub(crate) fn identity_filter(
    field: &str,
    claimed: Option<String>,
    auth: &AuthGuard,
    settings: &Settings,
) -> Filter {
    match claimed {
        Some(email) => Filter::where_eq(field, email),
        None if settings.strict_ownership => Filter::where_eq(field, auth.email.clone()),
        None => Filter::all(),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use rocket::figment::providers::Serialized;
    use rocket::figment::Figment;
    use rocket::http::Cookie;
    use rocket::local::asynchronous::Client;
    use serde_json::{json, Value};

    use crate::db::memory::MemoryStore;
    use crate::db::Store;
    use crate::guards::auth::TOKEN_COOKIE;
    use crate::services::TokenService;

    pub const SECRET: &str = "test-secret";

    pub async fn client(strict_ownership: bool) -> (Client, Arc<MemoryStore>) {
        // global so the values win over any profile in Rocket.toml
        let figment = rocket::Config::figment()
            .merge(Serialized::global("jwt_secret", SECRET))
            .merge(Serialized::global("strict_ownership", strict_ownership))
            .merge(Serialized::global("allowed_origins", vec!["http://localhost:5173"]));

        client_from(figment).await
    }

    /// Client running with the cookie flags of a `Rocket.toml` profile.
    pub async fn client_in_profile(profile: &str) -> (Client, Arc<MemoryStore>) {
        let figment = rocket::Config::figment()
            .select(profile)
            .merge(Serialized::global("jwt_secret", SECRET));

        client_from(figment).await
    }

    async fn client_from(figment: Figment) -> (Client, Arc<MemoryStore>) {
        let memory = Arc::new(MemoryStore::new());
        let store: Store = memory.clone();
        let rocket = crate::build(figment).manage(store);

        let client = Client::tracked(rocket).await.expect("valid rocket instance");
        (client, memory)
    }

    pub fn token_cookie(email: &str) -> Cookie<'static> {
        token_cookie_with(&TokenService::new(SECRET, 3600), email)
    }

    pub fn expired_cookie(email: &str) -> Cookie<'static> {
        token_cookie_with(&TokenService::new(SECRET, -60), email)
    }

    pub fn forged_cookie(email: &str) -> Cookie<'static> {
        token_cookie_with(&TokenService::new("someone-else", 3600), email)
    }

    fn token_cookie_with(tokens: &TokenService, email: &str) -> Cookie<'static> {
        let claims = json!({ "email": email });
        let token = tokens
            .issue(claims.as_object().cloned().unwrap_or_default())
            .expect("claims carry an email");
        Cookie::new(TOKEN_COOKIE, token)
    }

    pub fn message(body: &Value) -> &str {
        body["message"].as_str().unwrap_or_default()
    }
}
