use rocket::http::{Cookie, CookieJar};
use rocket::serde::json::Json;
use rocket::time::Duration;
use rocket::State;
use serde_json::{Map, Value};
use log::error;

use crate::config::Settings;
use crate::guards::auth::TOKEN_COOKIE;
use crate::services::jwt::TokenError;
use crate::services::TokenService;
use crate::utils::ApiError;

#[get("/")]
pub fn index() -> &'static str {
    "Server is running..."
}

/// Signs the posted identity document and hands it back as the `token` cookie.
#[post("/jwt", data = "<claims>")]
pub fn issue_token(
    tokens: &State<TokenService>,
    settings: &State<Settings>,
    cookies: &CookieJar<'_>,
    claims: Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    let token = tokens.issue(claims.into_inner()).map_err(|e| match e {
        TokenError::MissingEmail => ApiError::bad_request("email is required"),
        TokenError::Jwt(e) => {
            error!("failed to sign token: {}", e);
            ApiError::internal_error()
        }
    })?;

    let cookie = Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(settings.cookie_http_only)
        .secure(settings.cookie_secure)
        .same_site(settings.same_site())
        .max_age(Duration::seconds(tokens.ttl()));
    cookies.add(cookie);

    Ok(Json(serde_json::json!({ "success": true })))
}
