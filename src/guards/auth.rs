use rocket::request::{self, FromRequest, Request, Outcome};
use rocket::http::Status;
use log::debug;

use crate::services::TokenService;
use crate::utils::ApiError;

// === OpenAPI (compatible with rocket_okapi 0.8.0 / 0.8.1) ===
use rocket_okapi::request::{OpenApiFromRequest, RequestHeaderInput};
use rocket_okapi::r#gen::OpenApiGenerator;

pub const TOKEN_COOKIE: &str = "token";

/// Cookie-based JWT authentication guard.
/// Fails with 401 when the `token` cookie is missing or does not verify.
pub struct AuthGuard {
    pub email: String,
}

impl AuthGuard {
    /// Identity check for an optional query parameter: only a present,
    /// different value is rejected.
    pub fn check_query(&self, claimed: Option<&str>) -> Result<(), ApiError> {
        match claimed {
            Some(claimed) if claimed != self.email => Err(ApiError::forbidden()),
            _ => Ok(()),
        }
    }

    /// Identity check for a body field: an absent value is a mismatch.
    pub fn check_body(&self, claimed: Option<&str>) -> Result<(), ApiError> {
        match claimed {
            Some(claimed) if claimed == self.email => Ok(()),
            _ => Err(ApiError::forbidden()),
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthGuard {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let Some(tokens) = req.rocket().state::<TokenService>() else {
            return Outcome::Error((Status::InternalServerError, ()));
        };

        match req.cookies().get(TOKEN_COOKIE) {
            Some(cookie) => match tokens.verify(cookie.value()) {
                Ok(claims) => Outcome::Success(AuthGuard { email: claims.email }),
                Err(e) => {
                    debug!("rejected token on {}: {}", req.uri(), e);
                    Outcome::Error((Status::Unauthorized, ()))
                }
            },
            None => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}

/// === OpenAPI Integration (Fallback for older versions) ===
/// The token travels in a cookie, so there is no header to document.
impl<'a> OpenApiFromRequest<'a> for AuthGuard {
    fn from_request_input(
        _gen: &mut OpenApiGenerator,
        _name: String,
        _required: bool,
    ) -> rocket_okapi::Result<RequestHeaderInput> {
        Ok(RequestHeaderInput::None)
    }
}
