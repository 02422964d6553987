use rocket::request::{self, Request, FromRequest, Outcome};
use rocket::http::Status;
use rocket_okapi::request::OpenApiFromRequest;
use rocket_okapi::r#gen::OpenApiGenerator;
use rocket_okapi::request::RequestHeaderInput;

use crate::config::Settings;
use crate::guards::AuthGuard;

/// Guard for the job update/delete routes. Those routes are open unless
/// `strict_ownership` is set, in which case a valid token is required.
pub struct OwnerGuard {
    pub auth: Option<AuthGuard>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for OwnerGuard {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let strict = match req.rocket().state::<Settings>() {
            Some(settings) => settings.strict_ownership,
            None => return Outcome::Error((Status::InternalServerError, ())),
        };

        if !strict {
            return Outcome::Success(OwnerGuard { auth: None });
        }

        match req.guard::<AuthGuard>().await {
            Outcome::Success(auth) => Outcome::Success(OwnerGuard { auth: Some(auth) }),
            Outcome::Error(e) => Outcome::Error(e),
            Outcome::Forward(f) => Outcome::Forward(f),
        }
    }
}

impl<'a> OpenApiFromRequest<'a> for OwnerGuard {
    fn from_request_input(
        _gen: &mut OpenApiGenerator,
        _name: String,
        _required: bool,
    ) -> rocket_okapi::Result<RequestHeaderInput> {
        Ok(RequestHeaderInput::None)
    }
}
