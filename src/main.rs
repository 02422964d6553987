#[macro_use]
extern crate rocket;

mod config;
mod db;
mod guards;
mod models;
mod routes;
mod services;
mod utils;

use dotenvy::dotenv;
use log::info;
use rocket::fairing::{AdHoc, Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::http::Header;
use rocket::{Build, Request, Response, Rocket};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::{SwaggerUIConfig, make_swagger_ui};

use crate::config::Settings;
use crate::services::TokenService;

/* ----------------------------- CORS ----------------------------- */

/// Echoes the request origin back when it is on the configured allow list.
/// Credentials are allowed so the `token` cookie travels cross-origin.
pub struct CORS;

#[rocket::async_trait]
impl Fairing for CORS {
    fn info(&self) -> Info {
        Info {
            name: "CORS",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let Some(settings) = request.rocket().state::<Settings>() else {
            return;
        };

        if let Some(origin) = request.headers().get_one("Origin") {
            if settings.is_origin_allowed(origin) {
                response.set_header(Header::new("Access-Control-Allow-Origin", origin.to_string()));
                response.set_header(Header::new("Vary", "Origin"));
            }
        }

        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, PATCH, DELETE, OPTIONS",
        ));

        response.set_header(Header::new(
            "Access-Control-Allow-Headers",
            "Content-Type",
        ));

        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

/* ----------------------------- OPTIONS ----------------------------- */

#[options("/<_..>")]
fn options_handler() {}

/* ----------------------------- ERRORS ----------------------------- */

#[catch(400)]
fn bad_request() -> rocket::serde::json::Value {
    rocket::serde::json::json!({ "message": "bad request" })
}

#[catch(401)]
fn unauthorized() -> rocket::serde::json::Value {
    rocket::serde::json::json!({ "message": "unauthorized" })
}

#[catch(403)]
fn forbidden() -> rocket::serde::json::Value {
    rocket::serde::json::json!({ "message": "forbidden" })
}

#[catch(404)]
fn not_found() -> rocket::serde::json::Value {
    rocket::serde::json::json!({ "message": "not found" })
}

#[catch(422)]
fn unprocessable() -> rocket::serde::json::Value {
    rocket::serde::json::json!({ "message": "body must be a JSON object" })
}

#[catch(500)]
fn internal_error() -> rocket::serde::json::Value {
    rocket::serde::json::json!({ "message": "internal server error" })
}

/* ----------------------------- SWAGGER ----------------------------- */

fn swagger_config() -> SwaggerUIConfig {
    SwaggerUIConfig {
        url: "/api/v1/openapi.json".to_string(),
        ..Default::default()
    }
}

/* ----------------------------- BUILD ----------------------------- */

/// Everything except the database connection, which `db::init` adds at launch.
pub fn build(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(AdHoc::config::<Settings>())
        .attach(AdHoc::try_on_ignite("Token service", |rocket| async move {
            let tokens = rocket.state::<Settings>().map(TokenService::from_settings);
            match tokens {
                Some(tokens) => Ok(rocket.manage(tokens)),
                None => Err(rocket),
            }
        }))
        .attach(CORS)
        .mount("/", routes![options_handler, routes::root::index, routes::root::issue_token])
        .mount(
            "/api/v1",
            openapi_get_routes![
                // Jobs
                routes::job::get_jobs_by_category,
                routes::job::get_job_details,
                routes::job::get_my_posted_jobs,
                routes::job::add_job,
                routes::job::update_posted_job,
                routes::job::delete_posted_job,
                // Bids
                routes::bid::get_my_bids,
                routes::bid::get_bid_requests,
                routes::bid::bid_on_the_project,
            ],
        )
        .mount("/api/docs", make_swagger_ui(&swagger_config()))
        .register(
            "/",
            catchers![bad_request, unauthorized, forbidden, not_found, unprocessable, internal_error],
        )
}

/* ----------------------------- LAUNCH ----------------------------- */

#[launch]
fn rocket() -> Rocket<Build> {
    dotenv().ok();
    env_logger::init();

    info!("🚀 GigGrow API starting");
    info!("📚 Swagger UI → /api/docs");

    build(Settings::figment()).attach(db::init())
}
