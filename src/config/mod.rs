use rocket::figment::{Figment, providers::Env};
use rocket::http::SameSite;
use rocket::Config as RocketConfig;
use serde::Deserialize;

/// Deployment settings, extracted once at startup and managed by Rocket.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_mongodb_uri")]
    pub mongodb_uri: String,
    #[serde(default = "default_database_name")]
    pub database_name: String,
    pub jwt_secret: String,
    #[serde(default = "default_jwt_expiry")]
    pub jwt_expiry: i64,
    #[serde(default = "default_true")]
    pub cookie_http_only: bool,
    #[serde(default)]
    pub cookie_secure: bool,
    #[serde(default = "default_same_site")]
    pub cookie_same_site: String,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    /// Gate job update/delete and scope list routes to the token owner
    /// when the identity query parameter is omitted.
    #[serde(default)]
    pub strict_ownership: bool,
}

fn default_mongodb_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database_name() -> String {
    "gigGrowDB".to_string()
}

fn default_jwt_expiry() -> i64 {
    3600
}

fn default_true() -> bool {
    true
}

fn default_same_site() -> String {
    "strict".to_string()
}

impl Settings {
    /// Rocket's own figment (`Rocket.toml` for the selected profile plus
    /// `ROCKET_*` overrides) and the bare `PORT` variable hosts usually set.
    pub fn figment() -> Figment {
        RocketConfig::figment().merge(Env::raw().only(&["port"]).global())
    }

    pub fn same_site(&self) -> SameSite {
        match self.cookie_same_site.to_lowercase().as_str() {
            "none" => SameSite::None,
            "lax" => SameSite::Lax,
            _ => SameSite::Strict,
        }
    }

    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == "*" || o == origin)
    }
}

#[cfg(test)]
impl Settings {
    pub fn for_tests() -> Self {
        Settings {
            mongodb_uri: default_mongodb_uri(),
            database_name: default_database_name(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiry: default_jwt_expiry(),
            cookie_http_only: true,
            cookie_secure: false,
            cookie_same_site: default_same_site(),
            allowed_origins: vec!["http://localhost:5173".to_string()],
            strict_ownership: false,
        }
    }
}
