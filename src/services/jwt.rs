use jsonwebtoken::{encode, decode, Algorithm, Header, Validation, EncodingKey, DecodingKey};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::Settings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: i64,
    pub iat: i64,
    /// Whatever else the caller put in the document sent to `/jwt`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug)]
pub enum TokenError {
    MissingEmail,
    Jwt(jsonwebtoken::errors::Error),
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::MissingEmail => write!(f, "claims must contain a string email"),
            TokenError::Jwt(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TokenError {}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        TokenError::Jwt(e)
    }
}

/// Signs and verifies the identity token carried in the `token` cookie.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl: i64) -> Self {
        TokenService {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.jwt_secret, settings.jwt_expiry)
    }

    pub fn ttl(&self) -> i64 {
        self.ttl
    }

    pub fn issue(&self, mut document: Map<String, Value>) -> Result<String, TokenError> {
        let email = match document.remove("email") {
            Some(Value::String(email)) => email,
            _ => return Err(TokenError::MissingEmail),
        };
        document.remove("exp");
        document.remove("iat");

        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            email,
            exp: now + self.ttl,
            iat: now,
            extra: document,
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        // audience is not ours to enforce; callers may put any `aud` in their claims
        validation.validate_aud = false;

        let token_data = decode::<Claims>(token, &self.decoding, &validation)?;
        Ok(token_data.claims)
    }
}
