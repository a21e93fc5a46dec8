use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::WebError;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token signing secret is not configured")]
    NotConfigured,

    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),

    #[error("invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),

    #[error("token subject is not a user id")]
    InvalidSubject,
}

impl From<TokenError> for WebError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::NotConfigured => WebError::Configuration("jwt not configured"),
            TokenError::Signing(e) => WebError::InternalServerError(e.to_string()),
            TokenError::Invalid(_) | TokenError::InvalidSubject => WebError::Unauthorized,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Identity attached to a request once its bearer token has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Clone)]
struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

/// Issues and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    keys: Option<Keys>,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            keys: config
                .jwt_secret
                .as_deref()
                .map(|secret| Keys::new(secret.as_bytes())),
            ttl: Duration::hours(config.token_ttl_hours),
        }
    }

    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, email, Utc::now())
    }

    fn issue_at(
        &self,
        user_id: Uuid,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let keys = self.keys.as_ref().ok_or(TokenError::NotConfigured)?;
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &keys.encoding).map_err(TokenError::Signing)
    }

    pub fn verify(&self, token: &str) -> Result<AuthUser, TokenError> {
        let keys = self.keys.as_ref().ok_or(TokenError::NotConfigured)?;

        let mut validation = Validation::default();
        validation.leeway = 0;

        let data = decode::<Claims>(token, &keys.decoding, &validation)
            .map_err(TokenError::Invalid)?;
        let user_id = Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::InvalidSubject)?;

        Ok(AuthUser {
            user_id,
            email: data.claims.email,
        })
    }
}
