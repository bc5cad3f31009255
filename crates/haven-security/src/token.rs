//! Signed-token handling (access tokens and password-reset tokens)

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
}

impl Claims {
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

const TOKEN_TYPE_ACCESS: &str = "access";
const TOKEN_TYPE_RESET: &str = "reset";

/// HS256 token signing and validation against a single configured secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    reset_token_expiry: i64,
}

impl TokenService {
    pub fn new(secret: &str, access_expiry: i64, reset_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry: access_expiry,
            reset_token_expiry: reset_expiry,
        }
    }

    pub fn generate_access_token(&self, user_id: i32) -> Result<String, TokenError> {
        self.generate_token(user_id, TOKEN_TYPE_ACCESS, self.access_token_expiry)
    }

    /// Issues a reset token with an absolute expiry `reset_token_expiry`
    /// seconds from now.
    pub fn generate_reset_token(&self, user_id: i32) -> Result<String, TokenError> {
        self.generate_token(user_id, TOKEN_TYPE_RESET, self.reset_token_expiry)
    }

    fn generate_token(
        &self,
        user_id: i32,
        token_type: &str,
        expiry: i64,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry)).timestamp(),
            token_type: token_type.to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::CreationError(e.to_string()))
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.decode_claims(token)?;
        if claims.token_type != TOKEN_TYPE_ACCESS {
            return Err(TokenError::ValidationError("wrong token type".into()));
        }
        Ok(claims)
    }

    /// Expiry is data here, not a failure: an expired reset token yields
    /// `Ok(None)`. Only a malformed or forged token is an `Err`.
    pub fn validate_reset_token(&self, token: &str) -> Result<Option<Claims>, TokenError> {
        match self.decode_claims(token) {
            Ok(claims) if claims.token_type == TOKEN_TYPE_RESET => Ok(Some(claims)),
            Ok(_) => Err(TokenError::ValidationError("wrong token type".into())),
            Err(TokenError::TokenExpired) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        // Expiries are absolute; no grace window.
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::ValidationError(e.to_string()),
            })
    }
}
