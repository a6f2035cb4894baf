//! Bearer token authentication.
//!
//! Tokens are HS256 JWTs carrying the user's id and profile. The middleware
//! turns a valid token into a [`Principal`] stored in the request extensions;
//! protected handlers read the user id from there and nowhere else.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    Expired,
    Issue(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingToken => f.write_str("No token provided"),
            Self::InvalidToken => f.write_str("Invalid token"),
            Self::Expired => f.write_str("Token expired"),
            Self::Issue(err) => write!(f, "could not issue token: {err}"),
        }
    }
}

impl std::error::Error for AuthError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub iat: i64,
    pub exp: i64,
}

/// The authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
}

/// Signing and verification keys derived from one shared secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Signs a token for `user`, valid for the configured lifetime.
    pub fn issue(&self, user: &engine::User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            user_id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        self.sign(&claims)
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|err| AuthError::Issue(err.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken,
            })
    }
}

/// `false` when there is no `Authorization` header or its value has no
/// credential after the scheme (`Bearer`, `Bearer `).
fn carries_token(headers: &HeaderMap) -> bool {
    match headers.get(AUTHORIZATION).map(HeaderValue::to_str) {
        None => false,
        Some(Ok(value)) => value.split(' ').nth(1).is_some_and(|token| !token.is_empty()),
        Some(Err(_)) => true,
    }
}

/// Rejects the request unless it carries a valid bearer token.
pub(crate) async fn require_principal(
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let headers = request.headers();
    if !carries_token(headers) {
        tracing::warn!("{} {}: no token provided", request.method(), request.uri().path());
        return Err(AuthError::MissingToken.into());
    }
    let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() else {
        tracing::warn!("{} {}: malformed authorization header", request.method(), request.uri().path());
        return Err(AuthError::InvalidToken.into());
    };

    let claims = state.tokens.verify(bearer.token()).inspect_err(|err| {
        tracing::warn!("{} {}: {err}", request.method(), request.uri().path());
    })?;

    request.extensions_mut().insert(Principal {
        user_id: claims.user_id,
        email: claims.email,
    });
    Ok(next.run(request).await)
}
