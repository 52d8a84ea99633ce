use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use warp::{Filter, Rejection};

use crate::error::RankingError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub telegram_id: String,
    pub exp: usize,
}

/// Telegram id taken from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequesterIdentity(pub String);

pub fn issue_token(
    telegram_id: &str,
    secret: &str,
    ttl: Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        telegram_id: telegram_id.to_string(),
        exp: (Utc::now() + ttl).timestamp().max(0) as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, RankingError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|error| {
        log::debug!("rejected bearer token: {}", error);
        RankingError::Unauthorized
    })
}

pub fn identity_from_header(header: Option<&str>, secret: &str) -> Result<RequesterIdentity, RankingError> {
    let token = header
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(RankingError::Unauthorized)?;

    let claims = verify_token(token, secret)?;
    if claims.telegram_id.is_empty() {
        return Err(RankingError::Unauthorized);
    }

    Ok(RequesterIdentity(claims.telegram_id))
}

/// Rejects with `RankingError::Unauthorized` unless the request carries a
/// valid `Authorization: Bearer` token.
pub fn with_identity(
    secret: Arc<String>,
) -> impl Filter<Extract = (RequesterIdentity,), Error = Rejection> + Clone {
    warp::header::optional::<String>("authorization")
        .and(warp::any().map(move || secret.clone()))
        .and_then(|header: Option<String>, secret: Arc<String>| async move {
            identity_from_header(header.as_deref(), &secret).map_err(warp::reject::custom)
        })
}
