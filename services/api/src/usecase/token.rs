use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ApiError;

/// JWT claims for issued access tokens. Validation reads the matching
/// `guestline_auth_types::token::JwtClaims`.
#[derive(Debug, Serialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Sign an access token for `user_id`, expiring `ttl_secs` from now.
/// Returns the token plus its expiration timestamp.
pub fn issue_access_token(
    user_id: i64,
    secret: &str,
    ttl_secs: u64,
) -> Result<(String, u64), ApiError> {
    let exp = now_secs() + ttl_secs;
    let claims = TokenClaims {
        sub: user_id.to_string(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))?;
    Ok((token, exp))
}
