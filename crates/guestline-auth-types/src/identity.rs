//! Startup-resolved authentication gate and the `CallerIdentity` extractor.

use axum::extract::{FromRef, FromRequestParts};
use http::StatusCode;
use http::request::Parts;

use crate::token::validate_access_token;

/// How caller identity is resolved, decided once at startup.
///
/// `DevelopmentStandIn` accepts every request as a fixed user id. It exists
/// for local development against an empty database and must stay disabled in
/// any production configuration.
#[derive(Debug, Clone)]
pub enum AuthGate {
    Verified { secret: String },
    DevelopmentStandIn { user_id: i64 },
}

/// Caller identity for the current request.
///
/// Returns 401 if the `Authorization` header is absent, is not a bearer
/// token, or the token fails validation. The stand-in gate never rejects.
#[derive(Debug, Clone, Copy)]
pub struct CallerIdentity {
    pub user_id: i64,
}

fn bearer_value(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
}

impl<S> FromRequestParts<S> for CallerIdentity
where
    AuthGate: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let resolved = match AuthGate::from_ref(state) {
            AuthGate::DevelopmentStandIn { user_id } => Ok(Self { user_id }),
            AuthGate::Verified { secret } => bearer_value(parts)
                .and_then(|token| validate_access_token(token, &secret).ok())
                .map(|info| Self {
                    user_id: info.user_id,
                })
                .ok_or(StatusCode::UNAUTHORIZED),
        };

        async move { resolved }
    }
}
