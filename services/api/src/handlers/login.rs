use axum::{
    extract::{Path, Query, State},
    response::Redirect,
};
use serde::Deserialize;
use tracing::info;

use crate::domain::provider::AuthProvider;
use crate::domain::repository::OAuthGateway as _;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::login::CompleteLoginUseCase;

fn parse_provider(segment: &str) -> Result<AuthProvider, ApiError> {
    segment
        .parse()
        .map_err(|_| ApiError::UnsupportedProvider(segment.to_owned()))
}

// ── GET /oauth2/authorize/{provider} ─────────────────────────────────────────

pub async fn authorize(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<Redirect, ApiError> {
    let provider = parse_provider(&provider)?;
    let url = state.oauth.authorize_url(provider)?;
    Ok(Redirect::temporary(&url))
}

// ── GET /oauth2/callback/{provider} ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct CallbackQuery {
    pub code: String,
    // Round-tripped consent-page state; not stored server side.
    #[allow(dead_code)]
    pub state: Option<String>,
}

pub async fn callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(query): Query<CallbackQuery>,
) -> Result<Redirect, ApiError> {
    let provider = parse_provider(&provider)?;

    let usecase = CompleteLoginUseCase {
        users: state.user_repo(),
        gateway: state.oauth.clone(),
        jwt_secret: state.jwt_secret.clone(),
        token_ttl_secs: state.token_ttl_secs,
        redirect_uri: state.redirect_uri.clone(),
    };
    let out = usecase.execute(provider, &query.code).await?;

    info!(user_id = out.user.id, %provider, "login completed");
    Ok(Redirect::temporary(&out.redirect_url))
}
