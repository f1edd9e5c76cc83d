use anyhow::Context as _;
use tracing::{debug, info};
use url::Url;

use crate::domain::provider::{AuthProvider, OAuthProfile};
use crate::domain::repository::{OAuthGateway, UserRepository};
use crate::domain::types::{NewUser, User};
use crate::error::ApiError;
use crate::usecase::token::issue_access_token;

/// Resolve the local user for a provider profile, creating it on first login.
///
/// Existing users are updated in place only when a profile field actually
/// changed; an avatar the provider did not supply never clears a stored one.
/// Calling this twice with identical attributes leaves identical state.
pub async fn resolve_or_create<R: UserRepository>(
    repo: &R,
    provider: AuthProvider,
    profile: OAuthProfile,
) -> Result<User, ApiError> {
    match repo
        .find_by_provider_identity(provider, &profile.provider_id)
        .await?
    {
        Some(existing) => {
            let avatar_changed =
                profile.avatar_url.is_some() && profile.avatar_url != existing.avatar_url;
            if existing.email == profile.email && existing.name == profile.name && !avatar_changed {
                debug!(user_id = existing.id, %provider, "profile unchanged");
                return Ok(existing);
            }
            let avatar_url = if avatar_changed {
                profile.avatar_url.as_deref()
            } else {
                existing.avatar_url.as_deref()
            };
            let updated = repo
                .update_profile(existing.id, &profile.email, &profile.name, avatar_url)
                .await?;
            info!(user_id = updated.id, %provider, "user profile refreshed");
            Ok(updated)
        }
        None => {
            let created = repo
                .create(&NewUser {
                    email: profile.email,
                    name: profile.name,
                    avatar_url: profile.avatar_url,
                    provider,
                    provider_id: profile.provider_id,
                })
                .await?;
            info!(user_id = created.id, %provider, "user created on first login");
            Ok(created)
        }
    }
}

// ── CompleteLogin ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct LoginRedirect {
    pub user: User,
    pub access_token: String,
    pub redirect_url: String,
}

/// Finish an OAuth2 callback: exchange the code, normalize the profile,
/// resolve the user, mint a token, and build the front-end redirect URL.
pub struct CompleteLoginUseCase<U: UserRepository, G: OAuthGateway> {
    pub users: U,
    pub gateway: G,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    pub redirect_uri: String,
}

impl<U: UserRepository, G: OAuthGateway> CompleteLoginUseCase<U, G> {
    pub async fn execute(
        &self,
        provider: AuthProvider,
        code: &str,
    ) -> Result<LoginRedirect, ApiError> {
        let attrs = self.gateway.fetch_profile(provider, code).await?;
        let profile = OAuthProfile::from_attributes(provider, &attrs)
            .map_err(|e| ApiError::ProviderExchange(e.into()))?;

        let user = resolve_or_create(&self.users, provider, profile).await?;

        let (access_token, _exp) =
            issue_access_token(user.id, &self.jwt_secret, self.token_ttl_secs)?;

        let mut url = Url::parse(&self.redirect_uri)
            .context("parse configured redirect URI")
            .map_err(ApiError::Internal)?;
        url.query_pairs_mut().append_pair("token", &access_token);

        Ok(LoginRedirect {
            user,
            access_token,
            redirect_url: url.into(),
        })
    }
}
