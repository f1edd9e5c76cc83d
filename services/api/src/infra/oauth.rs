use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context as _, anyhow};
use rand::{RngExt as _, distr::Alphanumeric};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::config::{ApiConfig, ProviderCredentials};
use crate::domain::provider::AuthProvider;
use crate::domain::repository::OAuthGateway;
use crate::error::ApiError;

/// Static endpoint data for one provider.
struct ProviderEndpoints {
    authorize: &'static str,
    token: &'static str,
    userinfo: &'static str,
    scope: &'static str,
}

fn endpoints(provider: AuthProvider) -> ProviderEndpoints {
    match provider {
        AuthProvider::Google => ProviderEndpoints {
            authorize: "https://accounts.google.com/o/oauth2/v2/auth",
            token: "https://oauth2.googleapis.com/token",
            userinfo: "https://www.googleapis.com/oauth2/v3/userinfo",
            scope: "openid email profile",
        },
        AuthProvider::Github => ProviderEndpoints {
            authorize: "https://github.com/login/oauth/authorize",
            token: "https://github.com/login/oauth/access_token",
            userinfo: "https://api.github.com/user",
            scope: "read:user user:email",
        },
        AuthProvider::Microsoft => ProviderEndpoints {
            authorize: "https://login.microsoftonline.com/common/oauth2/v2.0/authorize",
            token: "https://login.microsoftonline.com/common/oauth2/v2.0/token",
            userinfo: "https://graph.microsoft.com/v1.0/me",
            scope: "openid email profile User.Read",
        },
        AuthProvider::Facebook => ProviderEndpoints {
            authorize: "https://www.facebook.com/v19.0/dialog/oauth",
            token: "https://graph.facebook.com/v19.0/oauth/access_token",
            userinfo: "https://graph.facebook.com/me?fields=id,name,email,picture",
            scope: "email public_profile",
        },
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// reqwest-backed implementation of [`OAuthGateway`].
///
/// Holds the client credentials of every configured provider; a provider
/// without credentials is treated the same as an unknown one.
#[derive(Clone)]
pub struct HttpOAuthGateway {
    http: reqwest::Client,
    credentials: Arc<HashMap<AuthProvider, ProviderCredentials>>,
    public_base_url: String,
}

impl HttpOAuthGateway {
    pub fn from_config(config: &ApiConfig) -> Self {
        let mut credentials = HashMap::new();
        let configured = [
            (AuthProvider::Google, &config.google),
            (AuthProvider::Github, &config.github),
            (AuthProvider::Microsoft, &config.microsoft),
            (AuthProvider::Facebook, &config.facebook),
        ];
        for (provider, creds) in configured {
            if let Some(creds) = creds {
                credentials.insert(provider, creds.clone());
            }
        }
        Self {
            http: reqwest::Client::new(),
            credentials: Arc::new(credentials),
            public_base_url: config.public_base_url.clone(),
        }
    }

    fn creds(&self, provider: AuthProvider) -> Result<&ProviderCredentials, ApiError> {
        self.credentials
            .get(&provider)
            .ok_or_else(|| ApiError::UnsupportedProvider(provider.slug().to_owned()))
    }

    fn callback_url(&self, provider: AuthProvider) -> String {
        format!(
            "{}/oauth2/callback/{}",
            self.public_base_url.trim_end_matches('/'),
            provider.slug()
        )
    }
}

impl OAuthGateway for HttpOAuthGateway {
    fn authorize_url(&self, provider: AuthProvider) -> Result<String, ApiError> {
        let creds = self.creds(provider)?;
        let ep = endpoints(provider);

        let state: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();

        let mut url = Url::parse(ep.authorize)
            .context("parse authorize endpoint")
            .map_err(ApiError::Internal)?;
        url.query_pairs_mut()
            .append_pair("client_id", &creds.client_id)
            .append_pair("redirect_uri", &self.callback_url(provider))
            .append_pair("response_type", "code")
            .append_pair("scope", ep.scope)
            .append_pair("state", &state);
        Ok(url.into())
    }

    async fn fetch_profile(&self, provider: AuthProvider, code: &str) -> Result<Value, ApiError> {
        let creds = self.creds(provider)?;
        let ep = endpoints(provider);
        let redirect_uri = self.callback_url(provider);

        let token: TokenResponse = self
            .http
            .post(ep.token)
            // GitHub answers with urlencoded unless JSON is asked for.
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", creds.client_id.as_str()),
                ("client_secret", creds.client_secret.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
            ])
            .send()
            .await
            .context("provider token request")
            .map_err(ApiError::ProviderExchange)?
            .error_for_status()
            .context("provider token response status")
            .map_err(ApiError::ProviderExchange)?
            .json()
            .await
            .context("decode provider token response")
            .map_err(ApiError::ProviderExchange)?;

        if token.access_token.is_empty() {
            return Err(ApiError::ProviderExchange(anyhow!(
                "provider returned empty access token"
            )));
        }

        let attrs: Value = self
            .http
            .get(ep.userinfo)
            .bearer_auth(&token.access_token)
            // GitHub rejects requests without a user agent.
            .header(reqwest::header::USER_AGENT, "guestline-api")
            .send()
            .await
            .context("provider userinfo request")
            .map_err(ApiError::ProviderExchange)?
            .error_for_status()
            .context("provider userinfo response status")
            .map_err(ApiError::ProviderExchange)?
            .json()
            .await
            .context("decode provider userinfo response")
            .map_err(ApiError::ProviderExchange)?;

        Ok(attrs)
    }
}
