/// OAuth2 client credentials for one provider. A provider without credentials
/// in the environment is simply not registered.
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Api service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing JWT access tokens.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3000). Env var: `API_PORT`.
    pub api_port: u16,
    /// Access-token lifetime in seconds (default 3600). Env var: `TOKEN_TTL_SECS`.
    pub token_ttl_secs: u64,
    /// Front-end URI that receives `?token=` after login.
    /// Env var: `OAUTH_REDIRECT_URI`.
    pub oauth_redirect_uri: String,
    /// Externally reachable base URL of this service, used to build the
    /// provider callback URLs. Env var: `PUBLIC_BASE_URL`.
    pub public_base_url: String,
    /// When true, skip token verification and treat every request as
    /// `dev_stand_in_user_id`. Must stay false in production.
    /// Env var: `AUTH_DEV_STAND_IN`.
    pub auth_dev_stand_in: bool,
    /// Caller identity synthesized by the stand-in gate (default 1).
    pub dev_stand_in_user_id: i64,
    pub google: Option<ProviderCredentials>,
    pub github: Option<ProviderCredentials>,
    pub microsoft: Option<ProviderCredentials>,
    pub facebook: Option<ProviderCredentials>,
}

fn provider_credentials(prefix: &str) -> Option<ProviderCredentials> {
    let client_id = std::env::var(format!("{prefix}_CLIENT_ID")).ok()?;
    let client_secret = std::env::var(format!("{prefix}_CLIENT_SECRET")).ok()?;
    Some(ProviderCredentials {
        client_id,
        client_secret,
    })
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            token_ttl_secs: std::env::var("TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            oauth_redirect_uri: std::env::var("OAUTH_REDIRECT_URI")
                .unwrap_or_else(|_| "http://localhost:3000/oauth2/redirect".to_owned()),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_owned()),
            auth_dev_stand_in: std::env::var("AUTH_DEV_STAND_IN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            dev_stand_in_user_id: std::env::var("DEV_STAND_IN_USER_ID")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            google: provider_credentials("GOOGLE"),
            github: provider_credentials("GITHUB"),
            microsoft: provider_credentials("MICROSOFT"),
            facebook: provider_credentials("FACEBOOK"),
        }
    }
}
