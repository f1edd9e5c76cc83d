use sea_orm::Database;
use tracing::{info, warn};

use guestline_api::config::ApiConfig;
use guestline_api::infra::oauth::HttpOAuthGateway;
use guestline_api::router::build_router;
use guestline_api::state::AppState;
use guestline_auth_types::identity::AuthGate;

#[tokio::main]
async fn main() {
    guestline_core::tracing::init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let auth_gate = if config.auth_dev_stand_in {
        warn!(
            user_id = config.dev_stand_in_user_id,
            "token verification disabled, all requests run as the stand-in user"
        );
        AuthGate::DevelopmentStandIn {
            user_id: config.dev_stand_in_user_id,
        }
    } else {
        AuthGate::Verified {
            secret: config.jwt_secret.clone(),
        }
    };

    let oauth = HttpOAuthGateway::from_config(&config);

    let state = AppState {
        db,
        oauth,
        auth_gate,
        jwt_secret: config.jwt_secret,
        token_ttl_secs: config.token_ttl_secs,
        redirect_uri: config.oauth_redirect_uri,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
