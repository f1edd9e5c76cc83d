use axum::extract::FromRef;
use guestline_auth_types::identity::AuthGate;
use sea_orm::DatabaseConnection;

use crate::infra::db::{DbGuestRepository, DbUserRepository};
use crate::infra::oauth::HttpOAuthGateway;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub oauth: HttpOAuthGateway,
    pub auth_gate: AuthGate,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    pub redirect_uri: String,
}

impl AppState {
    pub fn guest_repo(&self) -> DbGuestRepository {
        DbGuestRepository {
            db: self.db.clone(),
        }
    }

    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for AuthGate {
    fn from_ref(state: &AppState) -> Self {
        state.auth_gate.clone()
    }
}
