use axum::{
    Router,
    routing::{delete, get, post, put},
};

use guestline_core::health::healthz;
use guestline_core::middleware::request_id_layer;

use crate::handlers::{
    guest::{count_guests, create_guest, delete_guest, get_guest, list_guests, update_guest},
    login::{authorize, callback},
    root::{readyz, root},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/", get(root))
        // Guests
        .route("/api/guests", get(list_guests))
        .route("/api/guests", post(create_guest))
        .route("/api/guests/count", get(count_guests))
        .route("/api/guests/{id}", get(get_guest))
        .route("/api/guests/{id}", put(update_guest))
        .route("/api/guests/{id}", delete(delete_guest))
        // OAuth2 login
        .route("/oauth2/authorize/{provider}", get(authorize))
        .route("/oauth2/callback/{provider}", get(callback))
        .layer(request_id_layer())
        .with_state(state)
}
