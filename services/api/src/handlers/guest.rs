use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use guestline_auth_types::identity::CallerIdentity;

use crate::domain::types::{Guest, GuestDraft, GuestFields};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::guest::{
    CountGuestsUseCase, CreateGuestUseCase, DeleteGuestUseCase, GetGuestUseCase,
    ListGuestsUseCase, UpdateGuestUseCase,
};

// ── Request/response types ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestPayload {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub num_of_guests: Option<i32>,
}

impl GuestPayload {
    fn validated(self) -> Result<GuestFields, ApiError> {
        GuestDraft {
            name: self.name,
            email: self.email,
            phone: self.phone,
            num_of_guests: self.num_of_guests,
        }
        .validate()
        .map_err(ApiError::Validation)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestBody {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub num_of_guests: i32,
    pub user_id: i64,
    #[serde(serialize_with = "guestline_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "guestline_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Guest> for GuestBody {
    fn from(guest: Guest) -> Self {
        Self {
            id: guest.id,
            name: guest.name,
            email: guest.email,
            phone: guest.phone,
            num_of_guests: guest.num_of_guests,
            user_id: guest.user_id,
            created_at: guest.created_at,
            updated_at: guest.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteBody {
    pub success: bool,
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct CountBody {
    pub count: u64,
}

// ── GET /api/guests ──────────────────────────────────────────────────────────

pub async fn list_guests(
    caller: CallerIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<GuestBody>>, ApiError> {
    let usecase = ListGuestsUseCase {
        repo: state.guest_repo(),
    };
    let guests = usecase.execute(caller.user_id).await?;
    Ok(Json(guests.into_iter().map(GuestBody::from).collect()))
}

// ── GET /api/guests/{id} ─────────────────────────────────────────────────────

pub async fn get_guest(
    caller: CallerIdentity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<GuestBody>, ApiError> {
    let usecase = GetGuestUseCase {
        repo: state.guest_repo(),
    };
    let guest = usecase.execute(id, caller.user_id).await?;
    Ok(Json(guest.into()))
}

// ── POST /api/guests ─────────────────────────────────────────────────────────

pub async fn create_guest(
    caller: CallerIdentity,
    State(state): State<AppState>,
    Json(body): Json<GuestPayload>,
) -> Result<(StatusCode, Json<GuestBody>), ApiError> {
    let fields = body.validated()?;
    let usecase = CreateGuestUseCase {
        repo: state.guest_repo(),
    };
    let guest = usecase.execute(caller.user_id, fields).await?;
    Ok((StatusCode::CREATED, Json(guest.into())))
}

// ── PUT /api/guests/{id} ─────────────────────────────────────────────────────

pub async fn update_guest(
    caller: CallerIdentity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<GuestPayload>,
) -> Result<Json<GuestBody>, ApiError> {
    let fields = body.validated()?;
    let usecase = UpdateGuestUseCase {
        repo: state.guest_repo(),
    };
    let guest = usecase.execute(id, caller.user_id, fields).await?;
    Ok(Json(guest.into()))
}

// ── DELETE /api/guests/{id} ──────────────────────────────────────────────────

pub async fn delete_guest(
    caller: CallerIdentity,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteBody>, ApiError> {
    let usecase = DeleteGuestUseCase {
        repo: state.guest_repo(),
    };
    usecase.execute(id, caller.user_id).await?;
    Ok(Json(DeleteBody {
        success: true,
        message: "Guest deleted successfully".to_owned(),
        id,
    }))
}

// ── GET /api/guests/count ────────────────────────────────────────────────────

pub async fn count_guests(
    caller: CallerIdentity,
    State(state): State<AppState>,
) -> Result<Json<CountBody>, ApiError> {
    let usecase = CountGuestsUseCase {
        repo: state.guest_repo(),
    };
    let count = usecase.execute(caller.user_id).await?;
    Ok(Json(CountBody { count }))
}
