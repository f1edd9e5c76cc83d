use tracing::{debug, info};

use crate::domain::repository::GuestRepository;
use crate::domain::types::{Guest, GuestFields};
use crate::error::ApiError;

// ── ListGuests ───────────────────────────────────────────────────────────────

pub struct ListGuestsUseCase<R: GuestRepository> {
    pub repo: R,
}

impl<R: GuestRepository> ListGuestsUseCase<R> {
    pub async fn execute(&self, user_id: i64) -> Result<Vec<Guest>, ApiError> {
        debug!(user_id, "listing guests");
        self.repo.list_by_user(user_id).await
    }
}

// ── GetGuest ─────────────────────────────────────────────────────────────────

pub struct GetGuestUseCase<R: GuestRepository> {
    pub repo: R,
}

impl<R: GuestRepository> GetGuestUseCase<R> {
    pub async fn execute(&self, id: i64, user_id: i64) -> Result<Guest, ApiError> {
        self.repo
            .find_by_id(id, user_id)
            .await?
            .ok_or(ApiError::GuestNotFound)
    }
}

// ── CreateGuest ──────────────────────────────────────────────────────────────

pub struct CreateGuestUseCase<R: GuestRepository> {
    pub repo: R,
}

impl<R: GuestRepository> CreateGuestUseCase<R> {
    pub async fn execute(&self, user_id: i64, fields: GuestFields) -> Result<Guest, ApiError> {
        let guest = self.repo.create(user_id, &fields).await?;
        info!(guest_id = guest.id, user_id, "guest created");
        Ok(guest)
    }
}

// ── UpdateGuest ──────────────────────────────────────────────────────────────

pub struct UpdateGuestUseCase<R: GuestRepository> {
    pub repo: R,
}

impl<R: GuestRepository> UpdateGuestUseCase<R> {
    /// Full replace: the stored name/email/phone/num_of_guests become exactly
    /// `fields`, clearing optional values the request omitted.
    pub async fn execute(
        &self,
        id: i64,
        user_id: i64,
        fields: GuestFields,
    ) -> Result<Guest, ApiError> {
        let guest = self
            .repo
            .update(id, user_id, &fields)
            .await?
            .ok_or(ApiError::GuestNotFound)?;
        info!(guest_id = guest.id, user_id, "guest updated");
        Ok(guest)
    }
}

// ── DeleteGuest ──────────────────────────────────────────────────────────────

pub struct DeleteGuestUseCase<R: GuestRepository> {
    pub repo: R,
}

impl<R: GuestRepository> DeleteGuestUseCase<R> {
    pub async fn execute(&self, id: i64, user_id: i64) -> Result<(), ApiError> {
        if !self.repo.delete(id, user_id).await? {
            return Err(ApiError::GuestNotFound);
        }
        info!(guest_id = id, user_id, "guest deleted");
        Ok(())
    }
}

// ── CountGuests ──────────────────────────────────────────────────────────────

pub struct CountGuestsUseCase<R: GuestRepository> {
    pub repo: R,
}

impl<R: GuestRepository> CountGuestsUseCase<R> {
    pub async fn execute(&self, user_id: i64) -> Result<u64, ApiError> {
        self.repo.count_by_user(user_id).await
    }
}
