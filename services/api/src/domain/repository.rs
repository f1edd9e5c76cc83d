#![allow(async_fn_in_trait)]

use serde_json::Value;

use crate::domain::provider::AuthProvider;
use crate::domain::types::{Guest, GuestFields, NewUser, User};
use crate::error::ApiError;

/// Repository for guest records. Every operation is scoped by the owning
/// user id; a guest under a different owner is reported as absent.
pub trait GuestRepository: Send + Sync {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Guest>, ApiError>;

    async fn find_by_id(&self, id: i64, user_id: i64) -> Result<Option<Guest>, ApiError>;

    /// Insert a new guest for `user_id` and return the stored record
    /// (with generated id and timestamps).
    async fn create(&self, user_id: i64, fields: &GuestFields) -> Result<Guest, ApiError>;

    /// Full-replace update of name/email/phone/num_of_guests.
    /// Returns `None` when no guest with that id is owned by `user_id`.
    async fn update(
        &self,
        id: i64,
        user_id: i64,
        fields: &GuestFields,
    ) -> Result<Option<Guest>, ApiError>;

    /// Delete a guest. Returns `false` when no row was owned and removed.
    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, ApiError>;

    async fn count_by_user(&self, user_id: i64) -> Result<u64, ApiError>;
}

// Allow borrowing one repository across several use-case structs.
impl<T: GuestRepository> GuestRepository for &T {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Guest>, ApiError> {
        (**self).list_by_user(user_id).await
    }

    async fn find_by_id(&self, id: i64, user_id: i64) -> Result<Option<Guest>, ApiError> {
        (**self).find_by_id(id, user_id).await
    }

    async fn create(&self, user_id: i64, fields: &GuestFields) -> Result<Guest, ApiError> {
        (**self).create(user_id, fields).await
    }

    async fn update(
        &self,
        id: i64,
        user_id: i64,
        fields: &GuestFields,
    ) -> Result<Option<Guest>, ApiError> {
        (**self).update(id, user_id, fields).await
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, ApiError> {
        (**self).delete(id, user_id).await
    }

    async fn count_by_user(&self, user_id: i64) -> Result<u64, ApiError> {
        (**self).count_by_user(user_id).await
    }
}

/// Repository for local users keyed by external provider identity.
pub trait UserRepository: Send + Sync {
    async fn find_by_provider_identity(
        &self,
        provider: AuthProvider,
        provider_id: &str,
    ) -> Result<Option<User>, ApiError>;

    async fn create(&self, user: &NewUser) -> Result<User, ApiError>;

    /// Overwrite the mutable profile fields of an existing user.
    async fn update_profile(
        &self,
        id: i64,
        email: &str,
        name: &str,
        avatar_url: Option<&str>,
    ) -> Result<User, ApiError>;
}

impl<T: UserRepository> UserRepository for &T {
    async fn find_by_provider_identity(
        &self,
        provider: AuthProvider,
        provider_id: &str,
    ) -> Result<Option<User>, ApiError> {
        (**self).find_by_provider_identity(provider, provider_id).await
    }

    async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        (**self).create(user).await
    }

    async fn update_profile(
        &self,
        id: i64,
        email: &str,
        name: &str,
        avatar_url: Option<&str>,
    ) -> Result<User, ApiError> {
        (**self).update_profile(id, email, name, avatar_url).await
    }
}

/// Outbound port for the OAuth2 provider round trip.
pub trait OAuthGateway: Send + Sync {
    /// Build the provider consent-page URL for the authorize redirect.
    fn authorize_url(&self, provider: AuthProvider) -> Result<String, ApiError>;

    /// Exchange an authorization code for an access token and fetch the
    /// provider's raw userinfo attributes.
    async fn fetch_profile(&self, provider: AuthProvider, code: &str) -> Result<Value, ApiError>;
}
