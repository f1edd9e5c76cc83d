use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde_json::Value;

use guestline_api::domain::provider::AuthProvider;
use guestline_api::domain::repository::{GuestRepository, OAuthGateway, UserRepository};
use guestline_api::domain::types::{Guest, GuestFields, NewUser, User};
use guestline_api::error::ApiError;

// ── MockGuestRepo ────────────────────────────────────────────────────────────

pub struct MockGuestRepo {
    pub guests: Arc<Mutex<Vec<Guest>>>,
    next_id: Mutex<i64>,
}

impl MockGuestRepo {
    pub fn empty() -> Self {
        Self {
            guests: Arc::new(Mutex::new(vec![])),
            next_id: Mutex::new(1),
        }
    }
}

impl GuestRepository for MockGuestRepo {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Guest>, ApiError> {
        Ok(self
            .guests
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64, user_id: i64) -> Result<Option<Guest>, ApiError> {
        Ok(self
            .guests
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == id && g.user_id == user_id)
            .cloned())
    }

    async fn create(&self, user_id: i64, fields: &GuestFields) -> Result<Guest, ApiError> {
        let mut next_id = self.next_id.lock().unwrap();
        let now = Utc::now();
        let guest = Guest {
            id: *next_id,
            name: fields.name.clone(),
            email: fields.email.clone(),
            phone: fields.phone.clone(),
            num_of_guests: fields.num_of_guests,
            user_id,
            created_at: now,
            updated_at: now,
        };
        *next_id += 1;
        self.guests.lock().unwrap().push(guest.clone());
        Ok(guest)
    }

    async fn update(
        &self,
        id: i64,
        user_id: i64,
        fields: &GuestFields,
    ) -> Result<Option<Guest>, ApiError> {
        let mut guests = self.guests.lock().unwrap();
        let Some(guest) = guests.iter_mut().find(|g| g.id == id && g.user_id == user_id) else {
            return Ok(None);
        };
        guest.name = fields.name.clone();
        guest.email = fields.email.clone();
        guest.phone = fields.phone.clone();
        guest.num_of_guests = fields.num_of_guests;
        guest.updated_at = Utc::now();
        Ok(Some(guest.clone()))
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, ApiError> {
        let mut guests = self.guests.lock().unwrap();
        let before = guests.len();
        guests.retain(|g| !(g.id == id && g.user_id == user_id));
        Ok(guests.len() < before)
    }

    async fn count_by_user(&self, user_id: i64) -> Result<u64, ApiError> {
        Ok(self
            .guests
            .lock()
            .unwrap()
            .iter()
            .filter(|g| g.user_id == user_id)
            .count() as u64)
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
    next_id: Mutex<i64>,
    pub update_calls: Mutex<u32>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self {
            users: Arc::new(Mutex::new(users)),
            next_id: Mutex::new(next_id),
            update_calls: Mutex::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn users_handle(&self) -> Arc<Mutex<Vec<User>>> {
        Arc::clone(&self.users)
    }

    pub fn update_call_count(&self) -> u32 {
        *self.update_calls.lock().unwrap()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_provider_identity(
        &self,
        provider: AuthProvider,
        provider_id: &str,
    ) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.provider == provider && u.provider_id == provider_id)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        let mut next_id = self.next_id.lock().unwrap();
        let now = Utc::now();
        let created = User {
            id: *next_id,
            email: user.email.clone(),
            name: user.name.clone(),
            avatar_url: user.avatar_url.clone(),
            provider: user.provider,
            provider_id: user.provider_id.clone(),
            created_at: now,
            updated_at: now,
        };
        *next_id += 1;
        self.users.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_profile(
        &self,
        id: i64,
        email: &str,
        name: &str,
        avatar_url: Option<&str>,
    ) -> Result<User, ApiError> {
        *self.update_calls.lock().unwrap() += 1;
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(ApiError::UserNotFound)?;
        user.email = email.to_owned();
        user.name = name.to_owned();
        user.avatar_url = avatar_url.map(str::to_owned);
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

// ── MockOAuthGateway ─────────────────────────────────────────────────────────

/// Gateway that hands back a canned attribute document for any code.
pub struct MockOAuthGateway {
    pub attrs: Value,
}

impl OAuthGateway for MockOAuthGateway {
    fn authorize_url(&self, provider: AuthProvider) -> Result<String, ApiError> {
        Ok(format!("https://provider.test/authorize/{}", provider.slug()))
    }

    async fn fetch_profile(&self, _provider: AuthProvider, _code: &str) -> Result<Value, ApiError> {
        Ok(self.attrs.clone())
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn test_user(provider: AuthProvider, provider_id: &str) -> User {
    User {
        id: 1,
        email: "user@example.com".to_owned(),
        name: "Test User".to_owned(),
        avatar_url: Some("https://img.example.com/a.png".to_owned()),
        provider,
        provider_id: provider_id.to_owned(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_fields(name: &str) -> GuestFields {
    GuestFields {
        name: name.to_owned(),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        phone: Some("+1-555-0100".to_owned()),
        num_of_guests: 2,
    }
}

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";
