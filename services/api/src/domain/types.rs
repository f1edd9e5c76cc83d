use chrono::{DateTime, Utc};

use crate::domain::provider::AuthProvider;
use crate::error::FieldViolation;

/// Local user resolved from an external OAuth2 identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub provider: AuthProvider,
    pub provider_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for inserting a new user on first login.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub provider: AuthProvider,
    pub provider_id: String,
}

/// Guest record owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guest {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub num_of_guests: i32,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated guest fields, produced by [`GuestDraft::validate`]. At this
/// point `num_of_guests` has been defaulted to 1 when the request omitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestFields {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub num_of_guests: i32,
}

/// Unvalidated guest fields straight from a request body.
#[derive(Debug, Clone, Default)]
pub struct GuestDraft {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub num_of_guests: Option<i32>,
}

/// Loose structural check, in the spirit of bean-validation `@Email`:
/// exactly one `@` with a non-empty local part and domain, no whitespace.
fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
}

impl GuestDraft {
    /// Check every field constraint and collect all violations, so a response
    /// can name each failing field at once. Empty-string optional fields are
    /// normalized to absent before checking.
    pub fn validate(self) -> Result<GuestFields, Vec<FieldViolation>> {
        let mut violations = Vec::new();

        if self.name.trim().is_empty() {
            violations.push(FieldViolation::new("name", "Guest name is required"));
        } else {
            let len = self.name.chars().count();
            if !(2..=255).contains(&len) {
                violations.push(FieldViolation::new(
                    "name",
                    "Name must be between 2 and 255 characters",
                ));
            }
        }

        let email = self.email.filter(|e| !e.is_empty());
        if let Some(ref email) = email {
            if email.chars().count() > 255 {
                violations.push(FieldViolation::new(
                    "email",
                    "Email must not exceed 255 characters",
                ));
            } else if !is_valid_email(email) {
                violations.push(FieldViolation::new("email", "Invalid email format"));
            }
        }

        let phone = self.phone.filter(|p| !p.is_empty());
        if let Some(ref phone) = phone {
            if phone.chars().count() > 50 {
                violations.push(FieldViolation::new(
                    "phone",
                    "Phone must not exceed 50 characters",
                ));
            }
        }

        if let Some(n) = self.num_of_guests {
            if n < 1 {
                violations.push(FieldViolation::new(
                    "numOfGuests",
                    "Number of guests must be at least 1",
                ));
            }
        }

        if !violations.is_empty() {
            return Err(violations);
        }

        Ok(GuestFields {
            name: self.name,
            email,
            phone,
            num_of_guests: self.num_of_guests.unwrap_or(1),
        })
    }
}
