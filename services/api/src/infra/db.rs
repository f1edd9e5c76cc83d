use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel as _, PaginatorTrait, QueryFilter, SqlErr,
};

use guestline_api_schema::{guests, users};

use crate::domain::provider::AuthProvider;
use crate::domain::repository::{GuestRepository, UserRepository};
use crate::domain::types::{Guest, GuestFields, NewUser, User};
use crate::error::ApiError;

// ── Guest repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbGuestRepository {
    pub db: DatabaseConnection,
}

impl GuestRepository for DbGuestRepository {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Guest>, ApiError> {
        let models = guests::Entity::find()
            .filter(guests::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .context("list guests by user")?;
        Ok(models.into_iter().map(guest_from_model).collect())
    }

    async fn find_by_id(&self, id: i64, user_id: i64) -> Result<Option<Guest>, ApiError> {
        // Owner filter is part of the lookup: another user's guest is absent.
        let model = guests::Entity::find()
            .filter(guests::Column::Id.eq(id))
            .filter(guests::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find guest by id")?;
        Ok(model.map(guest_from_model))
    }

    async fn create(&self, user_id: i64, fields: &GuestFields) -> Result<Guest, ApiError> {
        let now = Utc::now();
        let model = guests::ActiveModel {
            name: Set(fields.name.clone()),
            email: Set(fields.email.clone()),
            phone: Set(fields.phone.clone()),
            num_of_guests: Set(fields.num_of_guests),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("insert guest")?;
        Ok(guest_from_model(model))
    }

    async fn update(
        &self,
        id: i64,
        user_id: i64,
        fields: &GuestFields,
    ) -> Result<Option<Guest>, ApiError> {
        let Some(existing) = guests::Entity::find()
            .filter(guests::Column::Id.eq(id))
            .filter(guests::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find guest for update")?
        else {
            return Ok(None);
        };

        let mut guest = existing.into_active_model();
        guest.name = Set(fields.name.clone());
        guest.email = Set(fields.email.clone());
        guest.phone = Set(fields.phone.clone());
        guest.num_of_guests = Set(fields.num_of_guests);
        guest.updated_at = Set(Utc::now());
        let model = guest.update(&self.db).await.context("update guest")?;
        Ok(Some(guest_from_model(model)))
    }

    async fn delete(&self, id: i64, user_id: i64) -> Result<bool, ApiError> {
        let result = guests::Entity::delete_many()
            .filter(guests::Column::Id.eq(id))
            .filter(guests::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .context("delete guest")?;
        Ok(result.rows_affected > 0)
    }

    async fn count_by_user(&self, user_id: i64) -> Result<u64, ApiError> {
        let count = guests::Entity::find()
            .filter(guests::Column::UserId.eq(user_id))
            .count(&self.db)
            .await
            .context("count guests by user")?;
        Ok(count)
    }
}

fn guest_from_model(model: guests::Model) -> Guest {
    Guest {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        num_of_guests: model.num_of_guests,
        user_id: model.user_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_provider_identity(
        &self,
        provider: AuthProvider,
        provider_id: &str,
    ) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Provider.eq(provider.as_str()))
            .filter(users::Column::ProviderId.eq(provider_id))
            .one(&self.db)
            .await
            .context("find user by provider identity")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &NewUser) -> Result<User, ApiError> {
        let now = Utc::now();
        let result = users::ActiveModel {
            email: Set(user.email.clone()),
            name: Set(user.name.clone()),
            avatar_url: Set(user.avatar_url.clone()),
            provider: Set(user.provider.as_str().to_owned()),
            provider_id: Set(user.provider_id.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(model) => user_from_model(model),
            // A racing login or an email claimed by another provider identity.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(ApiError::Conflict)
            }
            Err(e) => Err(anyhow::Error::from(e).context("insert user").into()),
        }
    }

    async fn update_profile(
        &self,
        id: i64,
        email: &str,
        name: &str,
        avatar_url: Option<&str>,
    ) -> Result<User, ApiError> {
        let user = users::ActiveModel {
            id: Set(id),
            email: Set(email.to_owned()),
            name: Set(name.to_owned()),
            avatar_url: Set(avatar_url.map(str::to_owned)),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        let model = user.update(&self.db).await.context("update user profile")?;
        user_from_model(model)
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    let provider = model
        .provider
        .parse::<AuthProvider>()
        .with_context(|| format!("unknown provider `{}` stored for user {}", model.provider, model.id))?;
    Ok(User {
        id: model.id,
        email: model.email,
        name: model.name,
        avatar_url: model.avatar_url,
        provider,
        provider_id: model.provider_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
