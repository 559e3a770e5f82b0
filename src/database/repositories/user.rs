//! User profile repository implementation

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::database::store::ProfileStore;
use crate::models::user::{CreateProfileRequest, Profile, UpdateProfileRequest, UserRole};
use crate::utils::errors::{AppError, Result};

const PROFILE_COLUMNS: &str = "id, name, email, role, artist_status, created_at, updated_at";

#[derive(FromRow)]
struct ProfileRow {
    id: Uuid,
    name: Option<String>,
    email: String,
    role: String,
    artist_status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = AppError;

    fn try_from(row: ProfileRow) -> Result<Self> {
        Ok(Profile {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role.parse().map_err(AppError::Internal)?,
            artist_status: row.artist_status.parse().map_err(AppError::Internal)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Profile::try_from).transpose()
    }

    async fn create_if_missing(&self, request: CreateProfileRequest) -> Result<Profile> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO profiles (id, name, email, role, artist_status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, 'emerging', $5, $5)
            ON CONFLICT (id) DO NOTHING
            "#
        )
        .bind(request.id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(request.role.as_str())
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(request.id)
            .await?
            .ok_or(AppError::UserNotFound { user_id: request.id })
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Profile>> {
        let rows = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {} FROM profiles ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            PROFILE_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Profile::try_from).collect()
    }

    async fn update(&self, id: Uuid, request: UpdateProfileRequest) -> Result<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            UPDATE profiles
            SET name = COALESCE($2, name),
                artist_status = COALESCE($3, artist_status),
                updated_at = $4
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(id)
        .bind(request.name)
        .bind(request.artist_status.map(|s| s.as_str()))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::UserNotFound { user_id: id })?;

        row.try_into()
    }

    async fn update_role(&self, id: Uuid, role: UserRole) -> Result<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "UPDATE profiles SET role = $2, updated_at = $3 WHERE id = $1 RETURNING {}",
            PROFILE_COLUMNS
        ))
        .bind(id)
        .bind(role.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::UserNotFound { user_id: id })?;

        row.try_into()
    }
}
