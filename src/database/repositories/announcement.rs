//! Announcement repository implementation

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::database::store::AnnouncementStore;
use crate::models::announcement::{Announcement, NewAnnouncement, UpdateAnnouncementRequest};
use crate::utils::errors::{AppError, Result};

const ANNOUNCEMENT_COLUMNS: &str = "id, title, content, announcement_type, published_at, archived_at, author_id, created_at, updated_at";

#[derive(FromRow)]
struct AnnouncementRow {
    id: Uuid,
    title: String,
    content: String,
    announcement_type: String,
    published_at: Option<DateTime<Utc>>,
    archived_at: Option<DateTime<Utc>>,
    author_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AnnouncementRow> for Announcement {
    type Error = AppError;

    fn try_from(row: AnnouncementRow) -> Result<Self> {
        Ok(Announcement {
            id: row.id,
            title: row.title,
            content: row.content,
            announcement_type: row.announcement_type.parse().map_err(AppError::Internal)?,
            published_at: row.published_at,
            archived_at: row.archived_at,
            author_id: row.author_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone, Debug)]
pub struct AnnouncementRepository {
    pool: PgPool,
}

impl AnnouncementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnouncementStore for AnnouncementRepository {
    async fn create(&self, announcement: NewAnnouncement) -> Result<Announcement> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, AnnouncementRow>(&format!(
            r#"
            INSERT INTO announcements (id, title, content, announcement_type, published_at, archived_at, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NULL, $6, $7, $7)
            RETURNING {}
            "#,
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&announcement.title)
        .bind(&announcement.content)
        .bind(announcement.announcement_type.as_str())
        .bind(announcement.published_at)
        .bind(announcement.author_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>> {
        let row = sqlx::query_as::<_, AnnouncementRow>(&format!(
            "SELECT {} FROM announcements WHERE id = $1",
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Announcement::try_from).transpose()
    }

    async fn list(&self, active_at: Option<DateTime<Utc>>) -> Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(&format!(
            r#"
            SELECT {} FROM announcements
            WHERE $1::timestamptz IS NULL
               OR (archived_at IS NULL AND published_at IS NOT NULL AND published_at <= $1)
            ORDER BY COALESCE(published_at, created_at) DESC
            "#,
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(active_at)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Announcement::try_from).collect()
    }

    async fn update(&self, id: Uuid, request: UpdateAnnouncementRequest) -> Result<Announcement> {
        let row = sqlx::query_as::<_, AnnouncementRow>(&format!(
            r#"
            UPDATE announcements
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                announcement_type = COALESCE($4, announcement_type),
                updated_at = $5
            WHERE id = $1
            RETURNING {}
            "#,
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(id)
        .bind(request.title)
        .bind(request.content)
        .bind(request.announcement_type.map(|t| t.as_str()))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::AnnouncementNotFound { announcement_id: id })?;

        row.try_into()
    }

    async fn set_published(&self, id: Uuid, at: DateTime<Utc>) -> Result<Announcement> {
        let row = sqlx::query_as::<_, AnnouncementRow>(&format!(
            "UPDATE announcements SET published_at = $2, archived_at = NULL, updated_at = $2 WHERE id = $1 RETURNING {}",
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::AnnouncementNotFound { announcement_id: id })?;

        row.try_into()
    }

    async fn set_archived(&self, id: Uuid, at: DateTime<Utc>) -> Result<Announcement> {
        let row = sqlx::query_as::<_, AnnouncementRow>(&format!(
            "UPDATE announcements SET archived_at = $2, updated_at = $2 WHERE id = $1 RETURNING {}",
            ANNOUNCEMENT_COLUMNS
        ))
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::AnnouncementNotFound { announcement_id: id })?;

        row.try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
