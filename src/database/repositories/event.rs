//! Event repository implementation

use std::collections::HashMap;
use async_trait::async_trait;
use sqlx::{types::Json, FromRow, PgPool, Postgres, Transaction};
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::database::store::EventStore;
use crate::models::event::{Event, EventDetails, EventFilter, EventStatus, NewEvent, Occurrence, Photo};
use crate::models::review::{NewReview, Review, ReviewOutcome};
use crate::utils::errors::{AppError, Result};

const EVENT_COLUMNS: &str = "id, event_type, status, title, description, contact_name, contact_email, contact_phone, website, details, submitted_by, created_at, updated_at";

#[derive(FromRow)]
struct EventRow {
    id: Uuid,
    event_type: String,
    status: String,
    title: String,
    description: String,
    contact_name: String,
    contact_email: String,
    contact_phone: Option<String>,
    website: Option<String>,
    details: Json<EventDetails>,
    submitted_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(FromRow)]
struct OccurrenceRow {
    id: Uuid,
    event_id: Uuid,
    starts_at: DateTime<Utc>,
    ends_at: Option<DateTime<Utc>>,
    timezone: String,
}

#[derive(FromRow)]
struct PhotoRow {
    id: Uuid,
    event_id: Uuid,
    storage_path: String,
    caption: Option<String>,
    position: i32,
}

#[derive(FromRow)]
struct ReviewRow {
    id: Uuid,
    event_id: Uuid,
    decision: String,
    notes: Option<String>,
    reviewer_id: Uuid,
    created_at: DateTime<Utc>,
}

impl EventRow {
    fn into_event(self, occurrences: Vec<Occurrence>, photos: Vec<Photo>) -> Result<Event> {
        let event_type = self.event_type.parse().map_err(AppError::Internal)?;
        let status = self.status.parse().map_err(AppError::Internal)?;

        Ok(Event {
            id: self.id,
            event_type,
            status,
            title: self.title,
            description: self.description,
            contact_name: self.contact_name,
            contact_email: self.contact_email,
            contact_phone: self.contact_phone,
            website: self.website,
            details: self.details.0,
            occurrences,
            photos,
            submitted_by: self.submitted_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl TryFrom<ReviewRow> for Review {
    type Error = AppError;

    fn try_from(row: ReviewRow) -> Result<Self> {
        Ok(Review {
            id: row.id,
            event_id: row.event_id,
            decision: row.decision.parse().map_err(AppError::Internal)?,
            notes: row.notes,
            reviewer_id: row.reviewer_id,
            created_at: row.created_at,
        })
    }
}

#[derive(Clone, Debug)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load occurrences and photos for a batch of event rows
    async fn hydrate(&self, rows: Vec<EventRow>) -> Result<Vec<Event>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

        let occurrence_rows = sqlx::query_as::<_, OccurrenceRow>(
            "SELECT id, event_id, starts_at, ends_at, timezone FROM event_occurrences WHERE event_id = ANY($1) ORDER BY starts_at ASC"
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let photo_rows = sqlx::query_as::<_, PhotoRow>(
            "SELECT id, event_id, storage_path, caption, position FROM event_photos WHERE event_id = ANY($1) ORDER BY position ASC"
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut occurrences: HashMap<Uuid, Vec<Occurrence>> = HashMap::new();
        for row in occurrence_rows {
            occurrences.entry(row.event_id).or_default().push(Occurrence {
                id: row.id,
                starts_at: row.starts_at,
                ends_at: row.ends_at,
                timezone: row.timezone,
            });
        }

        let mut photos: HashMap<Uuid, Vec<Photo>> = HashMap::new();
        for row in photo_rows {
            photos.entry(row.event_id).or_default().push(Photo {
                id: row.id,
                storage_path: row.storage_path,
                caption: row.caption,
                position: row.position,
            });
        }

        rows.into_iter()
            .map(|row| {
                let id = row.id;
                row.into_event(
                    occurrences.remove(&id).unwrap_or_default(),
                    photos.remove(&id).unwrap_or_default(),
                )
            })
            .collect()
    }

    /// Insert occurrences and photos for an event inside a transaction
    async fn insert_children(
        tx: &mut Transaction<'_, Postgres>,
        event_id: Uuid,
        event: &NewEvent,
    ) -> Result<(Vec<Occurrence>, Vec<Photo>)> {
        let mut occurrences = Vec::with_capacity(event.occurrences.len());
        for occurrence in &event.occurrences {
            let id = Uuid::new_v4();
            sqlx::query(
                "INSERT INTO event_occurrences (id, event_id, starts_at, ends_at, timezone) VALUES ($1, $2, $3, $4, $5)"
            )
            .bind(id)
            .bind(event_id)
            .bind(occurrence.starts_at)
            .bind(occurrence.ends_at)
            .bind(&occurrence.timezone)
            .execute(&mut **tx)
            .await?;

            occurrences.push(Occurrence {
                id,
                starts_at: occurrence.starts_at,
                ends_at: occurrence.ends_at,
                timezone: occurrence.timezone.clone(),
            });
        }
        occurrences.sort_by_key(|o| o.starts_at);

        let mut photos = Vec::with_capacity(event.photos.len());
        for (position, photo) in event.photos.iter().enumerate() {
            let id = Uuid::new_v4();
            let position = position as i32;
            sqlx::query(
                "INSERT INTO event_photos (id, event_id, storage_path, caption, position) VALUES ($1, $2, $3, $4, $5)"
            )
            .bind(id)
            .bind(event_id)
            .bind(&photo.storage_path)
            .bind(&photo.caption)
            .bind(position)
            .execute(&mut **tx)
            .await?;

            photos.push(Photo {
                id,
                storage_path: photo.storage_path.clone(),
                caption: photo.caption.clone(),
                position,
            });
        }

        Ok((occurrences, photos))
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn create(&self, event: NewEvent) -> Result<Event> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            INSERT INTO events (id, event_type, status, title, description, contact_name, contact_email, contact_phone, website, details, submitted_by, created_at, updated_at)
            VALUES ($1, $2, 'pending', $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(id)
        .bind(event.event_type().as_str())
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.contact_name)
        .bind(&event.contact_email)
        .bind(&event.contact_phone)
        .bind(&event.website)
        .bind(Json(&event.details))
        .bind(event.submitted_by)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let (occurrences, photos) = Self::insert_children(&mut tx, id, &event).await?;
        tx.commit().await?;

        row.into_event(occurrences, photos)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            SELECT {} FROM events
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR event_type = $2)
              AND ($3::uuid IS NULL OR submitted_by = $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
            EVENT_COLUMNS
        ))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.event_type.map(|t| t.as_str()))
        .bind(filter.submitted_by)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    async fn replace(&self, id: Uuid, event: NewEvent) -> Result<Event> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            UPDATE events
            SET event_type = $2,
                title = $3,
                description = $4,
                contact_name = $5,
                contact_email = $6,
                contact_phone = $7,
                website = $8,
                details = $9,
                updated_at = $10
            WHERE id = $1
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(id)
        .bind(event.event_type().as_str())
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.contact_name)
        .bind(&event.contact_email)
        .bind(&event.contact_phone)
        .bind(&event.website)
        .bind(Json(&event.details))
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::EventNotFound { event_id: id })?;

        sqlx::query("DELETE FROM event_occurrences WHERE event_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM event_photos WHERE event_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let (occurrences, photos) = Self::insert_children(&mut tx, id, &event).await?;
        tx.commit().await?;

        row.into_event(occurrences, photos)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        // Occurrences, photos and reviews go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn apply_review(&self, review: NewReview) -> Result<ReviewOutcome> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let updated: Option<(Uuid,)> = sqlx::query_as(
            "UPDATE events SET status = $2, updated_at = $3 WHERE id = $1 AND status = 'pending' RETURNING id"
        )
        .bind(review.event_id)
        .bind(review.decision.target_status().as_str())
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            let current: Option<(String,)> = sqlx::query_as("SELECT status FROM events WHERE id = $1")
                .bind(review.event_id)
                .fetch_optional(&mut *tx)
                .await?;
            tx.rollback().await?;

            return match current {
                Some((status,)) => {
                    let status: EventStatus = status.parse().map_err(AppError::Internal)?;
                    Ok(ReviewOutcome::AlreadyDecided(status))
                }
                None => Err(AppError::EventNotFound { event_id: review.event_id }),
            };
        }

        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            INSERT INTO reviews (id, event_id, decision, notes, reviewer_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, event_id, decision, notes, reviewer_id, created_at
            "#
        )
        .bind(Uuid::new_v4())
        .bind(review.event_id)
        .bind(review.decision.as_str())
        .bind(&review.notes)
        .bind(review.reviewer_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ReviewOutcome::Recorded(row.try_into()?))
    }

    async fn list_reviews(&self, event_id: Uuid) -> Result<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            "SELECT id, event_id, decision, notes, reviewer_id, created_at FROM reviews WHERE event_id = $1 ORDER BY created_at ASC"
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Review::try_from).collect()
    }

    async fn list_approved_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            SELECT {} FROM events e
            WHERE e.status = 'approved'
              AND EXISTS (
                  SELECT 1 FROM event_occurrences o
                  WHERE o.event_id = e.id AND o.starts_at >= $1 AND o.starts_at < $2
              )
            "#,
            EVENT_COLUMNS
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    async fn count_by_status(&self, status: EventStatus) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
