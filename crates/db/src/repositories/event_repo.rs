//! Repository for the `events` table.

use sqlx::PgPool;
use tracker_core::models::{CreateEvent, Event, EventFilter, UpdateEvent};
use tracker_core::store::Page;
use tracker_core::types::DbId;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, person_id, area_id, action_id, time";

/// Provides CRUD operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (person_id, area_id, action_id, time) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(input.person_id)
            .bind(input.area_id)
            .bind(input.action_id)
            .bind(input.time)
            .fetch_one(pool)
            .await
    }

    /// Find an event by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List events, optionally filtered by `person_id`, `area_id` and/or
    /// `action_id`. Ordered by id.
    pub async fn list(
        pool: &PgPool,
        filter: &EventFilter,
        page: Page,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events \
             WHERE ($1::BIGINT IS NULL OR person_id = $1) \
               AND ($2::BIGINT IS NULL OR area_id = $2) \
               AND ($3::BIGINT IS NULL OR action_id = $3) \
             ORDER BY id \
             OFFSET $4 LIMIT $5"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(filter.person_id)
            .bind(filter.area_id)
            .bind(filter.action_id)
            .bind(page.skip)
            .bind(page.limit)
            .fetch_all(pool)
            .await
    }

    /// Update an event. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET \
                person_id = COALESCE($2, person_id), \
                area_id = COALESCE($3, area_id), \
                action_id = COALESCE($4, action_id), \
                time = COALESCE($5, time) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(input.person_id)
            .bind(input.area_id)
            .bind(input.action_id)
            .bind(input.time)
            .fetch_optional(pool)
            .await
    }

    /// Delete an event, returning the removed row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("DELETE FROM events WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
