//! Favorite and interest repository implementations
//!
//! Both tables are plain (user, event) pairs whose uniqueness constraint is
//! the only invariant; inserts go through ON CONFLICT DO NOTHING so a racing
//! duplicate never errors the caller.

use chrono::Utc;
use sqlx::PgPool;

use crate::models::event::Event;
use crate::models::profile::Favorite;
use crate::utils::errors::NuqtaError;

#[derive(Debug, Clone)]
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add a favorite; a no-op when the pair already exists
    pub async fn add(&self, user_id: i64, event_id: i64) -> Result<(), NuqtaError> {
        sqlx::query(
            r#"
            INSERT INTO user_favorites (user_id, event_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, event_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a favorite; returns whether a row was actually removed
    pub async fn remove(&self, user_id: i64, event_id: i64) -> Result<bool, NuqtaError> {
        let removed = sqlx::query("DELETE FROM user_favorites WHERE user_id = $1 AND event_id = $2")
            .bind(user_id)
            .bind(event_id)
            .execute(&self.pool)
            .await?;

        Ok(removed.rows_affected() > 0)
    }

    /// Check whether the user has favorited the event
    pub async fn exists(&self, user_id: i64, event_id: i64) -> Result<bool, NuqtaError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM user_favorites WHERE user_id = $1 AND event_id = $2",
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }

    /// List a user's favorites, newest first
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Favorite>, NuqtaError> {
        let favorites = sqlx::query_as::<_, Favorite>(
            "SELECT user_id, event_id, created_at FROM user_favorites WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(favorites)
    }

    /// The favorited events themselves, for dashboard listings
    pub async fn list_events(&self, user_id: i64) -> Result<Vec<Event>, NuqtaError> {
        let events = sqlx::query_as::<_, Event>(
            r#"
            SELECT e.id, e.vendor_id, e.category_id, e.title, e.slug, e.description, e.event_type,
                   e.event_date, e.end_date, e.venue_name, e.district, e.city, e.country,
                   e.latitude, e.longitude, e.capacity, e.status, e.created_at, e.updated_at
            FROM events e
            INNER JOIN user_favorites f ON f.event_id = e.id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// How many users favorited an event
    pub async fn count_for_event(&self, event_id: i64) -> Result<i64, NuqtaError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM user_favorites WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }
}

#[derive(Debug, Clone)]
pub struct InterestRepository {
    pool: PgPool,
}

impl InterestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Express interest in a prospect event; idempotent
    pub async fn express(&self, user_id: i64, event_id: i64) -> Result<(), NuqtaError> {
        sqlx::query(
            r#"
            INSERT INTO event_interests (user_id, event_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, event_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Withdraw interest; returns whether a row was removed
    pub async fn withdraw(&self, user_id: i64, event_id: i64) -> Result<bool, NuqtaError> {
        let removed = sqlx::query("DELETE FROM event_interests WHERE user_id = $1 AND event_id = $2")
            .bind(user_id)
            .bind(event_id)
            .execute(&self.pool)
            .await?;

        Ok(removed.rows_affected() > 0)
    }

    /// How many users registered interest in an event
    pub async fn count_for_event(&self, event_id: i64) -> Result<i64, NuqtaError> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM event_interests WHERE event_id = $1")
                .bind(event_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count.0)
    }
}
