//! Analytics repository implementation
//!
//! Rollup queries feeding the vendor dashboard. Every query here scopes to
//! the vendor's confirmed bookings; pending and cancelled rows never count
//! toward revenue or loyalty.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::utils::errors::NuqtaError;

#[derive(Debug, Clone)]
pub struct AnalyticsRepository {
    pool: PgPool,
}

impl AnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Total revenue and sales count across confirmed bookings
    pub async fn revenue_and_sales(&self, vendor_id: i64) -> Result<(f64, i64), NuqtaError> {
        let row: (f64, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(total_amount), 0)::float8, COUNT(*)
            FROM bookings
            WHERE vendor_id = $1 AND status = 'confirmed'
            "#,
        )
        .bind(vendor_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Confirmed sales since a cutoff instant
    pub async fn sales_since(
        &self,
        vendor_id: i64,
        since: DateTime<Utc>,
    ) -> Result<i64, NuqtaError> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM bookings
            WHERE vendor_id = $1 AND status = 'confirmed' AND created_at >= $2
            "#,
        )
        .bind(vendor_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Confirmed bookings per event category. Events predating
    /// categorization fall back to their legacy free-text type.
    pub async fn category_distribution(
        &self,
        vendor_id: i64,
    ) -> Result<Vec<(String, i64)>, NuqtaError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT COALESCE(c.slug, e.event_type, 'uncategorized') AS label, COUNT(*)
            FROM bookings b
            JOIN events e ON e.id = b.event_id
            LEFT JOIN categories c ON c.id = e.category_id
            WHERE b.vendor_id = $1 AND b.status = 'confirmed'
            GROUP BY label
            ORDER BY COUNT(*) DESC
            "#,
        )
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Confirmed booking count per customer, for loyalty bucketing
    pub async fn customer_booking_counts(
        &self,
        vendor_id: i64,
    ) -> Result<Vec<(i64, i64)>, NuqtaError> {
        let rows: Vec<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT user_id, COUNT(*) FROM bookings
            WHERE vendor_id = $1 AND status = 'confirmed'
            GROUP BY user_id
            "#,
        )
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Distinct purchasers grouped by profile gender
    pub async fn gender_counts(
        &self,
        vendor_id: i64,
    ) -> Result<Vec<(Option<String>, i64)>, NuqtaError> {
        let rows: Vec<(Option<String>, i64)> = sqlx::query_as(
            r#"
            SELECT p.gender, COUNT(DISTINCT b.user_id)
            FROM bookings b
            JOIN profiles p ON p.id = b.user_id
            WHERE b.vendor_id = $1 AND b.status = 'confirmed'
            GROUP BY p.gender
            "#,
        )
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Birth dates of distinct purchasers, for age bucketing
    pub async fn purchaser_birth_dates(
        &self,
        vendor_id: i64,
    ) -> Result<Vec<Option<NaiveDate>>, NuqtaError> {
        let rows: Vec<(Option<NaiveDate>,)> = sqlx::query_as(
            r#"
            SELECT p.birth_date
            FROM profiles p
            WHERE p.id IN (
                SELECT DISTINCT user_id FROM bookings
                WHERE vendor_id = $1 AND status = 'confirmed'
            )
            "#,
        )
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(d,)| d).collect())
    }
}
