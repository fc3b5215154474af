//! Event repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::event::{
    Category, CreateCategoryRequest, CreateEventRequest, CreateTicketRequest, Event,
    EventSearchParams, EventStatus, EventSummary, Ticket, UpdateEventRequest,
};
use crate::utils::errors::NuqtaError;

const EVENT_COLUMNS: &str = "id, vendor_id, category_id, title, slug, description, event_type, \
     event_date, end_date, venue_name, district, city, country, latitude, longitude, capacity, \
     status, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event in draft status
    pub async fn create(&self, slug: String, request: CreateEventRequest) -> Result<Event, NuqtaError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (vendor_id, category_id, title, slug, description, event_type,
                                event_date, end_date, venue_name, district, city, country,
                                latitude, longitude, capacity, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(request.vendor_id)
        .bind(request.category_id)
        .bind(request.title)
        .bind(slug)
        .bind(request.description)
        .bind(request.event_type)
        .bind(request.event_date)
        .bind(request.end_date)
        .bind(request.venue_name)
        .bind(request.district)
        .bind(request.city.unwrap_or_else(|| "Istanbul".to_string()))
        .bind(request.country.unwrap_or_else(|| "Turkey".to_string()))
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(request.capacity)
        .bind(EventStatus::Draft.as_str())
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, NuqtaError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by slug
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Event>, NuqtaError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Check whether a slug is already taken
    pub async fn slug_exists(&self, slug: &str) -> Result<bool, NuqtaError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events WHERE slug = $1")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0 > 0)
    }

    /// Update event fields; only provided fields change
    pub async fn update(&self, id: i64, request: UpdateEventRequest) -> Result<Event, NuqtaError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET category_id = COALESCE($2, category_id),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                event_date = COALESCE($5, event_date),
                end_date = COALESCE($6, end_date),
                venue_name = COALESCE($7, venue_name),
                district = COALESCE($8, district),
                latitude = COALESCE($9, latitude),
                longitude = COALESCE($10, longitude),
                capacity = COALESCE($11, capacity),
                updated_at = $12
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.category_id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.event_date)
        .bind(request.end_date)
        .bind(request.venue_name)
        .bind(request.district)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(request.capacity)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Transition event status, scoped to the owning vendor.
    /// Returns None when no row matched (missing event or foreign vendor).
    pub async fn set_status(
        &self,
        id: i64,
        vendor_id: i64,
        status: EventStatus,
    ) -> Result<Option<Event>, NuqtaError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET status = $3, updated_at = $4
            WHERE id = $1 AND vendor_id = $2
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(vendor_id)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Delete event (tickets cascade)
    pub async fn delete(&self, id: i64) -> Result<(), NuqtaError> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Geo-filtered, ranked event search.
    ///
    /// Distance uses the spherical law of cosines with the acos argument
    /// clamped to [-1, 1]. Events without coordinates are kept and sort
    /// after all ranked rows; the radius filter only drops rows whose
    /// computed distance exceeds it.
    pub async fn search(&self, params: &EventSearchParams) -> Result<Vec<EventSummary>, NuqtaError> {
        let limit = params.limit.unwrap_or(50);
        let offset = params.offset.unwrap_or(0);

        let events = sqlx::query_as::<_, EventSummary>(
            r#"
            SELECT * FROM (
                SELECT e.id, e.vendor_id, e.title, e.slug, e.event_date,
                       e.venue_name, e.district, e.city, e.latitude, e.longitude,
                       c.slug AS category_slug,
                       COALESCE(tp.min_price, 0) AS min_price,
                       CASE
                           WHEN $1::float8 IS NOT NULL AND $2::float8 IS NOT NULL
                                AND e.latitude IS NOT NULL AND e.longitude IS NOT NULL
                           THEN 6371.0 * acos(LEAST(1.0, GREATEST(-1.0,
                                    cos(radians($1)) * cos(radians(e.latitude)) *
                                    cos(radians(e.longitude) - radians($2)) +
                                    sin(radians($1)) * sin(radians(e.latitude)))))
                       END AS dist_km
                FROM events e
                LEFT JOIN categories c ON c.id = e.category_id
                LEFT JOIN (
                    SELECT event_id, MIN(price) AS min_price
                    FROM tickets
                    GROUP BY event_id
                ) tp ON tp.event_id = e.id
                WHERE e.status = 'published'
                  AND ($4::text IS NULL OR c.slug = $4 OR e.event_type ILIKE $4)
                  AND ($5::text IS NULL OR e.title ILIKE '%' || $5 || '%')
                  AND ($6::float8 IS NULL OR COALESCE(tp.min_price, 0) >= $6)
                  AND ($7::float8 IS NULL OR COALESCE(tp.min_price, 0) <= $7)
                  AND ($8::timestamptz IS NULL OR e.event_date >= $8)
                  AND ($9::timestamptz IS NULL OR e.event_date <= $9)
            ) ranked
            WHERE ($3::float8 IS NULL OR ranked.dist_km IS NULL OR ranked.dist_km <= $3)
            ORDER BY ranked.dist_km ASC NULLS LAST, ranked.event_date ASC
            LIMIT $10 OFFSET $11
            "#,
        )
        .bind(params.latitude)
        .bind(params.longitude)
        .bind(params.radius_km)
        .bind(params.category.as_deref())
        .bind(params.search.as_deref())
        .bind(params.min_price)
        .bind(params.max_price)
        .bind(params.date_from)
        .bind(params.date_to)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Upcoming published events in the same category, excluding the event itself
    pub async fn related_events(
        &self,
        event_id: i64,
        category_id: Option<i64>,
        limit: i64,
    ) -> Result<Vec<Event>, NuqtaError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE id != $1
              AND status = 'published'
              AND event_date > NOW()
              AND ($2::bigint IS NULL OR category_id = $2)
            ORDER BY event_date ASC
            LIMIT $3
            "#
        ))
        .bind(event_id)
        .bind(category_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Get events for a vendor, newest first
    pub async fn list_by_vendor(&self, vendor_id: i64) -> Result<Vec<Event>, NuqtaError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE vendor_id = $1 ORDER BY event_date DESC"
        ))
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Upcoming published events for a vendor's public page
    pub async fn list_upcoming_by_vendor(&self, vendor_id: i64) -> Result<Vec<Event>, NuqtaError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE vendor_id = $1 AND status = 'published' AND event_date > NOW()
            ORDER BY event_date ASC
            "#
        ))
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Create a ticket type for an event
    pub async fn create_ticket(&self, request: CreateTicketRequest) -> Result<Ticket, NuqtaError> {
        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (event_id, name, price, quantity, sold, created_at)
            VALUES ($1, $2, $3, $4, 0, $5)
            RETURNING id, event_id, name, price, quantity, sold, created_at
            "#,
        )
        .bind(request.event_id)
        .bind(request.name)
        .bind(request.price)
        .bind(request.quantity)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(ticket)
    }

    /// Get ticket types for an event, cheapest first
    pub async fn list_tickets(&self, event_id: i64) -> Result<Vec<Ticket>, NuqtaError> {
        let tickets = sqlx::query_as::<_, Ticket>(
            "SELECT id, event_id, name, price, quantity, sold, created_at FROM tickets WHERE event_id = $1 ORDER BY price ASC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tickets)
    }

    /// Sum of ticket quantities declared for an event
    pub async fn total_ticket_quantity(&self, event_id: i64) -> Result<i64, NuqtaError> {
        let total: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(quantity), 0) FROM tickets WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(total.0)
    }

    /// Create a category
    pub async fn create_category(&self, request: CreateCategoryRequest) -> Result<Category, NuqtaError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (slug, name_en, name_ar, icon, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, slug, name_en, name_ar, icon, created_at
            "#,
        )
        .bind(request.slug)
        .bind(request.name_en)
        .bind(request.name_ar)
        .bind(request.icon)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    /// List all categories
    pub async fn list_categories(&self) -> Result<Vec<Category>, NuqtaError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, slug, name_en, name_ar, icon, created_at FROM categories ORDER BY slug ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Find a category by slug
    pub async fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, NuqtaError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, slug, name_en, name_ar, icon, created_at FROM categories WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }
}
