//! Booking repository implementation
//!
//! Capacity accounting lives here: ticket `sold` counters only ever move
//! through conditional updates (`sold + n <= quantity`), so concurrent
//! booking attempts can never oversell a ticket type. Creation, reservation
//! and discount redemption share one transaction.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::booking::{Booking, BookingStatus, BookingTicket, NewBooking};
use crate::utils::errors::NuqtaError;

const BOOKING_COLUMNS: &str =
    "id, user_id, vendor_id, event_id, status, total_amount, discount_amount, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Atomically create a booking: reserve every requested ticket line,
    /// redeem the discount code if one applies, and insert the booking row.
    /// Any failed reservation rolls the whole transaction back.
    pub async fn create(&self, new: NewBooking) -> Result<Booking, NuqtaError> {
        let mut tx = self.pool.begin().await?;

        for line in &new.lines {
            let reserved = sqlx::query(
                "UPDATE tickets SET sold = sold + $2 WHERE id = $1 AND sold + $2 <= quantity",
            )
            .bind(line.ticket_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;

            if reserved.rows_affected() == 0 {
                tx.rollback().await?;
                return Err(NuqtaError::BusinessLogic(
                    "Not enough tickets available".to_string(),
                ));
            }
        }

        if let Some(code_id) = new.discount_code_id {
            let redeemed = sqlx::query(
                r#"
                UPDATE discount_codes
                SET used_count = used_count + 1
                WHERE id = $1 AND is_active = true
                  AND (max_uses IS NULL OR used_count < max_uses)
                "#,
            )
            .bind(code_id)
            .execute(&mut *tx)
            .await?;

            if redeemed.rows_affected() == 0 {
                tx.rollback().await?;
                return Err(NuqtaError::BusinessLogic(
                    "This discount code has reached its maximum uses".to_string(),
                ));
            }
        }

        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (user_id, vendor_id, event_id, status, total_amount,
                                  discount_amount, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(new.user_id)
        .bind(new.vendor_id)
        .bind(new.event_id)
        .bind(new.status.as_str())
        .bind(new.total_amount)
        .bind(new.discount_amount)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for line in &new.lines {
            sqlx::query(
                r#"
                INSERT INTO booking_tickets (booking_id, ticket_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(booking.id)
            .bind(line.ticket_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(booking)
    }

    /// Find booking by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, NuqtaError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Ticket lines reserved by a booking
    pub async fn list_tickets(&self, booking_id: i64) -> Result<Vec<BookingTicket>, NuqtaError> {
        let lines = sqlx::query_as::<_, BookingTicket>(
            "SELECT id, booking_id, ticket_id, quantity, unit_price FROM booking_tickets WHERE booking_id = $1",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Bookings made by a user, newest first
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Booking>, NuqtaError> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Bookings for a vendor's events, optionally filtered by status
    pub async fn list_by_vendor(
        &self,
        vendor_id: i64,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, NuqtaError> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS} FROM bookings
            WHERE vendor_id = $1 AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#
        ))
        .bind(vendor_id)
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Confirm a pending booking, scoped to the owning vendor.
    /// Returns None when no pending booking matched the (id, vendor) pair.
    pub async fn confirm_for_vendor(
        &self,
        id: i64,
        vendor_id: i64,
    ) -> Result<Option<Booking>, NuqtaError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET status = 'confirmed', updated_at = $3
            WHERE id = $1 AND vendor_id = $2 AND status = 'pending_payment'
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(vendor_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Cancel a pending booking, scoped to the owning vendor, releasing its
    /// reserved ticket counts in the same transaction.
    pub async fn cancel_for_vendor(
        &self,
        id: i64,
        vendor_id: i64,
    ) -> Result<Option<Booking>, NuqtaError> {
        let mut tx = self.pool.begin().await?;

        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET status = 'cancelled', updated_at = $3
            WHERE id = $1 AND vendor_id = $2 AND status = 'pending_payment'
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(vendor_id)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?;

        if booking.is_some() {
            sqlx::query(
                r#"
                UPDATE tickets t
                SET sold = GREATEST(t.sold - bt.quantity, 0)
                FROM booking_tickets bt
                WHERE bt.booking_id = $1 AND bt.ticket_id = t.id
                "#,
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(booking)
    }

    /// Delete a user's own unpaid pending booking, releasing its tickets.
    /// Returns false when nothing matched (wrong user, paid, or missing).
    pub async fn delete_pending_for_user(&self, id: i64, user_id: i64) -> Result<bool, NuqtaError> {
        let mut tx = self.pool.begin().await?;

        // Release first: the conditional join only matches while the booking
        // row still satisfies the deletable predicate.
        sqlx::query(
            r#"
            UPDATE tickets t
            SET sold = GREATEST(t.sold - bt.quantity, 0)
            FROM booking_tickets bt
            JOIN bookings b ON b.id = bt.booking_id
            WHERE bt.ticket_id = t.id
              AND b.id = $1 AND b.user_id = $2 AND b.status = 'pending_payment'
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let deleted = sqlx::query(
            "DELETE FROM bookings WHERE id = $1 AND user_id = $2 AND status = 'pending_payment'",
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(deleted.rows_affected() > 0)
    }

    /// Cancel pending bookings older than the cutoff and release their
    /// tickets. Returns the number of bookings swept.
    pub async fn expire_stale_pending(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, NuqtaError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE tickets t
            SET sold = GREATEST(t.sold - bt.quantity, 0)
            FROM booking_tickets bt
            JOIN bookings b ON b.id = bt.booking_id
            WHERE bt.ticket_id = t.id
              AND b.status = 'pending_payment' AND b.created_at < $1
            "#,
        )
        .bind(cutoff)
        .execute(&mut *tx)
        .await?;

        let expired = sqlx::query(
            r#"
            UPDATE bookings
            SET status = 'cancelled', updated_at = $2
            WHERE status = 'pending_payment' AND created_at < $1
            "#,
        )
        .bind(cutoff)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(expired.rows_affected())
    }
}
