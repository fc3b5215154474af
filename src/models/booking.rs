//! Booking model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub vendor_id: i64,
    pub event_id: i64,
    pub status: String,
    pub total_amount: f64,
    pub discount_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One reserved ticket line belonging to a booking
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingTicket {
    pub id: i64,
    pub booking_id: i64,
    pub ticket_id: i64,
    pub quantity: i32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    PendingPayment,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::PendingPayment => "pending_payment",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Initial status for a new booking: free events skip payment
    pub fn initial_for_total(total_amount: f64) -> Self {
        if total_amount <= 0.0 {
            BookingStatus::Confirmed
        } else {
            BookingStatus::PendingPayment
        }
    }
}

/// Requested quantity of one ticket type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingLine {
    pub ticket_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub user_id: i64,
    pub event_id: i64,
    pub lines: Vec<BookingLine>,
    pub discount_code: Option<String>,
}

/// A booking line priced against the current ticket table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedLine {
    pub ticket_id: i64,
    pub quantity: i32,
    pub unit_price: f64,
}

/// Fully priced booking handed to the repository for atomic insertion
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: i64,
    pub vendor_id: i64,
    pub event_id: i64,
    pub status: BookingStatus,
    pub total_amount: f64,
    pub discount_amount: f64,
    pub discount_code_id: Option<i64>,
    pub lines: Vec<PricedLine>,
}

/// Price computation for a candidate booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub subtotal: f64,
    pub bulk_discount: f64,
    pub code_discount: f64,
    pub total: f64,
}

impl PricingBreakdown {
    /// Total discount across both mechanisms
    pub fn discount_amount(&self) -> f64 {
        self.bulk_discount + self.code_discount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status_for_free_booking() {
        assert_eq!(
            BookingStatus::initial_for_total(0.0),
            BookingStatus::Confirmed
        );
    }

    #[test]
    fn test_initial_status_for_paid_booking() {
        assert_eq!(
            BookingStatus::initial_for_total(150.0),
            BookingStatus::PendingPayment
        );
    }
}
