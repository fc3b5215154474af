//! Test data helpers for creating domain objects
//!
//! Builders return fully populated structs with sensible defaults so each
//! test only overrides the fields it cares about.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use nuqta::models::booking::Booking;
use nuqta::models::discount::{BulkDiscount, DiscountCode};
use nuqta::models::event::{Event, Ticket};
use nuqta::models::profile::Profile;

/// A percentage discount code belonging to the given vendor
pub fn create_test_code(vendor_id: i64, code: &str, value: f64) -> DiscountCode {
    DiscountCode {
        id: 1,
        vendor_id,
        event_id: None,
        code: code.to_string(),
        discount_type: "percentage".to_string(),
        discount_value: value,
        min_purchase_amount: None,
        max_uses: None,
        used_count: 0,
        expiry_date: None,
        is_active: true,
        created_at: Utc::now(),
    }
}

/// A percentage bulk tier for an event
pub fn create_test_tier(event_id: i64, min_quantity: i32, value: f64) -> BulkDiscount {
    BulkDiscount {
        id: min_quantity as i64,
        event_id,
        min_quantity,
        discount_type: "percentage".to_string(),
        discount_value: value,
        created_at: Utc::now(),
    }
}

/// A published event in Kadıköy
pub fn create_test_event(id: i64, vendor_id: i64) -> Event {
    Event {
        id,
        vendor_id,
        category_id: Some(1),
        title: "Bosphorus Jazz Night".to_string(),
        slug: "bosphorus-jazz-night".to_string(),
        description: Some("An evening of live jazz by the water".to_string()),
        event_type: None,
        event_date: Utc::now() + chrono::Duration::days(14),
        end_date: None,
        venue_name: Some("Moda Sahnesi".to_string()),
        district: Some("Kadıköy".to_string()),
        city: "Istanbul".to_string(),
        country: "Turkey".to_string(),
        latitude: Some(40.9830),
        longitude: Some(29.0291),
        capacity: Some(200),
        status: "published".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// A ticket type for an event
pub fn create_test_ticket(id: i64, event_id: i64, price: f64, quantity: i32) -> Ticket {
    Ticket {
        id,
        event_id,
        name: "General admission".to_string(),
        price,
        quantity,
        sold: 0,
        created_at: Utc::now(),
    }
}

/// A confirmed booking
pub fn create_test_booking(id: i64, user_id: i64, vendor_id: i64, total: f64) -> Booking {
    Booking {
        id,
        user_id,
        vendor_id,
        event_id: 1,
        status: "confirmed".to_string(),
        total_amount: total,
        discount_amount: 0.0,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// An attendee profile
pub fn create_test_profile(id: i64, email: &str, language: &str) -> Profile {
    Profile {
        id,
        auth_id: Uuid::new_v4(),
        email: email.to_string(),
        full_name: Some("Ayşe Yılmaz".to_string()),
        phone: Some("+905551234567".to_string()),
        gender: Some("female".to_string()),
        birth_date: NaiveDate::from_ymd_opt(1995, 4, 12),
        role: "user".to_string(),
        language: language.to_string(),
        avatar_url: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
