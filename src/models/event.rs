//! Event, ticket and category models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub vendor_id: i64,
    pub category_id: Option<i64>,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    /// Legacy free-text type kept for events created before categorization
    pub event_type: Option<String>,
    pub event_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub venue_name: Option<String>,
    pub district: Option<String>,
    pub city: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub capacity: Option<i32>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub sold: i32,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    /// Seats still available on this ticket type
    pub fn remaining(&self) -> i32 {
        (self.quantity - self.sold).max(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub slug: String,
    pub name_en: String,
    pub name_ar: String,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Display name in the requested language
    pub fn name(&self, lang: &str) -> &str {
        match lang {
            "ar" => &self.name_ar,
            _ => &self.name_en,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    Draft,
    Published,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub vendor_id: i64,
    pub category_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub event_type: Option<String>,
    pub event_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub venue_name: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub category_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub venue_name: Option<String>,
    pub district: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketRequest {
    pub event_id: i64,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub slug: String,
    pub name_en: String,
    pub name_ar: String,
    pub icon: Option<String>,
}

/// Parameters for the geo-filtered event search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventSearchParams {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// One ranked row returned by the event search
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventSummary {
    pub id: i64,
    pub vendor_id: i64,
    pub title: String,
    pub slug: String,
    pub event_date: DateTime<Utc>,
    pub venue_name: Option<String>,
    pub district: Option<String>,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category_slug: Option<String>,
    /// Minimum ticket price; 0 when the event has no tickets (free)
    pub min_price: f64,
    /// Distance from the viewer, absent when no viewer location was given
    /// or the event has no coordinates
    pub dist_km: Option<f64>,
}
