//! Vendor model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::event::Event;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vendor {
    pub id: i64,
    /// Profile that owns this vendor account; None for unclaimed prospects
    pub owner_id: Option<i64>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Locked-in discounted subscription rate for early vendors
    pub founder_pricing: bool,
    pub is_prospect: bool,
    #[serde(skip_serializing)]
    pub claim_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GalleryImage {
    pub id: i64,
    pub vendor_id: i64,
    pub image_url: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVendorRequest {
    pub owner_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Staff-created placeholder vendor, convertible via claim token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProspectRequest {
    pub name: String,
    pub description: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVendorRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Public vendor page payload: account plus gallery and upcoming events
#[derive(Debug, Clone, Serialize)]
pub struct VendorProfile {
    pub vendor: Vendor,
    pub gallery: Vec<GalleryImage>,
    pub upcoming_events: Vec<Event>,
}
