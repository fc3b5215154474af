//! Discount code and bulk discount models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DiscountCode {
    pub id: i64,
    pub vendor_id: i64,
    /// When set, the code only applies to this event
    pub event_id: Option<i64>,
    pub code: String,
    pub discount_type: String,
    pub discount_value: f64,
    pub min_purchase_amount: Option<f64>,
    pub max_uses: Option<i32>,
    pub used_count: i32,
    pub expiry_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Quantity-tiered automatic discount, distinct from code-based discounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BulkDiscount {
    pub id: i64,
    pub event_id: i64,
    pub min_quantity: i32,
    pub discount_type: String,
    pub discount_value: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountType {
    Percentage,
    Fixed,
}

impl DiscountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::Percentage => "percentage",
            DiscountType::Fixed => "fixed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "percentage" => Some(DiscountType::Percentage),
            "fixed" => Some(DiscountType::Fixed),
            _ => None,
        }
    }
}

/// Why a discount code was refused for a candidate purchase
#[derive(Debug, Clone, PartialEq)]
pub enum DiscountRejection {
    /// Unknown, inactive, or belonging to another vendor
    Invalid,
    /// Scoped to a different event
    WrongEvent,
    Expired,
    /// max_uses reached
    Exhausted,
    BelowMinimum { min: f64 },
}

impl DiscountRejection {
    /// Translation key of the user-facing message
    pub fn message_key(&self) -> &'static str {
        match self {
            DiscountRejection::Invalid => "discount.invalid",
            DiscountRejection::WrongEvent => "discount.wrong_event",
            DiscountRejection::Expired => "discount.expired",
            DiscountRejection::Exhausted => "discount.exhausted",
            DiscountRejection::BelowMinimum { .. } => "discount.min_purchase",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDiscountCodeRequest {
    pub vendor_id: i64,
    pub event_id: Option<i64>,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub min_purchase_amount: Option<f64>,
    pub max_uses: Option<i32>,
    pub expiry_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBulkDiscountRequest {
    pub event_id: i64,
    pub min_quantity: i32,
    pub discount_type: DiscountType,
    pub discount_value: f64,
}
