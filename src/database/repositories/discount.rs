//! Discount repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::discount::{
    BulkDiscount, CreateBulkDiscountRequest, CreateDiscountCodeRequest, DiscountCode,
};
use crate::utils::errors::NuqtaError;

const CODE_COLUMNS: &str = "id, vendor_id, event_id, code, discount_type, discount_value, \
     min_purchase_amount, max_uses, used_count, expiry_date, is_active, created_at";

const BULK_COLUMNS: &str = "id, event_id, min_quantity, discount_type, discount_value, created_at";

#[derive(Debug, Clone)]
pub struct DiscountRepository {
    pool: PgPool,
}

impl DiscountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a discount code; codes are stored trimmed and compared
    /// case-insensitively per vendor
    pub async fn create(&self, request: CreateDiscountCodeRequest) -> Result<DiscountCode, NuqtaError> {
        let code = sqlx::query_as::<_, DiscountCode>(&format!(
            r#"
            INSERT INTO discount_codes (vendor_id, event_id, code, discount_type, discount_value,
                                        min_purchase_amount, max_uses, used_count, expiry_date,
                                        is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 0, $8, true, $9)
            RETURNING {CODE_COLUMNS}
            "#
        ))
        .bind(request.vendor_id)
        .bind(request.event_id)
        .bind(request.code.trim())
        .bind(request.discount_type.as_str())
        .bind(request.discount_value)
        .bind(request.min_purchase_amount)
        .bind(request.max_uses)
        .bind(request.expiry_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(code)
    }

    /// Look up a vendor's code, trimmed and case-insensitive
    pub async fn find_by_code(
        &self,
        vendor_id: i64,
        code: &str,
    ) -> Result<Option<DiscountCode>, NuqtaError> {
        let code = sqlx::query_as::<_, DiscountCode>(&format!(
            "SELECT {CODE_COLUMNS} FROM discount_codes WHERE vendor_id = $1 AND lower(code) = lower($2)"
        ))
        .bind(vendor_id)
        .bind(code.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(code)
    }

    /// List a vendor's codes, newest first
    pub async fn list_by_vendor(&self, vendor_id: i64) -> Result<Vec<DiscountCode>, NuqtaError> {
        let codes = sqlx::query_as::<_, DiscountCode>(&format!(
            "SELECT {CODE_COLUMNS} FROM discount_codes WHERE vendor_id = $1 ORDER BY created_at DESC"
        ))
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(codes)
    }

    /// Activate or deactivate a code, scoped to the owning vendor
    pub async fn set_active(
        &self,
        id: i64,
        vendor_id: i64,
        is_active: bool,
    ) -> Result<Option<DiscountCode>, NuqtaError> {
        let code = sqlx::query_as::<_, DiscountCode>(&format!(
            r#"
            UPDATE discount_codes
            SET is_active = $3
            WHERE id = $1 AND vendor_id = $2
            RETURNING {CODE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(vendor_id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(code)
    }

    /// Create a bulk discount tier for an event
    pub async fn create_bulk(
        &self,
        request: CreateBulkDiscountRequest,
    ) -> Result<BulkDiscount, NuqtaError> {
        let tier = sqlx::query_as::<_, BulkDiscount>(&format!(
            r#"
            INSERT INTO bulk_discounts (event_id, min_quantity, discount_type, discount_value, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {BULK_COLUMNS}
            "#
        ))
        .bind(request.event_id)
        .bind(request.min_quantity)
        .bind(request.discount_type.as_str())
        .bind(request.discount_value)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(tier)
    }

    /// Bulk tiers for an event, ascending by minimum quantity
    pub async fn list_bulk(&self, event_id: i64) -> Result<Vec<BulkDiscount>, NuqtaError> {
        let tiers = sqlx::query_as::<_, BulkDiscount>(&format!(
            "SELECT {BULK_COLUMNS} FROM bulk_discounts WHERE event_id = $1 ORDER BY min_quantity ASC"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tiers)
    }

    /// The applicable tier: highest min_quantity not exceeding the
    /// requested quantity
    pub async fn applicable_tier(
        &self,
        event_id: i64,
        quantity: i32,
    ) -> Result<Option<BulkDiscount>, NuqtaError> {
        let tier = sqlx::query_as::<_, BulkDiscount>(&format!(
            r#"
            SELECT {BULK_COLUMNS} FROM bulk_discounts
            WHERE event_id = $1 AND min_quantity <= $2
            ORDER BY min_quantity DESC
            LIMIT 1
            "#
        ))
        .bind(event_id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tier)
    }

    /// Delete a bulk tier, scoped to its event
    pub async fn delete_bulk(&self, id: i64, event_id: i64) -> Result<bool, NuqtaError> {
        let deleted = sqlx::query("DELETE FROM bulk_discounts WHERE id = $1 AND event_id = $2")
            .bind(id)
            .bind(event_id)
            .execute(&self.pool)
            .await?;

        Ok(deleted.rows_affected() > 0)
    }
}
