//! Discount evaluation service
//!
//! Code validation runs a fixed check sequence where the first failing
//! check wins; computation caps every discount at the purchase amount so a
//! final price can never go negative. Bulk tiers are independent of codes
//! and picked by the highest min_quantity not exceeding the purchase.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::database::repositories::DiscountRepository;
use crate::models::discount::{
    BulkDiscount, CreateBulkDiscountRequest, CreateDiscountCodeRequest, DiscountCode,
    DiscountRejection, DiscountType,
};
use crate::utils::errors::{NuqtaError, Result};
use crate::utils::logging::log_discount_attempt;

/// A code that passed every check, with its computed discount
#[derive(Debug, Clone)]
pub struct ValidatedDiscount {
    pub code: DiscountCode,
    pub amount: f64,
}

/// Outcome of evaluating a code against a candidate purchase
pub type DiscountOutcome = std::result::Result<ValidatedDiscount, DiscountRejection>;

#[derive(Debug, Clone)]
pub struct DiscountService {
    discounts: DiscountRepository,
}

impl DiscountService {
    /// Create a new DiscountService instance
    pub fn new(discounts: DiscountRepository) -> Self {
        Self { discounts }
    }

    /// Evaluate a discount code for a purchase on one of the vendor's
    /// events. Returns the domain outcome; only store failures error.
    pub async fn evaluate_code(
        &self,
        vendor_id: i64,
        event_id: i64,
        code: &str,
        amount: f64,
    ) -> Result<DiscountOutcome> {
        let found = self.discounts.find_by_code(vendor_id, code).await?;

        let outcome = match found {
            Some(discount) => {
                Self::check_code(&discount, vendor_id, event_id, amount, Utc::now()).map(
                    |discount_amount| ValidatedDiscount {
                        code: discount,
                        amount: discount_amount,
                    },
                )
            }
            None => Err(DiscountRejection::Invalid),
        };

        match &outcome {
            Ok(validated) => {
                log_discount_attempt(vendor_id, code, true, None);
                debug!(
                    vendor_id = vendor_id,
                    discount = validated.amount,
                    "Discount code validated"
                );
            }
            Err(rejection) => {
                log_discount_attempt(vendor_id, code, false, Some(rejection.message_key()));
            }
        }

        Ok(outcome)
    }

    /// The check sequence of the discount contract; first failure wins.
    pub fn check_code(
        code: &DiscountCode,
        vendor_id: i64,
        event_id: i64,
        amount: f64,
        now: DateTime<Utc>,
    ) -> std::result::Result<f64, DiscountRejection> {
        if !code.is_active || code.vendor_id != vendor_id {
            return Err(DiscountRejection::Invalid);
        }

        if let Some(scoped_event) = code.event_id {
            if scoped_event != event_id {
                return Err(DiscountRejection::WrongEvent);
            }
        }

        if let Some(expiry) = code.expiry_date {
            if expiry < now {
                return Err(DiscountRejection::Expired);
            }
        }

        if let Some(max_uses) = code.max_uses {
            if code.used_count >= max_uses {
                return Err(DiscountRejection::Exhausted);
            }
        }

        if let Some(min) = code.min_purchase_amount {
            if amount < min {
                return Err(DiscountRejection::BelowMinimum { min });
            }
        }

        let discount_type =
            DiscountType::parse(&code.discount_type).unwrap_or(DiscountType::Fixed);
        Ok(Self::compute_discount(
            discount_type,
            code.discount_value,
            amount,
        ))
    }

    /// Percentage or flat discount, capped to the purchase amount and
    /// never negative
    pub fn compute_discount(discount_type: DiscountType, value: f64, amount: f64) -> f64 {
        let raw = match discount_type {
            DiscountType::Percentage => amount * value / 100.0,
            DiscountType::Fixed => value,
        };

        raw.clamp(0.0, amount.max(0.0))
    }

    /// Pick the applicable bulk tier: highest min_quantity not exceeding
    /// the purchased quantity
    pub fn applicable_tier(tiers: &[BulkDiscount], quantity: i32) -> Option<&BulkDiscount> {
        tiers
            .iter()
            .filter(|tier| tier.min_quantity <= quantity)
            .max_by_key(|tier| tier.min_quantity)
    }

    /// Bulk discount for a quantity against the pre-discount subtotal;
    /// 0 when no tier applies
    pub async fn bulk_discount(
        &self,
        event_id: i64,
        quantity: i32,
        subtotal: f64,
    ) -> Result<f64> {
        let tier = self.discounts.applicable_tier(event_id, quantity).await?;

        Ok(tier
            .map(|tier| {
                let discount_type =
                    DiscountType::parse(&tier.discount_type).unwrap_or(DiscountType::Fixed);
                Self::compute_discount(discount_type, tier.discount_value, subtotal)
            })
            .unwrap_or(0.0))
    }

    /// Create a code for a vendor
    pub async fn create_code(&self, request: CreateDiscountCodeRequest) -> Result<DiscountCode> {
        let trimmed = request.code.trim();
        if trimmed.is_empty() {
            return Err(NuqtaError::validation_field("code", "Code cannot be empty"));
        }

        if request.discount_value <= 0.0 {
            return Err(NuqtaError::validation_field(
                "discount_value",
                "Discount value must be greater than 0",
            ));
        }

        if let Some(existing) = self
            .discounts
            .find_by_code(request.vendor_id, trimmed)
            .await?
        {
            return Err(NuqtaError::Conflict(format!(
                "Discount code '{}' already exists",
                existing.code
            )));
        }

        self.discounts.create(request).await
    }

    /// List a vendor's codes
    pub async fn list_codes(&self, vendor_id: i64) -> Result<Vec<DiscountCode>> {
        self.discounts.list_by_vendor(vendor_id).await
    }

    /// Deactivate a code, scoped to the owning vendor
    pub async fn deactivate_code(&self, id: i64, vendor_id: i64) -> Result<DiscountCode> {
        self.discounts
            .set_active(id, vendor_id, false)
            .await?
            .ok_or_else(|| NuqtaError::Forbidden("Discount code belongs to another vendor".to_string()))
    }

    /// Create a bulk tier for an event
    pub async fn create_bulk_tier(
        &self,
        request: CreateBulkDiscountRequest,
    ) -> Result<BulkDiscount> {
        if request.min_quantity < 1 {
            return Err(NuqtaError::validation_field(
                "min_quantity",
                "Minimum quantity must be at least 1",
            ));
        }

        if request.discount_value <= 0.0 {
            return Err(NuqtaError::validation_field(
                "discount_value",
                "Discount value must be greater than 0",
            ));
        }

        self.discounts.create_bulk(request).await
    }

    /// Bulk tiers for an event, ascending
    pub async fn list_bulk_tiers(&self, event_id: i64) -> Result<Vec<BulkDiscount>> {
        self.discounts.list_bulk(event_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Duration;

    fn sample_code() -> DiscountCode {
        DiscountCode {
            id: 1,
            vendor_id: 10,
            event_id: None,
            code: "WELCOME10".to_string(),
            discount_type: "percentage".to_string(),
            discount_value: 10.0,
            min_purchase_amount: None,
            max_uses: None,
            used_count: 0,
            expiry_date: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn tier(min_quantity: i32, value: f64) -> BulkDiscount {
        BulkDiscount {
            id: min_quantity as i64,
            event_id: 5,
            min_quantity,
            discount_type: "percentage".to_string(),
            discount_value: value,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_percentage_computation() {
        let amount =
            DiscountService::check_code(&sample_code(), 10, 5, 200.0, Utc::now()).expect("valid");
        assert_eq!(amount, 20.0);
    }

    #[test]
    fn test_fixed_discount_capped_at_amount() {
        let mut code = sample_code();
        code.discount_type = "fixed".to_string();
        code.discount_value = 500.0;

        let amount = DiscountService::check_code(&code, 10, 5, 120.0, Utc::now()).expect("valid");
        assert_eq!(amount, 120.0);
    }

    #[test]
    fn test_inactive_code_is_invalid() {
        let mut code = sample_code();
        code.is_active = false;

        assert_matches!(
            DiscountService::check_code(&code, 10, 5, 200.0, Utc::now()),
            Err(DiscountRejection::Invalid)
        );
    }

    #[test]
    fn test_foreign_vendor_is_invalid() {
        assert_matches!(
            DiscountService::check_code(&sample_code(), 99, 5, 200.0, Utc::now()),
            Err(DiscountRejection::Invalid)
        );
    }

    #[test]
    fn test_event_scope_mismatch() {
        let mut code = sample_code();
        code.event_id = Some(7);

        assert_matches!(
            DiscountService::check_code(&code, 10, 5, 200.0, Utc::now()),
            Err(DiscountRejection::WrongEvent)
        );
        assert!(DiscountService::check_code(&code, 10, 7, 200.0, Utc::now()).is_ok());
    }

    #[test]
    fn test_expired_code_always_rejected() {
        let mut code = sample_code();
        code.expiry_date = Some(Utc::now() - Duration::days(1));
        // Even with otherwise generous limits
        code.max_uses = Some(1000);
        code.min_purchase_amount = Some(1.0);

        assert_matches!(
            DiscountService::check_code(&code, 10, 5, 200.0, Utc::now()),
            Err(DiscountRejection::Expired)
        );
    }

    #[test]
    fn test_exhausted_code_rejected() {
        let mut code = sample_code();
        code.max_uses = Some(3);
        code.used_count = 3;

        assert_matches!(
            DiscountService::check_code(&code, 10, 5, 200.0, Utc::now()),
            Err(DiscountRejection::Exhausted)
        );
    }

    #[test]
    fn test_below_minimum_rejected_with_stated_minimum() {
        let mut code = sample_code();
        code.min_purchase_amount = Some(150.0);

        assert_matches!(
            DiscountService::check_code(&code, 10, 5, 100.0, Utc::now()),
            Err(DiscountRejection::BelowMinimum { min }) if min == 150.0
        );
    }

    #[test]
    fn test_check_order_scope_before_expiry() {
        let mut code = sample_code();
        code.event_id = Some(7);
        code.expiry_date = Some(Utc::now() - Duration::days(1));

        // Scope mismatch must win over expiry
        assert_matches!(
            DiscountService::check_code(&code, 10, 5, 200.0, Utc::now()),
            Err(DiscountRejection::WrongEvent)
        );
    }

    #[test]
    fn test_bulk_tier_selection() {
        let tiers = vec![tier(5, 10.0), tier(10, 20.0)];

        assert_eq!(
            DiscountService::applicable_tier(&tiers, 7).map(|t| t.min_quantity),
            Some(5)
        );
        assert_eq!(DiscountService::applicable_tier(&tiers, 4), None);
        assert_eq!(
            DiscountService::applicable_tier(&tiers, 12).map(|t| t.min_quantity),
            Some(10)
        );
    }

    #[test]
    fn test_compute_discount_never_negative() {
        assert_eq!(
            DiscountService::compute_discount(DiscountType::Fixed, 50.0, 0.0),
            0.0
        );
        assert_eq!(
            DiscountService::compute_discount(DiscountType::Percentage, 10.0, 200.0),
            20.0
        );
    }
}
