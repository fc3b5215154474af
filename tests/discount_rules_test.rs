//! Discount evaluation rules
//!
//! Covers the check sequence, the computation caps and the bulk tier
//! selection through the public service API.

mod helpers;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use helpers::*;

use nuqta::models::discount::{DiscountRejection, DiscountType};
use nuqta::services::discount::DiscountService;

#[test]
fn percentage_discount_on_200_is_20() {
    let code = create_test_code(10, "WELCOME10", 10.0);
    let amount =
        DiscountService::check_code(&code, 10, 5, 200.0, Utc::now()).expect("code is valid");
    assert_eq!(amount, 20.0);
}

#[test]
fn discount_never_exceeds_purchase_amount() {
    let mut code = create_test_code(10, "BIGOFF", 100.0);
    code.discount_type = "fixed".to_string();
    code.discount_value = 1_000.0;

    let amount =
        DiscountService::check_code(&code, 10, 5, 80.0, Utc::now()).expect("code is valid");
    assert_eq!(amount, 80.0);
}

#[test]
fn expired_code_is_rejected_regardless_of_other_fields() {
    let mut code = create_test_code(10, "LATE", 10.0);
    code.expiry_date = Some(Utc::now() - Duration::hours(1));
    code.max_uses = Some(1_000);
    code.used_count = 0;
    code.min_purchase_amount = Some(1.0);

    assert_matches!(
        DiscountService::check_code(&code, 10, 5, 500.0, Utc::now()),
        Err(DiscountRejection::Expired)
    );
}

#[test]
fn vendor_mismatch_wins_over_every_later_check() {
    let mut code = create_test_code(10, "OTHER", 10.0);
    code.expiry_date = Some(Utc::now() - Duration::hours(1));

    // Belongs to vendor 10, evaluated for vendor 99: invalid, not expired
    assert_matches!(
        DiscountService::check_code(&code, 99, 5, 500.0, Utc::now()),
        Err(DiscountRejection::Invalid)
    );
}

#[test]
fn minimum_purchase_rejection_states_the_minimum() {
    let mut code = create_test_code(10, "MIN150", 10.0);
    code.min_purchase_amount = Some(150.0);

    assert_matches!(
        DiscountService::check_code(&code, 10, 5, 149.99, Utc::now()),
        Err(DiscountRejection::BelowMinimum { min }) if min == 150.0
    );
}

#[test]
fn bulk_tier_selection_follows_highest_min_quantity() {
    let tiers = vec![create_test_tier(5, 5, 10.0), create_test_tier(5, 10, 20.0)];

    let seven = DiscountService::applicable_tier(&tiers, 7).expect("tier applies");
    assert_eq!(seven.min_quantity, 5);
    assert_eq!(
        DiscountService::compute_discount(DiscountType::Percentage, seven.discount_value, 100.0),
        10.0
    );

    assert!(DiscountService::applicable_tier(&tiers, 4).is_none());

    let twelve = DiscountService::applicable_tier(&tiers, 12).expect("tier applies");
    assert_eq!(twelve.min_quantity, 10);
}

#[test]
fn exact_tier_boundary_applies() {
    let tiers = vec![create_test_tier(5, 5, 10.0), create_test_tier(5, 10, 20.0)];

    let five = DiscountService::applicable_tier(&tiers, 5).expect("tier applies");
    assert_eq!(five.min_quantity, 5);

    let ten = DiscountService::applicable_tier(&tiers, 10).expect("tier applies");
    assert_eq!(ten.min_quantity, 10);
}
