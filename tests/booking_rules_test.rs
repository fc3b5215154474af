//! Booking lifecycle rules
//!
//! Status selection for new bookings and the pricing breakdown arithmetic.

mod helpers;

use helpers::*;

use nuqta::models::booking::{BookingStatus, PricingBreakdown};
use nuqta::services::analytics::AnalyticsService;

#[test]
fn free_booking_confirms_immediately() {
    assert_eq!(
        BookingStatus::initial_for_total(0.0),
        BookingStatus::Confirmed
    );
}

#[test]
fn paid_booking_awaits_payment() {
    assert_eq!(
        BookingStatus::initial_for_total(250.0),
        BookingStatus::PendingPayment
    );
}

#[test]
fn fully_discounted_booking_confirms_immediately() {
    // A 100% discount leaves a zero total, which skips payment
    let pricing = PricingBreakdown {
        subtotal: 200.0,
        bulk_discount: 0.0,
        code_discount: 200.0,
        total: 0.0,
    };
    assert_eq!(
        BookingStatus::initial_for_total(pricing.total),
        BookingStatus::Confirmed
    );
}

#[test]
fn discount_amount_sums_both_mechanisms() {
    let pricing = PricingBreakdown {
        subtotal: 400.0,
        bulk_discount: 40.0,
        code_discount: 36.0,
        total: 324.0,
    };
    assert_eq!(pricing.discount_amount(), 76.0);
}

#[test]
fn status_strings_match_the_store_contract() {
    assert_eq!(BookingStatus::PendingPayment.as_str(), "pending_payment");
    assert_eq!(BookingStatus::Confirmed.as_str(), "confirmed");
    assert_eq!(BookingStatus::Cancelled.as_str(), "cancelled");

    let booking = create_test_booking(1, 1, 10, 120.0);
    assert_eq!(booking.status, BookingStatus::Confirmed.as_str());
}

#[test]
fn loyalty_buckets_split_one_time_and_repeat_customers() {
    // Per-customer confirmed booking counts
    let counts = vec![(101, 1), (102, 1), (103, 3), (104, 7)];
    let summary = AnalyticsService::loyalty_from_counts(&counts);

    assert_eq!(summary.one_time, 2);
    assert_eq!(summary.repeat, 1);
    assert_eq!(summary.loyal, 1);
}
