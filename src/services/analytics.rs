//! Vendor analytics service
//!
//! Aggregates a vendor's confirmed-booking history into dashboard rollups.
//! The repository produces per-group counts; the bucketing itself is plain
//! Rust so the rules stay testable without a store.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use crate::database::repositories::AnalyticsRepository;
use crate::utils::errors::Result;

/// Days that count as "recent" for the sales widget
const RECENT_SALES_WINDOW_DAYS: i64 = 30;

/// Full vendor dashboard payload
#[derive(Debug, Clone, Serialize)]
pub struct VendorAnalytics {
    pub revenue_total: f64,
    pub sales_count: i64,
    pub recent_sales_count: i64,
    pub category_distribution: Vec<CategorySales>,
    pub loyalty: LoyaltySummary,
    pub demographics: Demographics,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySales {
    pub label: String,
    pub count: i64,
}

/// Customers bucketed by confirmed-booking count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoyaltySummary {
    /// Exactly one confirmed booking
    pub one_time: i64,
    /// Two to four confirmed bookings
    pub repeat: i64,
    /// Five or more confirmed bookings
    pub loyal: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Demographics {
    pub gender: Vec<GenderCount>,
    pub age_buckets: Vec<AgeBucket>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenderCount {
    /// None groups purchasers who did not state a gender
    pub gender: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeBucket {
    pub label: &'static str,
    pub count: i64,
}

const AGE_BUCKETS: [&str; 5] = ["<25", "25-34", "35-44", "45+", "unknown"];

#[derive(Debug, Clone)]
pub struct AnalyticsService {
    analytics: AnalyticsRepository,
}

impl AnalyticsService {
    /// Create a new AnalyticsService instance
    pub fn new(analytics: AnalyticsRepository) -> Self {
        Self { analytics }
    }

    /// Build the full dashboard summary for a vendor. The five rollup
    /// queries are independent and run concurrently.
    pub async fn vendor_summary(&self, vendor_id: i64) -> Result<VendorAnalytics> {
        let since = Utc::now() - Duration::days(RECENT_SALES_WINDOW_DAYS);

        let (totals, recent, categories, customer_counts, genders, birth_dates) = futures::try_join!(
            self.analytics.revenue_and_sales(vendor_id),
            self.analytics.sales_since(vendor_id, since),
            self.analytics.category_distribution(vendor_id),
            self.analytics.customer_booking_counts(vendor_id),
            self.analytics.gender_counts(vendor_id),
            self.analytics.purchaser_birth_dates(vendor_id),
        )?;

        let (revenue_total, sales_count) = totals;
        let today = Utc::now().date_naive();

        debug!(vendor_id = vendor_id, sales = sales_count, "Vendor summary computed");

        Ok(VendorAnalytics {
            revenue_total,
            sales_count,
            recent_sales_count: recent,
            category_distribution: categories
                .into_iter()
                .map(|(label, count)| CategorySales { label, count })
                .collect(),
            loyalty: Self::loyalty_from_counts(&customer_counts),
            demographics: Demographics {
                gender: genders
                    .into_iter()
                    .map(|(gender, count)| GenderCount { gender, count })
                    .collect(),
                age_buckets: Self::bucket_ages(&birth_dates, today),
            },
        })
    }

    /// Bucket customers by confirmed-booking count
    pub fn loyalty_from_counts(counts: &[(i64, i64)]) -> LoyaltySummary {
        let mut summary = LoyaltySummary::default();

        for (_, bookings) in counts {
            match bookings {
                1 => summary.one_time += 1,
                2..=4 => summary.repeat += 1,
                n if *n >= 5 => summary.loyal += 1,
                _ => {}
            }
        }

        summary
    }

    /// Whole-year age at `today` for someone born on `birth_date`
    pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
        let mut age = today.year() - birth_date.year();
        if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
            age -= 1;
        }
        age
    }

    /// Count purchasers into fixed age buckets; missing birth dates land
    /// in "unknown"
    pub fn bucket_ages(birth_dates: &[Option<NaiveDate>], today: NaiveDate) -> Vec<AgeBucket> {
        let mut counts = [0i64; 5];

        for birth_date in birth_dates {
            let idx = match birth_date {
                Some(date) => match Self::age_on(*date, today) {
                    age if age < 25 => 0,
                    age if age < 35 => 1,
                    age if age < 45 => 2,
                    _ => 3,
                },
                None => 4,
            };
            counts[idx] += 1;
        }

        AGE_BUCKETS
            .into_iter()
            .zip(counts)
            .map(|(label, count)| AgeBucket { label, count })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loyalty_bucketing() {
        let counts = vec![(1, 1), (2, 1), (3, 2), (4, 4), (5, 5), (6, 12)];
        let summary = AnalyticsService::loyalty_from_counts(&counts);

        assert_eq!(
            summary,
            LoyaltySummary {
                one_time: 2,
                repeat: 2,
                loyal: 2,
            }
        );
    }

    #[test]
    fn test_loyalty_empty() {
        assert_eq!(
            AnalyticsService::loyalty_from_counts(&[]),
            LoyaltySummary::default()
        );
    }

    #[test]
    fn test_age_computation_respects_birthday() {
        let birth = NaiveDate::from_ymd_opt(1990, 6, 15).expect("valid date");

        let before_birthday = NaiveDate::from_ymd_opt(2026, 6, 14).expect("valid date");
        assert_eq!(AnalyticsService::age_on(birth, before_birthday), 35);

        let on_birthday = NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date");
        assert_eq!(AnalyticsService::age_on(birth, on_birthday), 36);
    }

    #[test]
    fn test_age_bucketing_with_unknowns() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date");
        let dates = vec![
            Some(NaiveDate::from_ymd_opt(2004, 1, 2).expect("valid date")), // 21
            Some(NaiveDate::from_ymd_opt(1995, 1, 1).expect("valid date")), // 31
            Some(NaiveDate::from_ymd_opt(1985, 1, 1).expect("valid date")), // 41
            Some(NaiveDate::from_ymd_opt(1960, 1, 1).expect("valid date")), // 66
            None,
            None,
        ];

        let buckets = AnalyticsService::bucket_ages(&dates, today);
        let by_label: Vec<(&str, i64)> = buckets.iter().map(|b| (b.label, b.count)).collect();

        assert_eq!(
            by_label,
            vec![
                ("<25", 1),
                ("25-34", 1),
                ("35-44", 1),
                ("45+", 1),
                ("unknown", 2),
            ]
        );
    }
}
