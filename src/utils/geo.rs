//! Great-circle distance math
//!
//! Rust-side mirror of the distance computation the event search query runs
//! in SQL. Both use the spherical law of cosines on a 6371 km earth radius,
//! with the acos argument clamped to [-1, 1] so floating-point overshoot at
//! identical or antipodal points never leaves the domain.

/// Mean earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two coordinate pairs
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1) = (lat1.to_radians(), lon1.to_radians());
    let (lat2, lon2) = (lat2.to_radians(), lon2.to_radians());

    let cos_angle = lat1.cos() * lat2.cos() * (lon2 - lon1).cos() + lat1.sin() * lat2.sin();
    EARTH_RADIUS_KM * cos_angle.clamp(-1.0, 1.0).acos()
}

/// Check that a coordinate pair is a plausible lat/long
pub fn is_valid_coordinate(lat: f64, lon: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

/// Format a distance for display: meters below 1 km, otherwise one decimal
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{} m", (km * 1000.0).round() as i64)
    } else {
        format!("{:.1} km", km)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ISTANBUL: (f64, f64) = (41.0082, 28.9784);
    const ANKARA: (f64, f64) = (39.9334, 32.8597);

    #[test]
    fn test_identical_points_have_zero_distance() {
        let d = distance_km(ISTANBUL.0, ISTANBUL.1, ISTANBUL.0, ISTANBUL.1);
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_istanbul_to_ankara() {
        let d = distance_km(ISTANBUL.0, ISTANBUL.1, ANKARA.0, ANKARA.1);
        assert!((340.0..=360.0).contains(&d), "got {} km", d);
    }

    #[test]
    fn test_antipodal_points_do_not_panic() {
        let d = distance_km(0.0, 0.0, 0.0, 180.0);
        assert!((d - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1.0);
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.5), "500 m");
        assert_eq!(format_distance(0.0821), "82 m");
        assert_eq!(format_distance(1.0), "1.0 km");
        assert_eq!(format_distance(10.234), "10.2 km");
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(is_valid_coordinate(41.0, 29.0));
        assert!(!is_valid_coordinate(91.0, 29.0));
        assert!(!is_valid_coordinate(41.0, 181.0));
    }

    proptest! {
        #[test]
        fn distance_is_symmetric_and_non_negative(
            lat1 in -90.0f64..90.0,
            lon1 in -180.0f64..180.0,
            lat2 in -90.0f64..90.0,
            lon2 in -180.0f64..180.0,
        ) {
            let d_ab = distance_km(lat1, lon1, lat2, lon2);
            let d_ba = distance_km(lat2, lon2, lat1, lon1);
            prop_assert!(d_ab >= 0.0);
            prop_assert!((d_ab - d_ba).abs() < 1e-6);
        }
    }
}
