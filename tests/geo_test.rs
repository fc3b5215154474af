//! Distance math checks against known geography

use nuqta::utils::geo::{distance_km, format_distance};

const ISTANBUL: (f64, f64) = (41.0082, 28.9784);
const ANKARA: (f64, f64) = (39.9334, 32.8597);

#[test]
fn coincident_points_are_zero_apart() {
    assert_eq!(
        distance_km(ISTANBUL.0, ISTANBUL.1, ISTANBUL.0, ISTANBUL.1),
        0.0
    );
}

#[test]
fn istanbul_to_ankara_is_about_350_km() {
    let d = distance_km(ISTANBUL.0, ISTANBUL.1, ANKARA.0, ANKARA.1);
    assert!((340.0..=360.0).contains(&d), "got {} km", d);
}

#[test]
fn distance_is_symmetric() {
    let there = distance_km(ISTANBUL.0, ISTANBUL.1, ANKARA.0, ANKARA.1);
    let back = distance_km(ANKARA.0, ANKARA.1, ISTANBUL.0, ISTANBUL.1);
    assert!((there - back).abs() < 1e-9);
}

#[test]
fn distances_format_for_display() {
    assert_eq!(format_distance(0.5), "500 m");
    assert_eq!(format_distance(1.0), "1.0 km");
    assert_eq!(format_distance(10.234), "10.2 km");
}
