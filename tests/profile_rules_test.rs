//! Profile validation rules

mod helpers;

use helpers::*;

use nuqta::utils::helpers::{is_valid_full_name, is_valid_phone};

#[test]
fn one_character_name_is_rejected() {
    assert!(!is_valid_full_name("A"));
    assert!(is_valid_full_name("Ay"));
}

#[test]
fn bad_phone_is_rejected() {
    assert!(!is_valid_phone("bad"));
    assert!(!is_valid_phone("555-CALL"));
}

#[test]
fn turkish_mobile_number_is_accepted() {
    assert!(is_valid_phone("+905551234567"));
    assert!(is_valid_phone("(0212) 555 12 34"));
}

#[test]
fn test_profile_builder_defaults_are_valid() {
    let profile = create_test_profile(1, "user@example.com", "en");
    assert!(is_valid_full_name(profile.full_name.as_deref().expect("name set")));
    assert!(is_valid_phone(profile.phone.as_deref().expect("phone set")));
}
