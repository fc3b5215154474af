//! Translation catalog integration tests
//!
//! Loads the shipped en/ar catalogs from disk and checks message lookup,
//! parameter interpolation and plural selection.

use std::collections::HashMap;

use nuqta::config::I18nConfig;
use nuqta::i18n::I18n;

fn config() -> I18nConfig {
    I18nConfig {
        default_language: "en".to_string(),
        supported_languages: vec!["en".to_string(), "ar".to_string()],
    }
}

async fn loaded() -> I18n {
    let mut i18n = I18n::new(&config());
    i18n.load_translations().await.expect("catalogs load");
    i18n
}

#[tokio::test]
async fn test_both_catalogs_load() {
    let i18n = loaded().await;
    let stats = i18n.get_stats();

    assert_eq!(stats.languages.len(), 2);
    assert!(stats.total_keys > 0);
}

#[tokio::test]
async fn test_discount_messages_exist_in_both_languages() {
    let i18n = loaded().await;

    let en = i18n.t("discount.invalid", "en", None);
    let ar = i18n.t("discount.invalid", "ar", None);

    assert_eq!(en, "Invalid discount code");
    assert_ne!(ar, en);
    assert_ne!(ar, "discount.invalid");
}

#[tokio::test]
async fn test_min_purchase_interpolation() {
    let i18n = loaded().await;

    let mut params = HashMap::new();
    params.insert("min".to_string(), "150".to_string());

    let message = i18n.t("discount.min_purchase", "en", Some(&params));
    assert!(message.contains("150"));
    assert!(!message.contains("{min}"));
}

#[tokio::test]
async fn test_unsupported_language_falls_back_to_default() {
    let i18n = loaded().await;

    let message = i18n.t("discount.expired", "fr", None);
    assert_eq!(message, "This discount code has expired");
}

#[tokio::test]
async fn test_arabic_plural_forms_for_tickets() {
    let i18n = loaded().await;

    assert_eq!(i18n.tp("booking.tickets", "ar", 1, None), "تذكرة واحدة");
    assert_eq!(i18n.tp("booking.tickets", "ar", 2, None), "تذكرتان");

    let five = i18n.tp("booking.tickets", "ar", 5, None);
    assert!(five.contains('5'));

    let en_three = i18n.tp("booking.tickets", "en", 3, None);
    assert_eq!(en_three, "3 tickets");
}
