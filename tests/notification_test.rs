//! Email dispatch integration tests
//!
//! Exercises the mailer against a mock transactional email API: payload
//! shape, failure swallowing, and the disabled short-circuit.

mod helpers;

use helpers::*;
use serial_test::serial;

use nuqta::config::I18nConfig;
use nuqta::i18n::I18n;
use nuqta::services::{BookingEmail, EmailMessage, EmailSender, Mailer, NotificationService};

fn test_message() -> EmailMessage {
    EmailMessage {
        to: "attendee@example.com".to_string(),
        subject: "Your booking is confirmed".to_string(),
        html: "<b>See you there!</b>".to_string(),
    }
}

#[tokio::test]
#[serial]
async fn test_send_posts_expected_payload() {
    let mock = EmailMockServer::start().await;
    mock.accept_all().await;

    let sender = EmailSender::new(mock.config()).expect("build sender");
    sender.send(&test_message()).await.expect("send succeeds");

    let requests = mock
        .server
        .received_requests()
        .await
        .expect("requests recorded");
    assert_eq!(requests.len(), 1);

    let body: serde_json::Value =
        serde_json::from_slice(&requests[0].body).expect("json payload");
    assert_eq!(body["to"][0], "attendee@example.com");
    assert_eq!(body["subject"], "Your booking is confirmed");
    assert_eq!(body["html"], "<b>See you there!</b>");
    assert!(body["from"].as_str().expect("from set").contains("nuqta.test"));
}

#[tokio::test]
#[serial]
async fn test_rejected_status_is_an_error() {
    let mock = EmailMockServer::start().await;
    mock.reject_all(422).await;

    let sender = EmailSender::new(mock.config()).expect("build sender");
    let result = sender.send(&test_message()).await;

    assert!(result.is_err());
}

#[tokio::test]
#[serial]
async fn test_disabled_config_skips_network() {
    let mock = EmailMockServer::start().await;
    mock.accept_all().await;

    let mut config = mock.config();
    config.enabled = false;

    let sender = EmailSender::new(config).expect("build sender");
    sender.send(&test_message()).await.expect("disabled send is ok");

    let requests = mock
        .server
        .received_requests()
        .await
        .expect("requests recorded");
    assert!(requests.is_empty());
}

#[tokio::test]
#[serial]
async fn test_worker_survives_delivery_failures() {
    let mock = EmailMockServer::start().await;
    mock.reject_all(500).await;

    let (mailer, handle) = Mailer::spawn(mock.config()).expect("spawn mailer");

    mailer.enqueue(test_message());
    mailer.enqueue(test_message());

    // Closing the channel lets the worker drain and exit cleanly even
    // though every delivery failed.
    drop(mailer);
    handle.await.expect("worker exits without panic");

    let requests = mock
        .server
        .received_requests()
        .await
        .expect("requests recorded");
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
#[serial]
async fn test_booking_email_is_rendered_in_recipient_language() {
    let mock = EmailMockServer::start().await;
    mock.accept_all().await;

    let config = I18nConfig {
        default_language: "en".to_string(),
        supported_languages: vec!["en".to_string(), "ar".to_string()],
    };
    let mut i18n = I18n::new(&config);
    i18n.load_translations().await.expect("translations load");

    let (mailer, handle) = Mailer::spawn(mock.config()).expect("spawn mailer");
    let notifications = NotificationService::new(mailer, i18n);

    let profile = create_test_profile(1, "attendee@example.com", "ar");
    let booking = create_test_booking(1, 1, 10, 250.0);
    notifications.booking_email(BookingEmail::Confirmed, &profile, "Jazz Night", &booking);

    drop(notifications);
    handle.await.expect("worker exits");

    let requests = mock
        .server
        .received_requests()
        .await
        .expect("requests recorded");
    assert_eq!(requests.len(), 1);

    let body: serde_json::Value =
        serde_json::from_slice(&requests[0].body).expect("json payload");
    let subject = body["subject"].as_str().expect("subject set");
    assert!(subject.contains("Jazz Night"));
    // Arabic template was selected
    assert!(subject.contains("تأكيد") || subject.contains("حجزك"));
}
