//! Services module
//!
//! This module contains business logic services

pub mod analytics;
pub mod auth;
pub mod booking;
pub mod discount;
pub mod discovery;
pub mod event;
pub mod notification;
pub mod profile;
pub mod vendor;

// Re-export commonly used services
pub use analytics::{AnalyticsService, VendorAnalytics};
pub use auth::{AccessClaims, AuthContext, AuthService};
pub use booking::BookingService;
pub use discount::{DiscountService, ValidatedDiscount};
pub use discovery::{DiscoveryService, EventDetail};
pub use event::EventService;
pub use notification::{BookingEmail, EmailMessage, EmailSender, Mailer, NotificationService};
pub use profile::ProfileService;
pub use vendor::VendorService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::i18n::I18n;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub discovery_service: DiscoveryService,
    pub event_service: EventService,
    pub discount_service: DiscountService,
    pub booking_service: BookingService,
    pub profile_service: ProfileService,
    pub analytics_service: AnalyticsService,
    pub vendor_service: VendorService,
    pub notification_service: NotificationService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services wired to the shared
    /// repositories
    pub fn new(db: DatabaseService, settings: Settings, i18n: I18n, mailer: Mailer) -> Self {
        let notification_service = NotificationService::new(mailer, i18n);
        let auth_service = AuthService::new(db.profiles.clone(), settings.clone());
        let discovery_service = DiscoveryService::new(db.events.clone(), settings.clone());
        let event_service = EventService::new(db.events.clone());
        let discount_service = DiscountService::new(db.discounts.clone());
        let booking_service = BookingService::new(
            db.bookings.clone(),
            db.events.clone(),
            db.profiles.clone(),
            discount_service.clone(),
            notification_service.clone(),
            settings.clone(),
        );
        let profile_service = ProfileService::new(
            db.profiles.clone(),
            db.favorites.clone(),
            db.interests.clone(),
            db.events.clone(),
            db.vendors.clone(),
            settings.clone(),
        );
        let analytics_service = AnalyticsService::new(db.analytics.clone());
        let vendor_service = VendorService::new(
            db.vendors,
            db.events,
            db.profiles,
            notification_service.clone(),
            settings,
        );

        Self {
            auth_service,
            discovery_service,
            event_service,
            discount_service,
            booking_service,
            profile_service,
            analytics_service,
            vendor_service,
            notification_service,
        }
    }
}
