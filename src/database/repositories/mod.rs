//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod analytics;
pub mod booking;
pub mod discount;
pub mod event;
pub mod favorite;
pub mod profile;
pub mod vendor;

// Re-export repositories
pub use analytics::AnalyticsRepository;
pub use booking::BookingRepository;
pub use discount::DiscountRepository;
pub use event::EventRepository;
pub use favorite::{FavoriteRepository, InterestRepository};
pub use profile::ProfileRepository;
pub use vendor::VendorRepository;
