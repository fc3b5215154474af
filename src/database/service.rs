//! Database service layer
//!
//! Bundles one repository per entity around a shared pool; services take the
//! repositories they need from here instead of opening their own handles.

use crate::database::repositories::{
    AnalyticsRepository, BookingRepository, DiscountRepository, EventRepository,
    FavoriteRepository, InterestRepository, ProfileRepository, VendorRepository,
};
use crate::database::DatabasePool;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub profiles: ProfileRepository,
    pub vendors: VendorRepository,
    pub events: EventRepository,
    pub bookings: BookingRepository,
    pub discounts: DiscountRepository,
    pub favorites: FavoriteRepository,
    pub interests: InterestRepository,
    pub analytics: AnalyticsRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            profiles: ProfileRepository::new(pool.clone()),
            vendors: VendorRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool.clone()),
            discounts: DiscountRepository::new(pool.clone()),
            favorites: FavoriteRepository::new(pool.clone()),
            interests: InterestRepository::new(pool.clone()),
            analytics: AnalyticsRepository::new(pool),
        }
    }
}
