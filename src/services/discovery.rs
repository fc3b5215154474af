//! Event discovery service
//!
//! Validates search parameters and delegates the ranked geo query to the
//! event repository. Distance ordering only applies when the viewer shares
//! a location; everything else falls back to date order.

use tracing::debug;

use crate::config::settings::Settings;
use crate::database::repositories::EventRepository;
use crate::models::event::{Event, EventSearchParams, EventSummary, Ticket};
use crate::utils::errors::{NuqtaError, Result};
use crate::utils::geo;

/// Everything an event detail page needs
#[derive(Debug, Clone)]
pub struct EventDetail {
    pub event: Event,
    pub tickets: Vec<Ticket>,
    pub related: Vec<Event>,
}

impl EventDetail {
    /// Minimum ticket price; 0 when the event has no tickets (free)
    pub fn min_price(&self) -> f64 {
        self.tickets
            .iter()
            .map(|t| t.price)
            .fold(None::<f64>, |acc, price| {
                Some(acc.map_or(price, |a| a.min(price)))
            })
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Clone)]
pub struct DiscoveryService {
    events: EventRepository,
    settings: Settings,
}

impl DiscoveryService {
    /// Create a new DiscoveryService instance
    pub fn new(events: EventRepository, settings: Settings) -> Self {
        Self { events, settings }
    }

    /// Search published events with the validated parameters
    pub async fn search(&self, mut params: EventSearchParams) -> Result<Vec<EventSummary>> {
        self.validate_params(&params)?;

        let limit = params
            .limit
            .unwrap_or(self.settings.search.default_limit)
            .clamp(1, self.settings.search.max_limit);
        params.limit = Some(limit);
        params.offset = Some(params.offset.unwrap_or(0).max(0));

        debug!(
            category = ?params.category,
            radius_km = ?params.radius_km,
            limit = limit,
            "Searching events"
        );

        self.events.search(&params).await
    }

    /// Load an event page by slug: tickets and related events fetched
    /// concurrently
    pub async fn event_detail(&self, slug: &str) -> Result<Option<EventDetail>> {
        let event = match self.events.find_by_slug(slug).await? {
            Some(event) => event,
            None => return Ok(None),
        };

        let (tickets, related) = futures::try_join!(
            self.events.list_tickets(event.id),
            self.events.related_events(event.id, event.category_id, 4)
        )?;

        Ok(Some(EventDetail {
            event,
            tickets,
            related,
        }))
    }

    /// All categories for the browse filters
    pub async fn categories(&self) -> Result<Vec<crate::models::event::Category>> {
        self.events.list_categories().await
    }

    fn validate_params(&self, params: &EventSearchParams) -> Result<()> {
        match (params.latitude, params.longitude) {
            (Some(lat), Some(lon)) => {
                if !geo::is_valid_coordinate(lat, lon) {
                    return Err(NuqtaError::validation("Coordinates out of range"));
                }
            }
            (None, None) => {}
            _ => {
                return Err(NuqtaError::validation(
                    "Latitude and longitude must be provided together",
                ));
            }
        }

        if let Some(radius) = params.radius_km {
            if radius <= 0.0 {
                return Err(NuqtaError::validation_field(
                    "radius_km",
                    "Radius must be greater than 0",
                ));
            }
        }

        if let Some(min) = params.min_price {
            if min < 0.0 {
                return Err(NuqtaError::validation_field(
                    "min_price",
                    "Minimum price cannot be negative",
                ));
            }
        }

        if let (Some(min), Some(max)) = (params.min_price, params.max_price) {
            if min > max {
                return Err(NuqtaError::validation(
                    "Minimum price cannot exceed maximum price",
                ));
            }
        }

        if let (Some(from), Some(to)) = (params.date_from, params.date_to) {
            if from > to {
                return Err(NuqtaError::validation("Date range is inverted"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    fn test_service() -> DiscoveryService {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/nuqta_test")
            .expect("lazy pool");
        DiscoveryService::new(EventRepository::new(pool), Settings::default())
    }

    #[tokio::test]
    async fn test_lone_latitude_rejected() {
        let service = test_service();
        let params = EventSearchParams {
            latitude: Some(41.0),
            ..Default::default()
        };
        assert!(service.validate_params(&params).is_err());
    }

    #[tokio::test]
    async fn test_out_of_range_coordinates_rejected() {
        let service = test_service();
        let params = EventSearchParams {
            latitude: Some(95.0),
            longitude: Some(29.0),
            ..Default::default()
        };
        assert!(service.validate_params(&params).is_err());
    }

    #[tokio::test]
    async fn test_inverted_price_range_rejected() {
        let service = test_service();
        let params = EventSearchParams {
            min_price: Some(100.0),
            max_price: Some(50.0),
            ..Default::default()
        };
        assert!(service.validate_params(&params).is_err());
    }

    #[tokio::test]
    async fn test_zero_min_price_is_allowed() {
        let service = test_service();
        let params = EventSearchParams {
            min_price: Some(0.0),
            ..Default::default()
        };
        assert!(service.validate_params(&params).is_ok());
    }

    #[tokio::test]
    async fn test_negative_radius_rejected() {
        let service = test_service();
        let params = EventSearchParams {
            latitude: Some(41.0),
            longitude: Some(29.0),
            radius_km: Some(-5.0),
            ..Default::default()
        };
        assert!(service.validate_params(&params).is_err());
    }
}
