//! Vendor-side event management service
//!
//! Creation, ticketing and publication of events. Capacity versus declared
//! ticket quantities is checked at publication, not creation, so vendors
//! can assemble drafts freely.

use tracing::info;

use crate::database::repositories::EventRepository;
use crate::models::event::{
    CreateEventRequest, CreateTicketRequest, Event, EventStatus, Ticket, UpdateEventRequest,
};
use crate::utils::errors::{NuqtaError, Result};
use crate::utils::geo;
use crate::utils::helpers::slugify;
use crate::utils::logging::log_vendor_action;

#[derive(Debug, Clone)]
pub struct EventService {
    events: EventRepository,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(events: EventRepository) -> Self {
        Self { events }
    }

    /// Create a draft event for a vendor
    pub async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        if request.title.trim().len() < 3 {
            return Err(NuqtaError::validation_field(
                "title",
                "Title must be at least 3 characters",
            ));
        }

        if let Some(capacity) = request.capacity {
            if capacity < 1 {
                return Err(NuqtaError::validation_field(
                    "capacity",
                    "Capacity must be at least 1",
                ));
            }
        }

        match (request.latitude, request.longitude) {
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

        if let Some(end) = request.end_date {
            if end < request.event_date {
                return Err(NuqtaError::validation_field(
                    "end_date",
                    "End date cannot precede the start date",
                ));
            }
        }

        let slug = self.unique_slug(&request.title).await?;
        let event = self.events.create(slug, request).await?;

        log_vendor_action(event.vendor_id, "event_created", Some(&event.slug));
        Ok(event)
    }

    /// Update an event, scoped to the owning vendor
    pub async fn update_event(
        &self,
        vendor_id: i64,
        event_id: i64,
        request: UpdateEventRequest,
    ) -> Result<Event> {
        let event = self.owned_event(vendor_id, event_id).await?;
        self.events.update(event.id, request).await
    }

    /// Add a ticket type to a vendor's event
    pub async fn add_ticket(&self, vendor_id: i64, request: CreateTicketRequest) -> Result<Ticket> {
        if request.price < 0.0 {
            return Err(NuqtaError::validation_field(
                "price",
                "Price cannot be negative",
            ));
        }

        if request.quantity < 1 {
            return Err(NuqtaError::validation_field(
                "quantity",
                "Quantity must be at least 1",
            ));
        }

        self.owned_event(vendor_id, request.event_id).await?;
        self.events.create_ticket(request).await
    }

    /// Publish an event. Declared ticket quantities must fit the capacity
    /// when one is set; an event with no tickets publishes as free.
    pub async fn publish(&self, vendor_id: i64, event_id: i64) -> Result<Event> {
        let event = self.owned_event(vendor_id, event_id).await?;

        if let Some(capacity) = event.capacity {
            let declared = self.events.total_ticket_quantity(event.id).await?;
            if declared > capacity as i64 {
                return Err(NuqtaError::BusinessLogic(format!(
                    "Declared tickets ({}) exceed event capacity ({})",
                    declared, capacity
                )));
            }
        }

        let published = self
            .events
            .set_status(event.id, vendor_id, EventStatus::Published)
            .await?
            .ok_or(NuqtaError::EventNotFound { event_id })?;

        info!(event_id = event_id, vendor_id = vendor_id, "Event published");
        Ok(published)
    }

    /// Cancel an event, scoped to the owning vendor
    pub async fn cancel(&self, vendor_id: i64, event_id: i64) -> Result<Event> {
        self.owned_event(vendor_id, event_id).await?;

        let cancelled = self
            .events
            .set_status(event_id, vendor_id, EventStatus::Cancelled)
            .await?
            .ok_or(NuqtaError::EventNotFound { event_id })?;

        info!(event_id = event_id, vendor_id = vendor_id, "Event cancelled");
        Ok(cancelled)
    }

    /// All of a vendor's events for the dashboard
    pub async fn list_for_vendor(&self, vendor_id: i64) -> Result<Vec<Event>> {
        self.events.list_by_vendor(vendor_id).await
    }

    /// Load an event and verify vendor ownership
    async fn owned_event(&self, vendor_id: i64, event_id: i64) -> Result<Event> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(NuqtaError::EventNotFound { event_id })?;

        if event.vendor_id != vendor_id {
            return Err(NuqtaError::Forbidden(
                "Event belongs to another vendor".to_string(),
            ));
        }

        Ok(event)
    }

    /// Derive a unique slug from the title, suffixing on collision
    async fn unique_slug(&self, title: &str) -> Result<String> {
        let base = slugify(title);

        if !self.events.slug_exists(&base).await? {
            return Ok(base);
        }

        for n in 2..=50 {
            let candidate = format!("{}-{}", base, n);
            if !self.events.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        Err(NuqtaError::Conflict(format!(
            "Could not find a free slug for '{}'",
            base
        )))
    }
}
