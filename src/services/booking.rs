//! Booking lifecycle service
//!
//! Bookings start as pending_payment unless the computed total is zero, in
//! which case they are confirmed immediately. All capacity movement happens
//! through the repository's conditional updates; this layer prices the
//! request, applies bulk and code discounts, and drives the vendor
//! transitions. Confirmation emails are fire-and-forget.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::config::settings::Settings;
use crate::database::repositories::{
    BookingRepository, EventRepository, ProfileRepository,
};
use crate::models::booking::{
    Booking, BookingStatus, CreateBookingRequest, NewBooking, PricedLine, PricingBreakdown,
};
use crate::models::discount::DiscountRejection;
use crate::models::event::EventStatus;
use crate::services::discount::DiscountService;
use crate::services::notification::{BookingEmail, NotificationService};
use crate::utils::errors::{NuqtaError, Result};
use crate::utils::logging::log_booking_transition;

#[derive(Debug, Clone)]
pub struct BookingService {
    bookings: BookingRepository,
    events: EventRepository,
    profiles: ProfileRepository,
    discounts: DiscountService,
    notifications: NotificationService,
    settings: Settings,
}

impl BookingService {
    /// Create a new BookingService instance
    pub fn new(
        bookings: BookingRepository,
        events: EventRepository,
        profiles: ProfileRepository,
        discounts: DiscountService,
        notifications: NotificationService,
        settings: Settings,
    ) -> Self {
        Self {
            bookings,
            events,
            profiles,
            discounts,
            notifications,
            settings,
        }
    }

    /// Price and create a booking. Free totals confirm immediately; paid
    /// totals await payment.
    pub async fn create_booking(&self, request: CreateBookingRequest) -> Result<Booking> {
        if request.lines.is_empty() {
            return Err(NuqtaError::validation("Select at least one ticket"));
        }

        if request.lines.iter().any(|line| line.quantity < 1) {
            return Err(NuqtaError::validation_field(
                "quantity",
                "Ticket quantities must be at least 1",
            ));
        }

        let event = self
            .events
            .find_by_id(request.event_id)
            .await?
            .ok_or(NuqtaError::EventNotFound {
                event_id: request.event_id,
            })?;

        if event.status != EventStatus::Published.as_str() {
            return Err(NuqtaError::BusinessLogic(
                "This event is not open for booking".to_string(),
            ));
        }

        let tickets = self.events.list_tickets(event.id).await?;
        let by_id: HashMap<i64, _> = tickets.iter().map(|t| (t.id, t)).collect();

        let mut lines = Vec::with_capacity(request.lines.len());
        for line in &request.lines {
            let ticket = by_id.get(&line.ticket_id).ok_or_else(|| {
                NuqtaError::validation_field("ticket_id", "Ticket does not belong to this event")
            })?;
            lines.push(PricedLine {
                ticket_id: ticket.id,
                quantity: line.quantity,
                unit_price: ticket.price,
            });
        }

        let subtotal: f64 = lines
            .iter()
            .map(|l| l.unit_price * l.quantity as f64)
            .sum();
        let total_quantity: i32 = lines.iter().map(|l| l.quantity).sum();

        let bulk_discount = self
            .discounts
            .bulk_discount(event.id, total_quantity, subtotal)
            .await?;
        let after_bulk = (subtotal - bulk_discount).max(0.0);

        let mut code_discount = 0.0;
        let mut discount_code_id = None;
        if let Some(code) = request.discount_code.as_deref() {
            match self
                .discounts
                .evaluate_code(event.vendor_id, event.id, code, after_bulk)
                .await?
            {
                Ok(validated) => {
                    code_discount = validated.amount;
                    discount_code_id = Some(validated.code.id);
                }
                Err(rejection) => {
                    return Err(NuqtaError::BusinessLogic(match rejection {
                        DiscountRejection::Invalid => "Invalid discount code".to_string(),
                        DiscountRejection::WrongEvent => {
                            "This discount code is not valid for this event".to_string()
                        }
                        DiscountRejection::Expired => {
                            "This discount code has expired".to_string()
                        }
                        DiscountRejection::Exhausted => {
                            "This discount code has reached its maximum uses".to_string()
                        }
                        DiscountRejection::BelowMinimum { min } => {
                            format!("This discount code requires a minimum purchase of {:.2}", min)
                        }
                    }));
                }
            }
        }

        let pricing = PricingBreakdown {
            subtotal,
            bulk_discount,
            code_discount,
            total: (after_bulk - code_discount).max(0.0),
        };

        let status = BookingStatus::initial_for_total(pricing.total);
        let booking = self
            .bookings
            .create(NewBooking {
                user_id: request.user_id,
                vendor_id: event.vendor_id,
                event_id: event.id,
                status,
                total_amount: pricing.total,
                discount_amount: pricing.discount_amount(),
                discount_code_id,
                lines,
            })
            .await?;

        info!(
            booking_id = booking.id,
            event_id = event.id,
            status = status.as_str(),
            total = pricing.total,
            "Booking created"
        );

        let email = match status {
            BookingStatus::Confirmed => BookingEmail::Confirmed,
            _ => BookingEmail::Pending,
        };
        self.notify(email, &booking, &event.title).await;

        Ok(booking)
    }

    /// Vendor confirms a pending booking
    pub async fn confirm(&self, vendor_id: i64, booking_id: i64) -> Result<Booking> {
        match self.bookings.confirm_for_vendor(booking_id, vendor_id).await? {
            Some(booking) => {
                log_booking_transition(
                    booking.id,
                    BookingStatus::PendingPayment.as_str(),
                    BookingStatus::Confirmed.as_str(),
                    Some(vendor_id),
                );
                self.notify_with_event_lookup(BookingEmail::Confirmed, &booking)
                    .await;
                Ok(booking)
            }
            None => Err(self.transition_failure(vendor_id, booking_id).await?),
        }
    }

    /// Vendor cancels a pending booking, releasing its tickets
    pub async fn cancel(&self, vendor_id: i64, booking_id: i64) -> Result<Booking> {
        match self.bookings.cancel_for_vendor(booking_id, vendor_id).await? {
            Some(booking) => {
                log_booking_transition(
                    booking.id,
                    BookingStatus::PendingPayment.as_str(),
                    BookingStatus::Cancelled.as_str(),
                    Some(vendor_id),
                );
                self.notify_with_event_lookup(BookingEmail::Cancelled, &booking)
                    .await;
                Ok(booking)
            }
            None => Err(self.transition_failure(vendor_id, booking_id).await?),
        }
    }

    /// User deletes their own unpaid pending booking
    pub async fn delete_pending(&self, user_id: i64, booking_id: i64) -> Result<()> {
        if self
            .bookings
            .delete_pending_for_user(booking_id, user_id)
            .await?
        {
            info!(booking_id = booking_id, user_id = user_id, "Pending booking deleted");
            return Ok(());
        }

        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(NuqtaError::BookingNotFound { booking_id })?;

        if booking.user_id != user_id {
            Err(NuqtaError::Forbidden(
                "Booking belongs to another user".to_string(),
            ))
        } else {
            Err(NuqtaError::BusinessLogic(
                "Only unpaid pending bookings can be deleted".to_string(),
            ))
        }
    }

    /// Sweep pending bookings past their payment TTL, releasing tickets
    pub async fn expire_stale(&self) -> Result<u64> {
        let cutoff = Utc::now() - Duration::minutes(self.settings.booking.pending_ttl_minutes);
        let swept = self.bookings.expire_stale_pending(cutoff).await?;

        if swept > 0 {
            info!(swept = swept, "Expired stale pending bookings");
        }

        Ok(swept)
    }

    /// A user's bookings
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Booking>> {
        self.bookings.list_by_user(user_id).await
    }

    /// A vendor's booking queue, optionally filtered by status
    pub async fn list_for_vendor(
        &self,
        vendor_id: i64,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>> {
        self.bookings.list_by_vendor(vendor_id, status).await
    }

    /// Work out why a vendor transition matched nothing
    async fn transition_failure(&self, vendor_id: i64, booking_id: i64) -> Result<NuqtaError> {
        let booking = self.bookings.find_by_id(booking_id).await?;

        Ok(match booking {
            None => NuqtaError::BookingNotFound { booking_id },
            Some(b) if b.vendor_id != vendor_id => {
                NuqtaError::Forbidden("Booking belongs to another vendor".to_string())
            }
            Some(_) => NuqtaError::BusinessLogic(
                "Only pending bookings can be transitioned".to_string(),
            ),
        })
    }

    /// Fire-and-forget booking email; any lookup failure is logged and
    /// swallowed so it can never fail the transition that triggered it.
    async fn notify_with_event_lookup(&self, kind: BookingEmail, booking: &Booking) {
        let title = match self.events.find_by_id(booking.event_id).await {
            Ok(Some(event)) => event.title,
            _ => {
                warn!(booking_id = booking.id, "Skipping email, event lookup failed");
                return;
            }
        };
        self.notify(kind, booking, &title).await;
    }

    async fn notify(&self, kind: BookingEmail, booking: &Booking, event_title: &str) {
        match self.profiles.find_by_id(booking.user_id).await {
            Ok(Some(profile)) => {
                self.notifications
                    .booking_email(kind, &profile, event_title, booking);
            }
            _ => {
                warn!(booking_id = booking.id, "Skipping email, profile lookup failed");
            }
        }
    }
}
