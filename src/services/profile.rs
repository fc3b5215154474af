//! Profile and favorites service
//!
//! Profile updates are partial; only provided fields are validated and
//! changed. Favorite toggling is idempotent under races because both the
//! insert (ON CONFLICT DO NOTHING) and the delete tolerate a concurrent
//! twin without erroring the caller.

use tracing::{debug, info};

use crate::config::settings::Settings;
use crate::database::repositories::{
    EventRepository, FavoriteRepository, InterestRepository, ProfileRepository, VendorRepository,
};
use crate::models::event::Event;
use crate::models::profile::{Profile, UpdateProfileRequest};
use crate::utils::errors::{NuqtaError, Result};
use crate::utils::helpers::{is_valid_full_name, is_valid_phone};

#[derive(Debug, Clone)]
pub struct ProfileService {
    profiles: ProfileRepository,
    favorites: FavoriteRepository,
    interests: InterestRepository,
    events: EventRepository,
    vendors: VendorRepository,
    settings: Settings,
}

impl ProfileService {
    /// Create a new ProfileService instance
    pub fn new(
        profiles: ProfileRepository,
        favorites: FavoriteRepository,
        interests: InterestRepository,
        events: EventRepository,
        vendors: VendorRepository,
        settings: Settings,
    ) -> Self {
        Self {
            profiles,
            favorites,
            interests,
            events,
            vendors,
            settings,
        }
    }

    /// Get a profile by id
    pub async fn get_profile(&self, profile_id: i64) -> Result<Option<Profile>> {
        self.profiles.find_by_id(profile_id).await
    }

    /// Partially update a profile; only provided fields are validated
    pub async fn update_profile(
        &self,
        profile_id: i64,
        request: UpdateProfileRequest,
    ) -> Result<Profile> {
        if let Some(name) = request.full_name.as_deref() {
            if !is_valid_full_name(name) {
                return Err(NuqtaError::validation_field(
                    "full_name",
                    "Full name must be at least 2 characters",
                ));
            }
        }

        if let Some(phone) = request.phone.as_deref() {
            if !is_valid_phone(phone) {
                return Err(NuqtaError::validation_field(
                    "phone",
                    "Phone number must contain at least 10 digits and only phone characters",
                ));
            }
        }

        if let Some(lang) = request.language.as_deref() {
            if !self
                .settings
                .i18n
                .supported_languages
                .iter()
                .any(|l| l == lang)
            {
                return Err(NuqtaError::validation_field(
                    "language",
                    format!("Unsupported language: {}", lang),
                ));
            }
        }

        self.profiles
            .find_by_id(profile_id)
            .await?
            .ok_or(NuqtaError::ProfileNotFound { profile_id })?;

        let profile = self.profiles.update(profile_id, request).await?;
        info!(profile_id = profile_id, "Profile updated");

        Ok(profile)
    }

    /// Toggle a favorite; returns the resulting membership state
    pub async fn toggle_favorite(&self, user_id: i64, event_id: i64) -> Result<bool> {
        if self.favorites.exists(user_id, event_id).await? {
            self.favorites.remove(user_id, event_id).await?;
            debug!(user_id = user_id, event_id = event_id, "Favorite removed");
            Ok(false)
        } else {
            self.favorites.add(user_id, event_id).await?;
            debug!(user_id = user_id, event_id = event_id, "Favorite added");
            Ok(true)
        }
    }

    /// Add a favorite; succeeds without duplicating when already present
    pub async fn add_favorite(&self, user_id: i64, event_id: i64) -> Result<()> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or(NuqtaError::EventNotFound { event_id })?;

        self.favorites.add(user_id, event_id).await
    }

    /// Remove a favorite; a no-op when not present
    pub async fn remove_favorite(&self, user_id: i64, event_id: i64) -> Result<()> {
        self.favorites.remove(user_id, event_id).await?;
        Ok(())
    }

    /// Whether a user has favorited an event
    pub async fn is_favorited(&self, user_id: i64, event_id: i64) -> Result<bool> {
        self.favorites.exists(user_id, event_id).await
    }

    /// A user's favorited events
    pub async fn favorite_events(&self, user_id: i64) -> Result<Vec<Event>> {
        self.favorites.list_events(user_id).await
    }

    /// Express interest in a prospect vendor's event; idempotent
    pub async fn express_interest(&self, user_id: i64, event_id: i64) -> Result<()> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(NuqtaError::EventNotFound { event_id })?;

        let vendor = self
            .vendors
            .find_by_id(event.vendor_id)
            .await?
            .ok_or(NuqtaError::VendorNotFound {
                vendor_id: event.vendor_id,
            })?;

        if !vendor.is_prospect {
            return Err(NuqtaError::BusinessLogic(
                "This event is bookable; interests apply to prospect events only".to_string(),
            ));
        }

        self.interests.express(user_id, event_id).await
    }

    /// Withdraw interest; a no-op when not present
    pub async fn withdraw_interest(&self, user_id: i64, event_id: i64) -> Result<()> {
        self.interests.withdraw(user_id, event_id).await?;
        Ok(())
    }

    /// Interest count for a prospect event
    pub async fn interest_count(&self, event_id: i64) -> Result<i64> {
        self.interests.count_for_event(event_id).await
    }
}
