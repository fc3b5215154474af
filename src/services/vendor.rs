//! Vendor account service
//!
//! Vendor registration, prospect creation and claiming, and the public
//! vendor page. Founder pricing is locked in for vendors who join (or
//! claim) before the configured cutoff. The profile role is promoted to
//! vendor at registration, keeping the profile row the single source of
//! truth for roles.

use chrono::Utc;
use tracing::info;

use crate::config::settings::Settings;
use crate::database::repositories::{EventRepository, ProfileRepository, VendorRepository};
use crate::models::profile::UserRole;
use crate::models::vendor::{
    CreateProspectRequest, CreateVendorRequest, GalleryImage, UpdateVendorRequest, Vendor,
    VendorProfile,
};
use crate::services::notification::NotificationService;
use crate::utils::errors::{NuqtaError, Result};
use crate::utils::helpers::{generate_claim_token, slugify};
use crate::utils::logging::log_vendor_action;

#[derive(Debug, Clone)]
pub struct VendorService {
    vendors: VendorRepository,
    events: EventRepository,
    profiles: ProfileRepository,
    notifications: NotificationService,
    settings: Settings,
}

impl VendorService {
    /// Create a new VendorService instance
    pub fn new(
        vendors: VendorRepository,
        events: EventRepository,
        profiles: ProfileRepository,
        notifications: NotificationService,
        settings: Settings,
    ) -> Self {
        Self {
            vendors,
            events,
            profiles,
            notifications,
            settings,
        }
    }

    /// Register a vendor account for a profile
    pub async fn register(&self, request: CreateVendorRequest) -> Result<Vendor> {
        if request.name.trim().len() < 2 {
            return Err(NuqtaError::validation_field(
                "name",
                "Vendor name must be at least 2 characters",
            ));
        }

        if self.vendors.find_by_owner(request.owner_id).await?.is_some() {
            return Err(NuqtaError::Conflict(
                "This account already has a vendor profile".to_string(),
            ));
        }

        let slug = self.unique_slug(&request.name).await?;
        let founder = self.founder_pricing_now();
        let owner_id = request.owner_id;

        let vendor = self.vendors.create(slug, founder, request).await?;
        self.profiles.set_role(owner_id, UserRole::Vendor.as_str()).await?;

        log_vendor_action(vendor.id, "vendor_registered", Some(&vendor.slug));
        Ok(vendor)
    }

    /// Create an unclaimed prospect vendor and invite its contact to claim
    pub async fn create_prospect(&self, request: CreateProspectRequest) -> Result<Vendor> {
        if request.name.trim().len() < 2 {
            return Err(NuqtaError::validation_field(
                "name",
                "Vendor name must be at least 2 characters",
            ));
        }

        let slug = self.unique_slug(&request.name).await?;
        let token = generate_claim_token();
        let contact = request.email.clone();

        let vendor = self.vendors.create_prospect(slug, token, request).await?;

        if let Some(email) = contact {
            self.notifications
                .vendor_claim_invite(&email, &vendor.name, "en");
        }

        log_vendor_action(vendor.id, "prospect_created", Some(&vendor.slug));
        Ok(vendor)
    }

    /// Claim a prospect vendor with its token; single-shot
    pub async fn claim_prospect(&self, claim_token: &str, profile_id: i64) -> Result<Vendor> {
        if self.vendors.find_by_owner(profile_id).await?.is_some() {
            return Err(NuqtaError::Conflict(
                "This account already has a vendor profile".to_string(),
            ));
        }

        let vendor = self
            .vendors
            .claim(claim_token, profile_id, self.founder_pricing_now())
            .await?
            .ok_or_else(|| {
                NuqtaError::Conflict("Claim link is invalid or already used".to_string())
            })?;

        self.profiles.set_role(profile_id, UserRole::Vendor.as_str()).await?;

        info!(vendor_id = vendor.id, profile_id = profile_id, "Prospect vendor claimed");
        Ok(vendor)
    }

    /// Update a vendor, scoped to its owner
    pub async fn update(
        &self,
        profile_id: i64,
        vendor_id: i64,
        request: UpdateVendorRequest,
    ) -> Result<Vendor> {
        self.owned_vendor(profile_id, vendor_id).await?;
        self.vendors.update(vendor_id, request).await
    }

    /// Append a gallery image, scoped to the owner
    pub async fn add_gallery_image(
        &self,
        profile_id: i64,
        vendor_id: i64,
        image_url: String,
        position: i32,
    ) -> Result<GalleryImage> {
        self.owned_vendor(profile_id, vendor_id).await?;

        url::Url::parse(&image_url)?;
        self.vendors
            .add_gallery_image(vendor_id, image_url, position)
            .await
    }

    /// Public vendor page: gallery and upcoming events load concurrently
    pub async fn public_profile(&self, slug: &str) -> Result<Option<VendorProfile>> {
        let vendor = match self.vendors.find_by_slug(slug).await? {
            Some(vendor) => vendor,
            None => return Ok(None),
        };

        let (gallery, upcoming_events) = futures::try_join!(
            self.vendors.list_gallery(vendor.id),
            self.events.list_upcoming_by_vendor(vendor.id)
        )?;

        Ok(Some(VendorProfile {
            vendor,
            gallery,
            upcoming_events,
        }))
    }

    /// The vendor owned by a profile, if any
    pub async fn for_owner(&self, profile_id: i64) -> Result<Option<Vendor>> {
        self.vendors.find_by_owner(profile_id).await
    }

    fn founder_pricing_now(&self) -> bool {
        self.settings
            .vendors
            .founder_pricing_cutoff
            .map(|cutoff| Utc::now() < cutoff)
            .unwrap_or(false)
    }

    async fn owned_vendor(&self, profile_id: i64, vendor_id: i64) -> Result<Vendor> {
        let vendor = self
            .vendors
            .find_by_id(vendor_id)
            .await?
            .ok_or(NuqtaError::VendorNotFound { vendor_id })?;

        if vendor.owner_id != Some(profile_id) {
            return Err(NuqtaError::Forbidden(
                "Vendor belongs to another account".to_string(),
            ));
        }

        Ok(vendor)
    }

    async fn unique_slug(&self, name: &str) -> Result<String> {
        let base = slugify(name);

        if !self.vendors.slug_exists(&base).await? {
            return Ok(base);
        }

        for n in 2..=50 {
            let candidate = format!("{}-{}", base, n);
            if !self.vendors.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        Err(NuqtaError::Conflict(format!(
            "Could not find a free slug for '{}'",
            base
        )))
    }
}
