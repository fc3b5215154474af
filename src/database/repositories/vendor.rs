//! Vendor repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::vendor::{
    CreateProspectRequest, CreateVendorRequest, GalleryImage, UpdateVendorRequest, Vendor,
};
use crate::utils::errors::NuqtaError;

const VENDOR_COLUMNS: &str = "id, owner_id, name, slug, description, email, phone, \
     founder_pricing, is_prospect, claim_token, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct VendorRepository {
    pool: PgPool,
}

impl VendorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a vendor account owned by a profile
    pub async fn create(
        &self,
        slug: String,
        founder_pricing: bool,
        request: CreateVendorRequest,
    ) -> Result<Vendor, NuqtaError> {
        let vendor = sqlx::query_as::<_, Vendor>(&format!(
            r#"
            INSERT INTO vendors (owner_id, name, slug, description, email, phone,
                                 founder_pricing, is_prospect, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, false, $8, $9)
            RETURNING {VENDOR_COLUMNS}
            "#
        ))
        .bind(request.owner_id)
        .bind(request.name)
        .bind(slug)
        .bind(request.description)
        .bind(request.email)
        .bind(request.phone)
        .bind(founder_pricing)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vendor)
    }

    /// Create an unclaimed prospect vendor with a claim token
    pub async fn create_prospect(
        &self,
        slug: String,
        claim_token: String,
        request: CreateProspectRequest,
    ) -> Result<Vendor, NuqtaError> {
        let vendor = sqlx::query_as::<_, Vendor>(&format!(
            r#"
            INSERT INTO vendors (name, slug, description, email, founder_pricing,
                                 is_prospect, claim_token, created_at, updated_at)
            VALUES ($1, $2, $3, $4, false, true, $5, $6, $7)
            RETURNING {VENDOR_COLUMNS}
            "#
        ))
        .bind(request.name)
        .bind(slug)
        .bind(request.description)
        .bind(request.email)
        .bind(claim_token)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vendor)
    }

    /// Claim a prospect vendor exactly once. The conditional update clears
    /// the token, so a second claim with the same token matches nothing.
    pub async fn claim(
        &self,
        claim_token: &str,
        owner_id: i64,
        founder_pricing: bool,
    ) -> Result<Option<Vendor>, NuqtaError> {
        let vendor = sqlx::query_as::<_, Vendor>(&format!(
            r#"
            UPDATE vendors
            SET owner_id = $2, is_prospect = false, claim_token = NULL,
                founder_pricing = founder_pricing OR $3, updated_at = $4
            WHERE claim_token = $1 AND is_prospect = true
            RETURNING {VENDOR_COLUMNS}
            "#
        ))
        .bind(claim_token)
        .bind(owner_id)
        .bind(founder_pricing)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(vendor)
    }

    /// Find vendor by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Vendor>, NuqtaError> {
        let vendor = sqlx::query_as::<_, Vendor>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vendor)
    }

    /// Find vendor by slug
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Vendor>, NuqtaError> {
        let vendor = sqlx::query_as::<_, Vendor>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vendor)
    }

    /// Find the vendor owned by a profile
    pub async fn find_by_owner(&self, owner_id: i64) -> Result<Option<Vendor>, NuqtaError> {
        let vendor = sqlx::query_as::<_, Vendor>(&format!(
            "SELECT {VENDOR_COLUMNS} FROM vendors WHERE owner_id = $1"
        ))
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vendor)
    }

    /// Check whether a slug is already taken
    pub async fn slug_exists(&self, slug: &str) -> Result<bool, NuqtaError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM vendors WHERE slug = $1")
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0 > 0)
    }

    /// Update vendor fields; only provided fields change
    pub async fn update(&self, id: i64, request: UpdateVendorRequest) -> Result<Vendor, NuqtaError> {
        let vendor = sqlx::query_as::<_, Vendor>(&format!(
            r#"
            UPDATE vendors
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                updated_at = $6
            WHERE id = $1
            RETURNING {VENDOR_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.name)
        .bind(request.description)
        .bind(request.email)
        .bind(request.phone)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vendor)
    }

    /// Append an image to the vendor's gallery
    pub async fn add_gallery_image(
        &self,
        vendor_id: i64,
        image_url: String,
        position: i32,
    ) -> Result<GalleryImage, NuqtaError> {
        let image = sqlx::query_as::<_, GalleryImage>(
            r#"
            INSERT INTO vendor_gallery (vendor_id, image_url, position, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, vendor_id, image_url, position, created_at
            "#,
        )
        .bind(vendor_id)
        .bind(image_url)
        .bind(position)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(image)
    }

    /// Gallery images for a vendor, in display order
    pub async fn list_gallery(&self, vendor_id: i64) -> Result<Vec<GalleryImage>, NuqtaError> {
        let images = sqlx::query_as::<_, GalleryImage>(
            "SELECT id, vendor_id, image_url, position, created_at FROM vendor_gallery WHERE vendor_id = $1 ORDER BY position ASC",
        )
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }
}
