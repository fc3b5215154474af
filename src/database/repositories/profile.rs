//! Profile repository implementation

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::{CreateProfileRequest, Profile, UpdateProfileRequest};
use crate::utils::errors::NuqtaError;

const PROFILE_COLUMNS: &str = "id, auth_id, email, full_name, phone, gender, birth_date, role, \
     language, avatar_url, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a profile for a freshly authenticated account
    pub async fn create(&self, request: CreateProfileRequest) -> Result<Profile, NuqtaError> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            INSERT INTO profiles (auth_id, email, full_name, role, language, created_at, updated_at)
            VALUES ($1, $2, $3, 'user', $4, $5, $6)
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(request.auth_id)
        .bind(request.email)
        .bind(request.full_name)
        .bind(request.language.unwrap_or_else(|| "en".to_string()))
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Find profile by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Profile>, NuqtaError> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Find profile by the auth provider's identity
    pub async fn find_by_auth_id(&self, auth_id: Uuid) -> Result<Option<Profile>, NuqtaError> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE auth_id = $1"
        ))
        .bind(auth_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Update profile fields; only provided fields change
    pub async fn update(&self, id: i64, request: UpdateProfileRequest) -> Result<Profile, NuqtaError> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                gender = COALESCE($4, gender),
                birth_date = COALESCE($5, birth_date),
                language = COALESCE($6, language),
                avatar_url = COALESCE($7, avatar_url),
                updated_at = $8
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.full_name)
        .bind(request.phone)
        .bind(request.gender)
        .bind(request.birth_date)
        .bind(request.language)
        .bind(request.avatar_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Set the authoritative role for a profile
    pub async fn set_role(&self, id: i64, role: &str) -> Result<Profile, NuqtaError> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET role = $2, updated_at = $3
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(role)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Count total profiles
    pub async fn count(&self) -> Result<i64, NuqtaError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
