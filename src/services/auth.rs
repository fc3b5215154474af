//! Authentication service implementation
//!
//! The auth provider remains an external collaborator: this service only
//! decodes its access token and resolves the caller's profile. The profile
//! row is the single authoritative source for the role; the role hint
//! embedded in token metadata is treated as a cache and never trusted on
//! its own.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::settings::Settings;
use crate::database::repositories::ProfileRepository;
use crate::models::profile::{Profile, UserRole};
use crate::utils::errors::{NuqtaError, Result};

/// Claims carried by the auth provider's access token
#[derive(Debug, Clone, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<MetadataClaims>,
    pub exp: usize,
}

/// Custom metadata the auth provider mirrors into the token
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataClaims {
    pub role: Option<String>,
}

/// Resolved identity of the current caller
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub profile_id: i64,
    pub auth_id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub language: String,
}

/// Authentication service for resolving callers from access tokens
#[derive(Debug, Clone)]
pub struct AuthService {
    profiles: ProfileRepository,
    settings: Settings,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(profiles: ProfileRepository, settings: Settings) -> Self {
        Self { profiles, settings }
    }

    /// Decode and verify an access token
    pub fn decode_token(&self, token: &str) -> Result<AccessClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;

        let data = jsonwebtoken::decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.settings.auth.jwt_secret.as_bytes()),
            &validation,
        )?;

        Ok(data.claims)
    }

    /// Resolve the full auth context for a token
    pub async fn context_from_token(&self, token: &str) -> Result<AuthContext> {
        let claims = self.decode_token(token)?;

        let auth_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| NuqtaError::Unauthorized("Malformed token subject".to_string()))?;

        let profile = self
            .profiles
            .find_by_auth_id(auth_id)
            .await?
            .ok_or_else(|| NuqtaError::Unauthorized("No profile for this account".to_string()))?;

        Ok(self.context_from_profile(&profile, claims.user_metadata))
    }

    /// Build the context from a loaded profile, checking the token's role
    /// hint against the authoritative profile role.
    fn context_from_profile(
        &self,
        profile: &Profile,
        metadata: Option<MetadataClaims>,
    ) -> AuthContext {
        let role = UserRole::parse(&profile.role).unwrap_or(UserRole::User);

        if let Some(hint) = metadata.and_then(|m| m.role) {
            if hint != profile.role {
                warn!(
                    profile_id = profile.id,
                    token_role = %hint,
                    profile_role = %profile.role,
                    "Token role hint disagrees with profile role, using profile"
                );
            }
        }

        debug!(profile_id = profile.id, role = role.as_str(), "Auth context resolved");

        AuthContext {
            profile_id: profile.id,
            auth_id: profile.auth_id,
            email: profile.email.clone(),
            role,
            language: profile.language.clone(),
        }
    }

    /// Require at least the given role
    pub fn require_role(&self, context: &AuthContext, role: UserRole) -> Result<()> {
        let allowed = match role {
            UserRole::User => true,
            UserRole::Vendor => matches!(context.role, UserRole::Vendor | UserRole::Admin),
            UserRole::Admin => matches!(context.role, UserRole::Admin),
        };

        if allowed {
            Ok(())
        } else {
            Err(NuqtaError::Forbidden(format!(
                "Requires {} role",
                role.as_str()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;
    use sqlx::postgres::PgPoolOptions;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        email: String,
        exp: usize,
    }

    fn test_service(secret: &str) -> AuthService {
        let mut settings = Settings::default();
        settings.auth.jwt_secret = secret.to_string();
        // Lazy pool: never connects in these tests
        let pool = PgPoolOptions::new().connect_lazy("postgresql://localhost/nuqta_test");
        AuthService::new(ProfileRepository::new(pool.expect("lazy pool")), settings)
    }

    fn make_token(secret: &str, sub: &str) -> String {
        let claims = TestClaims {
            sub: sub.to_string(),
            email: "user@example.com".to_string(),
            exp: (Utc::now().timestamp() + 3600) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encode test token")
    }

    #[tokio::test]
    async fn test_decode_round_trip() {
        let service = test_service("top-secret");
        let sub = Uuid::new_v4().to_string();
        let token = make_token("top-secret", &sub);

        let claims = service.decode_token(&token).expect("valid token");
        assert_eq!(claims.sub, sub);
        assert_eq!(claims.email.as_deref(), Some("user@example.com"));
    }

    #[tokio::test]
    async fn test_wrong_secret_rejected() {
        let service = test_service("top-secret");
        let token = make_token("other-secret", &Uuid::new_v4().to_string());

        assert!(service.decode_token(&token).is_err());
    }

    #[tokio::test]
    async fn test_role_requirements() {
        let service = test_service("top-secret");
        let context = AuthContext {
            profile_id: 1,
            auth_id: Uuid::new_v4(),
            email: "v@example.com".to_string(),
            role: UserRole::Vendor,
            language: "en".to_string(),
        };

        assert!(service.require_role(&context, UserRole::User).is_ok());
        assert!(service.require_role(&context, UserRole::Vendor).is_ok());
        assert!(service.require_role(&context, UserRole::Admin).is_err());
    }
}
