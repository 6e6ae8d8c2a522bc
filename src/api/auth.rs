//! Token issuance, verification, and the two authorization gates.
//!
//! Tokens are HS256 JWTs carrying one of two closed claim shapes:
//! admin tokens (`adminId` plus role and permissions) and user tokens
//! (`userId` only). Verification distinguishes a token that fails
//! signature or expiry checks from one that verifies but carries a
//! shape this portal never issued, because the two cases produce
//! different responses.
//!
//! [`require_auth`] accepts any valid token and attaches an
//! [`AuthContext`]. [`require_admin`] additionally re-reads the admin
//! row, so deactivating an account revokes access immediately even
//! though tokens themselves are stateless.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::error::ApiError;
use crate::db::{Admin, PermissionSet};
use crate::AppState;

/// Cost factor for admin password hashes.
const BCRYPT_COST: u32 = 10;

/// Claims carried by an admin token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminClaims {
    pub admin_id: String,
    pub role: String,
    pub permissions: PermissionSet,
    pub exp: i64,
}

/// Claims carried by a user token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserClaims {
    pub user_id: String,
    pub exp: i64,
}

/// The closed set of claim shapes this portal accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenClaims {
    Admin(AdminClaims),
    User(UserClaims),
}

/// Why a token was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Signature, expiry, or structural failure
    #[error("Token is not valid")]
    Invalid,
    /// Verified signature but a claim shape the portal never issues
    #[error("Invalid token format")]
    UnknownShape,
}

/// Sign a 24-hour (configurable) admin token.
pub fn issue_admin_token(
    admin: &Admin,
    secret: &str,
    ttl_hours: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = AdminClaims {
        admin_id: admin.id.clone(),
        role: admin.role.clone(),
        permissions: admin.permission_set(),
        exp: (Utc::now() + Duration::hours(ttl_hours)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Sign a token for a non-admin subject.
pub fn issue_user_token(
    user_id: &str,
    secret: &str,
    ttl_hours: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = UserClaims {
        user_id: user_id.to_string(),
        exp: (Utc::now() + Duration::hours(ttl_hours)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token and decode its claims. Expiry is exact: no leeway.
pub fn verify_token(token: &str, secret: &str) -> Result<TokenClaims, TokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    // Tokens are issued and verified on the same clock
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    match decode::<TokenClaims>(token, &key, &validation) {
        Ok(data) => Ok(data.claims),
        // decode deserializes claims before validating expiry, so a Json
        // error can mask an expired token; re-check with a shape-agnostic
        // target so expiry outranks shape
        Err(err) => match err.kind() {
            ErrorKind::Json(_) => match decode::<serde_json::Value>(token, &key, &validation) {
                Ok(_) => Err(TokenError::UnknownShape),
                Err(_) => Err(TokenError::Invalid),
            },
            _ => Err(TokenError::Invalid),
        },
    }
}

/// Hash a password with bcrypt.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, BCRYPT_COST)
}

/// Verify a password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Identity attached to the request by [`require_auth`].
#[derive(Debug, Clone)]
pub enum AuthContext {
    Admin {
        admin_id: String,
        role: String,
        permissions: PermissionSet,
    },
    User {
        user_id: String,
    },
}

impl AuthContext {
    /// Subject id regardless of token shape.
    pub fn subject_id(&self) -> &str {
        match self {
            Self::Admin { admin_id, .. } => admin_id,
            Self::User { user_id } => user_id,
        }
    }
}

/// Admin row attached to the request by [`require_admin`], freshly
/// re-read from the database.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub Admin);

fn bearer_token(request: &Request<Body>) -> Option<String> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.strip_prefix("Bearer ").unwrap_or(value).to_string())
        .filter(|token| !token.is_empty())
}

/// Gate for routes that accept any valid token.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&request)
        .ok_or_else(|| ApiError::unauthorized("No token, authorization denied"))?;

    let claims = verify_token(&token, &state.config.auth.jwt_secret).map_err(|err| match err {
        TokenError::Invalid => ApiError::unauthorized("Token is not valid"),
        TokenError::UnknownShape => ApiError::unauthorized("Invalid token format"),
    })?;

    let context = match claims {
        TokenClaims::Admin(claims) => AuthContext::Admin {
            admin_id: claims.admin_id,
            role: claims.role,
            permissions: claims.permissions,
        },
        TokenClaims::User(claims) => AuthContext::User {
            user_id: claims.user_id,
        },
    };
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

/// Gate for admin-only routes: requires an admin-shaped token and an
/// existing, active admin account.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&request)
        .ok_or_else(|| ApiError::unauthorized("No token, authorization denied"))?;

    let claims = verify_token(&token, &state.config.auth.jwt_secret).map_err(|err| match err {
        TokenError::Invalid => ApiError::unauthorized("Token is not valid"),
        // A foreign-shaped token is authenticated but not an admin
        TokenError::UnknownShape => ApiError::forbidden("Access denied. Admin token required."),
    })?;

    let admin_id = match claims {
        TokenClaims::Admin(claims) => claims.admin_id,
        TokenClaims::User(_) => {
            return Err(ApiError::forbidden("Access denied. Admin token required."))
        }
    };

    let admin: Option<Admin> = sqlx::query_as("SELECT * FROM admins WHERE id = ?")
        .bind(&admin_id)
        .fetch_optional(&state.db)
        .await?;
    let admin = admin
        .filter(|admin| admin.is_active)
        .ok_or_else(|| ApiError::forbidden("Access denied. Admin account not found or inactive."))?;

    request.extensions_mut().insert(CurrentAdmin(admin));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_admin() -> Admin {
        Admin {
            id: "admin-1".to_string(),
            name: "Default Admin".to_string(),
            email: "admin@admin.com".to_string(),
            password_hash: String::new(),
            role: "super_admin".to_string(),
            permissions: PermissionSet::full().to_json(),
            is_active: true,
            last_login: None,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn admin_token_round_trip() {
        let token = issue_admin_token(&test_admin(), "secret", 24).unwrap();
        match verify_token(&token, "secret").unwrap() {
            TokenClaims::Admin(claims) => {
                assert_eq!(claims.admin_id, "admin-1");
                assert_eq!(claims.role, "super_admin");
                assert!(claims.permissions.can_manage_users);
                assert!(claims.exp > Utc::now().timestamp());
            }
            TokenClaims::User(_) => panic!("expected admin claims"),
        }
    }

    #[test]
    fn user_shaped_token_decodes_as_user() {
        let token = issue_user_token("user-9", "secret", 1).unwrap();
        match verify_token(&token, "secret").unwrap() {
            TokenClaims::User(claims) => assert_eq!(claims.user_id, "user-9"),
            TokenClaims::Admin(_) => panic!("expected user claims"),
        }
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = issue_admin_token(&test_admin(), "secret", 24).unwrap();
        assert_eq!(
            verify_token(&token, "other-secret").unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn expired_token_is_invalid_not_unknown() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Stale {
            admin_id: String,
            role: String,
            permissions: PermissionSet,
            exp: i64,
        }
        let claims = Stale {
            admin_id: "admin-1".to_string(),
            role: "admin".to_string(),
            permissions: PermissionSet::default(),
            exp: (Utc::now() - Duration::hours(25)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        assert_eq!(
            verify_token(&token, "secret").unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn token_expired_by_seconds_is_rejected() {
        let claims = AdminClaims {
            admin_id: "admin-1".to_string(),
            role: "admin".to_string(),
            permissions: PermissionSet::default(),
            exp: (Utc::now() - Duration::seconds(30)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        assert_eq!(
            verify_token(&token, "secret").unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn well_signed_foreign_shape_is_unknown() {
        #[derive(Serialize)]
        struct Foreign {
            sub: String,
            exp: i64,
        }
        let claims = Foreign {
            sub: "service-account".to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        assert_eq!(
            verify_token(&token, "secret").unwrap_err(),
            TokenError::UnknownShape
        );
    }

    #[test]
    fn expired_foreign_shape_is_invalid_not_unknown() {
        #[derive(Serialize)]
        struct Foreign {
            sub: String,
            exp: i64,
        }
        let claims = Foreign {
            sub: "service-account".to_string(),
            exp: (Utc::now() - Duration::seconds(45)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        assert_eq!(
            verify_token(&token, "secret").unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn garbage_token_is_invalid() {
        assert_eq!(
            verify_token("not-a-jwt", "secret").unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn password_hash_uses_cost_ten_and_verifies() {
        let hash = hash_password("admin123").unwrap();
        assert!(hash.contains("$10$"));
        assert!(verify_password("admin123", &hash));
        assert!(!verify_password("admin124", &hash));
        assert!(!verify_password("admin123", "not-a-hash"));
    }
}
