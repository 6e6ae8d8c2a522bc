//! Admin account management: signup, login, profile, token verification.
//!
//! Signup and login are public. Profile, verify, logout, and the admin
//! listing sit behind the token gate; the listing additionally requires
//! the super_admin role.

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{
    now_utc, Admin, AdminResponse, AdminRole, LoginRequest, PermissionSet, SignupRequest,
};
use crate::AppState;

use super::auth::{self, AuthContext};
use super::error::ApiError;
use super::validation::{normalize_email, required_trimmed, validate_password, validate_role};

/// Create a new admin account and sign a token for it.
///
/// New accounts always start with the default permission set; only the
/// seeded super admin carries the full set.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let email = normalize_email(&request.email);

    let existing: Option<Admin> = sqlx::query_as("SELECT * FROM admins WHERE email = ?")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(ApiError::bad_request("Admin with this email already exists"));
    }

    validate_password(&request.password).map_err(ApiError::bad_request)?;
    let name = required_trimmed(&request.name, "Name").map_err(ApiError::bad_request)?;
    if email.is_empty() {
        return Err(ApiError::bad_request("Email is required"));
    }
    let role = match request.role.as_deref() {
        Some(role) if !role.trim().is_empty() => {
            validate_role(role.trim()).map_err(ApiError::bad_request)?
        }
        _ => AdminRole::Admin,
    };

    let now = now_utc();
    let admin = Admin {
        id: Uuid::new_v4().to_string(),
        name,
        email,
        password_hash: auth::hash_password(&request.password)?,
        role: role.to_string(),
        permissions: PermissionSet::default().to_json(),
        is_active: true,
        last_login: None,
        created_at: now.clone(),
        updated_at: now,
    };
    sqlx::query(
        r#"
        INSERT INTO admins (id, name, email, password_hash, role, permissions,
                            is_active, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&admin.id)
    .bind(&admin.name)
    .bind(&admin.email)
    .bind(&admin.password_hash)
    .bind(&admin.role)
    .bind(&admin.permissions)
    .bind(admin.is_active)
    .bind(&admin.created_at)
    .bind(&admin.updated_at)
    .execute(&state.db)
    .await?;

    let token = auth::issue_admin_token(
        &admin,
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl_hours,
    )?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Admin registered successfully",
            "token": token,
            "admin": AdminResponse::from(admin),
        })),
    ))
}

/// Authenticate an admin and sign a fresh token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let email = normalize_email(&request.email);

    let admin: Option<Admin> = sqlx::query_as("SELECT * FROM admins WHERE email = ?")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    // Same message for unknown email and wrong password
    let mut admin = admin.ok_or_else(|| ApiError::bad_request("Invalid credentials"))?;

    if !admin.is_active {
        return Err(ApiError::bad_request("Admin account is deactivated"));
    }
    if !auth::verify_password(&request.password, &admin.password_hash) {
        return Err(ApiError::bad_request("Invalid credentials"));
    }

    let now = now_utc();
    sqlx::query("UPDATE admins SET last_login = ?, updated_at = ? WHERE id = ?")
        .bind(&now)
        .bind(&now)
        .bind(&admin.id)
        .execute(&state.db)
        .await?;
    admin.last_login = Some(now);

    let token = auth::issue_admin_token(
        &admin,
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl_hours,
    )?;

    Ok(Json(json!({
        "message": "Login successful",
        "token": token,
        "admin": AdminResponse::from(admin),
    })))
}

/// Profile of the authenticated admin.
pub async fn profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let admin: Option<Admin> = sqlx::query_as("SELECT * FROM admins WHERE id = ?")
        .bind(auth.subject_id())
        .fetch_optional(&state.db)
        .await?;
    let admin = admin.ok_or_else(|| ApiError::not_found("Admin not found"))?;

    Ok(Json(json!({
        "message": "Admin profile retrieved successfully",
        "admin": AdminResponse::from(admin),
    })))
}

/// Confirm that a token still maps to a live admin account.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let admin: Option<Admin> = sqlx::query_as("SELECT * FROM admins WHERE id = ?")
        .bind(auth.subject_id())
        .fetch_optional(&state.db)
        .await?;
    let admin = admin.ok_or_else(|| ApiError::not_found("Admin not found"))?;

    if !admin.is_active {
        return Err(ApiError::bad_request("Admin account is deactivated"));
    }

    Ok(Json(json!({
        "message": "Token is valid",
        "admin": AdminResponse::from(admin),
    })))
}

/// List every admin account. Super admins only.
pub async fn list_admins(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let current: Option<Admin> = sqlx::query_as("SELECT * FROM admins WHERE id = ?")
        .bind(auth.subject_id())
        .fetch_optional(&state.db)
        .await?;
    let current =
        current.ok_or_else(|| ApiError::forbidden("Access denied. Super admin required."))?;
    if current.role() != AdminRole::SuperAdmin {
        return Err(ApiError::forbidden("Access denied. Super admin required."));
    }

    let admins: Vec<Admin> = sqlx::query_as("SELECT * FROM admins ORDER BY created_at DESC")
        .fetch_all(&state.db)
        .await?;
    let admins: Vec<AdminResponse> = admins.into_iter().map(Into::into).collect();

    Ok(Json(json!({
        "message": "Admins retrieved successfully",
        "count": admins.len(),
        "admins": admins,
    })))
}

/// Tokens are stateless, so logout is a client-side discard; the server
/// just acknowledges it.
pub async fn logout() -> Json<serde_json::Value> {
    Json(json!({ "message": "Logged out successfully" }))
}
