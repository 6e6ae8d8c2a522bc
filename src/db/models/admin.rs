//! Admin accounts and their permission model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role of a portal admin, ordered by privilege.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
    Moderator,
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "super_admin"),
            Self::Admin => write!(f, "admin"),
            Self::Moderator => write!(f, "moderator"),
        }
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "moderator" => Ok(Self::Moderator),
            _ => Err(format!("Unknown admin role: {}", s)),
        }
    }
}

impl From<String> for AdminRole {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(Self::Admin)
    }
}

/// Per-admin capability flags, stored as a JSON column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    #[serde(default = "default_true")]
    pub can_view_visitors: bool,
    #[serde(default = "default_true")]
    pub can_view_exhibitors: bool,
    #[serde(default)]
    pub can_manage_users: bool,
    #[serde(default = "default_true")]
    pub can_view_stats: bool,
}

fn default_true() -> bool {
    true
}

impl Default for PermissionSet {
    fn default() -> Self {
        Self {
            can_view_visitors: true,
            can_view_exhibitors: true,
            can_manage_users: false,
            can_view_stats: true,
        }
    }
}

impl PermissionSet {
    /// Full capability set granted to super admins.
    pub fn full() -> Self {
        Self {
            can_view_visitors: true,
            can_view_exhibitors: true,
            can_manage_users: true,
            can_view_stats: true,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Admin {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub permissions: String,
    pub is_active: bool,
    pub last_login: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Admin {
    pub fn role(&self) -> AdminRole {
        AdminRole::from(self.role.clone())
    }

    /// Parsed permission column; malformed data falls back to role defaults.
    pub fn permission_set(&self) -> PermissionSet {
        serde_json::from_str(&self.permissions).unwrap_or_default()
    }
}

/// Admin as returned over the wire; never includes the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub permissions: PermissionSet,
    pub is_active: bool,
    pub last_login: Option<String>,
    pub created_at: String,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        let permissions = admin.permission_set();
        Self {
            id: admin.id,
            name: admin.name,
            email: admin.email,
            role: admin.role,
            permissions,
            is_active: admin.is_active,
            last_login: admin.last_login,
            created_at: admin.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
