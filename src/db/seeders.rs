//! Database seeders for built-in data.

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use super::models::{now_utc, PermissionSet};
use crate::api::auth::hash_password;

/// Create the bootstrap super admin if no admin uses its email yet.
///
/// Runs on every startup; an existing account is left untouched so
/// password changes survive restarts.
pub async fn seed_default_admin(pool: &SqlitePool, email: &str, password: &str) -> Result<()> {
    let email = email.trim().to_lowercase();

    let existing: Option<(String,)> = sqlx::query_as("SELECT id FROM admins WHERE email = ?")
        .bind(&email)
        .fetch_optional(pool)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let now = now_utc();
    let password_hash = hash_password(password)?;
    sqlx::query(
        r#"
        INSERT INTO admins (id, name, email, password_hash, role, permissions,
                            is_active, last_login, created_at, updated_at)
        VALUES (?, ?, ?, ?, 'super_admin', ?, 1, NULL, ?, ?)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind("Default Admin")
    .bind(&email)
    .bind(&password_hash)
    .bind(PermissionSet::full().to_json())
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await?;

    info!("Default admin created: {}", email);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, Admin};

    #[tokio::test]
    async fn seeds_super_admin_once() {
        let pool = test_pool().await;
        seed_default_admin(&pool, "Admin@Admin.com", "admin123")
            .await
            .unwrap();
        seed_default_admin(&pool, "admin@admin.com", "different")
            .await
            .unwrap();

        let admins: Vec<Admin> = sqlx::query_as("SELECT * FROM admins")
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(admins.len(), 1);
        let admin = &admins[0];
        assert_eq!(admin.email, "admin@admin.com");
        assert_eq!(admin.role, "super_admin");
        assert!(admin.is_active);
        assert!(admin.permission_set().can_manage_users);
        // First seed wins; the rerun must not rotate the password
        assert!(crate::api::auth::verify_password(
            "admin123",
            &admin.password_hash
        ));
    }
}
