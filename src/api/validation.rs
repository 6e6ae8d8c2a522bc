//! Input validation for registration and admin requests.
//!
//! Validators return a plain error message that handlers wrap into a
//! 400 response.

use crate::db::AdminRole;

/// Trim a required text field, rejecting values that are blank.
pub fn required_trimmed(value: &str, label: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{} is required", label));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field, collapsing blank values to None.
pub fn optional_trimmed(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Normalized form of an email address: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate an admin password. The minimum counts characters, not bytes.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters long".to_string());
    }
    Ok(())
}

/// Validate an admin role value.
pub fn validate_role(role: &str) -> Result<AdminRole, String> {
    role.parse()
        .map_err(|_| "Role must be one of super_admin, admin, moderator".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields_are_trimmed_and_blank_rejected() {
        assert_eq!(required_trimmed("  Ada  ", "Name").unwrap(), "Ada");
        assert_eq!(
            required_trimmed("   ", "Name").unwrap_err(),
            "Name is required"
        );
        assert_eq!(
            required_trimmed("", "Company name").unwrap_err(),
            "Company name is required"
        );
    }

    #[test]
    fn optional_fields_collapse_blank_to_none() {
        assert_eq!(optional_trimmed(None), None);
        assert_eq!(optional_trimmed(Some("  ".to_string())), None);
        assert_eq!(
            optional_trimmed(Some(" Acme ".to_string())),
            Some("Acme".to_string())
        );
    }

    #[test]
    fn emails_are_lowercased_and_trimmed() {
        assert_eq!(normalize_email(" Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn password_must_be_six_characters() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
        assert_eq!(
            validate_password("short").unwrap_err(),
            "Password must be at least 6 characters long"
        );
    }

    #[test]
    fn password_length_counts_characters_not_bytes() {
        // three characters, six bytes
        assert!(validate_password("ñññ").is_err());
        // six characters, seven bytes
        assert!(validate_password("señora").is_ok());
    }

    #[test]
    fn roles_parse_or_reject() {
        assert_eq!(validate_role("super_admin").unwrap(), AdminRole::SuperAdmin);
        assert_eq!(validate_role("moderator").unwrap(), AdminRole::Moderator);
        assert!(validate_role("root").is_err());
    }
}
