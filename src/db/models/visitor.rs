//! Visitor registrations.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::common::parse_string_list;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Visitor {
    pub id: String,
    pub visitor_number: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    /// JSON list of interest tags, NULL when none were given
    pub interests: Option<String>,
    pub status: String,
    pub registration_date: String,
    pub created_at: String,
}

/// Visitor as returned over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorResponse {
    pub id: String,
    pub visitor_number: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub interests: Vec<String>,
    pub status: String,
    pub registration_date: String,
}

impl From<Visitor> for VisitorResponse {
    fn from(visitor: Visitor) -> Self {
        let interests = parse_string_list(visitor.interests.as_deref());
        Self {
            id: visitor.id,
            visitor_number: visitor.visitor_number,
            name: visitor.name,
            email: visitor.email,
            phone: visitor.phone,
            company: visitor.company,
            interests,
            status: visitor.status,
            registration_date: visitor.registration_date,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterVisitorRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_uses_camel_case_and_parses_interests() {
        let visitor = Visitor {
            id: "v1".to_string(),
            visitor_number: "VIS000001".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            company: Some("Analytical Engines".to_string()),
            interests: Some(r#"["technology","ai"]"#.to_string()),
            status: "active".to_string(),
            registration_date: "2025-03-01T09:00:00Z".to_string(),
            created_at: "2025-03-01T09:00:00Z".to_string(),
        };
        let json = serde_json::to_value(VisitorResponse::from(visitor)).unwrap();
        assert_eq!(json["visitorNumber"], "VIS000001");
        assert_eq!(json["registrationDate"], "2025-03-01T09:00:00Z");
        assert_eq!(json["interests"][1], "ai");
    }

    #[test]
    fn missing_interests_become_empty_list() {
        let visitor = Visitor {
            id: "v2".to_string(),
            visitor_number: "VIS000002".to_string(),
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            phone: "555-0101".to_string(),
            company: None,
            interests: None,
            status: "active".to_string(),
            registration_date: "2025-03-01T10:00:00Z".to_string(),
            created_at: "2025-03-01T10:00:00Z".to_string(),
        };
        let response = VisitorResponse::from(visitor);
        assert!(response.interests.is_empty());
        assert!(response.company.is_none());
    }
}
