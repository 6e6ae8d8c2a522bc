//! Visitor registration, badge lookup, and statistics endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{
    now_utc, sequence, serialize_string_list, RegisterVisitorRequest, SequenceKind, Visitor,
    VisitorResponse, VisitorStats,
};
use crate::AppState;

use super::error::ApiError;
use super::validation::{normalize_email, optional_trimmed, required_trimmed};

/// Register a new visitor and issue their visitor number
pub async fn register_visitor(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterVisitorRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let email = normalize_email(&request.email);

    // Duplicate emails report the number already issued
    let existing: Option<Visitor> = sqlx::query_as("SELECT * FROM visitors WHERE email = ?")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if let Some(existing) = existing {
        return Err(
            ApiError::bad_request("A visitor with this email is already registered")
                .with_field("visitorNumber", json!(existing.visitor_number)),
        );
    }

    if email.is_empty() {
        return Err(ApiError::bad_request("Email is required"));
    }
    let name = required_trimmed(&request.name, "Name").map_err(ApiError::bad_request)?;
    let phone = required_trimmed(&request.phone, "Phone").map_err(ApiError::bad_request)?;
    let company = optional_trimmed(request.company);
    let interests = request.interests.unwrap_or_default();

    // Number issuance and insert share a transaction so a failed insert
    // never burns a number
    let now = now_utc();
    let mut tx = state.db.begin().await?;
    let visitor_number = sequence::next_number(&mut *tx, SequenceKind::Visitor).await?;
    let visitor = Visitor {
        id: Uuid::new_v4().to_string(),
        visitor_number,
        name,
        email,
        phone,
        company,
        interests: serialize_string_list(&interests),
        status: "active".to_string(),
        registration_date: now.clone(),
        created_at: now,
    };
    sqlx::query(
        r#"
        INSERT INTO visitors (id, visitor_number, name, email, phone, company, interests,
                              status, registration_date, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&visitor.id)
    .bind(&visitor.visitor_number)
    .bind(&visitor.name)
    .bind(&visitor.email)
    .bind(&visitor.phone)
    .bind(&visitor.company)
    .bind(&visitor.interests)
    .bind(&visitor.status)
    .bind(&visitor.registration_date)
    .bind(&visitor.created_at)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Visitor registered successfully",
            "visitor": VisitorResponse::from(visitor),
        })),
    ))
}

/// List all visitors, newest first
pub async fn list_visitors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let visitors: Vec<Visitor> =
        sqlx::query_as("SELECT * FROM visitors ORDER BY created_at DESC, visitor_number DESC")
            .fetch_all(&state.db)
            .await?;
    let visitors: Vec<VisitorResponse> = visitors.into_iter().map(Into::into).collect();

    Ok(Json(json!({
        "message": "Visitors retrieved successfully",
        "count": visitors.len(),
        "visitors": visitors,
    })))
}

/// Look up a visitor badge by its visitor number (public)
pub async fn get_visitor(
    State(state): State<Arc<AppState>>,
    Path(visitor_number): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let visitor: Option<Visitor> = sqlx::query_as("SELECT * FROM visitors WHERE visitor_number = ?")
        .bind(&visitor_number)
        .fetch_optional(&state.db)
        .await?;
    let visitor = visitor.ok_or_else(|| ApiError::not_found("Visitor not found"))?;

    Ok(Json(json!({
        "message": "Visitor found",
        "visitor": VisitorResponse::from(visitor),
    })))
}

/// Visitor statistics overview
pub async fn visitor_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let stats = VisitorStats::get(&state.db).await?;

    Ok(Json(json!({
        "message": "Visitor statistics retrieved successfully",
        "stats": stats,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_state;

    fn request(name: &str, email: &str) -> RegisterVisitorRequest {
        RegisterVisitorRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone: "555-0100".to_string(),
            company: Some("Acme".to_string()),
            interests: Some(vec!["technology".to_string()]),
        }
    }

    #[tokio::test]
    async fn first_visitor_gets_number_one() {
        let state = test_state().await;
        let (status, Json(body)) = register_visitor(
            State(state.clone()),
            Json(request("Ada", "ada@example.com")),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Visitor registered successfully");
        assert_eq!(body["visitor"]["visitorNumber"], "VIS000001");
        assert_eq!(body["visitor"]["interests"][0], "technology");

        let (_, Json(second)) = register_visitor(
            State(state.clone()),
            Json(request("Grace", "grace@example.com")),
        )
        .await
        .unwrap();
        assert_eq!(second["visitor"]["visitorNumber"], "VIS000002");
    }

    #[tokio::test]
    async fn duplicate_email_reports_existing_number() {
        let state = test_state().await;
        register_visitor(State(state.clone()), Json(request("Ada", "ada@example.com")))
            .await
            .unwrap();

        let error = register_visitor(
            State(state.clone()),
            Json(request("Imposter", "ADA@example.com ")),
        )
        .await
        .unwrap_err();
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            error.message(),
            "A visitor with this email is already registered"
        );

        // Rejected attempt must not consume a number
        let (_, Json(next)) = register_visitor(
            State(state.clone()),
            Json(request("Grace", "grace@example.com")),
        )
        .await
        .unwrap();
        assert_eq!(next["visitor"]["visitorNumber"], "VIS000002");
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let state = test_state().await;
        let error = register_visitor(State(state), Json(request("   ", "ada@example.com")))
            .await
            .unwrap_err();
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.message(), "Name is required");
    }

    #[tokio::test]
    async fn lookup_by_number_is_public_and_misses_cleanly() {
        let state = test_state().await;
        register_visitor(State(state.clone()), Json(request("Ada", "ada@example.com")))
            .await
            .unwrap();

        let Json(found) = get_visitor(State(state.clone()), Path("VIS000001".to_string()))
            .await
            .unwrap();
        assert_eq!(found["message"], "Visitor found");
        assert_eq!(found["visitor"]["email"], "ada@example.com");

        let missing = get_visitor(State(state), Path("VIS999999".to_string()))
            .await
            .unwrap_err();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.message(), "Visitor not found");
    }
}
