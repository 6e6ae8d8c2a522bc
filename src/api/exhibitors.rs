//! Exhibitor registration, booth pricing, hall listings, and statistics.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{
    now_utc, number_employees, sequence, BoothSize, Exhibitor, ExhibitorResponse, ExhibitorStats,
    RegisterExhibitorRequest, SequenceKind,
};
use crate::AppState;

use super::error::ApiError;
use super::validation::{normalize_email, optional_trimmed, required_trimmed};

/// Register a new exhibitor: validates hall and booth size, prices the
/// booth, and issues exhibitor and employee numbers
pub async fn register_exhibitor(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterExhibitorRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let email = normalize_email(&request.email);

    let existing: Option<Exhibitor> = sqlx::query_as("SELECT * FROM exhibitors WHERE email = ?")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if let Some(existing) = existing {
        return Err(
            ApiError::bad_request("An exhibitor with this email is already registered")
                .with_field("exhibitorNumber", json!(existing.exhibitor_number)),
        );
    }

    let hall_number = request
        .hall_number
        .as_hall()
        .ok_or_else(|| ApiError::bad_request("Invalid hall number. Please select hall 1, 2, or 3."))?;

    let booth_size: BoothSize = request
        .booth_size
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid booth size selected."))?;

    if email.is_empty() {
        return Err(ApiError::bad_request("Email is required"));
    }
    let company_name =
        required_trimmed(&request.company_name, "Company name").map_err(ApiError::bad_request)?;
    let contact_person = required_trimmed(&request.contact_person, "Contact person")
        .map_err(ApiError::bad_request)?;
    let phone = required_trimmed(&request.phone, "Phone").map_err(ApiError::bad_request)?;
    let industry = required_trimmed(&request.industry, "Industry").map_err(ApiError::bad_request)?;
    let description =
        required_trimmed(&request.description, "Description").map_err(ApiError::bad_request)?;
    let website = optional_trimmed(request.website);
    let special_requirements = optional_trimmed(request.special_requirements);

    // Price is fixed at submission time and never recomputed
    let total_amount = booth_size.price();

    let now = now_utc();
    let mut tx = state.db.begin().await?;
    let exhibitor_number = sequence::next_number(&mut *tx, SequenceKind::Exhibitor).await?;
    let employees = number_employees(&request.employees, &exhibitor_number);
    let exhibitor = Exhibitor {
        id: Uuid::new_v4().to_string(),
        exhibitor_number,
        company_name,
        contact_person,
        email,
        phone,
        website,
        industry,
        booth_size: booth_size.to_string(),
        hall_number,
        description,
        special_requirements,
        employees: serde_json::to_string(&employees).unwrap_or_else(|_| "[]".to_string()),
        total_amount,
        status: "pending".to_string(),
        registration_date: now.clone(),
        created_at: now,
    };
    sqlx::query(
        r#"
        INSERT INTO exhibitors (id, exhibitor_number, company_name, contact_person, email,
                                phone, website, industry, booth_size, hall_number, description,
                                special_requirements, employees, total_amount, status,
                                registration_date, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&exhibitor.id)
    .bind(&exhibitor.exhibitor_number)
    .bind(&exhibitor.company_name)
    .bind(&exhibitor.contact_person)
    .bind(&exhibitor.email)
    .bind(&exhibitor.phone)
    .bind(&exhibitor.website)
    .bind(&exhibitor.industry)
    .bind(&exhibitor.booth_size)
    .bind(exhibitor.hall_number)
    .bind(&exhibitor.description)
    .bind(&exhibitor.special_requirements)
    .bind(&exhibitor.employees)
    .bind(exhibitor.total_amount)
    .bind(&exhibitor.status)
    .bind(&exhibitor.registration_date)
    .bind(&exhibitor.created_at)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Exhibitor registered successfully",
            "exhibitor": ExhibitorResponse::from(exhibitor),
        })),
    ))
}

/// List all exhibitors, newest first
pub async fn list_exhibitors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let exhibitors: Vec<Exhibitor> =
        sqlx::query_as("SELECT * FROM exhibitors ORDER BY created_at DESC, exhibitor_number DESC")
            .fetch_all(&state.db)
            .await?;
    let exhibitors: Vec<ExhibitorResponse> = exhibitors.into_iter().map(Into::into).collect();

    Ok(Json(json!({
        "message": "Exhibitors retrieved successfully",
        "count": exhibitors.len(),
        "exhibitors": exhibitors,
    })))
}

/// Look up an exhibitor by its exhibitor number (public)
pub async fn get_exhibitor(
    State(state): State<Arc<AppState>>,
    Path(exhibitor_number): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let exhibitor: Option<Exhibitor> =
        sqlx::query_as("SELECT * FROM exhibitors WHERE exhibitor_number = ?")
            .bind(&exhibitor_number)
            .fetch_optional(&state.db)
            .await?;
    let exhibitor = exhibitor.ok_or_else(|| ApiError::not_found("Exhibitor not found"))?;

    Ok(Json(json!({
        "message": "Exhibitor found",
        "exhibitor": ExhibitorResponse::from(exhibitor),
    })))
}

/// List exhibitors assigned to one hall
pub async fn list_exhibitors_by_hall(
    State(state): State<Arc<AppState>>,
    Path(hall_number): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let hall_number: i64 = match hall_number.trim().parse() {
        Ok(n) if (1..=3).contains(&n) => n,
        _ => return Err(ApiError::bad_request("Invalid hall number. Must be 1, 2, or 3.")),
    };

    let exhibitors: Vec<Exhibitor> = sqlx::query_as(
        "SELECT * FROM exhibitors WHERE hall_number = ? ORDER BY created_at DESC, exhibitor_number DESC",
    )
    .bind(hall_number)
    .fetch_all(&state.db)
    .await?;
    let exhibitors: Vec<ExhibitorResponse> = exhibitors.into_iter().map(Into::into).collect();

    Ok(Json(json!({
        "message": format!("Exhibitors in Hall {} retrieved successfully", hall_number),
        "hallNumber": hall_number,
        "count": exhibitors.len(),
        "exhibitors": exhibitors,
    })))
}

/// Exhibitor statistics overview
pub async fn exhibitor_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let stats = ExhibitorStats::get(&state.db).await?;

    Ok(Json(json!({
        "message": "Exhibitor statistics retrieved successfully",
        "stats": stats,
    })))
}
