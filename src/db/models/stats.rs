//! Aggregated registration statistics for the admin dashboard.

use serde::Serialize;
use sqlx::SqlitePool;

use super::common::days_ago;

/// Visitor registration overview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorStats {
    pub total: i64,
    pub active: i64,
    pub inactive: i64,
    /// Registrations created within the trailing 7 days
    pub recent_registrations: i64,
    /// Top 10 companies by visitor count
    pub top_companies: Vec<CompanyCount>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CompanyCount {
    pub company: String,
    pub count: i64,
}

impl VisitorStats {
    pub async fn get(db: &SqlitePool) -> Result<Self, sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM visitors")
            .fetch_one(db)
            .await?;
        let (active,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM visitors WHERE status = 'active'")
                .fetch_one(db)
                .await?;
        let (inactive,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM visitors WHERE status = 'inactive'")
                .fetch_one(db)
                .await?;

        let cutoff = days_ago(7);
        let (recent_registrations,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM visitors WHERE created_at >= ?")
                .bind(&cutoff)
                .fetch_one(db)
                .await?;

        // Ties rank alphabetically so repeated calls return a stable order
        let top_companies: Vec<CompanyCount> = sqlx::query_as(
            r#"
            SELECT company, COUNT(*) as count
            FROM visitors
            WHERE company IS NOT NULL AND company != ''
            GROUP BY company
            ORDER BY count DESC, company ASC
            LIMIT 10
            "#,
        )
        .fetch_all(db)
        .await?;

        Ok(Self {
            total,
            active,
            inactive,
            recent_registrations,
            top_companies,
        })
    }
}

/// Exhibitor registration overview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitorStats {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    /// Exhibitor count per hall; halls with no exhibitors report zero
    pub by_hall: HallCounts,
    /// Count and revenue per booth size; only sizes actually sold appear
    pub by_booth_size: Vec<BoothSizeCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HallCounts {
    pub hall1: i64,
    pub hall2: i64,
    pub hall3: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BoothSizeCount {
    pub booth_size: String,
    pub count: i64,
    pub total_revenue: i64,
}

impl ExhibitorStats {
    pub async fn get(db: &SqlitePool) -> Result<Self, sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exhibitors")
            .fetch_one(db)
            .await?;

        let mut status_counts = [0i64; 3];
        for (slot, status) in status_counts.iter_mut().zip(["pending", "approved", "rejected"]) {
            let (count,): (i64,) =
                sqlx::query_as("SELECT COUNT(*) FROM exhibitors WHERE status = ?")
                    .bind(status)
                    .fetch_one(db)
                    .await?;
            *slot = count;
        }

        let mut hall_counts = [0i64; 3];
        for (slot, hall) in hall_counts.iter_mut().zip(1i64..=3) {
            let (count,): (i64,) =
                sqlx::query_as("SELECT COUNT(*) FROM exhibitors WHERE hall_number = ?")
                    .bind(hall)
                    .fetch_one(db)
                    .await?;
            *slot = count;
        }

        let by_booth_size: Vec<BoothSizeCount> = sqlx::query_as(
            r#"
            SELECT booth_size, COUNT(*) as count, SUM(total_amount) as total_revenue
            FROM exhibitors
            GROUP BY booth_size
            ORDER BY booth_size ASC
            "#,
        )
        .fetch_all(db)
        .await?;

        Ok(Self {
            total,
            pending: status_counts[0],
            approved: status_counts[1],
            rejected: status_counts[2],
            by_hall: HallCounts {
                hall1: hall_counts[0],
                hall2: hall_counts[1],
                hall3: hall_counts[2],
            },
            by_booth_size,
        })
    }
}
