//! Registration number issuance backed by an atomic counter table.
//!
//! Each registration type owns one row in `sequences`; a single
//! `UPDATE ... RETURNING` claims the next value, so concurrent
//! registrations can never observe the same number.

use sqlx::SqliteExecutor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    Visitor,
    Exhibitor,
}

impl SequenceKind {
    /// Row key in the `sequences` table.
    fn key(&self) -> &'static str {
        match self {
            Self::Visitor => "visitor",
            Self::Exhibitor => "exhibitor",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Self::Visitor => "VIS",
            Self::Exhibitor => "EXH",
        }
    }
}

fn format_number(prefix: &str, value: i64) -> String {
    format!("{}{:06}", prefix, value)
}

/// Claim the next registration number for `kind`.
///
/// Accepts either a pool or an open transaction, so a registration can
/// claim its number inside the same transaction that inserts the record
/// and the counter rolls back if the insert fails.
pub async fn next_number<'e, E>(db: E, kind: SequenceKind) -> Result<String, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let (value,): (i64,) =
        sqlx::query_as("UPDATE sequences SET value = value + 1 WHERE name = ? RETURNING value")
            .bind(kind.key())
            .fetch_one(db)
            .await?;
    Ok(format_number(kind.prefix(), value))
}
