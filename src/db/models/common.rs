//! Shared helpers for timestamp and JSON columns.

use chrono::{Duration, SecondsFormat, Utc};

/// Current UTC time as a fixed-width RFC 3339 string.
///
/// Seconds precision keeps every timestamp the same length, so
/// lexicographic comparison in SQL matches chronological order.
pub fn now_utc() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Timestamp `days` days before now, same fixed-width format as [`now_utc`].
pub fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a JSON list column, treating NULL or malformed data as empty.
pub fn parse_string_list(json: Option<&str>) -> Vec<String> {
    json.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

/// Serialize a string list for storage, keeping NULL for empty lists.
pub fn serialize_string_list(items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        serde_json::to_string(items).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_are_fixed_width() {
        let now = now_utc();
        let earlier = days_ago(7);
        assert_eq!(now.len(), earlier.len());
        assert!(now.ends_with('Z'));
        assert!(earlier < now);
    }

    #[test]
    fn string_list_round_trip() {
        let items = vec!["technology".to_string(), "robotics".to_string()];
        let json = serialize_string_list(&items).unwrap();
        assert_eq!(parse_string_list(Some(&json)), items);
    }

    #[test]
    fn string_list_handles_null_and_garbage() {
        assert!(parse_string_list(None).is_empty());
        assert!(parse_string_list(Some("not json")).is_empty());
        assert_eq!(serialize_string_list(&[]), None);
    }
}
