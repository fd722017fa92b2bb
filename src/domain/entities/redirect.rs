//! Redirect record entity.

use chrono::{DateTime, Utc};

/// A stored mapping from a short token to its target URL.
///
/// Records are append-only: `target_url` is never modified after creation and
/// the service never deletes records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRecord {
    pub token: String,
    pub target_url: String,
    /// Unix seconds, assigned by storage at insert time.
    pub created_at: i64,
}

impl RedirectRecord {
    /// Creates a new RedirectRecord instance.
    pub fn new(token: String, target_url: String, created_at: i64) -> Self {
        Self {
            token,
            target_url,
            created_at,
        }
    }

    /// Returns the creation time as a UTC timestamp.
    ///
    /// Returns `None` if the stored value is outside chrono's representable range.
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created_at, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation() {
        let record = RedirectRecord::new(
            "nkhf8idmvhen".to_string(),
            "https://example.com/page".to_string(),
            1_700_000_000,
        );

        assert_eq!(record.token, "nkhf8idmvhen");
        assert_eq!(record.target_url, "https://example.com/page");
        assert_eq!(record.created_at, 1_700_000_000);
    }

    #[test]
    fn test_created_at_utc() {
        let record = RedirectRecord::new(
            "abc".to_string(),
            "https://example.com".to_string(),
            1_700_000_000,
        );

        let ts = record.created_at_utc().unwrap();
        assert_eq!(ts.timestamp(), 1_700_000_000);
        assert_eq!(ts.to_rfc3339(), "2023-11-14T22:13:20+00:00");
    }
}
