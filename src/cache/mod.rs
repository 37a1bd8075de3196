//! Session token cache
//!
//! Persists one [`SessionRecord`] per controller host so that separate
//! process invocations can reuse a login instead of authenticating again.
//! The cache is an optimisation only: every failure degrades to a miss.

mod file;
mod memory;

pub use file::FileCacheStore;
pub use memory::MemoryCacheStore;

use crate::error::AosResult;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Seconds a cached token is trusted without logging in again
pub const SESSION_TIMEOUT_SECS: i64 = 900;

/// Cached session token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Token issued by the controller (`UIDARUBA`)
    #[serde(rename = "sessionid", deserialize_with = "non_blank")]
    pub token: String,

    /// When the token was obtained, stored as float epoch seconds
    #[serde(rename = "login_time", with = "epoch_seconds")]
    pub issued_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Create a record for a token obtained just now
    pub fn new(token: impl Into<String>) -> Self {
        Self::issued(token, Utc::now())
    }

    /// Create a record with an explicit issue time
    pub fn issued(token: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            issued_at,
        }
    }

    /// Elapsed time since the token was issued
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.issued_at
    }

    /// Check whether the token can be reused without logging in
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        self.age_at(now) < Duration::seconds(SESSION_TIMEOUT_SECS)
    }

    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Utc::now())
    }

    /// False for an empty or whitespace-only token
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

fn non_blank<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let token = String::deserialize(deserializer)?;
    if token.trim().is_empty() {
        return Err(serde::de::Error::custom("sessionid is empty"));
    }
    Ok(token)
}

/// Outcome of reading the cache for one host
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// A complete record was found (freshness not checked)
    Hit(SessionRecord),
    /// Nothing cached, or the cache was cleared
    Miss,
    /// The cache exists but could not be read or decoded
    Unreadable(String),
}

impl CacheLookup {
    /// Collapse to "valid record or nothing"
    pub fn into_record(self) -> Option<SessionRecord> {
        match self {
            Self::Hit(record) => Some(record),
            Self::Miss | Self::Unreadable(_) => None,
        }
    }
}

/// Durable per-host storage for session records
///
/// `load` never fails: unreadable storage is reported as
/// [`CacheLookup::Unreadable`]. Write failures are returned so callers can
/// log them, but the session manager never treats them as fatal.
pub trait CacheStore: Send + Sync {
    /// Read the record stored for `host`
    fn load(&self, host: &str) -> CacheLookup;

    /// Overwrite the record stored for `host`
    fn save(&self, host: &str, record: &SessionRecord) -> AosResult<()>;

    /// Mark `host` as having no session
    fn clear(&self, host: &str) -> AosResult<()>;
}

/// Serde adapter for `DateTime<Utc>` as fractional Unix seconds
mod epoch_seconds {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(value.timestamp_micros() as f64 / 1_000_000.0)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() {
            return Err(de::Error::custom("login_time is not a finite number"));
        }
        DateTime::from_timestamp_micros((secs * 1_000_000.0).round() as i64)
            .ok_or_else(|| de::Error::custom("login_time out of range"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_within_timeout() {
        let now = Utc::now();
        let record = SessionRecord::issued("tok", now - Duration::seconds(10));
        assert!(record.is_fresh_at(now));
        assert_eq!(record.age_at(now), Duration::seconds(10));
    }

    #[test]
    fn stale_after_timeout() {
        let now = Utc::now();
        assert!(!SessionRecord::issued("tok", now - Duration::seconds(901)).is_fresh_at(now));
        assert!(!SessionRecord::issued("tok", now - Duration::seconds(900)).is_fresh_at(now));
        assert!(SessionRecord::issued("tok", now - Duration::seconds(899)).is_fresh_at(now));
    }

    #[test]
    fn record_uses_controller_field_names() {
        let issued = DateTime::from_timestamp(1_700_000_000, 500_000_000).unwrap();
        let json = serde_json::to_value(SessionRecord::issued("abc", issued)).unwrap();

        assert_eq!(json["sessionid"], "abc");
        assert_eq!(json["login_time"].as_f64(), Some(1_700_000_000.5));
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn record_rejects_missing_field() {
        let result = serde_json::from_str::<SessionRecord>(r#"{"sessionid": "abc"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn record_rejects_blank_token() {
        let result = serde_json::from_str::<SessionRecord>(
            r#"{"sessionid": " ", "login_time": 1700000000.0}"#,
        );
        assert!(result.is_err());
        assert!(!SessionRecord::new("").has_token());
        assert!(SessionRecord::new("tok").has_token());
    }

    #[test]
    fn lookup_into_record() {
        let record = SessionRecord::new("tok");
        assert_eq!(CacheLookup::Hit(record.clone()).into_record(), Some(record));
        assert_eq!(CacheLookup::Miss.into_record(), None);
        assert_eq!(CacheLookup::Unreadable("bad".into()).into_record(), None);
    }
}
