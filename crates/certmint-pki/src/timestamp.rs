//! ISO-8601 rendering for certificate timestamps.
//!
//! Every timestamp certmint emits is UTC with millisecond precision and a `Z`
//! suffix, e.g. `2024-01-10T00:00:00.000Z`. Use this module with
//! `#[serde(with = "certmint_pki::timestamp")]`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Formats an instant as an ISO-8601 UTC string with millisecond precision.
#[must_use]
pub fn format(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serializes an instant with [`format`].
///
/// # Errors
///
/// Returns the serializer's error if writing the string fails.
pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(instant))
}

/// Deserializes an RFC 3339 string into a UTC instant.
///
/// # Errors
///
/// Returns an error if the string is not valid RFC 3339.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}
