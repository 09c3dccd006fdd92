//! Timestamp handling for cached entities.
//!
//! Timestamps are whole-second naive UTC values written in the fixed textual
//! pattern `yyyy-MM-dd HH:mm:ss`. Truncating to seconds at stamping time keeps
//! the cached JSON and the store row field-identical.

use chrono::{NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// The textual pattern used in cached payloads.
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Returns the current UTC time truncated to whole seconds.
#[must_use]
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(0)
}

/// Returns the later of `previous` and `candidate`.
///
/// Used when refreshing a last-modified timestamp so it never moves
/// backwards, even if the wall clock does.
#[must_use]
pub fn not_before(previous: Option<NaiveDateTime>, candidate: NaiveDateTime) -> NaiveDateTime {
    match previous {
        Some(prev) if prev > candidate => prev,
        _ => candidate,
    }
}

/// Serializes an optional timestamp in [`FORMAT`].
pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(ts) => serializer.serialize_str(&ts.format(FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

/// Deserializes an optional timestamp written in [`FORMAT`].
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom))
        .transpose()
}
