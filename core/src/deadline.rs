//! Lenient deadline parsing.
//!
//! Deadlines arrive as whatever string the form control produced, most often
//! the `YYYY-MM-DDTHH:MM` shape of an HTML `datetime-local` input. Anything
//! that does not parse is treated as "no deadline" rather than an error.
//! Offsets are normalised to UTC; naive values are taken as-is.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parse a deadline string, returning `None` for anything unrecognizable.
pub fn parse_deadline(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.naive_utc());
    }
    if let Some(at) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(at);
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0);
    }
    tracing::debug!(raw, "unparseable todo deadline treated as absent");
    None
}

/// Render a deadline in the shape sent back to the backend.
pub fn format_deadline(at: &NaiveDateTime) -> String {
    at.format(WIRE_FORMAT).to_string()
}

/// Serde adapter for `Option<NaiveDateTime>` deadline fields.
///
/// Pair with `#[serde(default)]` so a missing field also yields `None`.
pub(crate) mod lenient {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(at) => serializer.serialize_str(&super::format_deadline(at)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(raw)) => super::parse_deadline(&raw),
            Some(Value::Null) | None => None,
            Some(other) => {
                tracing::debug!(value = %other, "non-string todo deadline treated as absent");
                None
            }
        })
    }
}
