use chrono::{DateTime, SecondsFormat, Utc};

/// Mint a prefixed record id, e.g. "note-3f2a…".
///
/// Prefixes keep ids greppable in persisted JSON; uniqueness comes from the
/// UUID.
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}

/// Current instant as an RFC 3339 string with millisecond precision.
pub fn now_iso() -> String {
    to_iso(Utc::now())
}

/// Format a timestamp the way the corpus stores them ("2026-08-23T10:15:00.000Z").
pub fn to_iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Day-granularity date string ("YYYY-MM-DD").
pub fn day_str(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// Round to two decimal places. Scores and averages are presented at this
/// precision everywhere; rounding at the source keeps the persisted values
/// and the derived label in agreement.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean of an f64 iterator, 0.0 when empty. Callers that must distinguish
/// "no data" from zero check emptiness first.
pub fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
