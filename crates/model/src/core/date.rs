use chrono::{DateTime, NaiveDateTime, Utc};

const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Layouts accepted for timestamps that carry no zone information.
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Normalizes a catalog timestamp (closing or publish date) so it can be
/// stored and compared as a UTC timestamp string.
///
/// - empty or absent values stay absent
/// - values already ending in the UTC marker are returned unchanged
/// - values with an explicit offset are converted to UTC
/// - zone-less values are taken as UTC and get the marker appended
/// - anything else is passed through untouched
pub fn normalize_timestamp(raw: Option<&str>) -> Option<String> {
    let value = raw.map(str::trim).filter(|v| !v.is_empty())?;

    if value.ends_with('Z') || value.ends_with('z') {
        return Some(value.to_string());
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.with_timezone(&Utc).format(UTC_FORMAT).to_string());
    }

    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        .map(|naive| format!("{}Z", naive.format("%Y-%m-%dT%H:%M:%S%.f")))
        .or_else(|| Some(value.to_string()))
}
