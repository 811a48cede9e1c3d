//! Parsing helpers for the raw strings and numbers exiftool hands back.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// The only layout `DateTimeOriginal` is read in.
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Parses an EXIF `yyyy:MM:dd HH:mm:ss` string without any timezone context.
pub fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), EXIF_DATETIME_FORMAT).ok()
}

/// Resolves a naive wall-clock time in `tz` to a UTC instant.
///
/// Ambiguous times (DST fold) take the earlier instant; times inside a DST gap
/// do not exist and yield `None`.
pub fn resolve_in<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// Reads a number that exiftool may have emitted either as a JSON number or a string.
pub fn as_number(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
        .filter(|n| n.is_finite())
}

/// Applies a hemisphere reference to a coordinate magnitude.
///
/// `negative_ref` is `"S"` for latitude and `"W"` for longitude; any other
/// reference leaves the magnitude unchanged.
pub fn apply_hemisphere(magnitude: f64, reference: &str, negative_ref: &str) -> f64 {
    if reference.trim().eq_ignore_ascii_case(negative_ref) {
        -magnitude
    } else {
        magnitude
    }
}
