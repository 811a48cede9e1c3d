//! Turns exiftool's grouped JSON into an [`ExifRecord`].

use super::parsing::{apply_hemisphere, as_number, parse_naive, resolve_in};
use super::structs::{
    CaptureTimezone, DATE_TIME_ORIGINAL, EXIF_GROUP, ExifRecord, GPS_GROUP, GPS_LATITUDE,
    GPS_LATITUDE_REF, GPS_LONGITUDE, GPS_LONGITUDE_REF,
};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::Value;
use std::str::FromStr;
use tzf_rs::DefaultFinder;

static FINDER: std::sync::LazyLock<DefaultFinder> = std::sync::LazyLock::new(DefaultFinder::new);

/// Builds a record from `-n -g1` exiftool output, resolving the capture time
/// according to `capture_timezone`.
pub fn exif_record_from_json(metadata: &Value, capture_timezone: CaptureTimezone) -> ExifRecord {
    match capture_timezone {
        CaptureTimezone::ProcessLocal => exif_record_in_timezone(metadata, &Local),
        CaptureTimezone::GpsLocation => {
            let mut record = exif_record_in_timezone(metadata, &Local);
            if let (Some(naive), Some(lat), Some(lon)) =
                (capture_naive(metadata), record.latitude, record.longitude)
                && let Some(tz) = timezone_at(lat, lon)
            {
                record.captured_at = resolve_in(&naive, &tz);
            }
            record
        }
    }
}

/// Builds a record, interpreting `DateTimeOriginal` as wall-clock time in `tz`.
pub fn exif_record_in_timezone<Z: TimeZone>(metadata: &Value, tz: &Z) -> ExifRecord {
    ExifRecord {
        captured_at: capture_time(metadata, tz),
        latitude: coordinate(metadata, GPS_LATITUDE, GPS_LATITUDE_REF, "S", 90.0),
        longitude: coordinate(metadata, GPS_LONGITUDE, GPS_LONGITUDE_REF, "W", 180.0),
    }
}

fn capture_naive(metadata: &Value) -> Option<NaiveDateTime> {
    get_string_field(metadata, EXIF_GROUP, DATE_TIME_ORIGINAL).and_then(parse_naive)
}

fn capture_time<Z: TimeZone>(metadata: &Value, tz: &Z) -> Option<DateTime<Utc>> {
    capture_naive(metadata).and_then(|naive| resolve_in(&naive, tz))
}

/// Reads a signed coordinate: magnitude and hemisphere reference must both be
/// present, and the result must lie within `±limit`.
fn coordinate(
    metadata: &Value,
    magnitude_field: &str,
    ref_field: &str,
    negative_ref: &str,
    limit: f64,
) -> Option<f64> {
    let magnitude = metadata
        .get(GPS_GROUP)?
        .get(magnitude_field)
        .and_then(as_number)?;
    let reference = get_string_field(metadata, GPS_GROUP, ref_field)?;
    let value = apply_hemisphere(magnitude, reference, negative_ref);
    (-limit..=limit).contains(&value).then_some(value)
}

/// IANA timezone at a GPS position.
pub fn timezone_at(latitude: f64, longitude: f64) -> Option<Tz> {
    Tz::from_str(FINDER.get_tz_name(longitude, latitude)).ok()
}

/// Safely extracts a string field from nested JSON Value.
pub fn get_string_field<'a>(value: &'a Value, group: &str, field: &str) -> Option<&'a str> {
    value.get(group)?.get(field)?.as_str()
}
