use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Capture time and location read from a single image.
///
/// Every field is optional on its own: a photo can carry a latitude without a
/// longitude, or a timestamp without any GPS block at all. An empty record is
/// the normal "no metadata" outcome, not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExifRecord {
    /// `DateTimeOriginal`, resolved to an instant (see [`CaptureTimezone`]).
    pub captured_at: Option<DateTime<Utc>>,
    /// Signed degrees, negative is south.
    pub latitude: Option<f64>,
    /// Signed degrees, negative is west.
    pub longitude: Option<f64>,
}

impl ExifRecord {
    /// A record with every field absent.
    pub const fn empty() -> Self {
        Self {
            captured_at: None,
            latitude: None,
            longitude: None,
        }
    }

    /// True when timestamp, latitude and longitude are all present.
    pub const fn is_complete(&self) -> bool {
        self.captured_at.is_some() && self.latitude.is_some() && self.longitude.is_some()
    }

    /// The `(timestamp, latitude, longitude)` triple, if the record is complete.
    pub fn solar_inputs(&self) -> Option<(DateTime<Utc>, f64, f64)> {
        match (self.captured_at, self.latitude, self.longitude) {
            (Some(at), Some(lat), Some(lon)) => Some((at, lat, lon)),
            _ => None,
        }
    }
}

/// How the zone-less `DateTimeOriginal` string is turned into an instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum CaptureTimezone {
    /// Interpret the timestamp in the timezone of the running process.
    #[default]
    ProcessLocal,
    /// Interpret the timestamp in the IANA zone found at the photo's GPS
    /// position, falling back to the process timezone without GPS.
    GpsLocation,
}

// Family-1 exiftool groups holding the tags we read.
pub const EXIF_GROUP: &str = "ExifIFD";
pub const GPS_GROUP: &str = "GPS";

pub const DATE_TIME_ORIGINAL: &str = "DateTimeOriginal";
pub const GPS_LATITUDE: &str = "GPSLatitude";
pub const GPS_LATITUDE_REF: &str = "GPSLatitudeRef";
pub const GPS_LONGITUDE: &str = "GPSLongitude";
pub const GPS_LONGITUDE_REF: &str = "GPSLongitudeRef";
