//! Module for reading capture time and GPS position from image metadata.
mod extraction;
mod extractor;
mod parsing;
pub mod structs;

pub use extraction::{exif_record_from_json, exif_record_in_timezone, timezone_at};
pub use extractor::MetadataExtractor;
pub use parsing::EXIF_DATETIME_FORMAT;
pub use structs::{CaptureTimezone, ExifRecord};
