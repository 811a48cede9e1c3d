//! # Dynamic Wallpaper
//!
//! Build "dynamic wallpaper" files: a single multi-frame image plus an
//! embedded schedule that tells the desktop which frame to show at a given
//! moment, either by time of day or by the sun's elevation.
//!
//! ## Key Features
//!
//! - **Exif Data**: Reads capture time and GPS position with `exiftool`.
//! - **Solar Elevation**: Computes the sun's elevation for any instant and place.
//! - **Schedule**: Encodes the frame schedule as an XML property list, base64 encoded into the file's `com.apple.desktop.plist` extended attribute.
//! - **Container**: Writes all frames, in display order, into one multi-page image file.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::NaiveTime;
//! use dynamic_wallpaper::{ImageFrame, ScheduleMode, export_dynamic_wallpaper};
//! use std::path::Path;
//!
//! fn main() -> Result<(), dynamic_wallpaper::WallpaperError> {
//!     let frames = vec![
//!         ImageFrame::new("assets/morning.jpg", NaiveTime::from_hms_opt(7, 0, 0).unwrap()),
//!         ImageFrame::new("assets/evening.jpg", NaiveTime::from_hms_opt(19, 30, 0).unwrap()),
//!     ];
//!
//!     let report = export_dynamic_wallpaper(
//!         Path::new("wallpaper.tiff"),
//!         &frames,
//!         ScheduleMode::TimeBased,
//!     )?;
//!     println!("Wrote {} frames", report.frames_written);
//!
//!     Ok(())
//! }
//! ```

pub mod container;
mod error;
pub mod exif;
mod exporter;
pub mod frame;
pub mod report;
pub mod schedule;
pub mod selection;
pub mod solar;

pub use container::{AttributeWriter, DESKTOP_PLIST_ATTRIBUTE, XattrWriter};
pub use error::WallpaperError;
pub use exif::{CaptureTimezone, ExifRecord, MetadataExtractor};
pub use exporter::{WallpaperExporter, export_dynamic_wallpaper};
pub use frame::ImageFrame;
pub use report::{ExportReport, FrameWarning};
pub use schedule::{ScheduleDocument, ScheduleMode, build_schedule};
pub use selection::{FramePreview, Selection};
pub use solar::solar_elevation;
