use crate::exif::ExifRecord;
use chrono::{Local, NaiveTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One selected photo: where its bytes live, when it should be shown, and
/// what its metadata says.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFrame {
    source: PathBuf,
    display_time: NaiveTime,
    exif: Option<ExifRecord>,
}

impl ImageFrame {
    pub fn new(source: impl Into<PathBuf>, display_time: NaiveTime) -> Self {
        Self {
            source: source.into(),
            display_time,
            exif: None,
        }
    }

    #[must_use]
    pub fn with_exif(mut self, exif: ExifRecord) -> Self {
        self.exif = Some(exif);
        self
    }

    /// Creates a frame whose display time comes from its capture time in the
    /// local clock, or `fallback` when the record has no capture time.
    pub fn from_exif(source: impl Into<PathBuf>, exif: ExifRecord, fallback: NaiveTime) -> Self {
        let display_time = exif
            .captured_at
            .map_or(fallback, |at| at.with_timezone(&Local).time());
        Self::new(source, display_time).with_exif(exif)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub const fn display_time(&self) -> NaiveTime {
        self.display_time
    }

    pub fn set_display_time(&mut self, time: NaiveTime) {
        self.display_time = time;
    }

    pub const fn exif(&self) -> Option<&ExifRecord> {
        self.exif.as_ref()
    }

    /// True when the frame can take part in a sun-based schedule.
    pub fn has_complete_exif(&self) -> bool {
        self.exif.as_ref().is_some_and(ExifRecord::is_complete)
    }

    /// File name for display, falling back to the full path.
    pub fn file_name(&self) -> String {
        self.source.file_name().map_or_else(
            || self.source.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }
}

/// Stable permutation of `frames` by display time.
///
/// Entry `i` of the result is the selection index of the frame shown at
/// position `i`. Frames with equal display times keep their selection order.
pub fn display_order(frames: &[ImageFrame]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..frames.len()).collect();
    order.sort_by_key(|&i| frames[i].display_time);
    order
}
