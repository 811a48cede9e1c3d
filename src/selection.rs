//! The caller-side list of chosen photos.
//!
//! Selection order is canonical. Display order is derived from it on demand
//! with a stable sort on display time, so editing a time never reorders the
//! underlying list and the same permutation drives both listings and export.

use crate::exif::MetadataExtractor;
use crate::frame::{ImageFrame, display_order};
use crate::schedule::ScheduleMode;
use crate::solar::solar_elevation;
use chrono::{DateTime, Local, NaiveTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    frames: Vec<ImageFrame>,
}

impl Selection {
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Reads metadata for every source and creates one frame per source.
    ///
    /// A frame's display time is its capture time on the local clock, or
    /// `fallback` when the photo has no capture time.
    pub fn from_sources<I, P>(extractor: &mut MetadataExtractor, sources: I, fallback: NaiveTime) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let frames = sources
            .into_iter()
            .map(|source| {
                let source = source.into();
                let exif = extractor.extract(&source);
                ImageFrame::from_exif(source, exif, fallback)
            })
            .collect();
        Self { frames }
    }

    pub fn push(&mut self, frame: ImageFrame) {
        self.frames.push(frame);
    }

    /// Frames in selection order.
    pub fn frames(&self) -> &[ImageFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Changes the display time of the frame at selection index `index`.
    /// Returns `false` when there is no such frame.
    pub fn set_display_time(&mut self, index: usize, time: NaiveTime) -> bool {
        self.frames
            .get_mut(index)
            .map(|frame| frame.set_display_time(time))
            .is_some()
    }

    /// Removes and returns the frame at selection index `index`.
    pub fn remove(&mut self, index: usize) -> Option<ImageFrame> {
        (index < self.frames.len()).then(|| self.frames.remove(index))
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Selection indices in display order.
    pub fn display_order(&self) -> Vec<usize> {
        display_order(&self.frames)
    }

    /// Frames in display order.
    pub fn ordered(&self) -> Vec<&ImageFrame> {
        self.display_order()
            .into_iter()
            .map(|i| &self.frames[i])
            .collect()
    }

    /// Frames whose EXIF record is absent or lacks date, latitude or longitude.
    pub fn missing_exif(&self) -> Vec<&ImageFrame> {
        self.frames
            .iter()
            .filter(|frame| !frame.has_complete_exif())
            .collect()
    }

    pub fn all_exif_complete(&self) -> bool {
        self.frames.iter().all(ImageFrame::has_complete_exif)
    }

    /// Whether an interactive caller should offer export in `mode`.
    ///
    /// Sun-based export is only offered when every frame has complete EXIF
    /// data. The exporter itself stays lenient and omits incomplete frames.
    pub fn can_export(&self, mode: ScheduleMode) -> bool {
        !self.is_empty() && (mode == ScheduleMode::TimeBased || self.all_exif_complete())
    }

    /// One listing row per frame, in display order.
    pub fn previews(&self) -> Vec<FramePreview> {
        self.ordered()
            .into_iter()
            .enumerate()
            .map(|(position, frame)| FramePreview::of(position, frame))
            .collect()
    }
}

impl FromIterator<ImageFrame> for Selection {
    fn from_iter<T: IntoIterator<Item = ImageFrame>>(iter: T) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

/// What a listing shows for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FramePreview {
    pub position: usize,
    pub file_name: String,
    pub display_time: NaiveTime,
    pub captured_at: Option<DateTime<Local>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Only present when the EXIF record is complete.
    pub solar_elevation: Option<f64>,
}

impl FramePreview {
    fn of(position: usize, frame: &ImageFrame) -> Self {
        let exif = frame.exif().copied().unwrap_or_default();
        Self {
            position,
            file_name: frame.file_name(),
            display_time: frame.display_time(),
            captured_at: exif
                .captured_at
                .map(|at: DateTime<Utc>| at.with_timezone(&Local)),
            latitude: exif.latitude,
            longitude: exif.longitude,
            solar_elevation: exif
                .solar_inputs()
                .map(|(at, lat, lon)| solar_elevation(at, lat, lon)),
        }
    }
}
