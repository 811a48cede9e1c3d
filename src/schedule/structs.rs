use crate::frame::ImageFrame;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which property of a frame decides when it is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ScheduleMode {
    /// Frames switch at fixed clock times.
    #[default]
    TimeBased,
    /// Frames switch at the sun elevation computed from each photo's EXIF data.
    SunBased,
}

impl ScheduleMode {
    /// Top-level key of the schedule document.
    pub const fn document_key(self) -> &'static str {
        match self {
            Self::TimeBased => "time",
            Self::SunBased => "solar",
        }
    }
}

impl fmt::Display for ScheduleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeBased => f.write_str("time-based"),
            Self::SunBased => f.write_str("sun-based"),
        }
    }
}

/// A frame shown from a clock time onwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimeEntry {
    pub image: u64,
    /// `HH:MM`, 24-hour, local, no offset.
    pub time: String,
}

/// A frame shown at a sun elevation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SolarEntry {
    pub image: u64,
    #[serde(rename = "solar-elevation")]
    pub solar_elevation: f64,
}

/// The schedule attached to a wallpaper file.
///
/// Serializes to a dictionary with a single key, `time` or `solar`, bound to
/// the entry array.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum ScheduleDocument {
    #[serde(rename = "time")]
    Time(Vec<TimeEntry>),
    #[serde(rename = "solar")]
    Solar(Vec<SolarEntry>),
}

impl ScheduleDocument {
    pub const fn mode(&self) -> ScheduleMode {
        match self {
            Self::Time(_) => ScheduleMode::TimeBased,
            Self::Solar(_) => ScheduleMode::SunBased,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Time(entries) => entries.len(),
            Self::Solar(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frame indices referenced by the entries, in entry order.
    pub fn image_indices(&self) -> Vec<u64> {
        match self {
            Self::Time(entries) => entries.iter().map(|e| e.image).collect(),
            Self::Solar(entries) => entries.iter().map(|e| e.image).collect(),
        }
    }

    /// Drops the entries of frames that never made it into the container and
    /// renumbers the rest so `image` keeps matching container positions.
    ///
    /// `skipped` holds positions in the original frame order.
    #[must_use]
    pub fn without_frames(self, skipped: &[usize]) -> Self {
        if skipped.is_empty() {
            return self;
        }
        let remap = |image: u64| -> Option<u64> {
            let position = usize::try_from(image).ok()?;
            if skipped.contains(&position) {
                return None;
            }
            let shift = skipped.iter().filter(|&&s| s < position).count() as u64;
            Some(image - shift)
        };
        match self {
            Self::Time(entries) => Self::Time(
                entries
                    .into_iter()
                    .filter_map(|e| remap(e.image).map(|image| TimeEntry { image, ..e }))
                    .collect(),
            ),
            Self::Solar(entries) => Self::Solar(
                entries
                    .into_iter()
                    .filter_map(|e| remap(e.image).map(|image| SolarEntry { image, ..e }))
                    .collect(),
            ),
        }
    }
}

/// Result of building a schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleOutcome {
    pub document: ScheduleDocument,
    /// Frames left out of a sun-based schedule for lack of complete EXIF data.
    pub omitted: Vec<OmittedFrame>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmittedFrame {
    /// Position in display order.
    pub position: usize,
    pub source: PathBuf,
}

impl OmittedFrame {
    pub(crate) fn of(position: usize, frame: &ImageFrame) -> Self {
        Self {
            position,
            source: frame.source().to_path_buf(),
        }
    }
}
