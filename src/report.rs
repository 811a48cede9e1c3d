use crate::schedule::{OmittedFrame, ScheduleDocument, ScheduleMode};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A per-frame problem that did not stop the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum FrameWarning {
    /// Sun-based export only: the frame has no complete EXIF record and has
    /// no schedule entry. It is still written to the container.
    IncompleteExifSkipped { position: usize, source: PathBuf },
    /// The frame could not be read or decoded and is not in the container.
    FrameDecodeFailed {
        position: usize,
        source: PathBuf,
        reason: String,
    },
}

impl FrameWarning {
    /// Position of the frame in display order.
    pub const fn position(&self) -> usize {
        match self {
            Self::IncompleteExifSkipped { position, .. }
            | Self::FrameDecodeFailed { position, .. } => *position,
        }
    }
}

impl From<OmittedFrame> for FrameWarning {
    fn from(omitted: OmittedFrame) -> Self {
        Self::IncompleteExifSkipped {
            position: omitted.position,
            source: omitted.source,
        }
    }
}

impl fmt::Display for FrameWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompleteExifSkipped { position, source } => write!(
                f,
                "frame {position} ({}) has no complete EXIF date and GPS, left out of the schedule",
                source.display()
            ),
            Self::FrameDecodeFailed {
                position,
                source,
                reason,
            } => write!(
                f,
                "frame {position} ({}) was skipped: {reason}",
                source.display()
            ),
        }
    }
}

/// What the container writer produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerReport {
    pub path: PathBuf,
    pub frames_written: usize,
    /// The schedule as attached, renumbered to container positions.
    pub document: ScheduleDocument,
    pub warnings: Vec<FrameWarning>,
}

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub destination: PathBuf,
    pub mode: ScheduleMode,
    pub frames_selected: usize,
    pub frames_written: usize,
    pub document: ScheduleDocument,
    /// Per-frame problems, sorted by display position.
    pub warnings: Vec<FrameWarning>,
}
