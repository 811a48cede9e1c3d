use crate::container::error::ContainerError;
use crate::schedule::error::ScheduleError;
use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the dynamic-wallpaper crate.
///
/// Per-frame problems are never errors; they end up as
/// [`FrameWarning`](crate::FrameWarning)s in the export report. Every variant
/// here aborts the export and names the stage that failed.
#[derive(Error, Debug)]
pub enum WallpaperError {
    #[error("Exiftool failed to start")]
    Exiftool(#[from] exiftool::ExifToolError),

    // --- Export stages ---
    #[error("Could not create container at {}: {source}", .path.display())]
    ContainerCreationFailed {
        path: PathBuf,
        #[source]
        source: ContainerError,
    },

    #[error("Could not write frame {position} to {}: {source}", .path.display())]
    ContainerWriteFailed {
        path: PathBuf,
        position: usize,
        #[source]
        source: ContainerError,
    },

    #[error("Could not finalize container at {}: {source}", .path.display())]
    FinalizeFailed {
        path: PathBuf,
        #[source]
        source: ContainerError,
    },

    #[error("Could not encode the schedule document: {0}")]
    ScheduleEncoding(#[from] ScheduleError),

    #[error("Could not write extended attribute {key} on {}: {source}", .path.display())]
    AttributeWriteFailed {
        path: PathBuf,
        key: String,
        #[source]
        source: std::io::Error,
    },

    // --- Background execution ---
    #[error("Export task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}
