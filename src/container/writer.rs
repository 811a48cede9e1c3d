use super::attribute::AttributeWriter;
use super::error::FrameError;
use super::multi_frame::MultiFrameContainer;
use crate::WallpaperError;
use crate::frame::ImageFrame;
use crate::report::{ContainerReport, FrameWarning};
use crate::schedule::ScheduleDocument;
use image::RgbaImage;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Reads and decodes one frame's source into an RGBA bitmap.
///
/// Any format the `image` crate decodes is accepted; HEIC/HEIF is not among
/// them and fails with [`FrameError::Decode`].
pub fn decode_frame(frame: &ImageFrame) -> Result<RgbaImage, FrameError> {
    let bytes = fs::read(frame.source())?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

/// Writes `frames` in order into a multi-frame container at `destination`
/// and attaches `document` as the extended attribute `attribute_key`.
///
/// Frames that cannot be read or decoded are skipped with a warning; their
/// schedule entries are dropped and later entries renumbered so every
/// `image` index refers to the page actually written at that position.
///
/// The container is staged next to `destination` and only moved into place
/// once every frame is written, so `destination` may be one of the sources
/// and is left as it was when a fatal error occurs before that point.
///
/// # Errors
///
/// * [`WallpaperError::ContainerCreationFailed`]: the destination cannot be created, or `frames` is empty.
/// * [`WallpaperError::ContainerWriteFailed`]: a decoded frame could not be encoded into the container.
/// * [`WallpaperError::FinalizeFailed`]: the container cannot be sealed, including when no frame could be decoded.
/// * [`WallpaperError::ScheduleEncoding`]: the document cannot be serialized.
/// * [`WallpaperError::AttributeWriteFailed`]: the attribute cannot be attached.
pub fn write_container(
    destination: &Path,
    frames: &[&ImageFrame],
    document: ScheduleDocument,
    attribute_writer: &dyn AttributeWriter,
    attribute_key: &str,
) -> Result<ContainerReport, WallpaperError> {
    let mut container = MultiFrameContainer::create(destination, frames.len()).map_err(|source| {
        WallpaperError::ContainerCreationFailed {
            path: destination.to_path_buf(),
            source,
        }
    })?;

    let mut skipped = Vec::new();
    let mut warnings = Vec::new();
    for (position, frame) in frames.iter().enumerate() {
        debug!(position, path = %frame.source().display(), "loading frame");
        let bitmap = match decode_frame(frame) {
            Ok(bitmap) => bitmap,
            Err(err) => {
                warn!(position, path = %frame.source().display(), error = %err, "skipping frame");
                skipped.push(position);
                warnings.push(FrameWarning::FrameDecodeFailed {
                    position,
                    source: frame.source().to_path_buf(),
                    reason: err.to_string(),
                });
                continue;
            }
        };
        container
            .append(&bitmap)
            .map_err(|source| WallpaperError::ContainerWriteFailed {
                path: destination.to_path_buf(),
                position,
                source,
            })?;
    }

    let frames_written = container.frames_written();
    container
        .finalize()
        .map_err(|source| WallpaperError::FinalizeFailed {
            path: destination.to_path_buf(),
            source,
        })?;

    let document = document.without_frames(&skipped);
    let value = document.to_attribute_value()?;
    attribute_writer
        .write_attribute(destination, attribute_key, value.as_bytes())
        .map_err(|source| WallpaperError::AttributeWriteFailed {
            path: destination.to_path_buf(),
            key: attribute_key.to_string(),
            source,
        })?;

    Ok(ContainerReport {
        path: destination.to_path_buf(),
        frames_written,
        document,
        warnings,
    })
}
