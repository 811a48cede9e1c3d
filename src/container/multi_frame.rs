use super::error::ContainerError;
use image::RgbaImage;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tiff::encoder::{TiffEncoder, colortype, compression::Deflate};
use tracing::debug;

/// A multi-page TIFF being written, one Deflate-compressed RGBA page per frame.
///
/// Pages go to a temporary file next to the destination. The destination is
/// only replaced by [`Self::finalize`], so it stays untouched until every page
/// is written, and dropping an unfinished container leaves nothing behind.
/// The frame count is declared when the container is created and cannot be
/// exceeded.
pub struct MultiFrameContainer {
    destination: PathBuf,
    staging: NamedTempFile,
    encoder: TiffEncoder<File>,
    declared: usize,
    written: usize,
}

impl MultiFrameContainer {
    /// Creates the staging file in the destination's directory and writes the
    /// TIFF header.
    pub fn create(destination: &Path, frame_count: usize) -> Result<Self, ContainerError> {
        if frame_count == 0 {
            return Err(ContainerError::Empty);
        }
        let directory = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staging = NamedTempFile::new_in(directory)?;
        let encoder = TiffEncoder::new(staging.reopen()?)?;
        debug!(
            path = %destination.display(),
            staging = %staging.path().display(),
            frame_count,
            "created container"
        );
        Ok(Self {
            destination: destination.to_path_buf(),
            staging,
            encoder,
            declared: frame_count,
            written: 0,
        })
    }

    /// Appends one frame as the next page.
    pub fn append(&mut self, frame: &RgbaImage) -> Result<(), ContainerError> {
        if self.written == self.declared {
            return Err(ContainerError::CapacityExceeded {
                declared: self.declared,
            });
        }
        self.encoder.write_image_with_compression::<colortype::RGBA8, _>(
            frame.width(),
            frame.height(),
            Deflate::default(),
            frame.as_raw(),
        )?;
        self.written += 1;
        Ok(())
    }

    /// Number of pages appended so far.
    pub const fn frames_written(&self) -> usize {
        self.written
    }

    /// Flushes the staged file and moves it onto the destination, replacing
    /// whatever was there. A container without any page is not a valid TIFF;
    /// it is discarded and reported as [`ContainerError::NoFrames`], leaving
    /// the destination as it was.
    pub fn finalize(self) -> Result<PathBuf, ContainerError> {
        let Self {
            destination,
            staging,
            encoder,
            written,
            ..
        } = self;
        drop(encoder);
        if written == 0 {
            return Err(ContainerError::NoFrames);
        }
        staging.as_file().sync_all()?;
        staging
            .persist(&destination)
            .map_err(|err| ContainerError::Io(err.error))?;
        debug!(path = %destination.display(), written, "finalized container");
        Ok(destination)
    }
}
