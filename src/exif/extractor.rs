use super::extraction::exif_record_from_json;
use super::structs::{CaptureTimezone, ExifRecord};
use crate::WallpaperError;
use bon::bon;
use exiftool::ExifTool;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Reads capture time and GPS position from image files through a long-lived
/// `exiftool` process.
///
/// ```rust,no_run
/// # use dynamic_wallpaper::{MetadataExtractor, WallpaperError};
/// # use std::path::Path;
/// # fn main() -> Result<(), WallpaperError> {
/// let mut extractor = MetadataExtractor::builder().build()?;
/// let record = extractor.extract(Path::new("assets/noon.jpg"));
/// println!("complete: {}", record.is_complete());
/// # Ok(())
/// # }
/// ```
pub struct MetadataExtractor {
    exiftool: ExifTool,
    capture_timezone: CaptureTimezone,
}

#[bon]
impl MetadataExtractor {
    /// Starts `exiftool`.
    ///
    /// # Builder Arguments
    ///
    /// * `exiftool_path: Option<PathBuf>` - A specific `exiftool` executable. If `None`, it is searched for in `PATH`.
    /// * `capture_timezone: CaptureTimezone` - (Default: `ProcessLocal`) How `DateTimeOriginal` is turned into an instant.
    ///
    /// # Errors
    ///
    /// [`WallpaperError::Exiftool`] when the executable cannot be found or started.
    #[builder]
    pub fn new(
        exiftool_path: Option<PathBuf>,
        #[builder(default)] capture_timezone: CaptureTimezone,
    ) -> Result<Self, WallpaperError> {
        let exiftool = match exiftool_path {
            Some(path) => ExifTool::with_executable(&path)?,
            None => ExifTool::new()?,
        };
        Ok(Self {
            exiftool,
            capture_timezone,
        })
    }

    /// Extracts the record for one image. Never fails: unreadable files and
    /// files without metadata give an empty record.
    pub fn extract(&mut self, asset: &Path) -> ExifRecord {
        match self.exiftool.json(asset, &["-n", "-g1", "-a"]) {
            Ok(metadata) => {
                let record = exif_record_from_json(&metadata, self.capture_timezone);
                debug!(path = %asset.display(), ?record, "read exif");
                record
            }
            Err(err) => {
                warn!(path = %asset.display(), error = %err, "could not read metadata");
                ExifRecord::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveDate, TimeZone, Utc};
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::fs;
    use std::io::Cursor;

    /// These tests drive a real exiftool process and return early when none
    /// is installed.
    fn extractor() -> Option<MetadataExtractor> {
        match MetadataExtractor::builder().build() {
            Ok(extractor) => Some(extractor),
            Err(err) => {
                eprintln!("exiftool unavailable, skipping: {err}");
                None
            }
        }
    }

    fn push_u16(buf: &mut Vec<u8>, value: u16) {
        buf.extend_from_slice(&value.to_le_bytes());
    }

    fn push_u32(buf: &mut Vec<u8>, value: u32) {
        buf.extend_from_slice(&value.to_le_bytes());
    }

    fn push_entry(buf: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: u32) {
        push_u16(buf, tag);
        push_u16(buf, kind);
        push_u32(buf, count);
        push_u32(buf, value);
    }

    /// Little-endian EXIF block with `DateTimeOriginal` 2024:06:21 12:00:00
    /// and GPS 52°30'0" N, 4°54'0" W.
    fn exif_block() -> Vec<u8> {
        const ASCII: u16 = 2;
        const LONG: u16 = 4;
        const RATIONAL: u16 = 5;
        let mut tiff = b"II".to_vec();
        push_u16(&mut tiff, 42);
        push_u32(&mut tiff, 8);

        // IFD0: pointers to the Exif and GPS IFDs.
        push_u16(&mut tiff, 2);
        push_entry(&mut tiff, 0x8769, LONG, 1, 38);
        push_entry(&mut tiff, 0x8825, LONG, 1, 76);
        push_u32(&mut tiff, 0);
        assert_eq!(tiff.len(), 38);

        push_u16(&mut tiff, 1);
        push_entry(&mut tiff, 0x9003, ASCII, 20, 56);
        push_u32(&mut tiff, 0);
        tiff.extend_from_slice(b"2024:06:21 12:00:00\0");
        assert_eq!(tiff.len(), 76);

        push_u16(&mut tiff, 4);
        push_entry(&mut tiff, 0x0001, ASCII, 2, u32::from_le_bytes(*b"N\0\0\0"));
        push_entry(&mut tiff, 0x0002, RATIONAL, 3, 130);
        push_entry(&mut tiff, 0x0003, ASCII, 2, u32::from_le_bytes(*b"W\0\0\0"));
        push_entry(&mut tiff, 0x0004, RATIONAL, 3, 154);
        push_u32(&mut tiff, 0);
        assert_eq!(tiff.len(), 130);

        for value in [52, 30, 0, 4, 54, 0] {
            push_u32(&mut tiff, value);
            push_u32(&mut tiff, 1);
        }
        tiff
    }

    /// A small JPEG with [`exif_block`] spliced in as an APP1 segment.
    fn write_exif_jpeg(path: &Path) {
        let mut jpeg = Vec::new();
        RgbImage::from_pixel(8, 8, Rgb([200, 120, 40]))
            .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .unwrap();

        let exif = exif_block();
        let segment_len = u16::try_from(2 + 6 + exif.len()).unwrap();
        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&segment_len.to_be_bytes());
        out.extend_from_slice(b"Exif\0\0");
        out.extend_from_slice(&exif);
        out.extend_from_slice(&jpeg[2..]);
        fs::write(path, out).unwrap();
    }

    #[test]
    fn test_missing_file_gives_empty_record() {
        let Some(mut extractor) = extractor() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();

        let record = extractor.extract(&dir.path().join("does-not-exist.jpg"));

        assert_eq!(record, ExifRecord::empty());
    }

    #[test]
    fn test_image_without_metadata_gives_empty_record() {
        let Some(mut extractor) = extractor() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.png");
        RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let record = extractor.extract(&path);

        assert_eq!(record, ExifRecord::empty());
    }

    #[test]
    fn test_jpeg_with_date_and_gps_gives_complete_record() {
        let Some(mut extractor) = extractor() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tagged.jpg");
        write_exif_jpeg(&path);

        let record = extractor.extract(&path);

        assert!(record.is_complete(), "record should be complete: {record:?}");
        let naive = NaiveDate::from_ymd_opt(2024, 6, 21)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let expected = Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc));
        assert_eq!(record.captured_at, expected);
        assert!((record.latitude.unwrap() - 52.5).abs() < 1e-6);
        assert!((record.longitude.unwrap() + 4.9).abs() < 1e-6);
    }

    #[test]
    fn test_extractor_survives_a_failed_read() {
        let Some(mut extractor) = extractor() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tagged.jpg");
        write_exif_jpeg(&path);

        let missing = extractor.extract(&dir.path().join("missing.jpg"));
        let tagged = extractor.extract(&path);

        assert_eq!(missing, ExifRecord::empty());
        assert!(tagged.is_complete());
    }
}
