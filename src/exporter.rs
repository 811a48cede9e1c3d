use crate::WallpaperError;
use crate::container::{AttributeWriter, DESKTOP_PLIST_ATTRIBUTE, XattrWriter, write_container};
use crate::frame::{ImageFrame, display_order};
use crate::report::{ExportReport, FrameWarning};
use crate::schedule::{ScheduleMode, build_schedule};
use bon::bon;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Turns a list of frames into a dynamic wallpaper file.
///
/// The exporter holds no state between calls; frames are passed in with
/// every export. Use the builder to swap the attribute writer or key:
/// ```rust
/// # use dynamic_wallpaper::WallpaperExporter;
/// let exporter = WallpaperExporter::builder()
///     .attribute_key("user.desktop.plist")
///     .build();
/// ```
#[derive(Clone)]
pub struct WallpaperExporter {
    attribute_writer: Arc<dyn AttributeWriter>,
    attribute_key: String,
}

#[bon]
impl WallpaperExporter {
    /// # Builder Arguments
    ///
    /// * `attribute_writer: Arc<dyn AttributeWriter>` - (Default: [`XattrWriter`]) Attaches the schedule to the finished file.
    /// * `attribute_key: String` - (Default: `com.apple.desktop.plist`) Extended attribute name.
    #[builder]
    pub fn new(
        #[builder(default = Arc::new(XattrWriter) as Arc<dyn AttributeWriter>)]
        attribute_writer: Arc<dyn AttributeWriter>,
        #[builder(into, default = DESKTOP_PLIST_ATTRIBUTE.to_string())] attribute_key: String,
    ) -> Self {
        Self {
            attribute_writer,
            attribute_key,
        }
    }

    /// Exports `frames`, given in selection order, to `destination`.
    ///
    /// Frames are stably sorted by display time; that order decides both the
    /// container page order and the schedule indices.
    ///
    /// # Errors
    ///
    /// Any fatal container or attribute stage, see [`write_container`].
    /// Per-frame problems are reported in [`ExportReport::warnings`].
    pub fn export(
        &self,
        destination: &Path,
        frames: &[ImageFrame],
        mode: ScheduleMode,
    ) -> Result<ExportReport, WallpaperError> {
        let ordered: Vec<&ImageFrame> = display_order(frames)
            .into_iter()
            .map(|i| &frames[i])
            .collect();

        let outcome = build_schedule(ordered.iter().copied(), mode);
        let container = write_container(
            destination,
            &ordered,
            outcome.document,
            self.attribute_writer.as_ref(),
            &self.attribute_key,
        )?;

        let mut warnings: Vec<FrameWarning> = outcome
            .omitted
            .into_iter()
            .map(FrameWarning::from)
            .chain(container.warnings)
            .collect();
        warnings.sort_by_key(FrameWarning::position);

        info!(
            path = %destination.display(),
            %mode,
            frames = container.frames_written,
            entries = container.document.len(),
            warnings = warnings.len(),
            "exported dynamic wallpaper"
        );

        Ok(ExportReport {
            destination: container.path,
            mode,
            frames_selected: frames.len(),
            frames_written: container.frames_written,
            document: container.document,
            warnings,
        })
    }

    /// Runs [`Self::export`] on tokio's blocking pool so an async caller is
    /// not stalled by image decoding.
    ///
    /// # Errors
    ///
    /// As [`Self::export`], plus [`WallpaperError::Join`] if the task panicked.
    pub async fn export_in_background(
        &self,
        destination: PathBuf,
        frames: Vec<ImageFrame>,
        mode: ScheduleMode,
    ) -> Result<ExportReport, WallpaperError> {
        let exporter = self.clone();
        tokio::task::spawn_blocking(move || exporter.export(&destination, &frames, mode)).await?
    }
}

/// Exports with the default configuration: native extended attributes under
/// `com.apple.desktop.plist`.
///
/// # Errors
///
/// See [`WallpaperExporter::export`].
pub fn export_dynamic_wallpaper(
    destination: &Path,
    frames: &[ImageFrame],
    mode: ScheduleMode,
) -> Result<ExportReport, WallpaperError> {
    WallpaperExporter::builder()
        .build()
        .export(destination, frames, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::fixtures::{FailingWriter, RecordingWriter, corrupt_frame, png_frame};
    use crate::exif::ExifRecord;
    use crate::schedule::{ScheduleDocument, SolarEntry, TimeEntry};
    use chrono::{NaiveTime, TimeZone, Utc};

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn recording_exporter() -> (WallpaperExporter, Arc<RecordingWriter>) {
        let writer = Arc::new(RecordingWriter::default());
        let exporter = WallpaperExporter::builder()
            .attribute_writer(writer.clone())
            .build();
        (exporter, writer)
    }

    fn complete_exif(hour: u32) -> ExifRecord {
        ExifRecord {
            captured_at: Some(Utc.with_ymd_and_hms(2024, 6, 21, hour, 0, 0).unwrap()),
            latitude: Some(52.37),
            longitude: Some(4.90),
        }
    }

    #[test]
    fn test_time_export_sorts_frames_and_schedule_together() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![
            png_frame(dir.path(), "a.png", 1, hms(9, 15, 30)),
            png_frame(dir.path(), "b.png", 2, hms(14, 0, 0)),
            png_frame(dir.path(), "c.png", 3, hms(9, 15, 0)),
        ];
        let destination = dir.path().join("out.tiff");
        let (exporter, writer) = recording_exporter();

        let report = exporter
            .export(&destination, &frames, ScheduleMode::TimeBased)
            .unwrap();

        let expected = ScheduleDocument::Time(vec![
            TimeEntry { image: 0, time: "09:15".to_string() },
            TimeEntry { image: 1, time: "09:15".to_string() },
            TimeEntry { image: 2, time: "14:00".to_string() },
        ]);
        assert_eq!(report.document, expected);
        assert_eq!(report.frames_selected, 3);
        assert_eq!(report.frames_written, 3);
        assert!(report.warnings.is_empty());

        let written = writer.written.lock().unwrap();
        let (_, key, value) = &written[0];
        assert_eq!(key, DESKTOP_PLIST_ATTRIBUTE);
        assert_eq!(ScheduleDocument::from_attribute_value(value).unwrap(), expected);
    }

    #[test]
    fn test_container_pages_follow_display_order() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![
            png_frame(dir.path(), "late.png", 200, hms(20, 0, 0)),
            png_frame(dir.path(), "early.png", 100, hms(5, 0, 0)),
        ];
        let destination = dir.path().join("out.tiff");
        let (exporter, _) = recording_exporter();

        exporter
            .export(&destination, &frames, ScheduleMode::TimeBased)
            .unwrap();

        let file = std::io::BufReader::new(std::fs::File::open(&destination).unwrap());
        let mut decoder = tiff::decoder::Decoder::new(file).unwrap();
        let first_page = match decoder.read_image().unwrap() {
            tiff::decoder::DecodingResult::U8(data) => data,
            _ => panic!("expected 8-bit page"),
        };
        assert_eq!(first_page[0], 100, "first page should be the early frame");
    }

    #[test]
    fn test_sun_export_omits_incomplete_frames_but_keeps_them_in_container() {
        let dir = tempfile::tempdir().unwrap();
        let mut no_latitude = complete_exif(9);
        no_latitude.latitude = None;
        let frames = vec![
            png_frame(dir.path(), "a.png", 1, hms(6, 0, 0)).with_exif(complete_exif(6)),
            png_frame(dir.path(), "b.png", 2, hms(9, 0, 0)).with_exif(no_latitude),
            png_frame(dir.path(), "c.png", 3, hms(12, 0, 0)).with_exif(complete_exif(12)),
        ];
        let destination = dir.path().join("out.tiff");
        let (exporter, _) = recording_exporter();

        let report = exporter
            .export(&destination, &frames, ScheduleMode::SunBased)
            .unwrap();

        assert_eq!(report.frames_written, 3);
        assert_eq!(report.document.image_indices(), vec![0, 2]);
        assert_eq!(report.warnings.len(), 1);
        assert!(matches!(
            report.warnings[0],
            FrameWarning::IncompleteExifSkipped { position: 1, .. }
        ));
    }

    #[test]
    fn test_sun_export_with_decode_failure_keeps_indices_in_lockstep() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![
            png_frame(dir.path(), "a.png", 1, hms(6, 0, 0)).with_exif(complete_exif(6)),
            corrupt_frame(dir.path(), "b.jpg", hms(9, 0, 0)).with_exif(complete_exif(9)),
            png_frame(dir.path(), "c.png", 3, hms(12, 0, 0)).with_exif(complete_exif(12)),
        ];
        let destination = dir.path().join("out.tiff");
        let (exporter, _) = recording_exporter();

        let report = exporter
            .export(&destination, &frames, ScheduleMode::SunBased)
            .unwrap();

        assert_eq!(report.frames_written, 2);
        let ScheduleDocument::Solar(entries) = &report.document else {
            panic!("expected a solar document");
        };
        let indices: Vec<_> = entries.iter().map(|e: &SolarEntry| e.image).collect();
        assert_eq!(indices, vec![0, 1]);
        assert!(entries[0].solar_elevation < entries[1].solar_elevation);
        assert!(matches!(
            report.warnings[0],
            FrameWarning::FrameDecodeFailed { position: 1, .. }
        ));
    }

    fn first_pixel_of_pages(path: &Path) -> Vec<u8> {
        let file = std::io::BufReader::new(std::fs::File::open(path).unwrap());
        let mut decoder = tiff::decoder::Decoder::new(file).unwrap();
        let mut pixels = Vec::new();
        loop {
            match decoder.read_image().unwrap() {
                tiff::decoder::DecodingResult::U8(data) => pixels.push(data[0]),
                _ => panic!("expected 8-bit page"),
            }
            if !decoder.more_images() {
                break;
            }
            decoder.next_image().unwrap();
        }
        pixels
    }

    #[test]
    fn test_export_over_single_source_photo() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![png_frame(dir.path(), "a.png", 42, hms(6, 0, 0))];
        let destination = dir.path().join("a.png");
        let (exporter, _) = recording_exporter();

        let report = exporter
            .export(&destination, &frames, ScheduleMode::TimeBased)
            .unwrap();

        assert_eq!(report.frames_written, 1);
        assert!(report.warnings.is_empty());
        assert_eq!(first_pixel_of_pages(&destination), vec![42]);
    }

    #[test]
    fn test_export_over_one_of_several_source_photos() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![
            png_frame(dir.path(), "a.png", 10, hms(6, 0, 0)),
            png_frame(dir.path(), "b.png", 20, hms(12, 0, 0)),
        ];
        let destination = dir.path().join("b.png");
        let (exporter, _) = recording_exporter();

        let report = exporter
            .export(&destination, &frames, ScheduleMode::TimeBased)
            .unwrap();

        assert_eq!(report.frames_written, 2);
        assert_eq!(first_pixel_of_pages(&destination), vec![10, 20]);
    }

    #[test]
    fn test_empty_export_fails_creation() {
        let dir = tempfile::tempdir().unwrap();
        let (exporter, _) = recording_exporter();

        let result = exporter.export(&dir.path().join("out.tiff"), &[], ScheduleMode::TimeBased);

        assert!(matches!(
            result,
            Err(WallpaperError::ContainerCreationFailed { .. })
        ));
    }

    #[test]
    fn test_custom_attribute_key() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![png_frame(dir.path(), "a.png", 1, hms(6, 0, 0))];
        let writer = Arc::new(RecordingWriter::default());
        let exporter = WallpaperExporter::builder()
            .attribute_writer(writer.clone())
            .attribute_key("user.desktop.plist")
            .build();

        exporter
            .export(&dir.path().join("out.tiff"), &frames, ScheduleMode::TimeBased)
            .unwrap();

        assert_eq!(writer.written.lock().unwrap()[0].1, "user.desktop.plist");
    }

    #[test]
    fn test_attribute_failure_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![png_frame(dir.path(), "a.png", 1, hms(6, 0, 0))];
        let exporter = WallpaperExporter::builder()
            .attribute_writer(Arc::new(FailingWriter))
            .build();

        let result = exporter.export(&dir.path().join("out.tiff"), &frames, ScheduleMode::TimeBased);

        assert!(matches!(
            result,
            Err(WallpaperError::AttributeWriteFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_export_in_background() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![png_frame(dir.path(), "a.png", 1, hms(6, 0, 0))];
        let (exporter, writer) = recording_exporter();

        let report = exporter
            .export_in_background(dir.path().join("out.tiff"), frames, ScheduleMode::TimeBased)
            .await
            .unwrap();

        assert_eq!(report.frames_written, 1);
        assert_eq!(writer.written.lock().unwrap().len(), 1);
    }
}
