use super::structs::{
    OmittedFrame, ScheduleDocument, ScheduleMode, ScheduleOutcome, SolarEntry, TimeEntry,
};
use crate::frame::ImageFrame;
use crate::solar::solar_elevation;
use tracing::warn;

/// Turns frames, already in display order, into a schedule.
///
/// In time mode every frame gets an entry with its display time as `HH:MM`
/// (seconds are dropped). In sun mode only frames with complete EXIF data get
/// an entry; the others are reported in [`ScheduleOutcome::omitted`] and do
/// not shift the indices of later frames.
pub fn build_schedule<'a, I>(frames: I, mode: ScheduleMode) -> ScheduleOutcome
where
    I: IntoIterator<Item = &'a ImageFrame>,
{
    let frames = frames.into_iter().enumerate();
    let mut omitted = Vec::new();

    let document = match mode {
        ScheduleMode::TimeBased => ScheduleDocument::Time(
            frames
                .map(|(position, frame)| TimeEntry {
                    image: position as u64,
                    time: frame.display_time().format("%H:%M").to_string(),
                })
                .collect(),
        ),
        ScheduleMode::SunBased => ScheduleDocument::Solar(
            frames
                .filter_map(|(position, frame)| {
                    let Some((at, lat, lon)) = frame.exif().and_then(|exif| exif.solar_inputs())
                    else {
                        warn!(
                            position,
                            path = %frame.source().display(),
                            "no complete exif data, leaving frame out of the solar schedule"
                        );
                        omitted.push(OmittedFrame::of(position, frame));
                        return None;
                    };
                    Some(SolarEntry {
                        image: position as u64,
                        solar_elevation: solar_elevation(at, lat, lon),
                    })
                })
                .collect(),
        ),
    };

    ScheduleOutcome { document, omitted }
}
