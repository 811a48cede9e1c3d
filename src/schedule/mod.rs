//! Building and encoding the frame schedule embedded in a wallpaper file.
mod builder;
mod encoding;
pub mod error;
pub mod structs;

pub use builder::build_schedule;
pub use error::ScheduleError;
pub use structs::{
    OmittedFrame, ScheduleDocument, ScheduleMode, ScheduleOutcome, SolarEntry, TimeEntry,
};
