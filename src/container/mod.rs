//! Writing the multi-frame wallpaper file and attaching its schedule.
pub mod attribute;
pub mod error;
mod multi_frame;
mod writer;

pub use attribute::{AttributeWriter, DESKTOP_PLIST_ATTRIBUTE, XattrWriter, read_attribute};
pub use error::{ContainerError, FrameError};
pub use multi_frame::MultiFrameContainer;
pub use writer::{decode_frame, write_container};

#[cfg(test)]
pub(crate) use writer::tests as fixtures;
