use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Property list (de)serialization failed: {0}")]
    Plist(#[from] plist::Error),

    #[error("Attribute value is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
}
