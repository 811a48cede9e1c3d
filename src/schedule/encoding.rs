//! The XML property list and base64 layers around a [`ScheduleDocument`].

use super::error::ScheduleError;
use super::structs::ScheduleDocument;
use base64::{Engine as _, engine::general_purpose};

impl ScheduleDocument {
    /// Serializes the document as an XML property list.
    pub fn to_plist_xml(&self) -> Result<Vec<u8>, ScheduleError> {
        let mut xml = Vec::new();
        plist::to_writer_xml(&mut xml, self)?;
        Ok(xml)
    }

    /// Parses a property list (XML or binary).
    pub fn from_plist_xml(bytes: &[u8]) -> Result<Self, ScheduleError> {
        Ok(plist::from_bytes(bytes)?)
    }

    /// The extended attribute value: the XML property list, base64 encoded.
    pub fn to_attribute_value(&self) -> Result<String, ScheduleError> {
        Ok(general_purpose::STANDARD.encode(self.to_plist_xml()?))
    }

    /// Inverse of [`Self::to_attribute_value`]. Surrounding whitespace is ignored.
    pub fn from_attribute_value(value: &[u8]) -> Result<Self, ScheduleError> {
        let xml = general_purpose::STANDARD.decode(value.trim_ascii())?;
        Self::from_plist_xml(&xml)
    }
}
