use std::io;
use std::path::Path;

/// Extended attribute key macOS reads the wallpaper schedule from.
pub const DESKTOP_PLIST_ATTRIBUTE: &str = "com.apple.desktop.plist";

/// Capability to attach an extended attribute to a finished file.
pub trait AttributeWriter: Send + Sync {
    fn write_attribute(&self, path: &Path, key: &str, value: &[u8]) -> io::Result<()>;
}

/// Writes extended attributes through the platform's native API.
#[derive(Debug, Clone, Copy, Default)]
pub struct XattrWriter;

impl AttributeWriter for XattrWriter {
    fn write_attribute(&self, path: &Path, key: &str, value: &[u8]) -> io::Result<()> {
        xattr::set(path, key, value)
    }
}

/// Reads an extended attribute back, `None` when the file does not carry it.
pub fn read_attribute(path: &Path, key: &str) -> io::Result<Option<Vec<u8>>> {
    xattr::get(path, key)
}
