//! Whole-file reads and writes.

use crate::error::{GlampressError, Result};
use std::path::Path;

/// Read a file as bytes, mapping a missing path to `InputNotFound`.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    if !path.is_file() {
        return Err(GlampressError::InputNotFound { path: path.to_path_buf() });
    }
    Ok(std::fs::read(path)?)
}

/// Read a file as text. Invalid UTF-8 sequences become U+FFFD.
pub fn read_text_lossy(path: &Path) -> Result<String> {
    let bytes = read_bytes(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(path = %path.display(), "input is not valid UTF-8, substituting");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}

pub fn write_bytes(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data)?;
    Ok(())
}
