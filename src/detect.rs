//! DOCX format detection and validation.

use crate::docx::{DOCUMENT_PART, STYLES_PART};
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

/// DOCX package information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxFormat {
    /// Number of entries in the ZIP container
    pub entry_count: usize,
    /// Whether the package carries a style sheet part
    pub has_styles: bool,
}

impl std::fmt::Display for DocxFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DOCX ({} parts)", self.entry_count)
    }
}

/// ZIP local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Detect DOCX format from a file path.
///
/// # Example
/// ```no_run
/// use docforge::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("template.docx").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocxFormat> {
    let mut data = Vec::new();
    File::open(path)?.read_to_end(&mut data)?;
    detect_format_from_bytes(&data)
}

/// Detect DOCX format from the complete package bytes.
///
/// # Returns
/// * `Ok(DocxFormat)` if the data is a ZIP package with a main document part
/// * `Err(Error::UnknownFormat)` if the data is not a ZIP package
/// * `Err(Error::MissingPart)` if the package has no main document part
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocxFormat> {
    if !has_zip_magic(data) {
        return Err(Error::UnknownFormat);
    }

    let archive = ZipArchive::new(Cursor::new(data)).map_err(|_| Error::UnknownFormat)?;
    let names: Vec<&str> = archive.file_names().collect();

    if !names.contains(&DOCUMENT_PART) {
        return Err(Error::MissingPart(DOCUMENT_PART.to_string()));
    }

    Ok(DocxFormat {
        entry_count: archive.len(),
        has_styles: names.contains(&STYLES_PART),
    })
}

/// Check for the ZIP local file header.
pub fn has_zip_magic(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}

/// Check if a file is a DOCX package.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes are a DOCX package.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
