//! DOCX container: a [`DocumentWriter`](crate::render::DocumentWriter) that
//! encodes WordprocessingML through `docx-rs` and a
//! [`DocumentReader`](crate::extract::DocumentReader) over existing packages.

mod reader;
pub mod units;
mod writer;

pub use reader::DocxReader;
pub use writer::DocxWriter;

/// Main document part
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Style sheet part
pub const STYLES_PART: &str = "word/styles.xml";
