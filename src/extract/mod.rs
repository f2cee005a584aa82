//! Style template extraction.

mod extractor;
mod reader;

pub use extractor::{extract, ExtractWarning, Extraction, StyleExtractor};
pub use reader::DocumentReader;
