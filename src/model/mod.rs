//! Data model shared by the parser, renderer and extractor.
//!
//! Elements are the parser's output; style rules describe how each element
//! category is formatted. Neither type knows anything about the DOCX
//! container.

mod element;
mod style;
mod table;

pub use element::Element;
pub use style::{
    Alignment, Category, CategoryStyle, FontStyle, PageMargins, ParagraphStyle, RgbColor,
    StyleRules, MAX_FONT_SIZE,
};
pub use table::Table;
