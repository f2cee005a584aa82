//! Markup parsing module.

mod markup;
mod options;
mod table;

pub use markup::MarkupParser;
pub use options::ParseOptions;
pub use table::{is_separator_row, split_row};

use crate::model::Element;

/// Parse markup text with default options.
pub fn parse(text: &str) -> Vec<Element> {
    MarkupParser::new().parse(text)
}

/// Parse markup text with custom options.
pub fn parse_with_options(text: &str, options: ParseOptions) -> Vec<Element> {
    MarkupParser::with_options(options).parse(text)
}
