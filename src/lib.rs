//! # docforge
//!
//! Markup to styled DOCX conversion, and style template extraction from
//! existing DOCX documents.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docforge::{generate_file, extract_styles, rules};
//!
//! fn main() -> docforge::Result<()> {
//!     // Reuse the look of an existing document
//!     let extraction = extract_styles("template.docx");
//!     for warning in &extraction.warnings {
//!         eprintln!("warning: {}", warning);
//!     }
//!     rules::save("style.json", &extraction.rules)?;
//!
//!     // Convert markup with those rules
//!     let rules = rules::load("style.json")?;
//!     generate_file("notes.md", "notes.docx", Some(&rules))?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Line-oriented markup**: headings, lists, quotes, fenced code,
//!   horizontal rules and pipe tables
//! - **Declarative styling**: per-category font and paragraph rules,
//!   loadable from partial JSON documents
//! - **Template extraction**: body and heading fonts plus page margins
//!   read back from any DOCX, with warnings instead of failures
//! - **Writer abstraction**: render into DOCX or into any
//!   [`render::DocumentWriter`]

pub mod convert;
pub mod detect;
pub mod docx;
pub mod error;
pub mod extract;
pub mod model;
pub mod parser;
pub mod render;
pub mod rules;

// Re-export commonly used types
pub use convert::{ConvertOptions, ConvertResult};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, DocxFormat};
pub use docx::{DocxReader, DocxWriter};
pub use error::{Error, Result};
pub use extract::{DocumentReader, ExtractWarning, Extraction, StyleExtractor};
pub use model::{
    Alignment, Category, CategoryStyle, Element, FontStyle, PageMargins, ParagraphStyle,
    RgbColor, StyleRules, Table, MAX_FONT_SIZE,
};
pub use parser::{MarkupParser, ParseOptions};
pub use render::{DocumentWriter, ElementRenderer, InstructionLog, RenderStats};
pub use rules::JsonFormat;

use std::path::Path;

/// Parse markup text into elements.
///
/// # Example
///
/// ```
/// use docforge::{parse_markup, Element};
///
/// let elements = parse_markup("# Title\n\n- item");
/// assert_eq!(elements[0], Element::Title("Title".into()));
/// assert_eq!(elements[1], Element::List("item".into()));
/// ```
pub fn parse_markup(text: &str) -> Vec<Element> {
    parser::parse(text)
}

/// Parse markup text with custom options.
pub fn parse_markup_with_options(text: &str, options: ParseOptions) -> Vec<Element> {
    parser::parse_with_options(text, options)
}

/// Convert markup text to DOCX bytes.
///
/// Uses the built-in rules when `rules` is `None`.
///
/// # Example
///
/// ```
/// let bytes = docforge::markdown_to_docx("# Hello\n\nWorld", None).unwrap();
/// assert!(docforge::detect::is_docx_bytes(&bytes));
/// ```
pub fn markdown_to_docx(text: &str, rules: Option<&StyleRules>) -> Result<Vec<u8>> {
    let options = ConvertOptions::new().with_rules(rules.cloned().unwrap_or_default());
    Ok(convert::convert_to_docx(text, &options)?.content)
}

/// Convert a markup file to a DOCX file.
///
/// Nothing is written when reading, rendering or encoding fails.
///
/// # Example
///
/// ```no_run
/// let stats = docforge::generate_file("notes.md", "notes.docx", None).unwrap();
/// println!("{} paragraphs", stats.paragraph_count);
/// ```
pub fn generate_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    rules: Option<&StyleRules>,
) -> Result<RenderStats> {
    let options = ConvertOptions::new().with_rules(rules.cloned().unwrap_or_default());
    convert::convert_file(input, output, &options)
}

/// Extract style rules from a DOCX file.
///
/// Never fails: anything that cannot be read keeps its default and is
/// reported in [`Extraction::warnings`].
pub fn extract_styles<P: AsRef<Path>>(path: P) -> Extraction {
    StyleExtractor::new().extract_file(path)
}

/// Extract style rules from DOCX bytes.
pub fn extract_styles_from_bytes(data: &[u8]) -> Extraction {
    StyleExtractor::new().extract_bytes(data)
}

/// Builder for converting markup and extracting templates.
///
/// # Example
///
/// ```no_run
/// use docforge::DocForge;
///
/// let forge = DocForge::new()
///     .with_style_file("style.json")?
///     .without_tables();
/// let stats = forge.generate_file("notes.md", "notes.docx")?;
/// println!("{} elements", stats.element_count());
/// # Ok::<(), docforge::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocForge {
    options: ConvertOptions,
}

impl DocForge {
    /// Create a builder with built-in rules and default parsing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given style rules.
    pub fn with_rules(mut self, rules: StyleRules) -> Self {
        self.options = self.options.with_rules(rules);
        self
    }

    /// Load style rules from a JSON file.
    pub fn with_style_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        let rules = rules::load(path)?;
        Ok(self.with_rules(rules))
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.options = self.options.with_parse_options(options);
        self
    }

    /// Treat pipe-delimited lines as body text.
    pub fn without_tables(mut self) -> Self {
        self.options.parse = self.options.parse.without_tables();
        self
    }

    /// Get the style rules.
    pub fn rules(&self) -> &StyleRules {
        &self.options.rules
    }

    /// Parse markup with the configured options.
    pub fn parse(&self, text: &str) -> Vec<Element> {
        parser::parse_with_options(text, self.options.parse.clone())
    }

    /// Render markup into any writer.
    pub fn render<W: DocumentWriter + ?Sized>(&self, text: &str, writer: &mut W) -> Result<RenderStats> {
        convert::convert(text, &self.options, writer)
    }

    /// Convert markup text to a DOCX package.
    pub fn generate(&self, text: &str) -> Result<ConvertResult> {
        convert::convert_to_docx(text, &self.options)
    }

    /// Convert a markup file to a DOCX file.
    pub fn generate_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<RenderStats> {
        convert::convert_file(input, output, &self.options)
    }

    /// Extract style rules from a DOCX file over the configured rules.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Extraction {
        StyleExtractor::new()
            .with_base(self.options.rules.clone())
            .extract_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docforge_builder() {
        let mut rules = StyleRules::builtin();
        rules.code.font.name = "Menlo".into();
        let forge = DocForge::new().with_rules(rules).without_tables();

        assert_eq!(forge.rules().code.font.name, "Menlo");
        assert_eq!(forge.parse("a | b"), vec![Element::Body("a | b".into())]);
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_extract_from_empty_bytes() {
        let extraction = extract_styles_from_bytes(&[]);
        assert_eq!(extraction.rules, StyleRules::builtin());
        assert!(matches!(
            extraction.warnings.as_slice(),
            [ExtractWarning::Unreadable { .. }]
        ));
    }

    #[test]
    fn test_extract_from_random_bytes() {
        let data = [0xFF, 0xFE, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05];
        let extraction = extract_styles_from_bytes(&data);
        assert!(!extraction.is_complete());
    }

    #[test]
    fn test_extract_missing_file() {
        let extraction = extract_styles("/nonexistent/template.docx");
        assert_eq!(extraction.rules, StyleRules::builtin());
        assert_eq!(extraction.warnings.len(), 1);
    }

    #[test]
    fn test_detect_format_empty_data() {
        let result = detect_format_from_bytes(&[]);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_parse_markup_empty() {
        assert!(parse_markup("").is_empty());
    }

    // ==================== Round Trip Tests ====================

    #[test]
    fn test_generated_bytes_extract_back() {
        let mut rules = StyleRules::builtin();
        rules.body.font.name = "Georgia".into();
        rules.body.font.size = 11;
        rules.heading1.font.size = 18;

        let bytes = markdown_to_docx("# T\n\ntext", Some(&rules)).unwrap();
        let extraction = extract_styles_from_bytes(&bytes);

        assert!(extraction.is_complete(), "{:?}", extraction.warnings);
        assert_eq!(extraction.rules.body.font.name, "Georgia");
        assert_eq!(extraction.rules.body.font.size, 11);
        assert_eq!(extraction.rules.heading1.font.size, 18);
    }

    #[test]
    fn test_docforge_generate() {
        let result = DocForge::new().generate("## Part\n\nbody").unwrap();
        assert!(detect::is_docx_bytes(&result.content));
        assert_eq!(result.stats.heading_count, 1);
        assert_eq!(result.title, None);
    }

    #[test]
    fn test_docforge_render_into_log() {
        let mut log = InstructionLog::new();
        let stats = DocForge::new().render("---", &mut log).unwrap();
        assert_eq!(stats.horizontal_rule_count, 1);
        assert_eq!(log.paragraphs().count(), 1);
    }
}
