//! Conversion pipeline: markup text to formatting instructions.
//!
//! The pipeline parses the whole input, emits page margins and named style
//! definitions, then renders every element in order against one writer.
//!
//! # Example
//!
//! ```
//! use docforge::convert::{convert, ConvertOptions};
//! use docforge::render::InstructionLog;
//!
//! let mut log = InstructionLog::new();
//! let stats = convert("# Title\n\nBody text", &ConvertOptions::default(), &mut log).unwrap();
//! assert_eq!(stats.heading_count, 1);
//! assert_eq!(log.paragraphs().count(), 2);
//! ```

use std::fs;
use std::path::Path;

use crate::docx::DocxWriter;
use crate::error::Result;
use crate::model::StyleRules;
use crate::parser::{MarkupParser, ParseOptions};
use crate::render::{DocumentWriter, ElementRenderer, RenderStats};

/// MIME type of generated documents.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Options for a conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Parsing options
    pub parse: ParseOptions,

    /// Style rules applied to every element
    pub rules: StyleRules,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Set style rules.
    pub fn with_rules(mut self, rules: StyleRules) -> Self {
        self.rules = rules;
        self
    }
}

/// Result of converting markup to a DOCX package.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Encoded package
    pub content: Vec<u8>,

    /// Rendering statistics
    pub stats: RenderStats,

    /// Text of the first title, if any
    pub title: Option<String>,

    /// MIME type of the output
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Get content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Parse `text` and render it into `writer`.
pub fn convert<W: DocumentWriter + ?Sized>(
    text: &str,
    options: &ConvertOptions,
    writer: &mut W,
) -> Result<RenderStats> {
    let elements = MarkupParser::with_options(options.parse.clone()).parse(text);
    let renderer = ElementRenderer::new(&options.rules);
    renderer.begin(writer)?;
    renderer.render_all(&elements, writer)
}

/// Convert markup text to DOCX bytes.
pub fn convert_to_docx(text: &str, options: &ConvertOptions) -> Result<ConvertResult> {
    let mut writer = DocxWriter::new();
    let stats = convert(text, options, &mut writer)?;
    let title = writer.title().map(str::to_string);
    let content = writer.finish()?;

    Ok(ConvertResult {
        content,
        stats,
        title,
        mime_type: DOCX_MIME,
    })
}

/// Convert a markup file to a DOCX file.
///
/// The output file is only written after the whole document has been
/// rendered and encoded.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    options: &ConvertOptions,
) -> Result<RenderStats> {
    let text = fs::read_to_string(input.as_ref())?;
    let result = convert_to_docx(&text, options)?;
    fs::write(output.as_ref(), &result.content)?;
    log::debug!(
        "wrote {} ({} bytes)",
        output.as_ref().display(),
        result.content_len()
    );
    Ok(result.stats)
}
