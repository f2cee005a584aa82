//! Reverse-derivation of style rules from a document.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::docx::DocxReader;
use crate::error::Error;
use crate::model::{StyleRules, MAX_FONT_SIZE};
use crate::render::NamedStyle;

use super::DocumentReader;

/// Styles read by the extractor, in reading order.
const EXTRACTED_STYLES: [NamedStyle; 4] = [
    NamedStyle::Normal,
    NamedStyle::Heading1,
    NamedStyle::Heading2,
    NamedStyle::Heading3,
];

/// A recovered problem during extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractWarning {
    /// One attribute could not be read; its default was kept.
    Attribute {
        /// Dotted field name, e.g. `heading1.font.size`
        field: String,
        /// Why the read failed
        reason: String,
    },
    /// A named style is not defined in the document.
    MissingStyle {
        /// Style identifier
        style: String,
    },
    /// The document could not be read at all; every field is a default.
    Unreadable {
        /// Why the document could not be read
        reason: String,
    },
}

impl fmt::Display for ExtractWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractWarning::Attribute { field, reason } => {
                write!(f, "cannot read {}, using default: {}", field, reason)
            }
            ExtractWarning::MissingStyle { style } => {
                write!(f, "style '{}' not found, using defaults", style)
            }
            ExtractWarning::Unreadable { reason } => {
                write!(f, "cannot parse template styles, using defaults: {}", reason)
            }
        }
    }
}

/// Outcome of an extraction: always a complete set of rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Extracted rules, defaults where nothing could be read
    pub rules: StyleRules,
    /// Recovered problems, empty when extraction was complete
    pub warnings: Vec<ExtractWarning>,
}

impl Extraction {
    /// Check if every attribute was read without problems.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    fn warn(&mut self, warning: ExtractWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }
}

/// Builds style rules from the formatting of an existing document.
///
/// Only the body font (from the default paragraph style), the heading 1-3
/// fonts and the first section's margins are read; everything else keeps
/// the base value.
#[derive(Debug, Clone, Default)]
pub struct StyleExtractor {
    base: StyleRules,
}

impl StyleExtractor {
    /// Create an extractor over the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom rules for every field that is not extracted.
    pub fn with_base(mut self, base: StyleRules) -> Self {
        self.base = base;
        self
    }

    /// Read rules from a document. Never fails.
    pub fn extract<R: DocumentReader + ?Sized>(&self, reader: &R) -> Extraction {
        let mut extraction = Extraction {
            rules: self.base.clone(),
            warnings: Vec::new(),
        };

        for style in EXTRACTED_STYLES {
            if !reader.has_style(style) {
                extraction.warn(ExtractWarning::MissingStyle {
                    style: style.style_id().to_string(),
                });
                // Normal still inherits the document defaults
                if style != NamedStyle::Normal {
                    continue;
                }
            }
            read_font(reader, style, &mut extraction);
        }

        match reader.page_margins() {
            Ok(Some(margins)) => extraction.rules.page_margin = margins,
            Ok(None) => log::debug!("no section properties, keeping default margins"),
            Err(e) => extraction.warn(attribute_warning("page_margin", e)),
        }

        extraction
    }

    /// Open a DOCX file and read rules from it. Never fails.
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Extraction {
        match DocxReader::open(path.as_ref()) {
            Ok(reader) => self.extract(&reader),
            Err(e) => self.unreadable(&e),
        }
    }

    /// Read rules from DOCX bytes. Never fails.
    pub fn extract_bytes(&self, data: &[u8]) -> Extraction {
        match DocxReader::from_bytes(data.to_vec()) {
            Ok(reader) => self.extract(&reader),
            Err(e) => self.unreadable(&e),
        }
    }

    /// Result for a document that could not be opened or parsed.
    pub fn unreadable(&self, error: &Error) -> Extraction {
        let mut extraction = Extraction {
            rules: self.base.clone(),
            warnings: Vec::new(),
        };
        extraction.warn(ExtractWarning::Unreadable {
            reason: error.to_string(),
        });
        extraction
    }
}

fn read_font<R: DocumentReader + ?Sized>(reader: &R, style: NamedStyle, extraction: &mut Extraction) {
    let key = style.category().key();

    match reader.font_name(style) {
        Ok(Some(name)) if !name.trim().is_empty() => {
            extraction.rules.get_mut(style.category()).font.name = name;
        }
        Ok(_) => {}
        Err(e) => extraction.warn(attribute_warning(&format!("{}.font.name", key), e)),
    }

    let field = format!("{}.font.size", key);
    match reader.font_size(style) {
        Ok(Some(points)) => {
            // Whole points only; fractional sizes are truncated
            let size = points.trunc();
            if size.is_finite() && size >= 1.0 && size <= MAX_FONT_SIZE as f32 {
                extraction.rules.get_mut(style.category()).font.size = size as u32;
            } else {
                extraction.warn(ExtractWarning::Attribute {
                    field,
                    reason: format!(
                        "font size {} is outside 1..={} points",
                        points, MAX_FONT_SIZE
                    ),
                });
            }
        }
        Ok(None) => {}
        Err(e) => extraction.warn(attribute_warning(&field, e)),
    }
}

fn attribute_warning(field: &str, error: Error) -> ExtractWarning {
    let reason = match error {
        Error::StyleAttribute { reason, .. } => reason,
        other => other.to_string(),
    };
    ExtractWarning::Attribute {
        field: field.to_string(),
        reason,
    }
}

/// Read rules from a document over the built-in defaults.
pub fn extract<R: DocumentReader + ?Sized>(reader: &R) -> Extraction {
    StyleExtractor::new().extract(reader)
}
