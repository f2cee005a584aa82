//! Block-level elements produced by the markup parser.

use super::{Category, Table};
use serde::{Deserialize, Serialize};

/// One parsed block-level unit of markup.
///
/// Elements are created by the parser, consumed once by the renderer and
/// then discarded. Their only identity is their position in the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Element {
    /// `# ` line
    Title(String),
    /// Reserved heading level; the markup has no dedicated syntax for it.
    Heading1(String),
    /// `## ` line
    Heading2(String),
    /// `### ` line
    Heading3(String),
    /// Plain paragraph
    Body(String),
    /// Bulleted or numbered item
    List(String),
    /// `>` line
    Quote(String),
    /// Fenced code block (lines joined with `\n`)
    Code(String),
    /// `---` or `***`
    HorizontalRule,
    /// Pipe-delimited rows
    Table(Table),
}

impl Element {
    /// Style category used to render this element.
    ///
    /// Horizontal rules carry no styling and tables pick their fonts from
    /// the body category cell by cell, so both return `None`.
    pub fn category(&self) -> Option<Category> {
        match self {
            Element::Title(_) => Some(Category::Title),
            Element::Heading1(_) => Some(Category::Heading1),
            Element::Heading2(_) => Some(Category::Heading2),
            Element::Heading3(_) => Some(Category::Heading3),
            Element::Body(_) => Some(Category::Body),
            Element::List(_) => Some(Category::List),
            Element::Quote(_) => Some(Category::Quote),
            Element::Code(_) => Some(Category::Code),
            Element::HorizontalRule | Element::Table(_) => None,
        }
    }

    /// Inline text of a text element.
    pub fn text(&self) -> Option<&str> {
        match self {
            Element::Title(s)
            | Element::Heading1(s)
            | Element::Heading2(s)
            | Element::Heading3(s)
            | Element::Body(s)
            | Element::List(s)
            | Element::Quote(s)
            | Element::Code(s) => Some(s),
            Element::HorizontalRule | Element::Table(_) => None,
        }
    }

    /// Short lowercase name, identical to the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Title(_) => "title",
            Element::Heading1(_) => "heading1",
            Element::Heading2(_) => "heading2",
            Element::Heading3(_) => "heading3",
            Element::Body(_) => "body",
            Element::List(_) => "list",
            Element::Quote(_) => "quote",
            Element::Code(_) => "code",
            Element::HorizontalRule => "horizontal_rule",
            Element::Table(_) => "table",
        }
    }

    /// Check if this is a heading (title included).
    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            Element::Title(_) | Element::Heading1(_) | Element::Heading2(_) | Element::Heading3(_)
        )
    }

    /// Plain text of the element; table cells are tab-separated.
    pub fn plain_text(&self) -> String {
        match self {
            Element::Table(t) => t.plain_text(),
            Element::HorizontalRule => String::new(),
            other => other.text().unwrap_or_default().to_string(),
        }
    }
}
