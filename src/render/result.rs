//! Rendering statistics.

use serde::{Deserialize, Serialize};

use crate::model::Element;

/// Statistics collected while rendering elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Title and heading paragraphs
    pub heading_count: u32,

    /// Body paragraphs
    pub paragraph_count: u32,

    /// List items
    pub list_item_count: u32,

    /// Block quotes
    pub quote_count: u32,

    /// Code blocks
    pub code_block_count: u32,

    /// Tables written (empty tables are not counted)
    pub table_count: u32,

    /// Horizontal rules
    pub horizontal_rule_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one rendered element and its text.
    pub fn record(&mut self, element: &Element) {
        match element {
            e if e.is_heading() => self.heading_count += 1,
            Element::Body(_) => self.paragraph_count += 1,
            Element::List(_) => self.list_item_count += 1,
            Element::Quote(_) => self.quote_count += 1,
            Element::Code(_) => self.code_block_count += 1,
            Element::HorizontalRule => self.horizontal_rule_count += 1,
            Element::Table(t) => {
                if !t.is_empty() {
                    self.table_count += 1;
                }
            }
            _ => {}
        }
        self.count_text(&element.plain_text());
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Total number of block elements counted.
    pub fn element_count(&self) -> u32 {
        self.heading_count
            + self.paragraph_count
            + self.list_item_count
            + self.quote_count
            + self.code_block_count
            + self.table_count
            + self.horizontal_rule_count
    }
}
