//! Line-oriented markup parser.

use std::borrow::Cow;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::model::{Element, Table};

use super::options::ParseOptions;
use super::table::{is_separator_row, split_row};

const FENCE: &str = "```";

/// Classification of a single trimmed, non-blank line.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    /// The line is a complete element on its own.
    Block(Element),
    /// Opening code fence; the block consumes following lines.
    FenceOpen,
    /// First row of a table; the table consumes following pipe lines.
    TableRow,
}

/// Single-pass markup parser.
///
/// Lines are classified in a fixed priority order (headings, bullets,
/// numbered items, quotes, code fences, rules, tables, body). Code fences and
/// tables consume their following lines themselves; the cursor only ever
/// moves forward.
pub struct MarkupParser {
    options: ParseOptions,
    bullet: Regex,
    numbered: Regex,
    rule: Regex,
}

impl MarkupParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            bullet: Regex::new(r"^[-*]\s").unwrap(),
            numbered: Regex::new(r"^\d+\.\s").unwrap(),
            rule: Regex::new(r"^[-*]{3,}$").unwrap(),
        }
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse markup text into elements, in input order.
    ///
    /// Parsing never fails: an unterminated fence absorbs the rest of the
    /// input and ragged table rows are kept as-is.
    pub fn parse(&self, text: &str) -> Vec<Element> {
        let lines: Vec<&str> = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .collect();

        let mut elements = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i].trim();
            if line.is_empty() {
                i += 1;
                continue;
            }

            match self.classify(&self.normalize(line)) {
                Line::Block(element) => {
                    elements.push(element);
                    i += 1;
                }
                Line::FenceOpen => {
                    // Code lines are kept exactly as written
                    let (element, next) = consume_code_block(&lines, i + 1);
                    elements.push(element);
                    i = next;
                }
                Line::TableRow => {
                    let (element, next) = self.consume_table(&lines, i);
                    elements.push(element);
                    i = next;
                }
            }
        }

        log::debug!(
            "parsed {} elements from {} lines",
            elements.len(),
            lines.len()
        );
        elements
    }

    fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.options.normalize_unicode {
            Cow::Owned(text.nfc().collect())
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Collect consecutive pipe-containing lines starting at `start`.
    fn consume_table(&self, lines: &[&str], start: usize) -> (Element, usize) {
        let mut table = Table::new();
        let mut i = start;

        while i < lines.len() && lines[i].contains('|') {
            let cells = split_row(&self.normalize(lines[i]));
            if !is_separator_row(&cells) {
                table.add_row(cells);
            }
            i += 1;
        }

        (Element::Table(table), i)
    }

    fn classify(&self, line: &str) -> Line {
        if let Some(rest) = line.strip_prefix("### ") {
            return Line::Block(Element::Heading3(rest.to_string()));
        }
        if let Some(rest) = line.strip_prefix("## ") {
            return Line::Block(Element::Heading2(rest.to_string()));
        }
        if let Some(rest) = line.strip_prefix("# ") {
            return Line::Block(Element::Title(rest.to_string()));
        }

        if let Some(m) = self.bullet.find(line) {
            return Line::Block(Element::List(line[m.end()..].to_string()));
        }
        if let Some(m) = self.numbered.find(line) {
            return Line::Block(Element::List(line[m.end()..].to_string()));
        }

        if let Some(rest) = line.strip_prefix('>') {
            return Line::Block(Element::Quote(rest.trim().to_string()));
        }

        if line.starts_with(FENCE) {
            return Line::FenceOpen;
        }

        if self.rule.is_match(line) {
            return Line::Block(Element::HorizontalRule);
        }

        if self.options.detect_tables && line.contains('|') {
            return Line::TableRow;
        }

        Line::Block(Element::Body(line.to_string()))
    }
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect code lines starting at `start` up to the closing fence.
///
/// Returns the element and the index after the closing fence (or the input
/// length when the fence is never closed).
fn consume_code_block(lines: &[&str], start: usize) -> (Element, usize) {
    let mut end = start;
    while end < lines.len() && !lines[end].trim_start().starts_with(FENCE) {
        end += 1;
    }

    let body = &lines[start..end];
    let first = body.iter().position(|l| !l.trim().is_empty());
    let last = body.iter().rposition(|l| !l.trim().is_empty());
    let content = match (first, last) {
        (Some(first), Some(last)) => body[first..=last].join("\n").trim_end().to_string(),
        _ => String::new(),
    };

    if end == lines.len() {
        log::debug!("code fence opened at line {} is never closed", start);
    }

    // Skip the closing fence when there is one
    let next = (end + 1).min(lines.len());
    (Element::Code(content), next)
}
