//! Formatting instructions and the document writer abstraction.
//!
//! The renderer never touches a container format. It describes each
//! paragraph and table as a plain value and hands it to a
//! [`DocumentWriter`], which decides how to encode it.
//!
//! # Example
//!
//! ```
//! use docforge::render::{DocumentWriter, InstructionLog, StyledParagraph, StyledRun};
//!
//! let mut log = InstructionLog::new();
//! log.add_paragraph(StyledParagraph::plain(vec![StyledRun::plain("hello")]))
//!     .unwrap();
//! assert_eq!(log.paragraphs().count(), 1);
//! ```

use serde::Serialize;

use crate::error::Result;
use crate::model::{Alignment, Category, FontStyle, PageMargins, ParagraphStyle, RgbColor};

/// Named paragraph styles defined in every generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NamedStyle {
    /// Default paragraph style, carries the body font
    Normal,
    /// Document title
    Title,
    /// Heading level 1
    Heading1,
    /// Heading level 2
    Heading2,
    /// Heading level 3
    Heading3,
}

impl NamedStyle {
    /// All named styles, in definition order.
    pub const ALL: [NamedStyle; 5] = [
        NamedStyle::Normal,
        NamedStyle::Title,
        NamedStyle::Heading1,
        NamedStyle::Heading2,
        NamedStyle::Heading3,
    ];

    /// Style identifier referenced from paragraphs.
    pub fn style_id(self) -> &'static str {
        match self {
            NamedStyle::Normal => "Normal",
            NamedStyle::Title => "Title",
            NamedStyle::Heading1 => "Heading1",
            NamedStyle::Heading2 => "Heading2",
            NamedStyle::Heading3 => "Heading3",
        }
    }

    /// Built-in display name (word processors localize these).
    pub fn display_name(self) -> &'static str {
        match self {
            NamedStyle::Normal => "Normal",
            NamedStyle::Title => "Title",
            NamedStyle::Heading1 => "heading 1",
            NamedStyle::Heading2 => "heading 2",
            NamedStyle::Heading3 => "heading 3",
        }
    }

    /// Style category whose font this style carries.
    pub fn category(self) -> Category {
        match self {
            NamedStyle::Normal => Category::Body,
            NamedStyle::Title => Category::Title,
            NamedStyle::Heading1 => Category::Heading1,
            NamedStyle::Heading2 => Category::Heading2,
            NamedStyle::Heading3 => Category::Heading3,
        }
    }

    /// Zero-based outline level of heading styles.
    pub fn outline_level(self) -> Option<u8> {
        match self {
            NamedStyle::Heading1 => Some(0),
            NamedStyle::Heading2 => Some(1),
            NamedStyle::Heading3 => Some(2),
            NamedStyle::Normal | NamedStyle::Title => None,
        }
    }
}

/// Direct paragraph formatting.
///
/// Spacing is in points, indents in inches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParagraphFormat {
    /// Text alignment
    pub alignment: Alignment,
    /// Line spacing multiplier
    pub line_spacing: f32,
    /// Space before in points
    pub space_before: f32,
    /// Space after in points
    pub space_after: f32,
    /// First line indent in inches (0 = none)
    pub first_line_indent: f32,
    /// Left indent in inches (0 = none)
    pub left_indent: f32,
}

impl ParagraphFormat {
    /// Alignment, spacing and left indent of a paragraph style, with no
    /// first-line indent.
    pub fn from_style(style: &ParagraphStyle) -> Self {
        Self {
            alignment: style.alignment,
            line_spacing: style.line_spacing,
            space_before: style.space_before,
            space_after: style.space_after,
            first_line_indent: 0.0,
            left_indent: style.indent_left,
        }
    }

    /// Set the first line indent.
    pub fn with_first_line_indent(mut self, inches: f32) -> Self {
        self.first_line_indent = inches;
        self
    }

    /// Set the left indent.
    pub fn with_left_indent(mut self, inches: f32) -> Self {
        self.left_indent = inches;
        self
    }
}

/// A run of text with optional direct font formatting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledRun {
    /// Run text; `\n` is a line break
    pub text: String,
    /// Font, `None` to inherit from the paragraph style
    pub font: Option<FontStyle>,
}

impl StyledRun {
    /// Create a run with explicit font formatting.
    pub fn new(text: impl Into<String>, font: FontStyle) -> Self {
        Self {
            text: text.into(),
            font: Some(font),
        }
    }

    /// Create a run that inherits its font.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: None,
        }
    }
}

/// A paragraph ready to be written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledParagraph {
    /// Named style, `None` for the default paragraph style
    pub style: Option<NamedStyle>,
    /// Direct formatting, `None` to inherit everything
    pub format: Option<ParagraphFormat>,
    /// Text runs in order
    pub runs: Vec<StyledRun>,
}

impl StyledParagraph {
    /// Create a formatted paragraph.
    pub fn new(style: Option<NamedStyle>, format: ParagraphFormat, runs: Vec<StyledRun>) -> Self {
        Self {
            style,
            format: Some(format),
            runs,
        }
    }

    /// Create a paragraph without any formatting.
    pub fn plain(runs: Vec<StyledRun>) -> Self {
        Self {
            style: None,
            format: None,
            runs,
        }
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Table border style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum TableBorder {
    /// Single lines around every cell
    #[default]
    Grid,
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledCell {
    /// Cell text
    pub text: String,
    /// Cell font
    pub font: FontStyle,
    /// Alignment of the cell paragraph
    pub alignment: Alignment,
    /// Background fill
    pub shading: Option<RgbColor>,
}

/// A rectangular table ready to be written.
///
/// Every row has the same number of cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledTable {
    /// Rows of cells, header first
    pub rows: Vec<Vec<StyledCell>>,
    /// Border style
    pub border: TableBorder,
}

impl StyledTable {
    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }
}

/// Sink for formatting instructions.
///
/// Instructions arrive in document order: page margins and named styles
/// first, then paragraphs and tables.
pub trait DocumentWriter {
    /// Set the margins of the first section.
    fn set_page_margins(&mut self, margins: &PageMargins) -> Result<()>;

    /// Define the font of a named style.
    fn define_style(&mut self, style: NamedStyle, font: &FontStyle) -> Result<()>;

    /// Append a paragraph.
    fn add_paragraph(&mut self, paragraph: StyledParagraph) -> Result<()>;

    /// Append a table.
    fn add_table(&mut self, table: StyledTable) -> Result<()>;
}

/// One recorded writer call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    /// `set_page_margins`
    PageMargins {
        /// Margins in inches
        margins: PageMargins,
    },
    /// `define_style`
    DefineStyle {
        /// Style being defined
        style: NamedStyle,
        /// Its font
        font: FontStyle,
    },
    /// `add_paragraph`
    Paragraph(StyledParagraph),
    /// `add_table`
    Table(StyledTable),
}

/// A writer that records every instruction it receives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstructionLog {
    instructions: Vec<Instruction>,
}

impl InstructionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded instructions in order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Recorded paragraphs in order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &StyledParagraph> {
        self.instructions.iter().filter_map(|i| match i {
            Instruction::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Recorded tables in order.
    pub fn tables(&self) -> impl Iterator<Item = &StyledTable> {
        self.instructions.iter().filter_map(|i| match i {
            Instruction::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Font defined for a named style, if any.
    pub fn style_font(&self, style: NamedStyle) -> Option<&FontStyle> {
        self.instructions.iter().rev().find_map(|i| match i {
            Instruction::DefineStyle { style: s, font } if *s == style => Some(font),
            _ => None,
        })
    }

    /// Number of recorded instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl DocumentWriter for InstructionLog {
    fn set_page_margins(&mut self, margins: &PageMargins) -> Result<()> {
        self.instructions.push(Instruction::PageMargins { margins: *margins });
        Ok(())
    }

    fn define_style(&mut self, style: NamedStyle, font: &FontStyle) -> Result<()> {
        self.instructions.push(Instruction::DefineStyle {
            style,
            font: font.clone(),
        });
        Ok(())
    }

    fn add_paragraph(&mut self, paragraph: StyledParagraph) -> Result<()> {
        self.instructions.push(Instruction::Paragraph(paragraph));
        Ok(())
    }

    fn add_table(&mut self, table: StyledTable) -> Result<()> {
        self.instructions.push(Instruction::Table(table));
        Ok(())
    }
}
