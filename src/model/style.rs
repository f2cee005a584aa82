//! Style rules: per-category font and paragraph formatting plus page margins.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Semantic role of an element/style pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Document title
    Title,
    /// Heading level 1
    Heading1,
    /// Heading level 2
    Heading2,
    /// Heading level 3
    Heading3,
    /// Body paragraph
    Body,
    /// List item
    List,
    /// Block quote
    Quote,
    /// Code block
    Code,
}

impl Category {
    /// All categories in exchange-format order.
    pub const ALL: [Category; 8] = [
        Category::Title,
        Category::Heading1,
        Category::Heading2,
        Category::Heading3,
        Category::Body,
        Category::List,
        Category::Quote,
        Category::Code,
    ];

    /// Key used in the style-rule exchange format.
    pub fn key(self) -> &'static str {
        match self {
            Category::Title => "title",
            Category::Heading1 => "heading1",
            Category::Heading2 => "heading2",
            Category::Heading3 => "heading3",
            Category::Body => "body",
            Category::List => "list",
            Category::Quote => "quote",
            Category::Code => "code",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
    /// Justified with inter-character distribution (CJK layouts)
    Distribute,
}

impl FromStr for Alignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            "justify" => Ok(Alignment::Justify),
            "distribute" => Ok(Alignment::Distribute),
            other => Err(format!("unknown alignment '{}'", other)),
        }
    }
}

/// 24-bit RGB color, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor(pub [u8; 3]);

impl RgbColor {
    /// Create a color from components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Six uppercase hex digits without `#`, as WordprocessingML expects.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0[0], self.0[1], self.0[2])
    }
}

impl FromStr for RgbColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("expected 6 hex digits, got '{}'", s));
        }
        let component = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        match (component(0), component(2), component(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self([r, g, b])),
            _ => Err(format!("expected 6 hex digits, got '{}'", s)),
        }
    }
}

impl TryFrom<String> for RgbColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        format!("#{}", color.hex())
    }
}

/// Largest font size in points a `w:sz` value can carry (3276 half-points).
pub const MAX_FONT_SIZE: u32 = 1638;

/// Font settings for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
    /// Typeface name
    pub name: String,

    /// Size in points, between 1 and [`MAX_FONT_SIZE`]
    pub size: u32,

    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Text color, `None` for automatic
    pub color: Option<RgbColor>,
}

impl FontStyle {
    /// Create a regular (non-bold, non-italic) font.
    pub fn new(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: name.into(),
            size,
            bold: false,
            italic: false,
            color: None,
        }
    }

    /// Return a bold copy.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Return an italic copy.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Return a copy with a different size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }
}

impl Default for FontStyle {
    fn default() -> Self {
        Self::new("宋体", 12)
    }
}

/// Paragraph settings for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Text alignment
    pub alignment: Alignment,

    /// Line spacing multiplier (1.0 = single)
    pub line_spacing: f32,

    /// Space before paragraph in points
    pub space_before: f32,

    /// Space after paragraph in points
    pub space_after: f32,

    /// First line indent in inches
    pub indent_first_line: f32,

    /// Left indent in inches
    pub indent_left: f32,
}

impl ParagraphStyle {
    /// Set alignment and spacing, keeping the remaining defaults.
    pub fn spaced(alignment: Alignment, space_before: f32, space_after: f32) -> Self {
        Self {
            alignment,
            space_before,
            space_after,
            ..Self::default()
        }
    }
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            alignment: Alignment::Left,
            line_spacing: 1.5,
            space_before: 0.0,
            space_after: 0.0,
            indent_first_line: 0.0,
            indent_left: 0.0,
        }
    }
}

/// Font and paragraph pair for a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryStyle {
    /// Font settings
    pub font: FontStyle,

    /// Paragraph settings
    pub paragraph: ParagraphStyle,
}

impl CategoryStyle {
    /// Create a category style.
    pub fn new(font: FontStyle, paragraph: ParagraphStyle) -> Self {
        Self { font, paragraph }
    }
}

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageMargins {
    /// Top margin
    pub top: f32,
    /// Bottom margin
    pub bottom: f32,
    /// Left margin
    pub left: f32,
    /// Right margin
    pub right: f32,
}

impl PageMargins {
    /// Same margin on every side.
    pub const fn uniform(inches: f32) -> Self {
        Self {
            top: inches,
            bottom: inches,
            left: inches,
            right: inches,
        }
    }
}

impl Default for PageMargins {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// The full set of style rules applied during rendering.
///
/// Built once per conversion (from [`StyleRules::builtin`] plus optional
/// overrides) and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRules {
    /// `# ` lines
    pub title: CategoryStyle,
    /// Heading level 1
    pub heading1: CategoryStyle,
    /// `## ` lines
    pub heading2: CategoryStyle,
    /// `### ` lines
    pub heading3: CategoryStyle,
    /// Body paragraphs and table cells
    pub body: CategoryStyle,
    /// List items
    pub list: CategoryStyle,
    /// Block quotes
    pub quote: CategoryStyle,
    /// Code blocks
    pub code: CategoryStyle,
    /// Margins of the first section
    pub page_margin: PageMargins,
}

impl StyleRules {
    /// Built-in defaults.
    pub fn builtin() -> Self {
        Self {
            title: CategoryStyle::new(
                FontStyle::new("黑体", 22).bold(),
                ParagraphStyle::spaced(Alignment::Center, 400.0, 300.0),
            ),
            heading1: CategoryStyle::new(
                FontStyle::new("黑体", 16).bold(),
                ParagraphStyle::spaced(Alignment::Left, 300.0, 150.0),
            ),
            heading2: CategoryStyle::new(
                FontStyle::new("楷体", 14).bold(),
                ParagraphStyle::spaced(Alignment::Left, 250.0, 100.0),
            ),
            heading3: CategoryStyle::new(
                FontStyle::new("宋体", 12).bold(),
                ParagraphStyle::spaced(Alignment::Left, 200.0, 80.0),
            ),
            body: CategoryStyle::new(
                FontStyle::new("宋体", 12),
                ParagraphStyle {
                    indent_first_line: 0.35,
                    ..ParagraphStyle::spaced(Alignment::Justify, 0.0, 80.0)
                },
            ),
            list: CategoryStyle::new(
                FontStyle::new("宋体", 12),
                ParagraphStyle::spaced(Alignment::Left, 60.0, 60.0),
            ),
            quote: CategoryStyle::new(
                FontStyle::new("楷体", 12).italic(),
                ParagraphStyle {
                    indent_left: 0.5,
                    ..ParagraphStyle::spaced(Alignment::Left, 100.0, 100.0)
                },
            ),
            code: CategoryStyle::new(
                FontStyle::new("Consolas", 11),
                ParagraphStyle {
                    indent_left: 0.5,
                    ..ParagraphStyle::spaced(Alignment::Left, 150.0, 150.0)
                },
            ),
            page_margin: PageMargins::default(),
        }
    }

    /// Style for a category.
    pub fn get(&self, category: Category) -> &CategoryStyle {
        match category {
            Category::Title => &self.title,
            Category::Heading1 => &self.heading1,
            Category::Heading2 => &self.heading2,
            Category::Heading3 => &self.heading3,
            Category::Body => &self.body,
            Category::List => &self.list,
            Category::Quote => &self.quote,
            Category::Code => &self.code,
        }
    }

    /// Mutable style for a category; used while building rules, never while rendering.
    pub fn get_mut(&mut self, category: Category) -> &mut CategoryStyle {
        match category {
            Category::Title => &mut self.title,
            Category::Heading1 => &mut self.heading1,
            Category::Heading2 => &mut self.heading2,
            Category::Heading3 => &mut self.heading3,
            Category::Body => &mut self.body,
            Category::List => &mut self.list,
            Category::Quote => &mut self.quote,
            Category::Code => &mut self.code,
        }
    }
}

impl Default for StyleRules {
    fn default() -> Self {
        Self::builtin()
    }
}
