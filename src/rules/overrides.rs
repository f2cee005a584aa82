//! Partial style-rule documents and their validation.
//!
//! External JSON may name any subset of fields. It is deserialized into the
//! loosely-typed override structs below, checked field by field, and laid
//! over a complete [`StyleRules`] value. Unset fields keep the base value.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Alignment, Category, PageMargins, RgbColor, StyleRules, MAX_FONT_SIZE};

/// A partial style-rule document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOverrides {
    /// Title overrides
    pub title: Option<CategoryOverride>,
    /// Heading 1 overrides
    pub heading1: Option<CategoryOverride>,
    /// Heading 2 overrides
    pub heading2: Option<CategoryOverride>,
    /// Heading 3 overrides
    pub heading3: Option<CategoryOverride>,
    /// Body overrides
    pub body: Option<CategoryOverride>,
    /// List overrides
    pub list: Option<CategoryOverride>,
    /// Quote overrides
    pub quote: Option<CategoryOverride>,
    /// Code overrides
    pub code: Option<CategoryOverride>,
    /// Page margin overrides
    pub page_margin: Option<MarginOverride>,
}

/// Partial font and paragraph settings for one category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryOverride {
    /// Font fields
    pub font: Option<FontOverride>,
    /// Paragraph fields
    pub paragraph: Option<ParagraphOverride>,
}

/// Partial font settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontOverride {
    /// Typeface name
    pub name: Option<String>,
    /// Size in points; fractional sizes are truncated
    pub size: Option<f64>,
    /// Bold
    pub bold: Option<bool>,
    /// Italic
    pub italic: Option<bool>,
    /// `#RRGGBB`, `RRGGBB`, or `""` to clear
    pub color: Option<String>,
}

/// Partial paragraph settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphOverride {
    /// `left`, `center`, `right`, `justify` or `distribute`
    pub alignment: Option<String>,
    /// Line spacing multiplier
    pub line_spacing: Option<f64>,
    /// Points
    pub space_before: Option<f64>,
    /// Points
    pub space_after: Option<f64>,
    /// Inches
    pub indent_first_line: Option<f64>,
    /// Inches
    pub indent_left: Option<f64>,
}

/// Partial page margins in inches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginOverride {
    /// Top margin
    pub top: Option<f64>,
    /// Bottom margin
    pub bottom: Option<f64>,
    /// Left margin
    pub left: Option<f64>,
    /// Right margin
    pub right: Option<f64>,
}

impl StyleOverrides {
    /// Create an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides for a category, if any were supplied.
    pub fn category(&self, category: Category) -> Option<&CategoryOverride> {
        match category {
            Category::Title => self.title.as_ref(),
            Category::Heading1 => self.heading1.as_ref(),
            Category::Heading2 => self.heading2.as_ref(),
            Category::Heading3 => self.heading3.as_ref(),
            Category::Body => self.body.as_ref(),
            Category::List => self.list.as_ref(),
            Category::Quote => self.quote.as_ref(),
            Category::Code => self.code.as_ref(),
        }
    }

    /// Check whether nothing is overridden.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Validate every supplied field and lay it over `base`.
    ///
    /// The first invalid field aborts with [`Error::InvalidStyle`]; `base`
    /// is consumed either way.
    pub fn apply(&self, base: StyleRules) -> Result<StyleRules> {
        let mut rules = base;

        for category in Category::ALL {
            let Some(over) = self.category(category) else {
                continue;
            };
            let key = category.key();
            let style = rules.get_mut(category);

            if let Some(ref font) = over.font {
                if let Some(ref name) = font.name {
                    let name = name.trim();
                    if name.is_empty() {
                        return Err(Error::invalid_style(
                            format!("{}.font.name", key),
                            "must not be empty",
                        ));
                    }
                    style.font.name = name.to_string();
                }
                if let Some(size) = font.size {
                    style.font.size = font_size(&format!("{}.font.size", key), size)?;
                }
                if let Some(bold) = font.bold {
                    style.font.bold = bold;
                }
                if let Some(italic) = font.italic {
                    style.font.italic = italic;
                }
                if let Some(ref color) = font.color {
                    style.font.color = if color.trim().is_empty() {
                        None
                    } else {
                        Some(color.parse::<RgbColor>().map_err(|reason| {
                            Error::invalid_style(format!("{}.font.color", key), reason)
                        })?)
                    };
                }
            }

            if let Some(ref para) = over.paragraph {
                let p = &mut style.paragraph;
                if let Some(ref alignment) = para.alignment {
                    p.alignment = alignment.parse::<Alignment>().map_err(|reason| {
                        Error::invalid_style(format!("{}.paragraph.alignment", key), reason)
                    })?;
                }
                let field = |name: &str| format!("{}.paragraph.{}", key, name);
                if let Some(v) = para.line_spacing {
                    p.line_spacing = non_negative(&field("line_spacing"), v)?;
                }
                if let Some(v) = para.space_before {
                    p.space_before = non_negative(&field("space_before"), v)?;
                }
                if let Some(v) = para.space_after {
                    p.space_after = non_negative(&field("space_after"), v)?;
                }
                if let Some(v) = para.indent_first_line {
                    p.indent_first_line = non_negative(&field("indent_first_line"), v)?;
                }
                if let Some(v) = para.indent_left {
                    p.indent_left = non_negative(&field("indent_left"), v)?;
                }
            }
        }

        if let Some(ref margin) = self.page_margin {
            rules.page_margin = apply_margins(rules.page_margin, margin)?;
        }

        Ok(rules)
    }
}

fn apply_margins(mut margins: PageMargins, over: &MarginOverride) -> Result<PageMargins> {
    if let Some(v) = over.top {
        margins.top = non_negative("page_margin.top", v)?;
    }
    if let Some(v) = over.bottom {
        margins.bottom = non_negative("page_margin.bottom", v)?;
    }
    if let Some(v) = over.left {
        margins.left = non_negative("page_margin.left", v)?;
    }
    if let Some(v) = over.right {
        margins.right = non_negative("page_margin.right", v)?;
    }
    Ok(margins)
}

fn non_negative(field: &str, value: f64) -> Result<f32> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::invalid_style(
            field,
            format!("must be a non-negative number, got {}", value),
        ));
    }
    Ok(value as f32)
}

fn font_size(field: &str, value: f64) -> Result<u32> {
    if !value.is_finite() || value < 1.0 || value.trunc() > MAX_FONT_SIZE as f64 {
        return Err(Error::invalid_style(
            field,
            format!(
                "must be a point size between 1 and {}, got {}",
                MAX_FONT_SIZE, value
            ),
        ));
    }
    Ok(value.trunc() as u32)
}
