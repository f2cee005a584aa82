//! Read access to the formatting of an existing document.

use crate::error::Result;
use crate::model::PageMargins;
use crate::render::NamedStyle;

/// Formatting attributes of a styled document.
///
/// Each accessor reads a single attribute so that one unreadable value does
/// not spoil the others. `Ok(None)` means the attribute is simply not set.
pub trait DocumentReader {
    /// Check if the document defines a named style.
    fn has_style(&self, style: NamedStyle) -> bool;

    /// Typeface of a named style.
    ///
    /// For [`NamedStyle::Normal`] this falls back to the document defaults.
    fn font_name(&self, style: NamedStyle) -> Result<Option<String>>;

    /// Font size of a named style in points.
    ///
    /// For [`NamedStyle::Normal`] this falls back to the document defaults.
    fn font_size(&self, style: NamedStyle) -> Result<Option<f32>>;

    /// Margins of the first section, in inches.
    fn page_margins(&self) -> Result<Option<PageMargins>>;
}
