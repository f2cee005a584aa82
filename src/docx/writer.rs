//! DOCX package writer built on `docx-rs`.

use std::borrow::Cow;
use std::io::Cursor;

use chrono::{DateTime, SecondsFormat, Utc};
use docx_rs::{
    AlignmentType, BreakType, Docx, LineSpacing, PageMargin, Paragraph, Run, RunFonts, Shading,
    SpecialIndentType, Style, StyleType, Table, TableCell, TableRow, WidthType,
};

use crate::error::{Error, Result};
use crate::model::{Alignment, FontStyle, PageMargins};
use crate::render::{
    DocumentWriter, NamedStyle, ParagraphFormat, StyledCell, StyledParagraph, StyledRun,
    StyledTable, TableBorder,
};

use super::units::{
    inches_to_twips, line_spacing_to_auto, points_to_half_points, points_to_twentieths,
};

/// Letter page size in twips.
const PAGE_WIDTH: i64 = 12240;
const PAGE_HEIGHT: i64 = 15840;

/// One block of the document body, in input order.
#[derive(Debug)]
enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

/// Builds a DOCX package in memory.
///
/// Paragraphs and tables are converted to `docx-rs` values as they arrive;
/// the package is only assembled by [`DocxWriter::finish`].
///
/// # Example
///
/// ```
/// use docforge::docx::DocxWriter;
/// use docforge::render::{DocumentWriter, StyledParagraph, StyledRun};
///
/// let mut writer = DocxWriter::new();
/// writer
///     .add_paragraph(StyledParagraph::plain(vec![StyledRun::plain("Hello")]))
///     .unwrap();
/// let bytes = writer.finish().unwrap();
/// assert!(docforge::detect::is_docx_bytes(&bytes));
/// ```
#[derive(Debug)]
pub struct DocxWriter {
    body: Vec<Block>,
    styles: Vec<(NamedStyle, FontStyle)>,
    margins: PageMargins,
    title: Option<String>,
    created: DateTime<Utc>,
}

impl DocxWriter {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            body: Vec::new(),
            styles: Vec::new(),
            margins: PageMargins::default(),
            title: None,
            created: Utc::now(),
        }
    }

    /// Set the creation timestamp written to the document properties.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// Text of the first title paragraph, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Encode the package.
    pub fn finish(self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.into_docx()
            .build()
            .pack(&mut buffer)
            .map_err(|e| Error::Render(format!("cannot encode DOCX package: {}", e)))?;

        let bytes = buffer.into_inner();
        log::debug!("encoded DOCX package ({} bytes)", bytes.len());
        Ok(bytes)
    }

    fn into_docx(self) -> Docx {
        let m = &self.margins;
        let created = self.created.to_rfc3339_opts(SecondsFormat::Secs, true);

        let mut docx = Docx::new()
            .page_size(PAGE_WIDTH as _, PAGE_HEIGHT as _)
            .page_margin(
                PageMargin::new()
                    .top(inches_to_twips(m.top) as _)
                    .right(inches_to_twips(m.right) as _)
                    .bottom(inches_to_twips(m.bottom) as _)
                    .left(inches_to_twips(m.left) as _),
            )
            .created_at(&created);

        // Document defaults follow the default paragraph style
        if let Some(normal) = style_font(&self.styles, NamedStyle::Normal) {
            docx = docx
                .default_fonts(run_fonts(&normal.name))
                .default_size(points_to_half_points(normal.size) as usize);
        }

        for style in NamedStyle::ALL {
            docx = docx.add_style(named_style(style, style_font(&self.styles, style)));
        }

        for block in self.body {
            docx = match block {
                Block::Paragraph(p) => docx.add_paragraph(p),
                Block::Table(t) => docx.add_table(t),
            };
        }
        docx
    }

    fn text_width(&self) -> i64 {
        PAGE_WIDTH - inches_to_twips(self.margins.left) - inches_to_twips(self.margins.right)
    }
}

impl Default for DocxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentWriter for DocxWriter {
    fn set_page_margins(&mut self, margins: &PageMargins) -> Result<()> {
        self.margins = *margins;
        Ok(())
    }

    fn define_style(&mut self, style: NamedStyle, font: &FontStyle) -> Result<()> {
        match self.styles.iter_mut().find(|(s, _)| *s == style) {
            Some(entry) => entry.1 = font.clone(),
            None => self.styles.push((style, font.clone())),
        }
        Ok(())
    }

    fn add_paragraph(&mut self, paragraph: StyledParagraph) -> Result<()> {
        if paragraph.style == Some(NamedStyle::Title) && self.title.is_none() {
            self.title = Some(paragraph.text());
        }
        self.body.push(Block::Paragraph(paragraph_value(&paragraph)));
        Ok(())
    }

    fn add_table(&mut self, table: StyledTable) -> Result<()> {
        let value = table_value(&table, self.text_width());
        self.body.push(Block::Table(value));
        Ok(())
    }
}

fn style_font(styles: &[(NamedStyle, FontStyle)], style: NamedStyle) -> Option<&FontStyle> {
    styles.iter().find(|(s, _)| *s == style).map(|(_, font)| font)
}

fn named_style(style: NamedStyle, font: Option<&FontStyle>) -> Style {
    let mut value = Style::new(style.style_id(), StyleType::Paragraph).name(style.display_name());
    if style != NamedStyle::Normal {
        value = value.based_on("Normal").next("Normal");
    }
    if let Some(level) = style.outline_level() {
        value = value.outline_lvl(level as usize);
    }
    let Some(font) = font else {
        return value;
    };

    value = value
        .fonts(run_fonts(&font.name))
        .size(points_to_half_points(font.size) as usize);
    if font.bold {
        value = value.bold();
    }
    if font.italic {
        value = value.italic();
    }
    if let Some(color) = font.color {
        value = value.color(color.hex());
    }
    value
}

fn paragraph_value(paragraph: &StyledParagraph) -> Paragraph {
    let mut value = Paragraph::new();
    if let Some(style) = paragraph.style {
        value = value.style(style.style_id());
    }
    if let Some(ref format) = paragraph.format {
        value = apply_format(value, format);
    }
    for run in &paragraph.runs {
        value = value.add_run(run_value(run));
    }
    value
}

fn apply_format(paragraph: Paragraph, format: &ParagraphFormat) -> Paragraph {
    let spacing = LineSpacing::new()
        .before(points_to_twentieths(format.space_before) as _)
        .after(points_to_twentieths(format.space_after) as _)
        .line(line_spacing_to_auto(format.line_spacing) as _);
    let mut paragraph = paragraph
        .align(alignment_type(format.alignment))
        .line_spacing(spacing);

    let left = inches_to_twips(format.left_indent);
    let first_line = inches_to_twips(format.first_line_indent);
    if left != 0 || first_line != 0 {
        let special = (first_line != 0).then(|| SpecialIndentType::FirstLine(first_line as _));
        paragraph = paragraph.indent(Some(left as _), special, None, None);
    }
    paragraph
}

fn run_value(run: &StyledRun) -> Run {
    let mut value = Run::new();
    for (i, line) in xml_text(&run.text).split('\n').enumerate() {
        if i > 0 {
            value = value.add_break(BreakType::TextWrapping);
        }
        value = value.add_text(line);
    }

    let Some(ref font) = run.font else {
        return value;
    };
    value = value
        .fonts(run_fonts(&font.name))
        .size(points_to_half_points(font.size) as usize);
    if font.bold {
        value = value.bold();
    }
    if font.italic {
        value = value.italic();
    }
    if let Some(color) = font.color {
        value = value.color(color.hex());
    }
    value
}

fn table_value(table: &StyledTable, text_width: i64) -> Table {
    let columns = table.column_count().max(1);
    let column_width = (text_width / columns as i64).max(1) as usize;

    let rows = table
        .rows
        .iter()
        .map(|row| {
            TableRow::new(
                row.iter()
                    .map(|cell| cell_value(cell, column_width))
                    .collect(),
            )
        })
        .collect();

    // docx-rs tables carry single-line borders on every edge by default
    match table.border {
        TableBorder::Grid => Table::new(rows).set_grid(vec![column_width; columns]),
    }
}

fn cell_value(cell: &StyledCell, width: usize) -> TableCell {
    let mut paragraph = Paragraph::new().align(alignment_type(cell.alignment));
    if !cell.text.is_empty() {
        paragraph = paragraph.add_run(run_value(&StyledRun::new(
            cell.text.as_str(),
            cell.font.clone(),
        )));
    }

    let mut value = TableCell::new()
        .add_paragraph(paragraph)
        .width(width, WidthType::Dxa);
    if let Some(fill) = cell.shading {
        value = value.shading(Shading::new().fill(fill.hex()));
    }
    value
}

fn run_fonts(name: &str) -> RunFonts {
    let name = xml_text(name);
    RunFonts::new()
        .ascii(&*name)
        .hi_ansi(&*name)
        .east_asia(&*name)
        .cs(&*name)
}

fn alignment_type(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Left => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
        Alignment::Right => AlignmentType::Right,
        Alignment::Justify => AlignmentType::Both,
        Alignment::Distribute => AlignmentType::Distribute,
    }
}

/// Drop characters XML 1.0 cannot carry. Tabs and newlines are kept.
fn xml_text(text: &str) -> Cow<'_, str> {
    if text.chars().any(is_forbidden_char) {
        Cow::Owned(text.chars().filter(|&c| !is_forbidden_char(c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

fn is_forbidden_char(c: char) -> bool {
    (c.is_control() && !matches!(c, '\t' | '\n' | '\r')) || matches!(c, '\u{FFFE}' | '\u{FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::{DOCUMENT_PART, STYLES_PART};
    use crate::model::RgbColor;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    fn single_run(text: &str) -> Vec<u8> {
        let mut writer = DocxWriter::new();
        writer
            .add_paragraph(StyledParagraph::plain(vec![StyledRun::plain(text)]))
            .unwrap();
        writer.finish().unwrap()
    }

    #[test]
    fn test_package_parts() {
        let bytes = DocxWriter::new().finish().unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();

        for part in ["[Content_Types].xml", DOCUMENT_PART, STYLES_PART] {
            assert!(names.contains(&part), "missing {}", part);
        }
    }

    #[test]
    fn test_paragraph_encoding() {
        let mut writer = DocxWriter::new();
        let format = ParagraphFormat {
            alignment: Alignment::Justify,
            line_spacing: 1.5,
            space_before: 0.0,
            space_after: 12.0,
            first_line_indent: 0.35,
            left_indent: 0.0,
        };
        let mut font = FontStyle::new("Times & Co", 12).bold();
        font.color = Some(RgbColor::new(0x12, 0x34, 0x56));
        writer
            .add_paragraph(StyledParagraph::new(
                None,
                format,
                vec![StyledRun::new("a < b", font)],
            ))
            .unwrap();

        let xml = read_part(&writer.finish().unwrap(), DOCUMENT_PART);
        assert!(xml.contains(r#"w:after="240""#));
        assert!(xml.contains(r#"w:line="360""#));
        assert!(xml.contains(r#"w:firstLine="504""#));
        assert!(xml.contains(r#"w:val="both""#));
        assert!(xml.contains(r#"w:ascii="Times &amp; Co""#));
        assert!(xml.contains(r#"w:val="123456""#));
        assert!(xml.contains(r#"w:val="24""#));
        assert!(xml.contains("a &lt; b"));
    }

    #[test]
    fn test_line_breaks_in_runs() {
        let xml = read_part(&single_run("one\ntwo"), DOCUMENT_PART);
        assert!(xml.contains("<w:br"));
        assert!(xml.contains(">one<"));
        assert!(xml.contains(">two<"));
    }

    #[test]
    fn test_control_characters_are_dropped() {
        let xml = read_part(&single_run("a\u{1}b\u{c}c\td"), DOCUMENT_PART);
        assert!(!xml.contains('\u{1}'));
        assert!(!xml.contains('\u{c}'));
        assert!(xml.contains("abc"));
    }

    #[test]
    fn test_xml_text() {
        assert!(matches!(xml_text("plain\ttext"), Cow::Borrowed(_)));
        assert_eq!(xml_text("x\u{0}y\u{1b}z\u{FFFF}"), "xyz");
    }

    #[test]
    fn test_page_margins() {
        let mut writer = DocxWriter::new();
        writer
            .set_page_margins(&PageMargins {
                top: 0.5,
                bottom: 1.0,
                left: 1.25,
                right: 0.75,
            })
            .unwrap();

        let xml = read_part(&writer.finish().unwrap(), DOCUMENT_PART);
        assert!(xml.contains(r#"w:top="720""#));
        assert!(xml.contains(r#"w:right="1080""#));
        assert!(xml.contains(r#"w:bottom="1440""#));
        assert!(xml.contains(r#"w:left="1800""#));
    }

    #[test]
    fn test_style_definitions() {
        let mut writer = DocxWriter::new();
        writer
            .define_style(NamedStyle::Normal, &FontStyle::new("宋体", 12))
            .unwrap();
        writer
            .define_style(NamedStyle::Heading1, &FontStyle::new("黑体", 16).bold())
            .unwrap();
        writer
            .define_style(NamedStyle::Heading1, &FontStyle::new("黑体", 18).bold())
            .unwrap();

        let xml = read_part(&writer.finish().unwrap(), STYLES_PART);
        assert!(xml.contains(r#"w:styleId="Normal""#));
        assert!(xml.contains(r#"w:val="heading 1""#));
        assert!(xml.contains(r#"w:ascii="黑体""#));
        assert!(xml.contains(r#"w:val="36""#));
        // Styles are emitted even without a font definition
        assert!(xml.contains(r#"w:styleId="Heading3""#));
    }

    #[test]
    fn test_table_encoding() {
        let cell = |text: &str, shaded: bool| StyledCell {
            text: text.to_string(),
            font: FontStyle::default(),
            alignment: Alignment::Center,
            shading: shaded.then_some(RgbColor::new(0xE6, 0xE6, 0xE6)),
        };
        let table = StyledTable {
            rows: vec![
                vec![cell("h1", true), cell("h2", true)],
                vec![cell("v", false), cell("", false)],
            ],
            border: TableBorder::Grid,
        };

        let mut writer = DocxWriter::new();
        writer.add_table(table).unwrap();
        let xml = read_part(&writer.finish().unwrap(), DOCUMENT_PART);

        assert_eq!(xml.matches("</w:tr>").count(), 2);
        assert_eq!(xml.matches("</w:tc>").count(), 4);
        assert_eq!(xml.matches("<w:gridCol ").count(), 2);
        assert_eq!(xml.matches(r#"w:fill="E6E6E6""#).count(), 2);
        assert!(xml.contains("w:insideV"));
    }

    #[test]
    fn test_created_timestamp() {
        let created = DateTime::parse_from_rfc3339("2024-03-01T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let bytes = DocxWriter::new().with_created(created).finish().unwrap();

        let xml = read_part(&bytes, "docProps/core.xml");
        assert!(xml.contains("2024-03-01T08:30:00Z"));
    }

    #[test]
    fn test_title_recorded() {
        let mut writer = DocxWriter::new();
        writer
            .add_paragraph(StyledParagraph::new(
                Some(NamedStyle::Title),
                ParagraphFormat::from_style(&Default::default()),
                vec![StyledRun::plain("Annual Report")],
            ))
            .unwrap();
        assert_eq!(writer.title(), Some("Annual Report"));

        let xml = read_part(&writer.finish().unwrap(), DOCUMENT_PART);
        assert!(xml.contains(r#"w:val="Title""#));
    }
}
