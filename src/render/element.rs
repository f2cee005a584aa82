//! Mapping of parsed elements onto formatting instructions.

use crate::error::Result;
use crate::model::{Category, Element, FontStyle, StyleRules};

use super::table::build_table;
use super::writer::{DocumentWriter, NamedStyle, ParagraphFormat, StyledParagraph, StyledRun};
use super::RenderStats;

/// Titles configured below this size are enlarged.
pub const TITLE_BOOST_THRESHOLD: u32 = 16;

/// Points added to a small title.
pub const TITLE_BOOST: u32 = 6;

/// Left indent of quotes and code blocks, in inches.
pub const BLOCK_INDENT: f32 = 0.5;

/// Prefix run of list items.
pub const LIST_BULLET: &str = "• ";

/// Text of a horizontal rule paragraph.
pub fn horizontal_rule() -> String {
    "─".repeat(30)
}

/// Renders elements against a fixed set of style rules.
///
/// The renderer holds no state besides the rules, so the same element
/// sequence always yields the same instructions.
pub struct ElementRenderer<'a> {
    rules: &'a StyleRules,
}

impl<'a> ElementRenderer<'a> {
    /// Create a renderer for the given rules.
    pub fn new(rules: &'a StyleRules) -> Self {
        Self { rules }
    }

    /// Get the style rules.
    pub fn rules(&self) -> &StyleRules {
        self.rules
    }

    /// Title font with the small-title boost applied.
    pub fn title_font(&self) -> FontStyle {
        let font = self.rules.title.font.clone();
        if font.size < TITLE_BOOST_THRESHOLD {
            let size = font.size + TITLE_BOOST;
            font.with_size(size)
        } else {
            font
        }
    }

    /// Font carried by a named style.
    pub fn style_font(&self, style: NamedStyle) -> FontStyle {
        match style {
            NamedStyle::Title => self.title_font(),
            other => self.rules.get(other.category()).font.clone(),
        }
    }

    /// Emit page margins and named style definitions.
    pub fn begin<W: DocumentWriter + ?Sized>(&self, writer: &mut W) -> Result<()> {
        writer.set_page_margins(&self.rules.page_margin)?;
        for style in NamedStyle::ALL {
            writer.define_style(style, &self.style_font(style))?;
        }
        Ok(())
    }

    /// Render every element in order and collect statistics.
    pub fn render_all<W: DocumentWriter + ?Sized>(
        &self,
        elements: &[Element],
        writer: &mut W,
    ) -> Result<RenderStats> {
        let mut stats = RenderStats::new();
        for element in elements {
            self.render(element, writer)?;
            stats.record(element);
        }
        log::debug!("rendered {} elements", stats.element_count());
        Ok(stats)
    }

    /// Render a single element.
    pub fn render<W: DocumentWriter + ?Sized>(&self, element: &Element, writer: &mut W) -> Result<()> {
        log::trace!("rendering {}", element.kind());
        match element {
            Element::Title(text) => {
                let format = self.format(Category::Title);
                let run = StyledRun::new(text.as_str(), self.title_font());
                writer.add_paragraph(StyledParagraph::new(
                    Some(NamedStyle::Title),
                    format,
                    vec![run],
                ))
            }
            Element::Heading1(text) => {
                self.heading(NamedStyle::Heading1, Category::Heading1, text, writer)
            }
            Element::Heading2(text) => {
                self.heading(NamedStyle::Heading2, Category::Heading2, text, writer)
            }
            Element::Heading3(text) => {
                self.heading(NamedStyle::Heading3, Category::Heading3, text, writer)
            }
            Element::Body(text) => {
                let style = &self.rules.body;
                let format = self
                    .format(Category::Body)
                    .with_first_line_indent(style.paragraph.indent_first_line);
                let run = StyledRun::new(text.as_str(), style.font.clone());
                writer.add_paragraph(StyledParagraph::new(None, format, vec![run]))
            }
            Element::List(text) => {
                let font = &self.rules.list.font;
                let runs = vec![
                    StyledRun::new(LIST_BULLET, font.clone()),
                    StyledRun::new(text.as_str(), font.clone()),
                ];
                writer.add_paragraph(StyledParagraph::new(None, self.format(Category::List), runs))
            }
            Element::Quote(text) => self.indented_block(Category::Quote, text, writer),
            Element::Code(text) => self.indented_block(Category::Code, text, writer),
            Element::HorizontalRule => writer.add_paragraph(StyledParagraph::plain(vec![
                StyledRun::plain(horizontal_rule()),
            ])),
            Element::Table(table) => match build_table(table, self.rules) {
                Some(styled) => writer.add_table(styled),
                None => {
                    log::debug!("skipping table without rows");
                    Ok(())
                }
            },
        }
    }

    fn format(&self, category: Category) -> ParagraphFormat {
        ParagraphFormat::from_style(&self.rules.get(category).paragraph)
    }

    fn heading<W: DocumentWriter + ?Sized>(
        &self,
        style: NamedStyle,
        category: Category,
        text: &str,
        writer: &mut W,
    ) -> Result<()> {
        let run = StyledRun::new(text, self.rules.get(category).font.clone());
        writer.add_paragraph(StyledParagraph::new(
            Some(style),
            self.format(category),
            vec![run],
        ))
    }

    fn indented_block<W: DocumentWriter + ?Sized>(
        &self,
        category: Category,
        text: &str,
        writer: &mut W,
    ) -> Result<()> {
        // The fixed indent replaces the configured one
        let format = self.format(category).with_left_indent(BLOCK_INDENT);
        let run = StyledRun::new(text, self.rules.get(category).font.clone());
        writer.add_paragraph(StyledParagraph::new(None, format, vec![run]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Alignment, Table};
    use crate::render::{Instruction, InstructionLog};

    fn render_one(rules: &StyleRules, element: Element) -> InstructionLog {
        let mut log = InstructionLog::new();
        ElementRenderer::new(rules).render(&element, &mut log).unwrap();
        log
    }

    fn only_paragraph(log: &InstructionLog) -> &StyledParagraph {
        assert_eq!(log.len(), 1);
        log.paragraphs().next().unwrap()
    }

    #[test]
    fn test_title_boost_small() {
        let mut rules = StyleRules::builtin();
        rules.title.font.size = 12;
        let log = render_one(&rules, Element::Title("T".into()));

        let p = only_paragraph(&log);
        assert_eq!(p.style, Some(NamedStyle::Title));
        assert_eq!(p.runs[0].font.as_ref().unwrap().size, 18);
    }

    #[test]
    fn test_title_boost_not_applied_at_threshold() {
        let mut rules = StyleRules::builtin();
        rules.title.font.size = 20;
        let log = render_one(&rules, Element::Title("T".into()));
        assert_eq!(only_paragraph(&log).runs[0].font.as_ref().unwrap().size, 20);

        rules.title.font.size = 16;
        let log = render_one(&rules, Element::Title("T".into()));
        assert_eq!(only_paragraph(&log).runs[0].font.as_ref().unwrap().size, 16);
    }

    #[test]
    fn test_headings_use_named_styles() {
        let rules = StyleRules::builtin();
        let log = render_one(&rules, Element::Heading2("Section".into()));
        let p = only_paragraph(&log);

        assert_eq!(p.style, Some(NamedStyle::Heading2));
        assert_eq!(p.text(), "Section");
        let font = p.runs[0].font.as_ref().unwrap();
        assert_eq!(font.name, "楷体");
        assert_eq!(font.size, 14);
        assert!(font.bold);
        assert_eq!(p.format.as_ref().unwrap().space_before, 250.0);
    }

    #[test]
    fn test_body_first_line_indent() {
        let rules = StyleRules::builtin();
        let log = render_one(&rules, Element::Body("text".into()));
        let format = only_paragraph(&log).format.clone().unwrap();

        assert_eq!(format.first_line_indent, 0.35);
        assert_eq!(format.alignment, Alignment::Justify);
    }

    #[test]
    fn test_only_body_gets_first_line_indent() {
        let mut rules = StyleRules::builtin();
        rules.list.paragraph.indent_first_line = 1.0;
        let log = render_one(&rules, Element::List("item".into()));
        let format = only_paragraph(&log).format.clone().unwrap();
        assert_eq!(format.first_line_indent, 0.0);
    }

    #[test]
    fn test_list_bullet_prefix() {
        let rules = StyleRules::builtin();
        let log = render_one(&rules, Element::List("item".into()));
        let p = only_paragraph(&log);

        assert_eq!(p.runs.len(), 2);
        assert_eq!(p.runs[0].text, LIST_BULLET);
        assert_eq!(p.text(), "• item");
        assert_eq!(p.runs[0].font, p.runs[1].font);
    }

    #[test]
    fn test_quote_and_code_indent_is_forced() {
        let mut rules = StyleRules::builtin();
        rules.quote.paragraph.indent_left = 2.0;
        rules.code.paragraph.indent_left = 0.0;

        for element in [Element::Quote("q".into()), Element::Code("c".into())] {
            let log = render_one(&rules, element);
            let format = only_paragraph(&log).format.clone().unwrap();
            assert_eq!(format.left_indent, BLOCK_INDENT);
        }
    }

    #[test]
    fn test_horizontal_rule_is_unstyled() {
        let log = render_one(&StyleRules::builtin(), Element::HorizontalRule);
        let p = only_paragraph(&log);

        assert_eq!(p.style, None);
        assert_eq!(p.format, None);
        assert_eq!(p.runs[0].font, None);
        assert_eq!(p.text().chars().count(), 30);
        assert!(p.text().chars().all(|c| c == '─'));
    }

    #[test]
    fn test_table_and_empty_table() {
        let rules = StyleRules::builtin();
        let log = render_one(&rules, Element::Table(Table::from_rows([["a"], ["b"]])));
        assert_eq!(log.tables().count(), 1);

        let log = render_one(&rules, Element::Table(Table::new()));
        assert!(log.is_empty());
    }

    #[test]
    fn test_begin_defines_styles() {
        let mut rules = StyleRules::builtin();
        rules.title.font.size = 10;
        let mut log = InstructionLog::new();
        ElementRenderer::new(&rules).begin(&mut log).unwrap();

        assert!(matches!(log.instructions()[0], Instruction::PageMargins { .. }));
        assert_eq!(log.len(), 1 + NamedStyle::ALL.len());
        assert_eq!(log.style_font(NamedStyle::Normal).unwrap().name, "宋体");
        assert_eq!(log.style_font(NamedStyle::Title).unwrap().size, 16);
        assert_eq!(log.style_font(NamedStyle::Heading1).unwrap().size, 16);
    }

    #[test]
    fn test_rendering_is_repeatable() {
        let rules = StyleRules::builtin();
        let elements = vec![
            Element::Title("T".into()),
            Element::Body("b".into()),
            Element::Table(Table::from_rows([["x", "y"]])),
        ];
        let renderer = ElementRenderer::new(&rules);

        let mut first = InstructionLog::new();
        let mut second = InstructionLog::new();
        let stats = renderer.render_all(&elements, &mut first).unwrap();
        renderer.render_all(&elements, &mut second).unwrap();

        assert_eq!(first, second);
        assert_eq!(stats.element_count(), 3);
    }
}
