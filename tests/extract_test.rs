//! Integration tests for style template extraction.

use std::fs;
use std::io::{Cursor, Write};

use docforge::{
    extract_styles, extract_styles_from_bytes, markdown_to_docx, rules, DocForge, ExtractWarning,
    PageMargins, StyleRules,
};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn custom_rules() -> StyleRules {
    let mut rules = StyleRules::builtin();
    rules.body.font.name = "Georgia".into();
    rules.body.font.size = 11;
    rules.heading1.font.name = "Arial".into();
    rules.heading1.font.size = 20;
    rules.heading2.font.name = "Arial".into();
    rules.heading2.font.size = 15;
    rules.heading3.font.name = "Verdana".into();
    rules.heading3.font.size = 13;
    rules.page_margin = PageMargins {
        top: 0.75,
        bottom: 0.75,
        left: 1.25,
        right: 1.25,
    };
    rules
}

/// Build a minimal package from `(name, content)` parts.
fn package(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in parts {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

const BARE_DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p/></w:body></w:document>"#;

#[test]
fn test_generate_then_extract_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("template.docx");

    let rules = custom_rules();
    let bytes = markdown_to_docx("# Template\n\n## Section\n\nBody.", Some(&rules)).unwrap();
    fs::write(&output, bytes).unwrap();

    let extraction = extract_styles(&output);
    assert!(extraction.is_complete(), "{:?}", extraction.warnings);

    let got = &extraction.rules;
    assert_eq!(got.body.font, rules.body.font);
    assert_eq!(got.heading1.font.name, "Arial");
    assert_eq!(got.heading1.font.size, 20);
    assert_eq!(got.heading2.font.size, 15);
    assert_eq!(got.heading3.font.name, "Verdana");
    assert_eq!(got.page_margin, rules.page_margin);
}

#[test]
fn test_extracted_rules_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("style.json");

    let bytes = markdown_to_docx("text", Some(&custom_rules())).unwrap();
    let extraction = extract_styles_from_bytes(&bytes);
    rules::save(&json, &extraction.rules).unwrap();

    let reloaded = rules::load(&json).unwrap();
    assert_eq!(reloaded, extraction.rules);

    // Non-ASCII font names stay readable in the file
    let text = fs::read_to_string(&json).unwrap();
    assert!(text.contains("黑体"));
}

#[test]
fn test_corrupt_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.docx");
    fs::write(&path, b"PK\x03\x04 definitely not a zip archive").unwrap();

    let extraction = extract_styles(&path);
    assert_eq!(extraction.rules, StyleRules::builtin());
    assert!(matches!(
        extraction.warnings.as_slice(),
        [ExtractWarning::Unreadable { .. }]
    ));
}

#[test]
fn test_package_without_styles_reports_each_missing_style() {
    let data = package(&[("word/document.xml", BARE_DOCUMENT)]);

    let extraction = extract_styles_from_bytes(&data);
    assert_eq!(extraction.rules, StyleRules::builtin());
    let missing: Vec<&str> = extraction
        .warnings
        .iter()
        .filter_map(|w| match w {
            ExtractWarning::MissingStyle { style } => Some(style.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(missing, vec!["Normal", "Heading1", "Heading2", "Heading3"]);
}

#[test]
fn test_normal_inherits_document_defaults() {
    let styles = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults><w:rPrDefault><w:rPr>
    <w:rFonts w:ascii="Cambria" w:hAnsi="Cambria"/><w:sz w:val="21"/>
  </w:rPr></w:rPrDefault></w:docDefaults>
  <w:style w:type="paragraph" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
  <w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/>
    <w:rPr><w:rFonts w:eastAsia="SimHei"/><w:sz w:val="36"/></w:rPr></w:style>
  <w:style w:type="paragraph" w:styleId="Custom2"><w:name w:val="heading 2"/>
    <w:rPr><w:sz w:val="29"/></w:rPr></w:style>
  <w:style w:type="paragraph" w:styleId="Heading3"><w:name w:val="heading 3"/></w:style>
</w:styles>"#;
    let data = package(&[
        ("word/document.xml", BARE_DOCUMENT),
        ("word/styles.xml", styles),
    ]);

    let extraction = extract_styles_from_bytes(&data);
    assert!(extraction.is_complete(), "{:?}", extraction.warnings);

    let rules = &extraction.rules;
    assert_eq!(rules.body.font.name, "Cambria");
    // 10.5pt is truncated
    assert_eq!(rules.body.font.size, 10);
    assert_eq!(rules.heading1.font.name, "SimHei");
    assert_eq!(rules.heading1.font.size, 18);
    // Found by display name
    assert_eq!(rules.heading2.font.size, 14);
    assert_eq!(rules.heading3, StyleRules::builtin().heading3);
}

#[test]
fn test_unreadable_attribute_keeps_default() {
    let styles = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:styleId="Normal"><w:rPr><w:sz w:val="big"/></w:rPr></w:style>
  <w:style w:type="paragraph" w:styleId="Heading1"/>
  <w:style w:type="paragraph" w:styleId="Heading2"/>
  <w:style w:type="paragraph" w:styleId="Heading3"/>
</w:styles>"#;
    let data = package(&[
        ("word/document.xml", BARE_DOCUMENT),
        ("word/styles.xml", styles),
    ]);

    let extraction = extract_styles_from_bytes(&data);
    assert_eq!(extraction.rules.body.font.size, 12);
    assert!(matches!(
        extraction.warnings.as_slice(),
        [ExtractWarning::Attribute { field, .. }] if field == "body.font.size"
    ));
}

#[test]
fn test_extract_over_configured_rules() {
    let mut base = StyleRules::builtin();
    base.code.font.name = "Menlo".into();
    let data = markdown_to_docx("x", Some(&custom_rules())).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.docx");
    fs::write(&path, data).unwrap();

    let extraction = DocForge::new().with_rules(base).extract_file(&path);
    assert_eq!(extraction.rules.code.font.name, "Menlo");
    assert_eq!(extraction.rules.body.font.name, "Georgia");
}
