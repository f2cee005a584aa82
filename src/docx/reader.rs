//! DOCX package reader.

use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::detect::has_zip_magic;
use crate::error::{Error, Result};
use crate::extract::DocumentReader;
use crate::model::PageMargins;
use crate::render::NamedStyle;

use super::units::{half_points_to_points, twips_to_inches};
use super::{DOCUMENT_PART, STYLES_PART};

/// Raw run properties of one style, kept as attribute text until asked for.
#[derive(Debug, Clone, Default)]
struct RunProperties {
    ascii: Option<String>,
    h_ansi: Option<String>,
    east_asia: Option<String>,
    size: Option<String>,
}

impl RunProperties {
    fn font_name(&self) -> Option<&str> {
        self.ascii
            .as_deref()
            .or(self.h_ansi.as_deref())
            .or(self.east_asia.as_deref())
    }
}

/// Parsed content of `word/styles.xml`.
#[derive(Debug, Clone, Default)]
struct StyleSheet {
    defaults: RunProperties,
    by_id: HashMap<String, RunProperties>,
    /// Lowercased `w:name` to style id
    names: HashMap<String, String>,
}

impl StyleSheet {
    fn lookup(&self, style: NamedStyle) -> Option<&RunProperties> {
        self.by_id.get(style.style_id()).or_else(|| {
            self.names
                .get(&style.display_name().to_lowercase())
                .and_then(|id| self.by_id.get(id))
        })
    }
}

/// Reads style and section formatting from a DOCX package.
///
/// The package is parsed once on open; accessors only convert the raw
/// attribute text they need.
#[derive(Debug, Clone)]
pub struct DocxReader {
    styles: StyleSheet,
    margins: Option<HashMap<String, String>>,
}

impl DocxReader {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }

    /// Read a DOCX package from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        if !has_zip_magic(&data) {
            return Err(Error::UnknownFormat);
        }
        let mut archive = ZipArchive::new(Cursor::new(data))?;

        let document = read_part(&mut archive, DOCUMENT_PART)?
            .ok_or_else(|| Error::MissingPart(DOCUMENT_PART.to_string()))?;
        let margins = parse_first_page_margins(&document)?;

        let styles = match read_part(&mut archive, STYLES_PART)? {
            Some(xml) => parse_styles_xml(&xml)?,
            None => {
                log::debug!("package has no {}", STYLES_PART);
                StyleSheet::default()
            }
        };

        Ok(Self { styles, margins })
    }

    fn run_properties(&self, style: NamedStyle) -> Option<&RunProperties> {
        self.styles.lookup(style)
    }
}

impl DocumentReader for DocxReader {
    fn has_style(&self, style: NamedStyle) -> bool {
        self.run_properties(style).is_some()
    }

    fn font_name(&self, style: NamedStyle) -> Result<Option<String>> {
        let name = self
            .run_properties(style)
            .and_then(RunProperties::font_name)
            .or_else(|| match style {
                NamedStyle::Normal => self.styles.defaults.font_name(),
                _ => None,
            });
        Ok(name.map(str::to_string))
    }

    fn font_size(&self, style: NamedStyle) -> Result<Option<f32>> {
        let raw = self
            .run_properties(style)
            .and_then(|p| p.size.as_deref())
            .or_else(|| match style {
                NamedStyle::Normal => self.styles.defaults.size.as_deref(),
                _ => None,
            });

        match raw {
            Some(value) => {
                let half_points = parse_measure("w:sz", value)?;
                Ok(Some(half_points_to_points(half_points)))
            }
            None => Ok(None),
        }
    }

    fn page_margins(&self) -> Result<Option<PageMargins>> {
        let Some(ref attrs) = self.margins else {
            return Ok(None);
        };

        let mut margins = PageMargins::default();
        for (key, side) in [
            ("w:top", &mut margins.top),
            ("w:bottom", &mut margins.bottom),
            ("w:left", &mut margins.left),
            ("w:right", &mut margins.right),
        ] {
            if let Some(value) = attrs.get(key) {
                let twips = parse_measure(key, value)?;
                if twips < 0.0 {
                    return Err(Error::attribute(
                        key,
                        format!("negative margin {} is not supported", value),
                    ));
                }
                *side = twips_to_inches(twips);
            }
        }
        Ok(Some(margins))
    }
}

fn read_part(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(Some(content))
}

fn parse_measure(field: &str, value: &str) -> Result<f64> {
    let number: f64 = value
        .trim()
        .parse()
        .map_err(|_| Error::attribute(field, format!("'{}' is not a number", value)))?;
    if !number.is_finite() {
        return Err(Error::attribute(field, format!("'{}' is not finite", value)));
    }
    Ok(number)
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
}

/// Parse run properties of every style plus the document defaults.
fn parse_styles_xml(xml: &str) -> Result<StyleSheet> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut sheet = StyleSheet::default();
    let mut buf = Vec::new();

    let mut current_id: Option<String> = None;
    let mut current = RunProperties::default();
    let mut in_defaults = false;
    let mut in_rpr = false;

    loop {
        let event = reader.read_event_into(&mut buf)?;
        if matches!(event, Event::Eof) {
            break;
        }
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let empty = matches!(event, Event::Empty(_));
                match e.name().as_ref() {
                    b"w:style" if empty => {
                        if let Some(id) = attribute(e, b"w:styleId") {
                            sheet.by_id.insert(id, RunProperties::default());
                        }
                    }
                    b"w:style" => {
                        current_id = attribute(e, b"w:styleId");
                        current = RunProperties::default();
                    }
                    b"w:rPrDefault" if !empty => in_defaults = true,
                    b"w:rPr" if !empty => in_rpr = true,
                    b"w:name" => {
                        if let (Some(id), Some(name)) = (&current_id, attribute(e, b"w:val")) {
                            sheet.names.insert(name.to_lowercase(), id.clone());
                        }
                    }
                    b"w:rFonts" if in_rpr => {
                        let target = if in_defaults {
                            &mut sheet.defaults
                        } else {
                            &mut current
                        };
                        if let Some(v) = attribute(e, b"w:ascii") {
                            target.ascii = Some(v);
                        }
                        if let Some(v) = attribute(e, b"w:hAnsi") {
                            target.h_ansi = Some(v);
                        }
                        if let Some(v) = attribute(e, b"w:eastAsia") {
                            target.east_asia = Some(v);
                        }
                    }
                    b"w:sz" if in_rpr => {
                        let target = if in_defaults {
                            &mut sheet.defaults
                        } else {
                            &mut current
                        };
                        target.size = attribute(e, b"w:val");
                    }
                    _ => {}
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"w:style" => {
                    if let Some(id) = current_id.take() {
                        sheet.by_id.insert(id, std::mem::take(&mut current));
                    }
                }
                b"w:rPrDefault" => in_defaults = false,
                b"w:rPr" => in_rpr = false,
                _ => {}
            },
            _ => {}
        }
        drop(event);
        buf.clear();
    }

    log::debug!("parsed {} styles", sheet.by_id.len());
    Ok(sheet)
}

/// Attributes of the first `w:pgMar` in the main document part.
fn parse_first_page_margins(xml: &str) -> Result<Option<HashMap<String, String>>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) if e.name().as_ref() == b"w:pgMar" => {
                let attrs: HashMap<String, String> = e
                    .attributes()
                    .flatten()
                    .map(|a| {
                        (
                            String::from_utf8_lossy(a.key.as_ref()).to_string(),
                            String::from_utf8_lossy(&a.value).to_string(),
                        )
                    })
                    .collect();
                return Ok(Some(attrs));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}
