//! Table rendering.

use crate::model::{Alignment, RgbColor, StyleRules, Table};

use super::writer::{StyledCell, StyledTable, TableBorder};

/// Background fill of the header row.
pub const HEADER_SHADING: RgbColor = RgbColor::new(0xE6, 0xE6, 0xE6);

/// Lay out a parsed table as a rectangular grid.
///
/// Short rows are padded with empty cells up to the widest row. The first
/// row is the header: bold body font on a grey fill. Every cell is centered.
/// Returns `None` for a table without rows.
pub fn build_table(table: &Table, rules: &StyleRules) -> Option<StyledTable> {
    if table.is_empty() {
        return None;
    }

    let body_font = &rules.body.font;
    let header_font = body_font.clone().bold();

    let rows = table
        .padded_rows()
        .into_iter()
        .enumerate()
        .map(|(r, cells)| {
            cells
                .into_iter()
                .map(|text| {
                    let header = r == 0;
                    StyledCell {
                        text: text.to_string(),
                        font: if header {
                            header_font.clone()
                        } else {
                            body_font.clone()
                        },
                        alignment: Alignment::Center,
                        shading: header.then_some(HEADER_SHADING),
                    }
                })
                .collect()
        })
        .collect();

    Some(StyledTable {
        rows,
        border: TableBorder::Grid,
    })
}
