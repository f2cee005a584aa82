//! Table types.

use serde::{Deserialize, Serialize};

/// Cell text of a pipe-delimited table.
///
/// Rows may have different lengths; consumers treat the widest row as the
/// column count and missing cells as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Rows of cell text, header first
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from rows of cell values.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (widest row).
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text, or `""` for a cell missing from a short row.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Rows padded to the full column count.
    pub fn padded_rows(&self) -> Vec<Vec<&str>> {
        let cols = self.column_count();
        (0..self.row_count())
            .map(|r| (0..cols).map(|c| self.cell(r, c)).collect())
            .collect()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = Table::new();
        assert!(table.is_empty());
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_ragged_rows_use_widest() {
        let table = Table::from_rows([vec!["Name", "Age", "City"], vec!["Alice"]]);

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.cell(1, 0), "Alice");
        assert_eq!(table.cell(1, 2), "");
        assert_eq!(table.cell(5, 0), "");
    }

    #[test]
    fn test_padded_rows() {
        let table = Table::from_rows([vec!["a"], vec!["b", "c"]]);
        assert_eq!(table.padded_rows(), vec![vec!["a", ""], vec!["b", "c"]]);
    }

    #[test]
    fn test_plain_text() {
        let table = Table::from_rows([["a", "b"], ["1", "2"]]);
        assert_eq!(table.plain_text(), "a\tb\n1\t2");
    }
}
