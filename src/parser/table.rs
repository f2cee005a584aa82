//! Pipe-delimited table rows.

/// Split a pipe-delimited line into trimmed cells.
///
/// One leading and one trailing pipe are treated as row delimiters, so
/// `| a | b |` and `a | b` both yield `["a", "b"]`.
pub fn split_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(|c| c.trim().to_string()).collect()
}

/// Check if a row is a header separator such as `---|:---:`.
///
/// Every cell must be non-empty and made only of hyphens and colons.
pub fn is_separator_row(cells: &[String]) -> bool {
    !cells.is_empty()
        && cells
            .iter()
            .all(|c| !c.is_empty() && c.chars().all(|ch| ch == '-' || ch == ':'))
}
