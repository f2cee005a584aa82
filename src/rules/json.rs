//! JSON exchange format for style rules.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::StyleRules;

use super::StyleOverrides;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize complete style rules.
pub fn to_json(rules: &StyleRules, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(rules)?,
        JsonFormat::Compact => serde_json::to_string(rules)?,
    };
    Ok(json)
}

/// Parse a full or partial style-rule document over the built-in defaults.
pub fn from_json(json: &str) -> Result<StyleRules> {
    from_json_over(json, StyleRules::builtin())
}

/// Parse a full or partial style-rule document over `base`.
pub fn from_json_over(json: &str, base: StyleRules) -> Result<StyleRules> {
    let overrides: StyleOverrides = serde_json::from_str(json)?;
    if overrides.is_empty() {
        log::debug!("style document overrides nothing, using base rules");
    }
    overrides.apply(base)
}

/// Read style rules from a JSON file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<StyleRules> {
    let json = fs::read_to_string(path.as_ref())?;
    from_json(&json)
}

/// Write style rules to a JSON file (pretty-printed).
pub fn save<P: AsRef<Path>>(path: P, rules: &StyleRules) -> Result<()> {
    let json = to_json(rules, JsonFormat::Pretty)?;
    fs::write(path.as_ref(), json)?;
    Ok(())
}
