//! Parsing options and configuration.

/// Options for parsing markup text.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Group pipe-delimited lines into tables
    pub detect_tables: bool,

    /// Apply Unicode NFC normalization to classified lines and table cells;
    /// fenced code is never normalized
    pub normalize_unicode: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable table detection.
    pub fn with_tables(mut self, detect: bool) -> Self {
        self.detect_tables = detect;
        self
    }

    /// Treat pipe-delimited lines as body paragraphs.
    pub fn without_tables(mut self) -> Self {
        self.detect_tables = false;
        self
    }

    /// Enable or disable Unicode normalization.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            detect_tables: true,
            normalize_unicode: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new()
            .without_tables()
            .with_normalization(false);

        assert!(!options.detect_tables);
        assert!(!options.normalize_unicode);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert!(options.detect_tables);
        assert!(options.normalize_unicode);
    }
}
