//! Style-rule construction: built-in defaults, validated overrides and the
//! JSON exchange format.
//!
//! ```
//! use docforge::rules;
//!
//! let rules = rules::from_json(r#"{"body": {"font": {"size": 11}}}"#)?;
//! assert_eq!(rules.body.font.size, 11);
//! assert_eq!(rules.heading1.font.size, 16);
//! # Ok::<(), docforge::Error>(())
//! ```

mod json;
mod overrides;

pub use json::{from_json, from_json_over, load, save, to_json, JsonFormat};
pub use overrides::{
    CategoryOverride, FontOverride, MarginOverride, ParagraphOverride, StyleOverrides,
};
