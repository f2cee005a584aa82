//! Rendering module: turns elements and style rules into formatting
//! instructions for a [`DocumentWriter`].

mod element;
mod result;
mod table;
mod writer;

pub use element::{
    horizontal_rule, ElementRenderer, BLOCK_INDENT, LIST_BULLET, TITLE_BOOST,
    TITLE_BOOST_THRESHOLD,
};
pub use result::RenderStats;
pub use table::{build_table, HEADER_SHADING};
pub use writer::{
    DocumentWriter, Instruction, InstructionLog, NamedStyle, ParagraphFormat, StyledCell,
    StyledParagraph, StyledRun, StyledTable, TableBorder,
};
