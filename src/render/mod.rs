//! HTML export path: escaping, markdown conversion, and the report document.

pub mod escape;
pub mod markdown;
pub mod report;

pub use escape::{escape_html, safe_href};
pub use markdown::{markdown_to_html, parse_blocks, Block, Inline};
pub use report::{render_brief_html, render_report_html};
