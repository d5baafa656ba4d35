//! Output formatting.

mod parsed;
mod summary;

pub use parsed::{format_inspection, format_inspection_json, format_parsed, format_parsed_json};
pub use summary::{format_report, format_report_json};
