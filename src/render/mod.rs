//! Rendering module for turning analysis results into JSON or text reports.

mod json;
mod options;
mod text;

pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;
pub use text::{bar_chart, page_counts_to_text, to_text};
