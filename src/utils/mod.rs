pub mod formatter;
pub mod json;

pub use formatter::{RenderedResponse, ResponseRenderer};
pub use json::{JsonStyle, format_json};
