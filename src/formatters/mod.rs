pub mod json;
pub mod json_compact;
pub mod text;

pub use json::JsonFormatter;
pub use json_compact::JsonCompactFormatter;
pub use text::{TextFormatter, TextVerbosity};
