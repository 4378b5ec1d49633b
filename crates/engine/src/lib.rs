//! Decision logic of the relay: status catalog, response validation,
//! message formatting and change detection.

pub mod catalog;
pub mod detector;
pub mod formatter;
pub mod validator;

pub use detector::has_changed;
pub use formatter::{failure_message, format_record, format_status, parse_record};
pub use validator::extract_homeworks;
