pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::AppConfig;
pub use error::{Disposition, RelayError};
pub use types::{Cursor, HomeworkRecord, HomeworkStatus, PollResult, ReportState};
