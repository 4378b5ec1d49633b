use serde_json::Value;

use relay_common::error::RelayError;
use relay_common::types::HomeworkRecord;

use crate::catalog;

const NAME_KEY: &str = "homework_name";
const STATUS_KEY: &str = "status";

/// Validate a raw homework record against the catalog.
pub fn parse_record(raw: &Value) -> Result<HomeworkRecord, RelayError> {
    let name = string_key(raw, NAME_KEY)?;
    let code = string_key(raw, STATUS_KEY)?;

    let status = catalog::lookup(code).ok_or_else(|| {
        tracing::error!(status = code, "Undocumented homework status in API response");
        RelayError::UnknownStatus(code.to_string())
    })?;

    Ok(HomeworkRecord {
        name: name.to_string(),
        status,
    })
}

/// Build the user-facing message for a raw homework record.
pub fn format_status(raw: &Value) -> Result<String, RelayError> {
    parse_record(raw).map(|record| format_record(&record))
}

pub fn format_record(record: &HomeworkRecord) -> String {
    format!(
        "Changed review status for \"{}\". {}",
        record.name,
        catalog::verdict(record.status)
    )
}

/// Text of the notification sent when a cycle fails.
pub fn failure_message(error: &RelayError) -> String {
    format!("Program failure: {error}")
}

fn string_key<'a>(raw: &'a Value, key: &'static str) -> Result<&'a str, RelayError> {
    raw.get(key).and_then(Value::as_str).ok_or_else(|| {
        tracing::error!(key, "Expected key missing from homework record");
        RelayError::MissingKey(key)
    })
}
