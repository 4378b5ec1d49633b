use serde_json::Value;

use relay_common::error::RelayError;
use relay_common::types::PollResult;

const HOMEWORKS: &str = "homeworks";

/// Extract the homework records from a poll response.
///
/// Presence is checked before shape. An empty list is valid and means
/// nothing has been picked up for review yet.
pub fn extract_homeworks(result: &PollResult) -> Result<&[Value], RelayError> {
    let field = result.body().get(HOMEWORKS).ok_or_else(|| {
        tracing::error!(field = HOMEWORKS, "Field missing from API response");
        RelayError::MissingField(HOMEWORKS)
    })?;

    match field {
        Value::Array(items) => Ok(items.as_slice()),
        other => {
            let found = json_type_name(other);
            tracing::error!(field = HOMEWORKS, found, "Field is not a list");
            Err(RelayError::WrongShape {
                field: HOMEWORKS,
                found,
            })
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
