//! Change detection between the latest formatted status and the last one
//! delivered.
//!
//! Only the first record of each poll is tracked; the API returns the most
//! recent submission first.

use relay_common::types::ReportState;

/// Whether `current` differs from the previously notified state.
pub fn has_changed(current: &ReportState, previous: &ReportState) -> bool {
    current != previous
}
