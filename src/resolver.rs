use crate::dataset::Dataset;
use crate::error::ProcessError;

/// Column scanned when the caller does not name one.
pub const DEFAULT_TEXT_COLUMN: &str = "Description";

// Checked one category at a time over all columns; earlier categories win.
const COLUMN_NAME_HINTS: [&str; 3] = ["organisation", "info", "description"];

/// Pick the column that holds the descriptive text to scan.
///
/// Resolution runs in priority order:
/// 1. A column whose name equals `requested_name` case-insensitively.
/// 2. A column whose name contains `"organisation"`, then `"info"`, then
///    `"description"` (case-insensitively); each hint is tried against every
///    column before the next hint is considered.
/// 3. The first column, whatever it is called.
///
/// The returned name is the column's canonical name and always exists in the
/// dataset. A dataset with no columns at all is an input error.
pub fn resolve(dataset: &Dataset, requested_name: &str) -> Result<String, ProcessError> {
    if dataset.columns.is_empty() {
        return Err(ProcessError::Input("dataset has no columns".to_string()));
    }

    let wanted = requested_name.to_lowercase();
    for column in &dataset.columns {
        if column.name.to_lowercase() == wanted {
            return Ok(column.name.clone());
        }
    }

    for hint in COLUMN_NAME_HINTS {
        for column in &dataset.columns {
            if column.name.to_lowercase().contains(hint) {
                return Ok(column.name.clone());
            }
        }
    }

    Ok(dataset.columns[0].name.clone())
}
