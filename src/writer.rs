use rust_xlsxwriter::{Format, FormatAlign, Workbook, XlsxError};
use std::path::Path;

use crate::dataset::Dataset;
use crate::engine::EMAILS_COLUMN;
use crate::error::ProcessError;

/// Display width given to the "Emails" column by the presentation pass.
pub const EMAILS_COLUMN_WIDTH: f64 = 30.0;

fn build_workbook(dataset: &Dataset, formatted: bool) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let wrap_format = Format::new().set_text_wrap().set_align(FormatAlign::Top);

    for (c, column) in dataset.columns.iter().enumerate() {
        let col = c as u16;
        let format_cells = formatted && column.name == EMAILS_COLUMN;

        if format_cells {
            worksheet.write_string_with_format(0, col, column.name.as_str(), &wrap_format)?;
        } else {
            worksheet.write_string(0, col, column.name.as_str())?;
        }

        for (r, cell) in column.cells.iter().enumerate() {
            let row = (r + 1) as u32;
            match cell {
                Some(value) if format_cells => {
                    worksheet.write_string_with_format(row, col, value.as_str(), &wrap_format)?;
                }
                Some(value) => {
                    worksheet.write_string(row, col, value.as_str())?;
                }
                None => {}
            }
        }

        if format_cells {
            worksheet.set_column_width(col, EMAILS_COLUMN_WIDTH)?;
        }
    }

    Ok(workbook)
}

/// Write the output document to an XLSX workbook
///
/// This function persists the dataset to the given path, one worksheet,
/// header row first. Absent cells are left blank. Any prior content at the
/// path is overwritten; the write is not atomic.
///
/// # Arguments
/// * `dataset` - The dataset to persist
/// * `filepath` - Destination path for the workbook
///
/// # Returns
/// * `Result<(), ProcessError>` - Ok on success, a storage error otherwise
///
/// # Examples
/// ```no_run
/// use mailsift::dataset::Dataset;
/// use mailsift::writer::write_dataset;
///
/// let dataset = Dataset::new();
/// if let Err(e) = write_dataset(&dataset, "out.xlsx") {
///     eprintln!("Failed to write workbook: {}", e);
/// }
/// ```
pub fn write_dataset(dataset: &Dataset, filepath: impl AsRef<Path>) -> Result<(), ProcessError> {
    let path = filepath.as_ref();
    let mut workbook =
        build_workbook(dataset, false).map_err(|e| ProcessError::Storage(e.to_string()))?;
    workbook
        .save(path)
        .map_err(|e| ProcessError::Storage(format!("could not write {}: {e}", path.display())))
}

/// Presentation pass over an already written workbook.
///
/// Rewrites the document with wrap-enabled, top-aligned formatting on every
/// non-absent "Emails" cell, header included, and the fixed column width.
/// On failure the unformatted document from [`write_dataset`] is left as the
/// valid output, so the caller downgrades the error to a warning.
pub fn apply_emails_formatting(
    dataset: &Dataset,
    filepath: impl AsRef<Path>,
) -> Result<(), XlsxError> {
    let mut workbook = build_workbook(dataset, true)?;
    workbook.save(filepath.as_ref())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Column;
    use crate::loader;

    fn annotated_dataset() -> Dataset {
        let mut dataset = Dataset::new();
        dataset
            .push_column(Column {
                name: "Name".to_string(),
                cells: vec![Some("Acme".to_string()), None],
            })
            .unwrap();
        dataset
            .push_column(Column {
                name: EMAILS_COLUMN.to_string(),
                cells: vec![Some("a@x.com\nb@y.com".to_string()), Some(String::new())],
            })
            .unwrap();
        dataset
    }

    #[test]
    fn test_written_workbook_reopens_with_same_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let dataset = annotated_dataset();

        write_dataset(&dataset, &path).unwrap();

        let reloaded = loader::from_excel(&path).unwrap();
        assert_eq!(reloaded.column_names(), vec!["Name", EMAILS_COLUMN]);
        let emails = reloaded.column(EMAILS_COLUMN).unwrap();
        assert_eq!(emails.cells[0].as_deref(), Some("a@x.com\nb@y.com"));
    }

    #[test]
    fn test_formatting_pass_keeps_cell_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let dataset = annotated_dataset();

        write_dataset(&dataset, &path).unwrap();
        apply_emails_formatting(&dataset, &path).unwrap();

        let reloaded = loader::from_excel(&path).unwrap();
        let emails = reloaded.column(EMAILS_COLUMN).unwrap();
        assert_eq!(emails.cells[0].as_deref(), Some("a@x.com\nb@y.com"));
    }

    #[test]
    fn test_unwritable_path_is_a_storage_error() {
        let dataset = annotated_dataset();
        let err = write_dataset(&dataset, "no_such_dir/out.xlsx").unwrap_err();
        assert!(matches!(err, ProcessError::Storage(_)));
    }
}
