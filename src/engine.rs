use std::path::{Path, PathBuf};

use crate::dataset::{Column, Dataset};
use crate::error::{FormattingWarning, ProcessError};
use crate::extractor;
use crate::loader;
use crate::resolver;
use crate::writer;

/// Name of the column appended by [`annotate`].
pub const EMAILS_COLUMN: &str = "Emails";

/// Outcome of a successful processing run.
#[derive(Debug)]
pub struct Annotated {
    pub output_path: PathBuf,
    pub resolved_column: String,
    /// Present when the presentation pass failed; the output document is
    /// still complete and correct, just unformatted.
    pub warning: Option<FormattingWarning>,
}

/// Build the output document: the dataset plus an "Emails" column.
///
/// Every row of the named column is scanned for email addresses. Matches
/// are de-duplicated preserving first-occurrence order and joined with
/// newlines; rows with an absent cell or no matches get an empty string.
/// The new column is appended after all original columns.
pub fn annotate(dataset: &Dataset, column_name: &str) -> Result<Dataset, ProcessError> {
    let column = dataset
        .column(column_name)
        .ok_or_else(|| ProcessError::Input(format!("column {column_name} does not exist")))?;

    let mut cells = Vec::with_capacity(column.cells.len());
    for cell in &column.cells {
        let matches = match cell {
            Some(text) => extractor::dedup_emails(extractor::find_emails(text)),
            None => Vec::new(),
        };
        // No matches still produce an empty string, not an absent cell.
        cells.push(Some(matches.join("\n")));
    }

    let mut output = dataset.clone();
    output.push_column(Column {
        name: EMAILS_COLUMN.to_string(),
        cells,
    })?;
    Ok(output)
}

/// Run the full pipeline for one input file
///
/// Loads the input, resolves the column to scan, annotates every row and
/// writes the output workbook to `output_path`, then applies the
/// best-effort presentation pass.
///
/// # Arguments
/// * `input_path` - Spreadsheet to read (`.xlsx`, `.xls` or `.csv`)
/// * `requested_column` - Name of the text column to scan; resolution falls
///   back to name hints and finally the first column
/// * `output_path` - Where to write the annotated `.xlsx` workbook; any
///   prior content is overwritten
///
/// # Returns
/// * `Result<Annotated, ProcessError>` - Output path, resolved column name
///   and an optional formatting warning
///
/// # Examples
/// ```no_run
/// use mailsift::engine::process;
///
/// match process("contacts.xlsx", "Description", "annotated.xlsx") {
///     Ok(result) => println!("Scanned column {}", result.resolved_column),
///     Err(e) => eprintln!("Error processing file: {}", e),
/// }
/// ```
pub fn process(
    input_path: impl AsRef<Path>,
    requested_column: &str,
    output_path: impl AsRef<Path>,
) -> Result<Annotated, ProcessError> {
    let output_path = output_path.as_ref();

    let dataset = loader::load_dataset(input_path)?;
    let resolved_column = resolver::resolve(&dataset, requested_column)?;
    let annotated = annotate(&dataset, &resolved_column)?;

    writer::write_dataset(&annotated, output_path)?;

    // The data is on disk; the presentation pass must not invalidate it.
    let warning = match writer::apply_emails_formatting(&annotated, output_path) {
        Ok(()) => None,
        Err(e) => {
            log::warn!(
                "could not set cell wrap formatting on {}: {e}",
                output_path.display()
            );
            Some(FormattingWarning(e.to_string()))
        }
    };

    Ok(Annotated {
        output_path: output_path.to_path_buf(),
        resolved_column,
        warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn text_column(cells: &[Option<&str>]) -> Dataset {
        let mut dataset = Dataset::new();
        dataset
            .push_column(Column {
                name: "Description".to_string(),
                cells: cells.iter().map(|c| c.map(str::to_string)).collect(),
            })
            .unwrap();
        dataset
    }

    fn emails_cells(dataset: &Dataset) -> &Vec<Option<String>> {
        &dataset.column(EMAILS_COLUMN).unwrap().cells
    }

    #[test]
    fn test_annotate_joins_deduplicated_matches_with_newlines() {
        let dataset = text_column(&[Some("a@x.com b@y.com a@x.com")]);
        let annotated = annotate(&dataset, "Description").unwrap();
        assert_eq!(
            emails_cells(&annotated)[0].as_deref(),
            Some("a@x.com\nb@y.com")
        );
    }

    #[test]
    fn test_annotate_absent_cell_yields_empty_string() {
        let dataset = text_column(&[None, Some("no address here")]);
        let annotated = annotate(&dataset, "Description").unwrap();
        assert_eq!(emails_cells(&annotated)[0].as_deref(), Some(""));
        assert_eq!(emails_cells(&annotated)[1].as_deref(), Some(""));
    }

    #[test]
    fn test_annotate_appends_after_original_columns() {
        let mut dataset = text_column(&[Some("a@x.com")]);
        dataset
            .push_column(Column {
                name: "City".to_string(),
                cells: vec![Some("Berlin".to_string())],
            })
            .unwrap();

        let annotated = annotate(&dataset, "Description").unwrap();
        assert_eq!(
            annotated.column_names(),
            vec!["Description", "City", EMAILS_COLUMN]
        );
        // Original columns are untouched.
        assert_eq!(annotated.column("City"), dataset.column("City"));
    }

    #[test]
    fn test_annotate_is_idempotent_per_row() {
        let dataset = text_column(&[Some("ping x@y.de, cc x@y.de"), None]);
        let first = annotate(&dataset, "Description").unwrap();
        let second = annotate(&dataset, "Description").unwrap();
        assert_eq!(emails_cells(&first), emails_cells(&second));
    }

    #[test]
    fn test_annotate_unknown_column_is_an_input_error() {
        let dataset = text_column(&[Some("a@x.com")]);
        let err = annotate(&dataset, "Missing").unwrap_err();
        assert!(matches!(err, ProcessError::Input(_)));
    }

    #[test]
    fn test_process_csv_to_annotated_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.csv");
        let output = dir.path().join("annotated.xlsx");

        let mut file = std::fs::File::create(&input).unwrap();
        file.write_all(b"Name,Organisation Info\nAcme,reach a@x.com or b@y.com\nGlobex,\n")
            .unwrap();

        let result = process(&input, "Description", &output).unwrap();
        assert_eq!(result.resolved_column, "Organisation Info");
        assert_eq!(result.output_path, output);
        assert!(result.warning.is_none());

        let reloaded = loader::from_excel(&output).unwrap();
        assert_eq!(
            reloaded.column_names(),
            vec!["Name", "Organisation Info", EMAILS_COLUMN]
        );
        assert_eq!(
            reloaded.column(EMAILS_COLUMN).unwrap().cells[0].as_deref(),
            Some("a@x.com\nb@y.com")
        );
    }

    #[test]
    fn test_process_rejects_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.csv");
        std::fs::File::create(&input).unwrap();

        let err = process(&input, "Description", dir.path().join("out.xlsx")).unwrap_err();
        assert!(matches!(err, ProcessError::Input(_)));
    }
}
