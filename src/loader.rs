use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

use crate::dataset::{Column, Dataset};
use crate::error::ProcessError;

/// Load a tabular dataset from a CSV file
///
/// This function imports a CSV file and converts it to a Dataset structure.
/// The first record is the header row; empty fields become absent cells.
///
/// # Arguments
/// * `filepath` - Path to the CSV file to load
///
/// # Returns
/// * `Result<Dataset, ProcessError>` - The loaded dataset or an input error
///
/// # Examples
/// ```no_run
/// use mailsift::loader::from_csv;
///
/// match from_csv("data.csv") {
///     Ok(dataset) => println!("Loaded {} rows", dataset.row_count()),
///     Err(e) => eprintln!("Error loading CSV: {}", e),
/// }
/// ```
pub fn from_csv(filepath: impl AsRef<Path>) -> Result<Dataset, ProcessError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(filepath)
        .map_err(|e| ProcessError::Input(format!("could not open CSV file: {e}")))?;

    let headers = reader
        .headers()
        .map_err(|e| ProcessError::Input(format!("could not read CSV headers: {e}")))?
        .clone();

    let mut columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if name.trim().is_empty() {
                Column::new(format!("Column {}", i + 1))
            } else {
                Column::new(name)
            }
        })
        .collect();

    if columns.is_empty() {
        return Err(ProcessError::Input("CSV file has no columns".to_string()));
    }

    for record in reader.records() {
        let record =
            record.map_err(|e| ProcessError::Input(format!("malformed CSV row: {e}")))?;
        for (i, column) in columns.iter_mut().enumerate() {
            // CSV has no null marker; an empty field is an absent cell.
            let field = record.get(i).filter(|f| !f.is_empty()).map(str::to_string);
            column.cells.push(field);
        }
    }

    Ok(Dataset { columns })
}

/// Load a tabular dataset from an Excel workbook
///
/// This function imports an Excel file (XLSX or XLS) and converts it to a
/// Dataset structure. Only the first sheet is read. The first row of the
/// used range is the header row; blank header cells get positional names.
/// Formula cells contribute their cached result, never the formula text.
///
/// # Arguments
/// * `filepath` - Path to the Excel file to load
///
/// # Returns
/// * `Result<Dataset, ProcessError>` - The loaded dataset or an input error
///
/// # Examples
/// ```no_run
/// use mailsift::loader::from_excel;
///
/// match from_excel("data.xlsx") {
///     Ok(dataset) => println!("Loaded {} rows", dataset.row_count()),
///     Err(e) => eprintln!("Error loading Excel: {}", e),
/// }
/// ```
pub fn from_excel(filepath: impl AsRef<Path>) -> Result<Dataset, ProcessError> {
    let mut workbook = open_workbook_auto(filepath)
        .map_err(|e| ProcessError::Input(format!("could not open workbook: {e}")))?;

    // First sheet only
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ProcessError::Input("no sheets found in Excel file".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ProcessError::Input(format!("could not read sheet {sheet_name}: {e}")))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| ProcessError::Input("sheet has no columns".to_string()))?;

    let mut columns: Vec<Column> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| Column::new(header_name(cell, i)))
        .collect();

    if columns.is_empty() {
        return Err(ProcessError::Input("sheet has no columns".to_string()));
    }

    for row in rows {
        for (i, column) in columns.iter_mut().enumerate() {
            column.cells.push(row.get(i).and_then(cell_text));
        }
    }

    Ok(Dataset { columns })
}

fn header_name(cell: &Data, index: usize) -> String {
    match cell {
        Data::Empty => format!("Column {}", index + 1),
        Data::String(s) if s.trim().is_empty() => format!("Column {}", index + 1),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// Empty cells become absent values; everything else is carried in its
// textual form.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Detect file type and load the appropriate format
///
/// This function examines the file extension and calls the appropriate
/// loader for CSV or Excel files.
///
/// # Arguments
/// * `filepath` - Path to the file to load
///
/// # Returns
/// * `Result<Dataset, ProcessError>` - The loaded dataset or an input error
///
/// # Examples
/// ```no_run
/// use mailsift::loader::load_dataset;
///
/// match load_dataset("data.xlsx") {
///     Ok(dataset) => println!("Loaded {} columns", dataset.columns.len()),
///     Err(e) => eprintln!("Error loading file: {}", e),
/// }
/// ```
pub fn load_dataset(filepath: impl AsRef<Path>) -> Result<Dataset, ProcessError> {
    let path = filepath.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match extension.as_deref() {
        Some("csv") => from_csv(path),
        Some("xlsx") | Some("xls") => from_excel(path),
        Some(ext) => Err(ProcessError::Input(format!(
            "unsupported file extension: {ext}"
        ))),
        None => Err(ProcessError::Input("file has no extension".to_string())),
    }
}
