use serde::{Deserialize, Serialize};

use crate::error::ProcessError;

/// A named column of cells. Absent cells are `None`; everything else is
/// carried as text.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Option<String>>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            cells: Vec::new(),
        }
    }
}

/// An ordered sequence of named columns aligned by row index.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<Column>,
}

impl Dataset {
    pub fn new() -> Self {
        Dataset {
            columns: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.cells.len()).unwrap_or(0)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Append a column. Columns must stay aligned by row index.
    pub fn push_column(&mut self, column: Column) -> Result<(), ProcessError> {
        if !self.columns.is_empty() && column.cells.len() != self.row_count() {
            return Err(ProcessError::Input(format!(
                "column {} has {} rows, expected {}",
                column.name,
                column.cells.len(),
                self.row_count()
            )));
        }
        self.columns.push(column);
        Ok(())
    }
}
