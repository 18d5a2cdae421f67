/*!
# Mailsift

A small service that extracts email addresses from the free-text column of a
spreadsheet and re-emits the spreadsheet with an added "Emails" column,
formatted for readability.

## Overview

One upload, one annotated download. The input spreadsheet (first sheet) is
loaded into an in-memory tabular dataset, the column holding descriptive
text is resolved from the caller's hint, every row is scanned for email-like
substrings, and the result is written out as a fresh XLSX workbook with the
match list in a wrapped, fixed-width "Emails" column.

## Architecture

The core is a synchronous pipeline invoked per request:

- **Loader** - Reads `.xlsx`/`.xls` (first sheet, via calamine) or `.csv`
  input into a `Dataset`; all cells are coerced to text, empty cells become
  absent values
- **Column Resolver** - Picks the column to scan: case-insensitive exact
  match on the requested name, then name hints ("organisation", "info",
  "description"), then the first column
- **Extraction & Annotation Engine** - Per-row regex scan, order-preserving
  de-duplication, newline-joined "Emails" column appended after all
  original columns
- **Document Writer** - Persists the annotated dataset with rust_xlsxwriter;
  a second best-effort pass applies wrap/top alignment and a fixed column
  width, downgrading failures to a warning

The HTTP layer (behind the `web` feature) is thin plumbing around that
pipeline: an upload form, a preview of the first 200 rows, and download and
reset endpoints. Every request gets its own output file name, so concurrent
uploads never race on a shared artifact.

## Modules

- **dataset**: Tabular dataset model (named columns of aligned text cells)
- **loader**: CSV/Excel import
- **resolver**: Text-column resolution
- **extractor**: Email pattern matching and de-duplication
- **engine**: Per-row annotation and the end-to-end `process` operation
- **writer**: XLSX export and the presentation pass
- **error**: Typed failure taxonomy
- **app**: Routing and handlers (requires the `web` feature)

## REST API Endpoints

- `GET /` - Upload form
- `POST /` - Process an uploaded spreadsheet, render a preview
- `GET /api/output/:filename` - JSON preview of an output artifact
- `GET /download/:filename` - Download an output artifact
- `GET /reset/:filename` - Delete an output artifact
*/

// Re-export all modules so they appear in the documentation
pub mod dataset;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod resolver;
pub mod writer;

#[cfg(feature = "web")]
pub mod app;

/// Re-export everything from these modules to make it easier to use
pub use dataset::*;
pub use engine::*;
pub use error::*;
pub use extractor::*;
pub use loader::*;
pub use resolver::*;
pub use writer::*;
