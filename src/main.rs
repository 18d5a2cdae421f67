#![cfg(not(tarpaulin_include))]

use std::env;
use std::path::{Path, PathBuf};

use mailsift::engine;
use mailsift::resolver::DEFAULT_TEXT_COLUMN;

/// Command line entry point
///
/// Annotates one spreadsheet and prints where the result went:
/// `mailsift <input.(xlsx|xls|csv)> [column_name] [output.xlsx]`
fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        eprintln!(
            "Usage: {} <input.(xlsx|xls|csv)> [column_name] [output.xlsx]",
            args[0]
        );
        std::process::exit(2);
    }

    let input = PathBuf::from(&args[1]);
    let column = args.get(2).map(String::as_str).unwrap_or(DEFAULT_TEXT_COLUMN);
    let output = match args.get(3) {
        Some(path) => PathBuf::from(path),
        None => default_output_path(&input),
    };

    match engine::process(&input, column, &output) {
        Ok(annotated) => {
            println!("Scanned column: {}", annotated.resolved_column);
            println!("Output written to {}", annotated.output_path.display());
            if let Some(warning) = annotated.warning {
                println!("Note: {warning}");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{stem}_with_emails.xlsx"))
}
