#![cfg(not(tarpaulin_include))]

use mailsift::dataset::{Column, Dataset};
use mailsift::resolver::resolve;

// Helper function to build a dataset from column names only
fn dataset_with_columns(names: &[&str]) -> Dataset {
    Dataset {
        columns: names.iter().map(|name| Column::new(*name)).collect(),
    }
}

// Helper function to check a resolution outcome
fn assert_resolves(names: &[&str], requested: &str, expected: &str) {
    let dataset = dataset_with_columns(names);
    let resolved = resolve(&dataset, requested).unwrap();
    assert_eq!(
        resolved, expected,
        "columns {:?} with request {:?}",
        names, requested
    );
    println!(
        "✓ {:?} with request {:?} resolved to {:?}",
        names, requested, resolved
    );
}

fn test_exact_match() {
    println!("\n====== Testing case-insensitive exact match ======");
    assert_resolves(&["Name", "Description", "City"], "Description", "Description");
    assert_resolves(&["Name", "DESCRIPTION", "City"], "description", "DESCRIPTION");
    assert_resolves(&["Organisation Info", "Notes"], "NOTES", "Notes");
}

fn test_hint_scan() {
    println!("\n====== Testing name-hint fallback ======");
    assert_resolves(&["Name", "Organisation Info", "City"], "Description", "Organisation Info");
    assert_resolves(&["Name", "Company Details", "More Info"], "Description", "More Info");
    // Hint categories are tried in order across all columns
    assert_resolves(&["Extra Description", "Contact Info"], "Summary", "Contact Info");
}

fn test_first_column_fallback() {
    println!("\n====== Testing first-column fallback ======");
    assert_resolves(&["X", "Y"], "Description", "X");
    assert_resolves(&["Totals"], "anything", "Totals");
}

fn test_empty_dataset_errors() {
    println!("\n====== Testing empty dataset ======");
    let result = resolve(&Dataset::new(), "Description");
    assert!(result.is_err());
    println!("✓ Empty dataset is rejected with: {}", result.unwrap_err());
}

fn main() {
    test_exact_match();
    test_hint_scan();
    test_first_column_fallback();
    test_empty_dataset_errors();
    println!("\nAll resolver tests passed");
}
