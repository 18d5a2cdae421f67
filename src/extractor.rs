use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap();
}

/// Scan a text fragment for email-like substrings.
///
/// Matching is literal, non-overlapping and left to right; matches are
/// returned in order of appearance, duplicates included. The pattern asks
/// for a local part, an `@`, a domain and a final dot followed by at least
/// two letters, so `"not-an-email@"` yields nothing.
pub fn find_emails(text: &str) -> Vec<String> {
    EMAIL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Drop repeated addresses, keeping the first occurrence of each.
///
/// Comparison is exact string equality, case included.
pub fn dedup_emails(emails: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(emails.len());
    for email in emails {
        if !seen.contains(&email) {
            seen.push(email);
        }
    }
    seen
}
