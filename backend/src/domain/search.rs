//! Case-insensitive substring search over the fields a table displays.

/// Lowercased search term, used as sent; `None` means "match everything"
pub fn normalize_term(term: Option<&str>) -> Option<String> {
    term.filter(|t| !t.is_empty()).map(str::to_lowercase)
}

/// True when any value contains the (already lowercased) term
pub fn matches_any(values: &[String], needle: &str) -> bool {
    values.iter().any(|v| v.to_lowercase().contains(needle))
}

/// Keep only the records whose display values contain `term`
pub fn filter_records<T>(records: Vec<T>, term: Option<&str>, values: impl Fn(&T) -> Vec<String>) -> Vec<T> {
    match normalize_term(term) {
        Some(needle) => records
            .into_iter()
            .filter(|record| matches_any(&values(record), &needle))
            .collect(),
        None => records,
    }
}
