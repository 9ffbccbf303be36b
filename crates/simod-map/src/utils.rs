//! Utility functions for mapping operations.

/// Normalizes a header for comparison: lowercase with underscores, hyphens and
/// whitespace removed.
pub fn normalize_column_name(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !(*ch == '_' || *ch == '-' || ch.is_whitespace()))
        .flat_map(char::to_lowercase)
        .collect()
}

/// True when the header ends with the suffix, ignoring case.
pub fn has_suffix_ignore_case(column: &str, suffix: &str) -> bool {
    column.to_lowercase().ends_with(&suffix.to_lowercase())
}
