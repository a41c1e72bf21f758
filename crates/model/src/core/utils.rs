/// Separator used by the taxonomy CSV format for list-valued cells
/// (alternative labels, UUID history).
pub const LIST_SEPARATOR: char = '\n';

/// Split a list-valued cell into its trimmed, non-empty entries.
pub fn split_list(cell: &str) -> Vec<String> {
    cell.split(LIST_SEPARATOR)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`split_list`].
pub fn join_list(items: &[String]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(LIST_SEPARATOR);
        }
        out.push_str(item);
    }
    out
}

/// Parse the boolean flags used in taxonomy CSVs ("true"/"false", any case).
pub fn parse_bool(cell: &str) -> Option<bool> {
    match cell.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
