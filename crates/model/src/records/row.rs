use std::sync::Arc;

/// One data row of a CSV source, addressable by header name.
#[derive(Debug, Clone)]
pub struct CsvRow {
    headers: Arc<[String]>,
    values: Vec<String>,
    /// 1-based line number of the record in the source (header is line 1).
    pub line: u64,
}

impl CsvRow {
    pub fn new(headers: Arc<[String]>, values: Vec<String>, line: u64) -> Self {
        CsvRow {
            headers,
            values,
            line,
        }
    }

    /// Builds a row from `(header, value)` pairs. Mostly useful in tests.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let headers: Arc<[String]> = pairs.iter().map(|(h, _)| h.to_string()).collect();
        let values = pairs.iter().map(|(_, v)| v.to_string()).collect();
        CsvRow::new(headers, values, 0)
    }

    /// Raw cell value for `column`, or `""` when the column or cell is absent.
    /// Header names match exactly.
    pub fn get(&self, column: &str) -> &str {
        self.headers
            .iter()
            .position(|h| h == column)
            .and_then(|idx| self.values.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Trimmed cell value for `column`.
    pub fn get_trimmed(&self, column: &str) -> &str {
        self.get(column).trim()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_matches_header_exactly() {
        let row = CsvRow::from_pairs(&[("ID", "key_1"), ("PREFERREDLABEL", " Baker ")]);
        assert_eq!(row.get("ID"), "key_1");
        assert_eq!(row.get_trimmed("PREFERREDLABEL"), "Baker");
        assert_eq!(row.get("id"), "");
        assert_eq!(row.get("preferredLabel"), "");
    }

    #[test]
    fn missing_cells_read_as_empty() {
        let headers: Arc<[String]> = vec!["ID".to_string(), "CODE".to_string()].into();
        let row = CsvRow::new(headers, vec!["key_1".to_string()], 2);
        assert_eq!(row.get("CODE"), "");
        assert_eq!(row.get("NOPE"), "");
    }
}
