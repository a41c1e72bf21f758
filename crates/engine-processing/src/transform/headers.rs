use engine_core::diagnostics::SharedDiagnostics;

/// Checks that a CSV header line carries every column a transform reads.
#[derive(Debug, Clone)]
pub struct HeadersValidator {
    name: String,
    required: &'static [&'static str],
    diagnostics: SharedDiagnostics,
}

impl HeadersValidator {
    pub fn new(
        name: impl Into<String>,
        required: &'static [&'static str],
        diagnostics: SharedDiagnostics,
    ) -> Self {
        Self {
            name: name.into(),
            required,
            diagnostics,
        }
    }

    /// Logs one error per missing column and returns `false` if any is
    /// missing. Names match exactly once a leading BOM and surrounding
    /// whitespace are removed. Extra columns are ignored.
    pub fn validate(&self, actual: &[String]) -> bool {
        let actual: Vec<&str> = actual.iter().map(|h| normalize(h)).collect();
        let mut valid = true;

        for column in self.required {
            if !actual.iter().any(|h| *h == *column) {
                self.diagnostics.log_error(
                    &format!("{}: expected column '{column}' is missing from the headers", self.name),
                    None,
                );
                valid = false;
            }
        }

        valid
    }
}

fn normalize(header: &str) -> &str {
    header.trim_start_matches('\u{feff}').trim()
}
