//! Error kinds for the report pipeline.
//!
//! Fatal problems abort the whole run and surface as [`ReportError`].
//! Recoverable problems never abort; they are collected as [`Diagnostic`]
//! values so a caller can inspect them without changing the report.

use std::fmt;
use thiserror::Error;

/// Fatal errors: no report is produced when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// None of the first `scanned` lines contained a header marker.
    #[error("Header \"Nama Iklan\" (or \"Nama Iklan/Produk\") not found in the first {scanned} lines")]
    HeaderNotFound { scanned: usize },

    /// Neither accepted title column exists after loading.
    #[error("Column \"Nama Iklan\" (or \"Nama Iklan/Produk\") not found")]
    TitleColumnMissing,
}

/// A recovered, non-fatal problem found while loading or coercing data.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A data line that did not parse against the header's column count.
    /// `line` is 1-based within the source text.
    MalformedRow { line: u64, reason: String },

    /// A metric cell that could not be read as a number and became missing.
    /// `row` is the 0-based index into the loaded table.
    NumericCoercion {
        row: usize,
        column: String,
        value: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedRow { line, reason } => {
                write!(f, "line {}: skipped malformed row ({})", line, reason)
            }
            Diagnostic::NumericCoercion { row, column, value } => {
                write!(
                    f,
                    "row {}: '{}' value {:?} is not a number, treated as missing",
                    row + 1,
                    column,
                    value
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ReportError::HeaderNotFound { scanned: 30 };
        assert_eq!(
            err.to_string(),
            "Header \"Nama Iklan\" (or \"Nama Iklan/Produk\") not found in the first 30 lines"
        );
        assert!(ReportError::TitleColumnMissing
            .to_string()
            .contains("Nama Iklan/Produk"));
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::NumericCoercion {
            row: 2,
            column: "Biaya".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(
            d.to_string(),
            "row 3: 'Biaya' value \"abc\" is not a number, treated as missing"
        );
    }
}
