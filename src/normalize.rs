//! Title column normalization.

use crate::error::ReportError;
use crate::loader::AdTable;

/// Canonical name of the ad title column.
pub const TITLE_COLUMN: &str = "Nama Iklan";

/// Accepted title column names, in priority order.
pub const TITLE_ALIASES: &[&str] = &[TITLE_COLUMN, "Nama Iklan/Produk"];

/// Rename the first accepted title column to [`TITLE_COLUMN`].
///
/// Returns the index of the canonical column.
pub fn normalize_title_column(table: &mut AdTable) -> Result<usize, ReportError> {
    for alias in TITLE_ALIASES {
        if let Some(idx) = table.column(alias) {
            if *alias != TITLE_COLUMN {
                log::debug!("Renaming column '{}' to '{}'", alias, TITLE_COLUMN);
                table.headers[idx] = TITLE_COLUMN.to_string();
            }
            return Ok(idx);
        }
    }
    Err(ReportError::TitleColumnMissing)
}
