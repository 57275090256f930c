//! Tabular loader for seller-ads exports.
//!
//! Platform exports open with a banner of metadata lines (shop name, date
//! range, report type) before the real header. The loader scans the first
//! [`HEADER_SCAN_LINES`] lines for a header marker, infers the delimiter from
//! that line, and parses everything from the header onward.

use crate::error::{Diagnostic, ReportError};
use csv::ReaderBuilder;

/// Number of leading lines searched for the header row.
pub const HEADER_SCAN_LINES: usize = 30;

/// Substrings identifying the header row.
pub const HEADER_MARKERS: &[&str] = &["Nama Iklan", "Nama Iklan/Produk"];

/// A parsed export: trimmed column names plus rows of equal width.
#[derive(Debug, Clone)]
pub struct AdTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Rows skipped while parsing.
    pub diagnostics: Vec<Diagnostic>,
    /// 0-based index of the header line in the source text
    pub header_line: usize,
    pub delimiter: u8,
}

impl AdTable {
    /// Index of the first column with exactly this name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Decode bytes as UTF-8, dropping invalid sequences and a leading BOM.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

/// Find the first line within the scan window containing a header marker.
pub fn find_header_line(lines: &[&str]) -> Option<usize> {
    lines
        .iter()
        .take(HEADER_SCAN_LINES)
        .position(|line| HEADER_MARKERS.iter().any(|m| line.contains(m)))
}

/// Semicolon if it occurs strictly more often than comma, otherwise comma.
pub fn infer_delimiter(header_line: &str) -> u8 {
    let semicolons = header_line.matches(';').count();
    let commas = header_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

/// Load an export from raw bytes.
///
/// Fails with [`ReportError::HeaderNotFound`] when no header marker appears in
/// the scan window. Rows that do not match the header width are skipped and
/// recorded in [`AdTable::diagnostics`].
pub fn load_table(bytes: &[u8]) -> Result<AdTable, ReportError> {
    let text = decode_lossy(bytes);
    let lines: Vec<&str> = text.lines().collect();

    let scanned = lines.len().min(HEADER_SCAN_LINES);
    let header_line = find_header_line(&lines).ok_or(ReportError::HeaderNotFound { scanned })?;
    let delimiter = infer_delimiter(lines[header_line]);
    log::info!(
        "Header found on line {} (delimiter {:?})",
        header_line + 1,
        delimiter as char
    );

    let body = lines[header_line..].join("\n");
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|_| ReportError::HeaderNotFound { scanned })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    let mut diagnostics = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => rows.push(record.iter().map(|s| s.to_string()).collect()),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0) + header_line as u64;
                let reason = match e.kind() {
                    csv::ErrorKind::UnequalLengths {
                        expected_len, len, ..
                    } => format!("expected {} fields, found {}", expected_len, len),
                    _ => e.to_string(),
                };
                log::warn!("Line {}: skipping malformed row ({})", line, reason);
                diagnostics.push(Diagnostic::MalformedRow { line, reason });
            }
        }
    }

    log::info!(
        "Loaded {} rows with {} columns ({} skipped)",
        rows.len(),
        headers.len(),
        diagnostics.len()
    );

    Ok(AdTable {
        headers,
        rows,
        diagnostics,
        header_line,
        delimiter,
    })
}
