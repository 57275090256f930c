//! Pipeline functions for programmatic use by the CLI.
//!
//! [`build_report`] runs the in-memory stages (load, normalize, derive,
//! summarize); the file-based functions wrap it with I/O and return
//! structured data or a printable summary.

use crate::ad_row::{derive_rows, AdRow};
use crate::classify::Category;
use crate::error::{Diagnostic, ReportError};
use crate::loader::load_table;
use crate::normalize::normalize_title_column;
use crate::summary::{summarize, ReportConfig, Summary, SummaryLabel};
use crate::workbook;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};

// ============================================================================
// Build Report
// ============================================================================

/// Everything the workbook renderer needs.
#[derive(Debug, Clone)]
pub struct AdsReport {
    /// Column names, with the title column under its canonical name.
    pub headers: Vec<String>,
    pub title_col: usize,
    /// Classified rows in input order, group rows included.
    pub rows: Vec<AdRow>,
    pub summary: Summary,
    /// Recovered problems: skipped rows and non-numeric metric cells.
    pub diagnostics: Vec<Diagnostic>,
    pub config: ReportConfig,
}

impl AdsReport {
    /// Number of rows rated `category`, before any summary filtering.
    pub fn count(&self, category: Category) -> usize {
        self.rows
            .iter()
            .filter(|r| r.category() == Some(category))
            .count()
    }

    pub fn skipped_rows(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::MalformedRow { .. }))
            .count()
    }

    /// Multi-line description of the report for terminal output.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "  Mode: {}", self.config.mode);
        let _ = writeln!(
            out,
            "  Rows: {} ({} MERAH, {} KUNING, {} HIJAU, {} BIRU)",
            self.rows.len(),
            self.count(Category::Red),
            self.count(Category::Yellow),
            self.count(Category::Green),
            self.rows.iter().filter(|r| r.is_blue_flag).count()
        );
        let _ = writeln!(
            out,
            "  >10K tanpa konversi: {}",
            self.summary.high_spend.len()
        );
        if self.config.split_free_conversions {
            let _ = writeln!(out, "  Sales 0 biaya: {}", self.summary.free_conversions.len());
        }
        let _ = write!(
            out,
            "  Skipped rows: {}, non-numeric cells: {}",
            self.skipped_rows(),
            self.diagnostics.len() - self.skipped_rows()
        );
        out
    }
}

/// Run the in-memory pipeline over the raw bytes of an export.
pub fn build_report(bytes: &[u8], config: &ReportConfig) -> Result<AdsReport, ReportError> {
    let mut table = load_table(bytes)?;
    let title_col = normalize_title_column(&mut table)?;

    let derived = derive_rows(
        &table,
        title_col,
        config.mode,
        config.split_free_conversions,
    );
    let summary = summarize(&derived.rows, config);

    let mut diagnostics = std::mem::take(&mut table.diagnostics);
    diagnostics.extend(derived.diagnostics);

    Ok(AdsReport {
        headers: table.headers,
        title_col,
        rows: derived.rows,
        summary,
        diagnostics,
        config: *config,
    })
}

// ============================================================================
// Generate Report
// ============================================================================

/// Read an export from disk and build its report.
pub fn load_report(input: &Path, config: &ReportConfig) -> Result<AdsReport> {
    let bytes =
        std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let report = build_report(&bytes, config)?;
    Ok(report)
}

/// Default output path: the input path with an `.xlsx` extension.
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension("xlsx")
}

/// Configuration for the report command.
pub struct ReportFileConfig {
    /// Input CSV path
    pub input: PathBuf,
    /// Output xlsx path; derived from the input when `None`
    pub output: Option<PathBuf>,
    pub report: ReportConfig,
}

/// Build the report for a CSV export and write it as a workbook.
///
/// Returns a summary string on success. Nothing is written on failure.
pub fn generate_report(config: &ReportFileConfig) -> Result<String> {
    let output = config
        .output
        .clone()
        .unwrap_or_else(|| output_path_for(&config.input));
    if output == config.input {
        anyhow::bail!(
            "Output path {} would overwrite the input file",
            output.display()
        );
    }

    let report = load_report(&config.input, &config.report)?;
    workbook::save(&report, &output)?;
    log::info!("Wrote {}", output.display());

    Ok(format!("Done! Wrote {}\n{}", output.display(), report.describe()))
}

// ============================================================================
// Print Summary
// ============================================================================

/// Printable rendering of the summary lists and special subsets.
pub fn format_summary(report: &AdsReport) -> String {
    let mut out = String::new();
    let summary = &report.summary;
    for label in SummaryLabel::ALL {
        let _ = writeln!(out, "== {}", label.label());
        let column = summary.column(label);
        if !column.entries.is_empty() {
            let _ = writeln!(out, "{}", column.cell_text(summary.mode));
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "== >10K TANPA KONVERSI");
    for entry in &summary.high_spend {
        let _ = writeln!(out, "{}\t{}", entry.name, entry.spend);
    }

    if report.config.split_free_conversions {
        let _ = writeln!(out);
        let _ = writeln!(out, "== SALES 0 BIAYA");
        for entry in &summary.free_conversions {
            let efficiency = entry
                .efficiency
                .map(|e| e.to_string())
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "{}\t{}\t{}\t{}",
                entry.name, entry.units_sold, efficiency, entry.spend
            );
        }
    }
    out
}

// ============================================================================
// Classified CSV
// ============================================================================

#[derive(Serialize)]
struct ClassifiedRecord<'a> {
    #[serde(rename = "Nama Iklan")]
    title: Option<&'a str>,
    #[serde(rename = "Nama Ringkasan")]
    short_title: Option<&'a str>,
    #[serde(rename = "Produk Terjual")]
    units_sold: Option<f64>,
    #[serde(rename = "Biaya")]
    spend: Option<f64>,
    #[serde(rename = "Efektifitas Iklan")]
    efficiency: Option<f64>,
    #[serde(rename = "Penjualan Langsung (GMV Langsung)")]
    direct_revenue: Option<f64>,
    #[serde(rename = "IS_AGGREGATE")]
    is_aggregate: bool,
    #[serde(rename = "IS_BIRU")]
    is_blue_flag: bool,
    #[serde(rename = "Kategori")]
    category: &'static str,
    #[serde(rename = "Status")]
    verdict: &'static str,
}

impl<'a> From<&'a AdRow> for ClassifiedRecord<'a> {
    fn from(row: &'a AdRow) -> Self {
        Self {
            title: row.title.as_deref(),
            short_title: row.short_title.as_deref(),
            units_sold: row.metrics.units_sold,
            spend: row.metrics.spend,
            efficiency: row.metrics.efficiency,
            direct_revenue: row.metrics.direct_revenue,
            is_aggregate: row.is_aggregate,
            is_blue_flag: row.is_blue_flag,
            category: row.category().map(|c| c.label()).unwrap_or(""),
            verdict: row.verdict.label(),
        }
    }
}

/// Write the classified rows as CSV. Returns the number of rows written.
pub fn write_classified_csv(report: &AdsReport, output: &Path) -> Result<usize> {
    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    for row in &report.rows {
        writer.serialize(ClassifiedRecord::from(row))?;
    }
    writer.flush()?;
    Ok(report.rows.len())
}
