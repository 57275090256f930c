//! Excel rendering of a built report.
//!
//! Sheets, in order:
//! - `DATA_IKLAN`: every input row plus derived columns, colored by verdict
//! - `RINGKASAN_IKLAN`: one column per summary list
//! - `>10K_TANPA_KONVERSI`: zero-sales rows with high spend
//! - `SALES_0_BIAYA`: sales without spend (only when those rows are split out)

use crate::ad_row::{parse_metric, AdRow, DIRECT_REVENUE_COLUMN};
use crate::classify::{Category, Verdict};
use crate::pipeline::AdsReport;
use crate::summary::SummaryLabel;
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};
use std::path::Path;

pub const DATA_SHEET: &str = "DATA_IKLAN";
pub const SUMMARY_SHEET: &str = "RINGKASAN_IKLAN";
pub const HIGH_SPEND_SHEET: &str = ">10K_TANPA_KONVERSI";
pub const FREE_CONVERSION_SHEET: &str = "SALES_0_BIAYA";

/// Columns appended after the export's own columns on the data sheet.
pub const DERIVED_COLUMNS: &[&str] = &["IS_AGGREGATE", "IS_BIRU", "Nama Ringkasan", "Kategori"];

const LOSS_FONT: &str = "#FF0000";
const FREE_CONVERSION_FONT: &str = "#7030A0";
const FREE_CONVERSION_FILL: &str = "#E4DFEC"; // lavender
const BLUE_OVERLAY_FILL: &str = "#ADD8E6"; // light blue
const SUMMARY_COLUMN_WIDTH: f64 = 40.0;

/// Background fill of a rated row.
fn category_fill(category: Category) -> &'static str {
    match category {
        Category::Red => "#FF0000",
        Category::Yellow => "#FFFF00",
        Category::Green => "#90EE90", // light green
    }
}

/// Formats for one data row: the base format and the blue overlay, if any.
fn row_formats(row: &AdRow) -> (Format, Option<Format>) {
    match row.verdict {
        Verdict::HighSpendNoSales => (Format::new().set_font_color(LOSS_FONT), None),
        Verdict::FreeConversion => (
            Format::new().set_background_color(FREE_CONVERSION_FILL),
            None,
        ),
        Verdict::Rated(category) => {
            let base = Format::new().set_background_color(category_fill(category));
            let overlay = row
                .is_blue_flag
                .then(|| Format::new().set_background_color(BLUE_OVERLAY_FILL));
            (base, overlay)
        }
        Verdict::MissingData | Verdict::WarmingUp | Verdict::Unrated => (Format::new(), None),
    }
}

// ============================================================================
// Sheets
// ============================================================================

fn write_data_sheet(sheet: &mut Worksheet, report: &AdsReport) -> Result<()> {
    sheet.set_name(DATA_SHEET)?;
    let header_fmt = Format::new().set_bold();

    let derived_start = report.headers.len() as u16;
    for (col, name) in report.headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, name, &header_fmt)?;
    }
    for (i, name) in DERIVED_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, derived_start + i as u16, *name, &header_fmt)?;
    }

    let revenue_col = report.headers.iter().position(|h| h == DIRECT_REVENUE_COLUMN);

    for (i, ad) in report.rows.iter().enumerate() {
        let row = (i + 1) as u32;
        let (base, overlay) = row_formats(ad);

        for (col, cell) in ad.cells.iter().enumerate() {
            let fmt = match &overlay {
                Some(blue) if col == report.title_col || Some(col) == revenue_col => blue,
                _ => &base,
            };
            let col = col as u16;
            if cell.is_empty() {
                sheet.write_blank(row, col, fmt)?;
            } else if let Some(value) = parse_metric(cell) {
                sheet.write_number_with_format(row, col, value, fmt)?;
            } else {
                sheet.write_string_with_format(row, col, cell, fmt)?;
            }
        }

        sheet.write_boolean_with_format(row, derived_start, ad.is_aggregate, &base)?;
        sheet.write_boolean_with_format(row, derived_start + 1, ad.is_blue_flag, &base)?;
        sheet.write_string_with_format(row, derived_start + 2, ad.display_name(), &base)?;
        let category = ad.category().map(|c| c.label()).unwrap_or("");
        sheet.write_string_with_format(row, derived_start + 3, category, &base)?;
    }

    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, report: &AdsReport) -> Result<()> {
    sheet.set_name(SUMMARY_SHEET)?;
    let bold = Format::new().set_bold();
    let mode = report.summary.mode;

    for label in SummaryLabel::ALL {
        let col = label.index() as u16;
        sheet.write_string_with_format(0, col, label.label(), &bold)?;
        sheet.set_column_width(col, SUMMARY_COLUMN_WIDTH)?;

        let column = report.summary.column(label);
        if column.entries.is_empty() {
            continue;
        }
        let fmt = Format::new()
            .set_font_color(label.font_color())
            .set_text_wrap()
            .set_align(FormatAlign::Top);
        sheet.write_string_with_format(1, col, column.cell_text(mode), &fmt)?;
    }

    Ok(())
}

fn write_high_spend_sheet(sheet: &mut Worksheet, report: &AdsReport) -> Result<()> {
    sheet.set_name(HIGH_SPEND_SHEET)?;
    let bold = Format::new().set_bold();
    let loss = Format::new().set_font_color(LOSS_FONT);

    sheet.write_string_with_format(0, 0, "Nama Iklan", &bold)?;
    sheet.write_string_with_format(0, 1, "Biaya", &bold)?;
    for (i, entry) in report.summary.high_spend.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string_with_format(row, 0, &entry.name, &loss)?;
        sheet.write_number_with_format(row, 1, entry.spend, &loss)?;
    }
    sheet.set_column_width(0, SUMMARY_COLUMN_WIDTH)?;

    Ok(())
}

fn write_free_conversion_sheet(sheet: &mut Worksheet, report: &AdsReport) -> Result<()> {
    sheet.set_name(FREE_CONVERSION_SHEET)?;
    let bold = Format::new().set_bold();
    let fmt = Format::new().set_font_color(FREE_CONVERSION_FONT);

    let headers = ["Nama Iklan", "Produk Terjual", "Efektifitas Iklan", "Biaya"];
    for (col, name) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &bold)?;
    }
    for (i, entry) in report.summary.free_conversions.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string_with_format(row, 0, &entry.name, &fmt)?;
        sheet.write_number_with_format(row, 1, entry.units_sold, &fmt)?;
        match entry.efficiency {
            Some(e) => sheet.write_number_with_format(row, 2, e, &fmt)?,
            None => sheet.write_blank(row, 2, &fmt)?,
        };
        sheet.write_number_with_format(row, 3, entry.spend, &fmt)?;
    }
    sheet.set_column_width(0, SUMMARY_COLUMN_WIDTH)?;

    Ok(())
}

// ============================================================================
// Workbook
// ============================================================================

/// Lay out every report sheet in a new workbook.
pub fn build_workbook(report: &AdsReport) -> Result<Workbook> {
    let mut workbook = Workbook::new();

    write_data_sheet(workbook.add_worksheet(), report)?;
    write_summary_sheet(workbook.add_worksheet(), report)?;
    write_high_spend_sheet(workbook.add_worksheet(), report)?;
    if report.config.split_free_conversions {
        write_free_conversion_sheet(workbook.add_worksheet(), report)?;
    }

    Ok(workbook)
}

/// Render the report as xlsx bytes.
pub fn render_to_buffer(report: &AdsReport) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(report)?;
    workbook
        .save_to_buffer()
        .context("Failed to render workbook")
}

/// Render the report and write it to `path`.
pub fn save(report: &AdsReport, path: &Path) -> Result<()> {
    let mut workbook = build_workbook(report)?;
    workbook
        .save(path)
        .with_context(|| format!("Failed to write workbook to {}", path.display()))
}
