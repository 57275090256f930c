//! Typed ad rows derived from a loaded export.

use crate::classify::{classify, Category, Metrics, Mode, Verdict};
use crate::error::Diagnostic;
use crate::loader::AdTable;
use crate::short_name::{is_aggregate_title, short_name};
use rayon::prelude::*;

pub const EFFICIENCY_COLUMN: &str = "Efektifitas Iklan";
pub const UNITS_SOLD_COLUMN: &str = "Produk Terjual";
pub const DIRECT_REVENUE_COLUMN: &str = "Penjualan Langsung (GMV Langsung)";
pub const SPEND_COLUMN: &str = "Biaya";

/// Positions of the metric columns; `None` when the export lacks the column.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricColumns {
    pub efficiency: Option<usize>,
    pub units_sold: Option<usize>,
    pub direct_revenue: Option<usize>,
    pub spend: Option<usize>,
}

impl MetricColumns {
    pub fn locate(table: &AdTable) -> Self {
        Self {
            efficiency: table.column(EFFICIENCY_COLUMN),
            units_sold: table.column(UNITS_SOLD_COLUMN),
            direct_revenue: table.column(DIRECT_REVENUE_COLUMN),
            spend: table.column(SPEND_COLUMN),
        }
    }
}

/// Parse a metric cell. Empty, unparsable, and NaN cells are missing.
pub fn parse_metric(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// One export row with its derived fields.
#[derive(Debug, Clone)]
pub struct AdRow {
    /// Original cells, in header order.
    pub cells: Vec<String>,
    /// Title as exported; `None` when the cell is empty.
    pub title: Option<String>,
    /// Summary name. Group rows keep their full title.
    pub short_title: Option<String>,
    pub is_aggregate: bool,
    pub metrics: Metrics,
    pub verdict: Verdict,
    pub is_blue_flag: bool,
}

impl AdRow {
    pub fn category(&self) -> Option<Category> {
        self.verdict.category()
    }

    pub fn is_free_conversion(&self) -> bool {
        self.verdict == Verdict::FreeConversion
    }

    pub fn is_high_spend_no_sales(&self) -> bool {
        self.verdict == Verdict::HighSpendNoSales
    }

    /// Name used in the summary lists.
    pub fn display_name(&self) -> &str {
        self.short_title.as_deref().unwrap_or("")
    }
}

/// Rows plus the numeric coercion problems met while deriving them.
#[derive(Debug, Clone, Default)]
pub struct DerivedRows {
    pub rows: Vec<AdRow>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Derive typed rows from a normalized table. Row order is preserved.
pub fn derive_rows(
    table: &AdTable,
    title_col: usize,
    mode: Mode,
    split_free_conversions: bool,
) -> DerivedRows {
    let columns = MetricColumns::locate(table);
    for (name, idx) in [
        (EFFICIENCY_COLUMN, columns.efficiency),
        (UNITS_SOLD_COLUMN, columns.units_sold),
        (DIRECT_REVENUE_COLUMN, columns.direct_revenue),
        (SPEND_COLUMN, columns.spend),
    ] {
        if idx.is_none() {
            log::warn!("Column '{}' not found; its values are treated as missing", name);
        }
    }

    let derived: Vec<(AdRow, Vec<Diagnostic>)> = table
        .rows
        .par_iter()
        .enumerate()
        .map(|(i, cells)| {
            derive_row(
                i,
                cells,
                &table.headers,
                title_col,
                &columns,
                mode,
                split_free_conversions,
            )
        })
        .collect();

    let mut result = DerivedRows::default();
    for (row, diagnostics) in derived {
        result.rows.push(row);
        result.diagnostics.extend(diagnostics);
    }
    for d in &result.diagnostics {
        log::debug!("{}", d);
    }
    result
}

fn derive_row(
    index: usize,
    cells: &[String],
    headers: &[String],
    title_col: usize,
    columns: &MetricColumns,
    mode: Mode,
    split_free_conversions: bool,
) -> (AdRow, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let mut metric = |col: Option<usize>| -> Option<f64> {
        let idx = col?;
        let cell = cells.get(idx)?;
        let value = parse_metric(cell);
        if value.is_none() && !cell.trim().is_empty() {
            diagnostics.push(Diagnostic::NumericCoercion {
                row: index,
                column: headers.get(idx).cloned().unwrap_or_default(),
                value: cell.clone(),
            });
        }
        value
    };

    let metrics = Metrics {
        efficiency: metric(columns.efficiency),
        units_sold: metric(columns.units_sold),
        direct_revenue: metric(columns.direct_revenue),
        spend: metric(columns.spend),
    };

    let title = cells
        .get(title_col)
        .filter(|t| !t.trim().is_empty())
        .cloned();
    let is_aggregate = title.as_deref().is_some_and(is_aggregate_title);
    let short_title = title.as_ref().map(|t| {
        if is_aggregate {
            t.clone()
        } else {
            short_name(t)
        }
    });

    let row = AdRow {
        cells: cells.to_vec(),
        title,
        short_title,
        is_aggregate,
        verdict: classify(&metrics, mode, split_free_conversions),
        is_blue_flag: metrics.is_blue_flag(),
        metrics,
    };
    (row, diagnostics)
}
