//! Summary lists and special subsets built from classified rows.

use crate::ad_row::AdRow;
use crate::classify::{Category, Mode};
use std::collections::HashSet;

/// A column of the summary sheet: the three tiers plus the blue flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryLabel {
    Red,
    Yellow,
    Green,
    Blue,
}

impl SummaryLabel {
    /// Column order of the summary sheet (and numbering order).
    pub const ALL: [SummaryLabel; 4] = [
        SummaryLabel::Red,
        SummaryLabel::Yellow,
        SummaryLabel::Green,
        SummaryLabel::Blue,
    ];

    /// Position within [`SummaryLabel::ALL`].
    pub fn index(&self) -> usize {
        match self {
            SummaryLabel::Red => 0,
            SummaryLabel::Yellow => 1,
            SummaryLabel::Green => 2,
            SummaryLabel::Blue => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SummaryLabel::Red => Category::Red.label(),
            SummaryLabel::Yellow => Category::Yellow.label(),
            SummaryLabel::Green => Category::Green.label(),
            SummaryLabel::Blue => "BIRU",
        }
    }

    /// Font color of the column's entries.
    pub fn font_color(&self) -> &'static str {
        match self {
            SummaryLabel::Red => "#FF0000",
            SummaryLabel::Yellow => "#000000",
            SummaryLabel::Green => "#00AA00",
            SummaryLabel::Blue => "#0066CC",
        }
    }

    fn matches(&self, row: &AdRow) -> bool {
        match self {
            SummaryLabel::Red => row.category() == Some(Category::Red),
            SummaryLabel::Yellow => row.category() == Some(Category::Yellow),
            SummaryLabel::Green => row.category() == Some(Category::Green),
            SummaryLabel::Blue => row.is_blue_flag,
        }
    }
}

/// Which summary columns are shown. Hidden columns are blank in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryFilter {
    pub red: bool,
    pub yellow: bool,
    pub green: bool,
    pub blue: bool,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            red: true,
            yellow: true,
            green: true,
            blue: true,
        }
    }
}

impl CategoryFilter {
    pub fn includes(&self, label: SummaryLabel) -> bool {
        match label {
            SummaryLabel::Red => self.red,
            SummaryLabel::Yellow => self.yellow,
            SummaryLabel::Green => self.green,
            SummaryLabel::Blue => self.blue,
        }
    }
}

/// Options controlling classification and summary layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    pub mode: Mode,
    pub filter: CategoryFilter,
    /// Report rows with sales but no spend on their own sheet instead of
    /// rating them by efficiency.
    pub split_free_conversions: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Full,
            filter: CategoryFilter::default(),
            split_free_conversions: true,
        }
    }
}

impl ReportConfig {
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_filter(mut self, filter: CategoryFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_free_conversion_split(mut self, split: bool) -> Self {
        self.split_free_conversions = split;
        self
    }
}

/// Formatted entries of one summary column.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryColumn {
    pub label: SummaryLabel,
    /// `"n. name"` in full mode, `"name,"` in group mode.
    pub entries: Vec<String>,
}

impl SummaryColumn {
    /// Single-cell text: newline-joined in full mode, space-joined otherwise.
    pub fn cell_text(&self, mode: Mode) -> String {
        match mode {
            Mode::Full => self.entries.join("\n"),
            Mode::Group => self.entries.join(" "),
        }
    }
}

/// A zero-sales row whose spend reached the warning threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct HighSpendEntry {
    pub name: String,
    pub spend: f64,
}

/// A row that sold without any ad spend.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeConversionEntry {
    pub name: String,
    pub units_sold: f64,
    pub efficiency: Option<f64>,
    pub spend: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub mode: Mode,
    /// One column per [`SummaryLabel::ALL`] entry, in that order.
    pub columns: Vec<SummaryColumn>,
    /// Sorted by spend, highest first.
    pub high_spend: Vec<HighSpendEntry>,
    pub free_conversions: Vec<FreeConversionEntry>,
}

impl Summary {
    pub fn column(&self, label: SummaryLabel) -> &SummaryColumn {
        &self.columns[label.index()]
    }
}

/// Names listed under `label`, in row order, each name once. Untitled rows
/// have nothing to list and are skipped.
fn names_for<'a>(rows: &[&'a AdRow], label: SummaryLabel) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    rows.iter()
        .copied()
        .filter(|r| label.matches(r))
        .filter_map(|r| r.short_title.as_deref())
        .filter(|name| !name.is_empty() && seen.insert(*name))
        .collect()
}

/// Build the summary lists and subsets for a set of classified rows.
pub fn summarize(rows: &[AdRow], config: &ReportConfig) -> Summary {
    let population: Vec<&AdRow> = rows
        .iter()
        .filter(|r| config.mode == Mode::Full || !r.is_aggregate)
        .collect();
    let main: Vec<&AdRow> = population
        .iter()
        .copied()
        .filter(|r| !r.is_free_conversion())
        .collect();

    let mut counter = 0usize;
    let mut columns = Vec::with_capacity(SummaryLabel::ALL.len());
    for label in SummaryLabel::ALL {
        let entries: Vec<String> = names_for(&main, label)
            .into_iter()
            .map(|name| match config.mode {
                Mode::Full => {
                    counter += 1;
                    format!("{}. {}", counter, name)
                }
                Mode::Group => format!("{},", name),
            })
            .collect();
        // numbering above already counted hidden columns
        let entries = if config.filter.includes(label) {
            entries
        } else {
            Vec::new()
        };
        columns.push(SummaryColumn { label, entries });
    }

    let mut high_spend: Vec<HighSpendEntry> = population
        .iter()
        .filter(|r| r.is_high_spend_no_sales())
        .filter_map(|r| {
            Some(HighSpendEntry {
                name: r.display_name().to_string(),
                spend: r.metrics.spend?,
            })
        })
        .collect();
    high_spend.sort_by(|a, b| b.spend.total_cmp(&a.spend));

    let free_conversions = population
        .iter()
        .filter(|r| r.is_free_conversion())
        .filter_map(|r| {
            Some(FreeConversionEntry {
                name: r.display_name().to_string(),
                units_sold: r.metrics.units_sold?,
                efficiency: r.metrics.efficiency,
                spend: r.metrics.spend?,
            })
        })
        .collect();

    Summary {
        mode: config.mode,
        columns,
        high_spend,
        free_conversions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{classify, Metrics, Verdict};

    fn row(name: &str, units: f64, spend: f64, efficiency: f64, revenue: f64) -> AdRow {
        make_row(name, units, spend, Some(efficiency), revenue, true)
    }

    fn make_row(
        name: &str,
        units: f64,
        spend: f64,
        efficiency: Option<f64>,
        revenue: f64,
        split: bool,
    ) -> AdRow {
        let metrics = Metrics {
            efficiency,
            units_sold: Some(units),
            direct_revenue: Some(revenue),
            spend: Some(spend),
        };
        AdRow {
            cells: Vec::new(),
            title: Some(name.to_string()),
            short_title: Some(name.to_string()),
            is_aggregate: crate::short_name::is_aggregate_title(name),
            verdict: classify(&metrics, Mode::Full, split),
            is_blue_flag: metrics.is_blue_flag(),
            metrics,
        }
    }

    #[test]
    fn test_full_mode_numbering_continues_across_columns() {
        let rows = vec![
            row("R1", 1.0, 20000.0, 2.0, 5000.0),
            row("G1", 1.0, 20000.0, 12.0, 0.0),
            row("Y1", 1.0, 20000.0, 9.0, 5000.0),
            row("R2", 1.0, 20000.0, 3.0, 5000.0),
            row("G2", 1.0, 20000.0, 11.0, 5000.0),
            row("G3", 1.0, 20000.0, 15.0, 0.0),
        ];
        let summary = summarize(&rows, &ReportConfig::default());
        assert_eq!(summary.column(SummaryLabel::Red).entries, vec!["1. R1", "2. R2"]);
        assert_eq!(summary.column(SummaryLabel::Yellow).entries, vec!["3. Y1"]);
        assert_eq!(
            summary.column(SummaryLabel::Green).entries,
            vec!["4. G1", "5. G2", "6. G3"]
        );
        assert_eq!(summary.column(SummaryLabel::Blue).entries, vec!["7. G1", "8. G3"]);
        assert_eq!(
            summary.column(SummaryLabel::Red).cell_text(Mode::Full),
            "1. R1\n2. R2"
        );
    }

    #[test]
    fn test_group_mode_unnumbered() {
        let rows = vec![
            row("Dress Luna", 1.0, 20000.0, 2.0, 0.0),
            row("Set Raya", 1.0, 20000.0, 3.0, 100.0),
        ];
        let config = ReportConfig::default().with_mode(Mode::Group);
        let summary = summarize(&rows, &config);
        let red = summary.column(SummaryLabel::Red);
        assert_eq!(red.entries, vec!["Dress Luna,", "Set Raya,"]);
        assert_eq!(red.cell_text(Mode::Group), "Dress Luna, Set Raya,");
        assert_eq!(summary.column(SummaryLabel::Blue).entries, vec!["Dress Luna,"]);
    }

    #[test]
    fn test_blue_flag_row_in_two_columns() {
        let rows = vec![row("Gamis Nadia", 5.0, 20000.0, 9.0, 0.0)];
        let summary = summarize(&rows, &ReportConfig::default());
        assert_eq!(summary.column(SummaryLabel::Yellow).entries, vec!["1. Gamis Nadia"]);
        assert_eq!(summary.column(SummaryLabel::Blue).entries, vec!["2. Gamis Nadia"]);
    }

    #[test]
    fn test_filter_blanks_column_without_renumbering() {
        let rows = vec![
            row("R1", 1.0, 20000.0, 2.0, 5000.0),
            row("Y1", 1.0, 20000.0, 9.0, 5000.0),
            row("G1", 1.0, 20000.0, 12.0, 5000.0),
        ];
        let filter = CategoryFilter {
            yellow: false,
            ..CategoryFilter::default()
        };
        let summary = summarize(&rows, &ReportConfig::default().with_filter(filter));
        assert_eq!(summary.column(SummaryLabel::Red).entries, vec!["1. R1"]);
        assert!(summary.column(SummaryLabel::Yellow).entries.is_empty());
        assert_eq!(summary.column(SummaryLabel::Green).entries, vec!["3. G1"]);
    }

    #[test]
    fn test_duplicate_names_listed_once() {
        let rows = vec![
            row("Dress Luna", 1.0, 20000.0, 2.0, 5000.0),
            row("Dress Luna", 2.0, 30000.0, 4.0, 5000.0),
            row("Set Raya", 1.0, 20000.0, 1.0, 5000.0),
        ];
        let summary = summarize(&rows, &ReportConfig::default());
        assert_eq!(
            summary.column(SummaryLabel::Red).entries,
            vec!["1. Dress Luna", "2. Set Raya"]
        );
    }

    #[test]
    fn test_high_spend_subset_sorted() {
        let rows = vec![
            row("A", 0.0, 15000.0, 0.0, 0.0),
            row("B", 0.0, 9999.99, 0.0, 0.0),
            row("C", 0.0, 40000.0, 0.0, 0.0),
            row("D", 0.0, 10000.0, 0.0, 0.0),
        ];
        let summary = summarize(&rows, &ReportConfig::default());
        let names: Vec<&str> = summary.high_spend.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "D"]);
        assert_eq!(summary.high_spend[0].spend, 40000.0);
        for label in SummaryLabel::ALL {
            assert!(summary.column(label).entries.is_empty());
        }
    }

    #[test]
    fn test_free_conversions_leave_main_lists() {
        let rows = vec![
            row("Organik", 4.0, 0.0, 0.0, 0.0),
            row("R1", 1.0, 20000.0, 2.0, 5000.0),
        ];
        let summary = summarize(&rows, &ReportConfig::default());
        assert_eq!(summary.column(SummaryLabel::Red).entries, vec!["1. R1"]);
        assert!(summary.column(SummaryLabel::Blue).entries.is_empty());
        assert_eq!(
            summary.free_conversions,
            vec![FreeConversionEntry {
                name: "Organik".to_string(),
                units_sold: 4.0,
                efficiency: Some(0.0),
                spend: 0.0,
            }]
        );
    }

    #[test]
    fn test_free_conversions_rated_when_split_disabled() {
        let rows = vec![make_row("Organik", 4.0, 0.0, Some(0.0), 0.0, false)];
        assert_eq!(rows[0].verdict, Verdict::Rated(Category::Red));
        let config = ReportConfig::default().with_free_conversion_split(false);
        let summary = summarize(&rows, &config);
        assert_eq!(summary.column(SummaryLabel::Red).entries, vec!["1. Organik"]);
        assert_eq!(summary.column(SummaryLabel::Blue).entries, vec!["2. Organik"]);
        assert!(summary.free_conversions.is_empty());
    }

    #[test]
    fn test_group_mode_excludes_aggregates_everywhere() {
        let rows = vec![
            row("Grup Iklan A", 2.0, 20000.0, 3.0, 0.0),
            row("grup B", 0.0, 50000.0, 0.0, 0.0),
            row("GRUP C", 3.0, 0.0, 0.0, 0.0),
            row("Dress Luna", 2.0, 20000.0, 3.0, 100.0),
        ];
        let config = ReportConfig::default().with_mode(Mode::Group);
        let summary = summarize(&rows, &config);
        assert_eq!(summary.column(SummaryLabel::Red).entries, vec!["Dress Luna,"]);
        assert!(summary.column(SummaryLabel::Blue).entries.is_empty());
        assert!(summary.high_spend.is_empty());
        assert!(summary.free_conversions.is_empty());

        let summary = summarize(&rows, &ReportConfig::default());
        assert_eq!(
            summary.column(SummaryLabel::Red).entries,
            vec!["1. Grup Iklan A", "2. Dress Luna"]
        );
        assert_eq!(summary.high_spend.len(), 1);
        assert_eq!(summary.free_conversions.len(), 1);
    }

    fn untitled(mut row: AdRow) -> AdRow {
        row.title = None;
        row.short_title = None;
        row
    }

    #[test]
    fn test_untitled_rows_kept_in_subsets_only() {
        let rows = vec![
            untitled(row("", 0.0, 50000.0, 0.0, 0.0)),
            untitled(row("", 3.0, 0.0, 0.0, 0.0)),
            untitled(row("", 2.0, 20000.0, 3.0, 0.0)),
            row("Dress Luna", 0.0, 20000.0, 0.0, 0.0),
        ];
        let summary = summarize(&rows, &ReportConfig::default());
        assert_eq!(
            summary.high_spend,
            vec![
                HighSpendEntry {
                    name: String::new(),
                    spend: 50000.0,
                },
                HighSpendEntry {
                    name: "Dress Luna".to_string(),
                    spend: 20000.0,
                },
            ]
        );
        assert_eq!(summary.free_conversions.len(), 1);
        assert_eq!(summary.free_conversions[0].name, "");
        for label in SummaryLabel::ALL {
            assert!(summary.column(label).entries.is_empty());
        }
    }

    #[test]
    fn test_blank_title_from_export_not_listed() {
        let csv = "Nama Iklan,Produk Terjual,Biaya,Efektifitas Iklan\n,0,50000,0\n   ,2,20000,3\n";
        let report =
            crate::pipeline::build_report(csv.as_bytes(), &ReportConfig::default()).unwrap();
        let summary = &report.summary;
        assert_eq!(summary.high_spend.len(), 1);
        assert_eq!(summary.high_spend[0].spend, 50000.0);
        assert_eq!(summary.high_spend[0].name, "");
        assert!(summary.column(SummaryLabel::Red).entries.is_empty());
        assert_eq!(report.count(Category::Red), 1);
    }
}
