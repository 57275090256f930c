//! Per-row performance classification.
//!
//! [`classify`] is a pure function of one row's metrics, so rows can be
//! classified independently (and in parallel).

use std::fmt;
use std::str::FromStr;

/// Spend at or above this with zero sales is reported as wasted spend.
pub const HIGH_SPEND_THRESHOLD: f64 = 10_000.0;

/// Efficiency below this is red.
pub const YELLOW_FROM: f64 = 8.0;

/// Efficiency at or above this is green.
pub const GREEN_FROM: f64 = 10.0;

/// Which kind of export is being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Whole-account export: group rows are part of every summary.
    #[default]
    Full,
    /// Per-group export holding only product ads: group rows are left out of
    /// the summaries and a missing efficiency does not count against an ad.
    Group,
}

impl Mode {
    /// Selector label used by the export tooling.
    pub fn selector(&self) -> &'static str {
        match self {
            Mode::Full => "CSV Keseluruhan (Normal)",
            Mode::Group => "CSV Grup Iklan (hanya iklan produk)",
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "full" | "normal" => Ok(Mode::Full),
            "group" | "grup" => Ok(Mode::Group),
            _ if lower == Mode::Full.selector().to_lowercase() => Ok(Mode::Full),
            _ if lower == Mode::Group.selector().to_lowercase() => Ok(Mode::Group),
            _ => Err(format!(
                "unknown mode '{}' (expected 'full' or 'group')",
                s.trim()
            )),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Full => write!(f, "full"),
            Mode::Group => write!(f, "group"),
        }
    }
}

/// Performance tier of a rated ad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Red,
    Yellow,
    Green,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Red, Category::Yellow, Category::Green];

    /// Label written to the report.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Red => "MERAH",
            Category::Yellow => "KUNING",
            Category::Green => "HIJAU",
        }
    }
}

/// Full outcome of classifying one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Units sold or spend is missing.
    MissingData,
    /// Sales with no spend: organic conversion, reported on its own.
    FreeConversion,
    /// No sales and spend at or above [`HIGH_SPEND_THRESHOLD`].
    HighSpendNoSales,
    /// No sales and little spend yet; not judged.
    WarmingUp,
    /// Data present but no tier applies.
    Unrated,
    Rated(Category),
}

impl Verdict {
    pub fn category(&self) -> Option<Category> {
        match self {
            Verdict::Rated(c) => Some(*c),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::MissingData => "missing-data",
            Verdict::FreeConversion => "free-conversion",
            Verdict::HighSpendNoSales => "high-spend-no-sales",
            Verdict::WarmingUp => "warming-up",
            Verdict::Unrated => "unrated",
            Verdict::Rated(_) => "rated",
        }
    }
}

/// Numeric metrics of one row; `None` means missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    pub efficiency: Option<f64>,
    pub units_sold: Option<f64>,
    pub direct_revenue: Option<f64>,
    pub spend: Option<f64>,
}

impl Metrics {
    /// Sales with no direct revenue attributed (assist-only conversion).
    pub fn is_blue_flag(&self) -> bool {
        matches!(self.units_sold, Some(u) if u > 0.0)
            && self.direct_revenue.map_or(true, |r| r == 0.0)
    }
}

/// Classify one row. The first matching rule wins.
///
/// With `split_free_conversions` off, rows with sales but no spend are rated
/// by efficiency like any other row.
pub fn classify(metrics: &Metrics, mode: Mode, split_free_conversions: bool) -> Verdict {
    let (units, spend) = match (metrics.units_sold, metrics.spend) {
        (Some(u), Some(s)) => (u, s),
        _ => return Verdict::MissingData,
    };

    if split_free_conversions && spend == 0.0 && units > 0.0 {
        return Verdict::FreeConversion;
    }

    if units == 0.0 {
        return if spend >= HIGH_SPEND_THRESHOLD {
            Verdict::HighSpendNoSales
        } else {
            Verdict::WarmingUp
        };
    }

    let efficiency = metrics.efficiency;
    if mode == Mode::Group && efficiency.is_none() {
        return if units > 0.0 {
            Verdict::Rated(Category::Green)
        } else {
            Verdict::Unrated
        };
    }

    match efficiency {
        Some(e) if e >= GREEN_FROM => Verdict::Rated(Category::Green),
        Some(e) if e >= YELLOW_FROM => Verdict::Rated(Category::Yellow),
        _ => Verdict::Rated(Category::Red),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(units: Option<f64>, spend: Option<f64>, efficiency: Option<f64>) -> Metrics {
        Metrics {
            efficiency,
            units_sold: units,
            direct_revenue: None,
            spend,
        }
    }

    #[test]
    fn test_missing_data() {
        let m = metrics(None, Some(5000.0), Some(12.0));
        assert_eq!(classify(&m, Mode::Full, true), Verdict::MissingData);
        let m = metrics(Some(3.0), None, Some(12.0));
        assert_eq!(classify(&m, Mode::Group, true), Verdict::MissingData);
    }

    #[test]
    fn test_spend_threshold_boundary() {
        let m = metrics(Some(0.0), Some(9999.99), Some(0.0));
        assert_eq!(classify(&m, Mode::Full, true), Verdict::WarmingUp);
        let m = metrics(Some(0.0), Some(10000.0), None);
        assert_eq!(classify(&m, Mode::Full, true), Verdict::HighSpendNoSales);
        assert_eq!(classify(&m, Mode::Full, true).category(), None);
    }

    #[test]
    fn test_efficiency_boundaries() {
        let at = |e: f64| classify(&metrics(Some(5.0), Some(20000.0), Some(e)), Mode::Full, true);
        assert_eq!(at(7.999), Verdict::Rated(Category::Red));
        assert_eq!(at(8.0), Verdict::Rated(Category::Yellow));
        assert_eq!(at(9.99), Verdict::Rated(Category::Yellow));
        assert_eq!(at(10.0), Verdict::Rated(Category::Green));
    }

    #[test]
    fn test_missing_efficiency_depends_on_mode() {
        let m = metrics(Some(3.0), Some(20000.0), None);
        assert_eq!(classify(&m, Mode::Group, true), Verdict::Rated(Category::Green));
        assert_eq!(classify(&m, Mode::Full, true), Verdict::Rated(Category::Red));
    }

    #[test]
    fn test_negative_units_unrated_in_group_mode() {
        let m = metrics(Some(-1.0), Some(20000.0), None);
        assert_eq!(classify(&m, Mode::Group, true), Verdict::Unrated);
        assert_eq!(classify(&m, Mode::Full, true), Verdict::Rated(Category::Red));
    }

    #[test]
    fn test_free_conversion_split() {
        let m = metrics(Some(2.0), Some(0.0), Some(0.0));
        assert_eq!(classify(&m, Mode::Full, true), Verdict::FreeConversion);
        assert_eq!(classify(&m, Mode::Full, false), Verdict::Rated(Category::Red));

        let m = metrics(Some(2.0), Some(0.0), Some(15.0));
        assert_eq!(classify(&m, Mode::Full, false), Verdict::Rated(Category::Green));
    }

    #[test]
    fn test_blue_flag() {
        let mut m = metrics(Some(5.0), Some(1000.0), Some(9.0));
        assert!(m.is_blue_flag());
        m.direct_revenue = Some(0.0);
        assert!(m.is_blue_flag());
        m.direct_revenue = Some(150000.0);
        assert!(!m.is_blue_flag());
        m.units_sold = Some(0.0);
        m.direct_revenue = None;
        assert!(!m.is_blue_flag());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("full".parse::<Mode>(), Ok(Mode::Full));
        assert_eq!(" GROUP ".parse::<Mode>(), Ok(Mode::Group));
        assert_eq!("CSV Keseluruhan (Normal)".parse::<Mode>(), Ok(Mode::Full));
        assert_eq!(
            "CSV Grup Iklan (hanya iklan produk)".parse::<Mode>(),
            Ok(Mode::Group)
        );
        assert!("weekly".parse::<Mode>().is_err());
    }
}
