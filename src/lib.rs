//! Ads Report
//!
//! Turns a seller-ads performance export into a colored Excel report.
//!
//! This library provides:
//! - `loader`: Header detection and delimiter inference for raw exports
//! - `normalize`: Canonical title column
//! - `short_name`: Short product labels from noisy ad titles
//! - `classify`: Per-row performance tiers (MERAH / KUNING / HIJAU)
//! - `summary`: Numbered summary lists and special subsets
//! - `workbook`: Multi-sheet xlsx rendering
//! - `pipeline`: End-to-end entry points used by the CLI
//!
//! Binaries:
//! - `ads-report`: Command-line front end

pub mod ad_row;
pub mod classify;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod pipeline;
pub mod short_name;
pub mod summary;
pub mod vocab;
pub mod workbook;

pub use ad_row::AdRow;
pub use classify::{classify, Category, Metrics, Mode, Verdict};
pub use error::{Diagnostic, ReportError};
pub use pipeline::{build_report, AdsReport};
pub use summary::{CategoryFilter, ReportConfig, SummaryLabel};
