//! Ads Report CLI - Classify seller-ads exports and build Excel reports
//!
//! Reads a CSV export from the seller-ads dashboard, rates every ad by
//! efficiency, shortens ad titles for the summary lists, and writes a
//! colored multi-sheet workbook.

use ads_report::pipeline::{
    format_summary, generate_report, load_report, write_classified_csv, ReportFileConfig,
};
use ads_report::short_name::short_name;
use ads_report::{CategoryFilter, Mode, ReportConfig};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ads-report")]
#[command(about = "Classify seller-ads exports and build colored Excel reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ReportOptions {
    /// Export type: "full" (whole account) or "group" (product ads of one group)
    #[arg(short, long, default_value = "full")]
    mode: Mode,

    /// Leave the MERAH column of the summary sheet blank
    #[arg(long)]
    no_red: bool,

    /// Leave the KUNING column of the summary sheet blank
    #[arg(long)]
    no_yellow: bool,

    /// Leave the HIJAU column of the summary sheet blank
    #[arg(long)]
    no_green: bool,

    /// Leave the BIRU column of the summary sheet blank
    #[arg(long)]
    no_blue: bool,

    /// Rate ads with sales but no spend by efficiency instead of listing
    /// them on their own sheet
    #[arg(long)]
    no_free_conversion_split: bool,
}

impl ReportOptions {
    fn to_config(&self) -> ReportConfig {
        ReportConfig::default()
            .with_mode(self.mode)
            .with_filter(CategoryFilter {
                red: !self.no_red,
                yellow: !self.no_yellow,
                green: !self.no_green,
                blue: !self.no_blue,
            })
            .with_free_conversion_split(!self.no_free_conversion_split)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the Excel report for an export
    Report {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output xlsx file (default: input name with .xlsx extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: ReportOptions,
    },

    /// Print the summary lists without writing a workbook
    Summary {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        options: ReportOptions,
    },

    /// Write the classified rows as CSV
    Classify {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        options: ReportOptions,
    },

    /// Print the short name derived from each ad title
    ShortName {
        /// Ad titles
        #[arg(required = true)]
        titles: Vec<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            input,
            output,
            options,
        } => {
            let config = ReportFileConfig {
                input,
                output,
                report: options.to_config(),
            };
            println!("{}", generate_report(&config)?);
        }
        Commands::Summary { input, options } => {
            let report = load_report(&input, &options.to_config())?;
            for d in &report.diagnostics {
                eprintln!("warning: {}", d);
            }
            print!("{}", format_summary(&report));
        }
        Commands::Classify {
            input,
            output,
            options,
        } => {
            let report = load_report(&input, &options.to_config())?;
            let written = write_classified_csv(&report, &output)?;
            println!("Wrote {} rows to {}", written, output.display());
        }
        Commands::ShortName { titles } => {
            for title in &titles {
                println!("{}\t{}", title, short_name(title));
            }
        }
    }

    Ok(())
}
