//! Command implementations for the freeze tracker CLI.
//!
//! Provides subcommands for recomputing the dashboard charts and for
//! preparing the processed CSV files they read.

use clap::Subcommand;
use std::path::PathBuf;

pub mod config;
pub mod loader;
pub mod prepare;
pub mod recompute;
pub mod years;

pub use config::DashboardConfig;

#[derive(Subcommand)]
pub enum Command {
    /// Build every chart for the selected winters and write it as JSON
    Recompute {
        /// Winter to include, e.g. 2010-2011 (repeatable)
        #[arg(short, long = "season")]
        seasons: Vec<String>,

        /// Include every configured winter
        #[arg(long, conflicts_with = "seasons")]
        all: bool,

        /// Date for the "today" marker (defaults to the local date)
        #[arg(long)]
        today: Option<String>,

        /// Output path for the JSON (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Normalize the raw frost/thaw probe readings into the prepared CSV
    PrepareFreezeThaw {
        /// Raw probe CSV (defaults to the configured file)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Prepared CSV (defaults to the configured file)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Derive degree days from daily temperatures and write one file per winter
    MakeYears {
        /// Daily temperature CSV (IYEAR,IMONTH,IDAY,AVG_DAILY_TEMP_F)
        #[arg(short, long)]
        input: PathBuf,

        /// City code used in the output file names, e.g. ELY
        #[arg(short, long)]
        city: String,

        /// First winter start year
        #[arg(long)]
        first: Option<i32>,

        /// Last winter start year
        #[arg(long)]
        last: Option<i32>,

        /// Directory for the per-winter files (defaults to the data directory)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Average hourly readings (SOURCE 7) into daily mean temperatures
    ImportHourly {
        /// Hourly CSV (SOURCE,IYEAR,IMONTH,IDAY,TMP_F)
        #[arg(short, long)]
        input: PathBuf,

        /// Daily CSV to write
        #[arg(short, long)]
        output: PathBuf,
    },
}

pub fn run(command: Command, config: &DashboardConfig) -> anyhow::Result<()> {
    match command {
        Command::Recompute {
            seasons,
            all,
            today,
            output,
        } => recompute::run_recompute(
            config,
            &seasons,
            all,
            today.as_deref(),
            output.as_deref(),
        ),
        Command::PrepareFreezeThaw { input, output } => {
            prepare::run_prepare_freeze_thaw(config, input.as_deref(), output.as_deref())
        }
        Command::MakeYears {
            input,
            city,
            first,
            last,
            output_dir,
        } => years::run_make_years(config, &input, &city, first, last, output_dir.as_deref())
            .map(|_| ()),
        Command::ImportHourly { input, output } => years::run_import_hourly(&input, &output),
    }
}
