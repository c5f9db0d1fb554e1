//! Freeze tracker CLI - frost depth and degree-day data for the dashboard.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "freeze-tracker",
    version,
    about = "Frost depth and cold loading toolkit for Ely and Orr, MN"
)]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the processed CSV files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: ft_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = ft_cmd::DashboardConfig::load(cli.config.as_deref())?.with_data_dir(cli.data_dir);
    log::debug!("Using data directory {}", config.data_dir.display());
    ft_cmd::run(cli.command, &config)
}
