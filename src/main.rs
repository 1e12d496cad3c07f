mod chart;
mod color;
mod config;
mod data;
mod report;

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use config::{Cli, Config};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from(Cli::parse());

    match report::generate(&config) {
        Ok(report) => {
            info!(
                "Done: {} charts from {} measurements ({} rows dropped). Charts are in '{}'.",
                report.charts.len(),
                report.measurements,
                report.dropped,
                config.output_dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
