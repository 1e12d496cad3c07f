//! Command-line interface and the run configuration derived from it.

use std::path::PathBuf;

use clap::Parser;

/// Render serial vs CUDA benchmark results as comparison charts.
#[derive(Parser, Debug)]
#[command(name = "perf-charts", version, about)]
pub struct Cli {
    /// Benchmark results CSV.
    #[arg(long, short = 'i', default_value = "performance_results.csv")]
    pub input: PathBuf,

    /// Directory the PNG charts are written to (created if missing).
    #[arg(long, short = 'o', default_value = "performance_plots")]
    pub output_dir: PathBuf,

    /// Alpha_Percent value selected for the size and speedup charts.
    #[arg(long, default_value_t = 50.0)]
    pub alpha: f64,

    /// Image width in pixels.
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Image height in pixels.
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}

/// Everything a run needs; independent of where the binary lives.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub alpha_percent: f64,
    /// (width, height) of every chart.
    pub image_size: (u32, u32),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("performance_results.csv"),
            output_dir: PathBuf::from("performance_plots"),
            alpha_percent: 50.0,
            image_size: (1200, 600),
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            output_dir: cli.output_dir,
            alpha_percent: cli.alpha,
            image_size: (cli.width, cli.height),
        }
    }
}
