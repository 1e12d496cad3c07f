use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use crate::chart::figures::{self, ChartError};
use crate::chart::model::ChartSpec;
use crate::chart::render::render_png;
use crate::config::Config;
use crate::data::loader::load_csv;
use crate::data::model::MeasurementTable;

// ---------------------------------------------------------------------------
// Pipeline: load once, then build + render each chart in turn
// ---------------------------------------------------------------------------

type ChartFn = fn(&MeasurementTable, &Config) -> core::result::Result<ChartSpec, ChartError>;

/// Chart builders in output order. Each is evaluated only after the previous
/// chart has been written, so a failure leaves earlier PNGs in place.
const CHARTS: [ChartFn; 3] = [
    |table, config| figures::time_vs_size(table, config.alpha_percent),
    |table, _| figures::time_vs_alpha(table),
    |table, config| figures::speedup_vs_size(table, config.alpha_percent),
];

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct Report {
    pub measurements: usize,
    pub dropped: usize,
    pub charts: Vec<PathBuf>,
}

/// Load `config.input` and write all charts to `config.output_dir`.
pub fn generate(config: &Config) -> Result<Report> {
    let table = load_csv(&config.input)?;
    ensure_output_dir(&config.output_dir)?;

    let mut charts = Vec::with_capacity(CHARTS.len());
    for (n, build) in CHARTS.iter().enumerate() {
        let spec = build(&table, config)?;
        let path = config.output_dir.join(spec.file_name);
        render_png(&spec, &path, config.image_size)
            .with_context(|| format!("writing '{}'", path.display()))?;
        info!("Chart {} generated: {}", n + 1, spec.file_name);
        charts.push(path);
    }

    Ok(Report {
        measurements: table.len(),
        dropped: table.dropped,
        charts,
    })
}

fn ensure_output_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory '{}'", dir.display()))?;
    info!("Directory '{}' created.", dir.display());
    Ok(())
}
