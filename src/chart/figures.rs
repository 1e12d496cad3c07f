//! The three comparison charts: aggregation of the measurement table into
//! backend-independent [`ChartSpec`]s.

use log::warn;
use thiserror::Error;

use super::model::{ChartSpec, LineStyle, Marker, ReferenceLine, Scale, Series};
use crate::data::aggregate::{mean_by, speedups, MissingVariant};
use crate::data::filter::{with_alpha, with_size};
use crate::data::model::{Alignment, AlphaKey, MeasurementTable};

pub const SIZE_CHART_FILE: &str = "1 - Rendimiento vs Size.png";
pub const ALPHA_CHART_FILE: &str = "2 - Efecto Alpha Percent.png";
pub const SPEEDUP_CHART_FILE: &str = "3 - Speedup vs Size.png";

const SIZE_AXIS_LABEL: &str = "Tamaño de Cadena (bytes, Escala Logarítmica)";
const TIME_AXIS_LABEL: &str = "Tiempo de Ejecución (ms)";

/// Errors that prevent a chart from being built.
#[derive(Error, Debug, PartialEq)]
pub enum ChartError {
    #[error("{chart}: no measurements with Alpha_Percent = {alpha}")]
    NoRowsForAlpha { chart: &'static str, alpha: f64 },

    #[error("{chart}: no measurements loaded")]
    EmptyTable { chart: &'static str },

    #[error("{chart}: {missing}")]
    MissingVariant {
        chart: &'static str,
        missing: MissingVariant,
    },
}

type Result<T> = core::result::Result<T, ChartError>;

// ---------------------------------------------------------------------------
// Chart 1 – execution time vs. input size
// ---------------------------------------------------------------------------

/// Serial mean and raw CUDA times against `Size_Bytes` at a fixed alpha.
pub fn time_vs_size(table: &MeasurementTable, alpha: f64) -> Result<ChartSpec> {
    let subset = with_alpha(table, alpha);
    if subset.is_empty() {
        return Err(ChartError::NoRowsForAlpha {
            chart: SIZE_CHART_FILE,
            alpha,
        });
    }

    // Both alignment variants carry a serial time for the same input.
    let serial = mean_by(&subset, |m| m.size_bytes, |m| m.time_serial_ms)
        .into_iter()
        .map(|(size, t)| (size as f64, t))
        .collect();

    Ok(ChartSpec {
        file_name: SIZE_CHART_FILE,
        title: format!("Gráfico 1: Comparación de Desempeño vs. Tamaño (Alpha {alpha}%)"),
        x_label: SIZE_AXIS_LABEL,
        y_label: TIME_AXIS_LABEL,
        x_scale: Scale::Log,
        series: vec![
            Series::new("Serial (Promedio)", "gray", serial),
            Series::new("CUDA (Alineado)", "blue", cuda_by_size(&subset, Alignment::Aligned))
                .line(LineStyle::Dashed),
            Series::new(
                "CUDA (No Alineado)",
                "red",
                cuda_by_size(&subset, Alignment::NonAligned),
            )
            .line(LineStyle::Dotted),
        ],
        reference: None,
    })
}

fn cuda_by_size(table: &MeasurementTable, alignment: Alignment) -> Vec<(f64, f64)> {
    table
        .with_alignment(alignment)
        .map(|m| (m.size_bytes as f64, m.time_cuda_ms))
        .collect()
}

// ---------------------------------------------------------------------------
// Chart 2 – execution time vs. alphabetic percentage
// ---------------------------------------------------------------------------

/// Serial mean and aligned CUDA times against `Alpha_Percent` at the largest size.
pub fn time_vs_alpha(table: &MeasurementTable) -> Result<ChartSpec> {
    let fixed_size = table.max_size().ok_or(ChartError::EmptyTable {
        chart: ALPHA_CHART_FILE,
    })?;
    let subset = with_size(table, fixed_size);

    let serial = mean_by(&subset, |m| AlphaKey(m.alpha_percent), |m| m.time_serial_ms)
        .into_iter()
        .map(|(alpha, t)| (alpha.0, t))
        .collect();
    let aligned = subset
        .with_alignment(Alignment::Aligned)
        .map(|m| (m.alpha_percent, m.time_cuda_ms))
        .collect();

    Ok(ChartSpec {
        file_name: ALPHA_CHART_FILE,
        title: format!(
            "Gráfico 2: Efecto del Porcentaje Alfabético (Tamaño Fijo: {fixed_size} bytes)"
        ),
        x_label: "Porcentaje de Caracteres Alfabéticos (%)",
        y_label: TIME_AXIS_LABEL,
        x_scale: Scale::Linear,
        series: vec![
            Series::new("Serial (Promedio)", "gray", serial).marker(Marker::Circle),
            Series::new("CUDA (Alineado)", "blue", aligned).marker(Marker::Square),
        ],
        reference: None,
    })
}

// ---------------------------------------------------------------------------
// Chart 3 – speedup vs. input size
// ---------------------------------------------------------------------------

/// Speedup of each CUDA variant over serial, with a break-even line at 1.
pub fn speedup_vs_size(table: &MeasurementTable, alpha: f64) -> Result<ChartSpec> {
    let subset = with_alpha(table, alpha);
    if subset.is_empty() {
        return Err(ChartError::NoRowsForAlpha {
            chart: SPEEDUP_CHART_FILE,
            alpha,
        });
    }

    let result = speedups(&subset).map_err(|missing| ChartError::MissingVariant {
        chart: SPEEDUP_CHART_FILE,
        missing,
    })?;
    if result.duplicates > 0 {
        warn!(
            "{} rows share a (Size_Bytes, Aligned) pair with an earlier row; \
             speedups use the first CUDA time per size",
            result.duplicates
        );
    }
    if result.undefined > 0 {
        warn!(
            "{} speedup points omitted (CUDA time of 0 ms)",
            result.undefined
        );
    }

    let mut aligned = Vec::new();
    let mut non_aligned = Vec::new();
    for row in &result.rows {
        let x = row.size_bytes as f64;
        match row.alignment {
            Alignment::Aligned => aligned.extend(row.aligned.map(|s| (x, s))),
            Alignment::NonAligned => non_aligned.extend(row.non_aligned.map(|s| (x, s))),
        }
    }

    Ok(ChartSpec {
        file_name: SPEEDUP_CHART_FILE,
        title: format!("Gráfico 3: Aceleración (Speedup) CUDA vs. Serial (Alpha {alpha}%)"),
        x_label: SIZE_AXIS_LABEL,
        y_label: "Aceleración (Speedup)",
        x_scale: Scale::Log,
        series: vec![
            Series::new("Speedup (Alineado)", "green", aligned).marker(Marker::TriangleUp),
            Series::new("Speedup (No Alineado)", "orange", non_aligned)
                .marker(Marker::TriangleDown),
        ],
        reference: Some(ReferenceLine {
            label: "Speedup = 1 (Punto de Equilibrio)".into(),
            y: 1.0,
            color: "red",
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::measurement;

    fn table() -> MeasurementTable {
        MeasurementTable::new(vec![
            measurement(100, 50.0, Alignment::Aligned, 10.0, 2.0),
            measurement(100, 50.0, Alignment::NonAligned, 12.0, 4.0),
            measurement(1000, 50.0, Alignment::Aligned, 100.0, 5.0),
            measurement(1000, 50.0, Alignment::NonAligned, 100.0, 10.0),
            measurement(1000, 0.0, Alignment::Aligned, 80.0, 4.0),
            measurement(1000, 0.0, Alignment::NonAligned, 84.0, 6.0),
            measurement(10, 100.0, Alignment::Aligned, 1.0, 1.0),
        ])
    }

    #[test]
    fn size_chart_series() {
        let spec = time_vs_size(&table(), 50.0).unwrap();
        assert_eq!(spec.file_name, "1 - Rendimiento vs Size.png");
        assert_eq!(spec.x_scale, Scale::Log);
        assert_eq!(spec.series.len(), 3);
        assert_eq!(spec.series[0].points, vec![(100.0, 11.0), (1000.0, 100.0)]);
        assert_eq!(spec.series[1].points, vec![(100.0, 2.0), (1000.0, 5.0)]);
        assert_eq!(spec.series[2].points, vec![(100.0, 4.0), (1000.0, 10.0)]);
        assert_eq!(spec.series[2].line, LineStyle::Dotted);
        assert!(spec.title.contains("Alpha 50%"));
    }

    #[test]
    fn size_chart_without_matching_alpha() {
        let err = time_vs_size(&table(), 75.0).unwrap_err();
        assert_eq!(
            err,
            ChartError::NoRowsForAlpha {
                chart: SIZE_CHART_FILE,
                alpha: 75.0
            }
        );
    }

    #[test]
    fn alpha_chart_uses_largest_size() {
        let spec = time_vs_alpha(&table()).unwrap();
        assert_eq!(spec.file_name, "2 - Efecto Alpha Percent.png");
        assert!(spec.title.contains("Tamaño Fijo: 1000 bytes"));
        assert_eq!(spec.series[0].points, vec![(0.0, 82.0), (50.0, 100.0)]);
        assert_eq!(spec.series[1].points, vec![(50.0, 5.0), (0.0, 4.0)]);
        assert_eq!(spec.series[1].marker, Marker::Square);
    }

    #[test]
    fn alpha_chart_on_empty_table() {
        let err = time_vs_alpha(&MeasurementTable::default()).unwrap_err();
        assert_eq!(
            err,
            ChartError::EmptyTable {
                chart: ALPHA_CHART_FILE
            }
        );
    }

    #[test]
    fn speedup_chart_series() {
        let spec = speedup_vs_size(&table(), 50.0).unwrap();
        assert_eq!(spec.file_name, "3 - Speedup vs Size.png");
        assert_eq!(spec.series[0].points, vec![(100.0, 5.0), (1000.0, 20.0)]);
        assert_eq!(spec.series[1].points, vec![(100.0, 3.0), (1000.0, 10.0)]);
        let reference = spec.reference.unwrap();
        assert_eq!(reference.y, 1.0);
    }

    #[test]
    fn speedup_chart_without_non_aligned_variant() {
        let err = speedup_vs_size(&table(), 100.0).unwrap_err();
        assert_eq!(
            err,
            ChartError::MissingVariant {
                chart: SPEEDUP_CHART_FILE,
                missing: MissingVariant {
                    size_bytes: 10,
                    alignment: Alignment::NonAligned,
                },
            }
        );
    }

    #[test]
    fn speedup_chart_omits_undefined_ratios() {
        let table = MeasurementTable::new(vec![
            measurement(100, 50.0, Alignment::Aligned, 10.0, 0.0),
            measurement(100, 50.0, Alignment::NonAligned, 10.0, 5.0),
        ]);
        let spec = speedup_vs_size(&table, 50.0).unwrap();
        assert!(spec.series[0].points.is_empty());
        assert_eq!(spec.series[1].points, vec![(100.0, 2.0)]);

        let omitted = speedups(&table).unwrap().undefined;
        let plotted: usize = spec.series.iter().map(|s| s.points.len()).sum();
        assert_eq!(omitted + plotted, table.len());
    }

    #[test]
    fn aggregation_is_deterministic() {
        let t = table();
        assert_eq!(time_vs_size(&t, 50.0), time_vs_size(&t, 50.0));
        assert_eq!(time_vs_alpha(&t), time_vs_alpha(&t));
        assert_eq!(speedup_vs_size(&t, 50.0), speedup_vs_size(&t, 50.0));
    }
}
