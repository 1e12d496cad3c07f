use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::{debug, info};
use thiserror::Error;

use super::model::{Alignment, Measurement, MeasurementTable};

pub const COL_SIZE: &str = "Size_Bytes";
pub const COL_ALPHA: &str = "Alpha_Percent";
pub const COL_ALIGNED: &str = "Aligned";
pub const COL_TIME_SERIAL: &str = "Time_Serial_ms";
pub const COL_TIME_CUDA: &str = "Time_CUDA_ms";

/// Cell contents that count as a missing value, matching the NA tokens
/// dataframe readers recognise by default.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Errors that abort loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("input CSV '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read CSV '{}': {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV is missing required column '{0}'")]
    MissingColumn(&'static str),
}

type Result<T> = core::result::Result<T, LoadError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the benchmark results table from a CSV file.
///
/// Rows with a missing cell in any column, or whose values do not coerce to
/// numbers, are dropped and counted in [`MeasurementTable::dropped`].
pub fn load_csv(path: &Path) -> Result<MeasurementTable> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    info!("Loading data from '{}'...", path.display());

    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let headers = reader.headers().map_err(csv_err)?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut table = MeasurementTable::default();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(csv_err)?;
        match columns.parse(&record) {
            Some(m) => table.rows.push(m),
            None => {
                debug!("dropping CSV row {row_no}: {:?}", record.iter().collect::<Vec<_>>());
                table.dropped += 1;
            }
        }
    }

    info!(
        "Loaded {} measurements ({} rows dropped)",
        table.len(),
        table.dropped
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Column lookup and cell coercion
// ---------------------------------------------------------------------------

/// Positions of the required columns within a record.
struct ColumnIndex {
    size: usize,
    alpha: usize,
    aligned: usize,
    time_serial: usize,
    time_cuda: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(LoadError::MissingColumn(name))
        };
        Ok(ColumnIndex {
            size: find(COL_SIZE)?,
            alpha: find(COL_ALPHA)?,
            aligned: find(COL_ALIGNED)?,
            time_serial: find(COL_TIME_SERIAL)?,
            time_cuda: find(COL_TIME_CUDA)?,
        })
    }

    /// Coerce one record; `None` means the row is dropped.
    fn parse(&self, record: &StringRecord) -> Option<Measurement> {
        if record.iter().any(is_missing) {
            return None;
        }
        Some(Measurement {
            size_bytes: parse_size(record.get(self.size)?)?,
            alpha_percent: parse_number(record.get(self.alpha)?)?,
            alignment: Alignment::from_flag(parse_flag(record.get(self.aligned)?)?)?,
            time_serial_ms: parse_number(record.get(self.time_serial)?)?,
            time_cuda_ms: parse_number(record.get(self.time_cuda)?)?,
        })
    }
}

fn is_missing(cell: &str) -> bool {
    NA_TOKENS.contains(&cell.trim())
}

/// Numeric coercion: anything that is not a finite number becomes missing.
fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Sizes are integral; `1024.0` is accepted, `1024.5` is not.
fn parse_size(cell: &str) -> Option<u64> {
    let cell = cell.trim();
    if let Ok(v) = cell.parse::<u64>() {
        return Some(v);
    }
    let v = parse_number(cell)?;
    (v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64).then_some(v as u64)
}

fn parse_flag(cell: &str) -> Option<i64> {
    let cell = cell.trim();
    if let Ok(v) = cell.parse::<i64>() {
        return Some(v);
    }
    let v = parse_number(cell)?;
    (v.fract() == 0.0).then_some(v as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "Size_Bytes,Alpha_Percent,Aligned,Time_Serial_ms,Time_CUDA_ms\n";

    fn write_csv(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("performance_results.csv");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn drops_rows_with_non_numeric_times() {
        let dir = TempDir::new().unwrap();
        let body = format!(
            "{HEADER}\
             1024,50,1,0.50,0.10\n\
             1024,50,0,0.52,0.12\n\
             4096,50,1,ERROR,0.20\n\
             4096,50,0,2.10,timeout\n\
             16384,50,1,8.00,0.40\n"
        );
        let table = load_csv(&write_csv(&dir, &body)).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.dropped, 2);
        assert_eq!(table.rows[2].size_bytes, 16384);
        assert_eq!(table.rows[2].alignment, Alignment::Aligned);
        assert_eq!(table.rows[2].time_serial_ms, 8.0);
    }

    #[test]
    fn drops_rows_with_missing_cells_in_any_column() {
        let dir = TempDir::new().unwrap();
        let body = "Size_Bytes,Alpha_Percent,Aligned,Time_Serial_ms,Time_CUDA_ms,Note\n\
                    1024,50,1,0.5,0.1,ok\n\
                    1024,50,0,0.5,,ok\n\
                    2048,50,1,NaN,0.1,ok\n\
                    2048,50,0,1.0,0.2,\n\
                    4096,50,0,2.0,0.3,NA\n";
        let table = load_csv(&write_csv(&dir, body)).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.dropped, 4);
    }

    #[test]
    fn drops_rows_with_infinite_times() {
        let dir = TempDir::new().unwrap();
        let body = format!(
            "{HEADER}\
             1024,50,1,inf,0.10\n\
             1024,50,0,0.52,-infinity\n\
             4096,50,1,2.00,0.20\n"
        );
        let table = load_csv(&write_csv(&dir, &body)).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.dropped, 2);
        assert_eq!(table.rows[0].size_bytes, 4096);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number(" 1.5 "), Some(1.5));
    }

    #[test]
    fn tolerates_extra_and_reordered_columns() {
        let dir = TempDir::new().unwrap();
        let body = "Run,Time_CUDA_ms,Aligned,Size_Bytes,Time_Serial_ms,Alpha_Percent\n\
                    1,0.25,0,2048.0,1.5,75\n";
        let table = load_csv(&write_csv(&dir, body)).unwrap();

        assert_eq!(table.len(), 1);
        let m = &table.rows[0];
        assert_eq!(m.size_bytes, 2048);
        assert_eq!(m.alpha_percent, 75.0);
        assert_eq!(m.alignment, Alignment::NonAligned);
        assert_eq!(m.time_serial_ms, 1.5);
        assert_eq!(m.time_cuda_ms, 0.25);
    }

    #[test]
    fn unknown_alignment_flag_is_dropped() {
        let dir = TempDir::new().unwrap();
        let body = format!("{HEADER}1024,50,2,0.5,0.1\n1024,50,1,0.5,0.1\n");
        let table = load_csv(&write_csv(&dir, &body)).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.dropped, 1);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.csv");
        let err = load_csv(&path).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(p) if p == path));
    }

    #[test]
    fn missing_column_is_fatal() {
        let dir = TempDir::new().unwrap();
        let body = "Size_Bytes,Alpha_Percent,Aligned,Time_Serial_ms\n1024,50,1,0.5\n";
        let err = load_csv(&write_csv(&dir, body)).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(COL_TIME_CUDA)));
    }

    #[test]
    fn ragged_row_is_fatal() {
        let dir = TempDir::new().unwrap();
        let body = format!("{HEADER}1024,50,1,0.5,0.1\n1024,50\n");
        let err = load_csv(&write_csv(&dir, &body)).unwrap_err();
        assert!(matches!(err, LoadError::Csv { .. }));
    }

    #[test]
    fn size_coercion() {
        assert_eq!(parse_size("1024"), Some(1024));
        assert_eq!(parse_size("1024.0"), Some(1024));
        assert_eq!(parse_size("1024.5"), None);
        assert_eq!(parse_size("-3"), None);
        assert_eq!(parse_size("big"), None);
    }
}
