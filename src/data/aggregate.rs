use std::collections::BTreeMap;
use std::fmt;

use super::model::{Alignment, Measurement, MeasurementTable};

// ---------------------------------------------------------------------------
// Group means
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn value(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Arithmetic mean of `value` for each distinct `key`, ordered by key.
pub fn mean_by<K, FK, FV>(table: &MeasurementTable, key: FK, value: FV) -> BTreeMap<K, f64>
where
    K: Ord,
    FK: Fn(&Measurement) -> K,
    FV: Fn(&Measurement) -> f64,
{
    let mut groups: BTreeMap<K, Mean> = BTreeMap::new();
    for m in &table.rows {
        groups.entry(key(m)).or_default().push(value(m));
    }
    groups.into_iter().map(|(k, mean)| (k, mean.value())).collect()
}

// ---------------------------------------------------------------------------
// Per-size CUDA lookup for speedup ratios
// ---------------------------------------------------------------------------

/// CUDA time per `Size_Bytes` for one alignment variant.
///
/// When several rows share a (size, alignment) pair the first one in file
/// order wins; the others are counted in `duplicates`.
#[derive(Debug, Clone, Default)]
pub struct CudaLookup {
    pub times: BTreeMap<u64, f64>,
    pub duplicates: usize,
}

impl CudaLookup {
    pub fn build(table: &MeasurementTable, alignment: Alignment) -> Self {
        let mut lookup = CudaLookup::default();
        for m in table.with_alignment(alignment) {
            if lookup.times.contains_key(&m.size_bytes) {
                lookup.duplicates += 1;
            } else {
                lookup.times.insert(m.size_bytes, m.time_cuda_ms);
            }
        }
        lookup
    }

    pub fn get(&self, size: u64) -> Option<f64> {
        self.times.get(&size).copied()
    }
}

/// Ratio of serial to accelerated time. `None` when the ratio is not a
/// finite number (zero CUDA time).
pub fn speedup_ratio(serial_ms: f64, cuda_ms: f64) -> Option<f64> {
    let ratio = serial_ms / cuda_ms;
    ratio.is_finite().then_some(ratio)
}

/// Speedups of one row against both CUDA variants at its size.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedupRow {
    pub size_bytes: u64,
    pub alignment: Alignment,
    /// Serial time over aligned CUDA time (`Speedup_A`).
    pub aligned: Option<f64>,
    /// Serial time over non-aligned CUDA time (`Speedup_NA`).
    pub non_aligned: Option<f64>,
}

/// A size with rows present but no CUDA measurement for one alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingVariant {
    pub size_bytes: u64,
    pub alignment: Alignment,
}

impl fmt::Display for MissingVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size {} bytes has no {} CUDA measurement",
            self.size_bytes, self.alignment
        )
    }
}

/// Result of computing speedups for a table.
#[derive(Debug, Clone, Default)]
pub struct Speedups {
    pub rows: Vec<SpeedupRow>,
    /// Duplicate (size, alignment) rows that lost the first-match lookup.
    pub duplicates: usize,
    /// Rows whose plotted ratio is undefined (zero CUDA time for their own
    /// alignment variant).
    pub undefined: usize,
}

/// Compute `Speedup_A` and `Speedup_NA` for every row of `table`.
pub fn speedups(table: &MeasurementTable) -> Result<Speedups, MissingVariant> {
    let aligned = CudaLookup::build(table, Alignment::Aligned);
    let non_aligned = CudaLookup::build(table, Alignment::NonAligned);

    let mut out = Speedups {
        rows: Vec::with_capacity(table.len()),
        duplicates: aligned.duplicates + non_aligned.duplicates,
        undefined: 0,
    };

    for m in &table.rows {
        let ratio_against = |lookup: &CudaLookup,
                             alignment: Alignment|
         -> Result<Option<f64>, MissingVariant> {
            let cuda = lookup.get(m.size_bytes).ok_or(MissingVariant {
                size_bytes: m.size_bytes,
                alignment,
            })?;
            Ok(speedup_ratio(m.time_serial_ms, cuda))
        };
        let speedup_aligned = ratio_against(&aligned, Alignment::Aligned)?;
        let speedup_non_aligned = ratio_against(&non_aligned, Alignment::NonAligned)?;

        // Only the ratio against the row's own variant is plotted.
        let plotted = match m.alignment {
            Alignment::Aligned => speedup_aligned,
            Alignment::NonAligned => speedup_non_aligned,
        };
        if plotted.is_none() {
            out.undefined += 1;
        }

        out.rows.push(SpeedupRow {
            size_bytes: m.size_bytes,
            alignment: m.alignment,
            aligned: speedup_aligned,
            non_aligned: speedup_non_aligned,
        });
    }

    Ok(out)
}
