use std::cmp::Ordering;
use std::fmt;

// ---------------------------------------------------------------------------
// Alignment – the `Aligned` column
// ---------------------------------------------------------------------------

/// Whether the CUDA kernel ran with aligned memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Alignment {
    NonAligned,
    Aligned,
}

impl Alignment {
    /// Interpret the 0/1 flag stored in the CSV.
    pub fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            0 => Some(Alignment::NonAligned),
            1 => Some(Alignment::Aligned),
            _ => None,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::Aligned => write!(f, "aligned"),
            Alignment::NonAligned => write!(f, "non-aligned"),
        }
    }
}

// ---------------------------------------------------------------------------
// AlphaKey – Alpha_Percent as an ordered grouping key
// ---------------------------------------------------------------------------

/// `Alpha_Percent` wrapped so it can key a `BTreeMap`.
#[derive(Debug, Clone, Copy)]
pub struct AlphaKey(pub f64);

// -- Manual Eq/Ord so we can group by a float column --

impl PartialEq for AlphaKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AlphaKey {}

impl PartialOrd for AlphaKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AlphaKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for AlphaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Measurement – one row of the results CSV
// ---------------------------------------------------------------------------

/// A single benchmark run (one row of the source CSV).
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Input string length in bytes.
    pub size_bytes: u64,
    /// Percentage of alphabetic characters in the input (0–100).
    pub alpha_percent: f64,
    pub alignment: Alignment,
    /// Serial execution time in milliseconds.
    pub time_serial_ms: f64,
    /// CUDA execution time in milliseconds.
    pub time_cuda_ms: f64,
}

// ---------------------------------------------------------------------------
// MeasurementTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All retained measurements, in file order.
#[derive(Debug, Clone, Default)]
pub struct MeasurementTable {
    pub rows: Vec<Measurement>,
    /// Rows discarded during loading because a cell was missing or not numeric.
    pub dropped: usize,
}

impl MeasurementTable {
    pub fn new(rows: Vec<Measurement>) -> Self {
        MeasurementTable { rows, dropped: 0 }
    }

    /// Number of measurements.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest `Size_Bytes` present, if any.
    pub fn max_size(&self) -> Option<u64> {
        self.rows.iter().map(|m| m.size_bytes).max()
    }

    /// Iterate over the rows with the given alignment, keeping file order.
    pub fn with_alignment(&self, alignment: Alignment) -> impl Iterator<Item = &Measurement> {
        self.rows.iter().filter(move |m| m.alignment == alignment)
    }
}

#[cfg(test)]
pub(crate) fn measurement(
    size_bytes: u64,
    alpha_percent: f64,
    alignment: Alignment,
    time_serial_ms: f64,
    time_cuda_ms: f64,
) -> Measurement {
    Measurement {
        size_bytes,
        alpha_percent,
        alignment,
        time_serial_ms,
        time_cuda_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn alignment_flag() {
        assert_eq!(Alignment::from_flag(1), Some(Alignment::Aligned));
        assert_eq!(Alignment::from_flag(0), Some(Alignment::NonAligned));
        assert_eq!(Alignment::from_flag(2), None);
    }

    #[test]
    fn alpha_keys_group_equal_values() {
        let keys: BTreeSet<AlphaKey> = [50.0, 25.0, 50.0, 0.0]
            .into_iter()
            .map(AlphaKey)
            .collect();
        let ordered: Vec<f64> = keys.into_iter().map(|k| k.0).collect();
        assert_eq!(ordered, vec![0.0, 25.0, 50.0]);
    }

    #[test]
    fn max_size_picks_largest() {
        let table = MeasurementTable::new(vec![
            measurement(1024, 50.0, Alignment::Aligned, 1.0, 1.0),
            measurement(1_048_576, 50.0, Alignment::Aligned, 1.0, 1.0),
            measurement(4096, 50.0, Alignment::NonAligned, 1.0, 1.0),
        ]);
        assert_eq!(table.max_size(), Some(1_048_576));
        assert_eq!(MeasurementTable::default().max_size(), None);
    }
}
