use super::model::{MeasurementTable, Measurement};

// ---------------------------------------------------------------------------
// Row predicates producing independent sub-tables
// ---------------------------------------------------------------------------

/// Rows whose `Alpha_Percent` equals `alpha` exactly.
pub fn with_alpha(table: &MeasurementTable, alpha: f64) -> MeasurementTable {
    subset(table, |m| m.alpha_percent == alpha)
}

/// Rows whose `Size_Bytes` equals `size`.
pub fn with_size(table: &MeasurementTable, size: u64) -> MeasurementTable {
    subset(table, |m| m.size_bytes == size)
}

/// Copy the rows passing `keep` into a new table, preserving file order.
pub fn subset<F>(table: &MeasurementTable, keep: F) -> MeasurementTable
where
    F: Fn(&Measurement) -> bool,
{
    MeasurementTable::new(table.rows.iter().filter(|m| keep(m)).cloned().collect())
}
