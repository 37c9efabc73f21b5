use chrono::NaiveDate;

/// Name of the date column every source file must start with.
pub const DATE_COLUMN: &str = "Tanggal";

/// The wide table as read from disk: one row per date, one column per region.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Region column names, in file order (the `Tanggal` column excluded).
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub date: NaiveDate,
    /// One cell per entry in `RawTable::columns`; None for an empty cell.
    pub prices: Vec<Option<f64>>,
}

impl RawTable {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}
