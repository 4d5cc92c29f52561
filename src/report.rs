//! Finalized per-category results and their CSV rendering.

use crate::engine::CategoryAccumulator;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Output header, written even when there are no result rows.
pub const HEADER: [&str; 3] = ["transaction_category_id", "sum_amount", "num_users"];

/// One output row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub transaction_category_id: u32,
    pub sum_amount: u64,
    pub num_users: u64,
}

/// Categories ordered by descending `sum_amount`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    rows: Vec<CategoryStats>,
}

impl QueryResult {
    /// A result with no categories.
    pub fn empty() -> Self {
        QueryResult::default()
    }

    /// Finalizes each accumulator and sorts the rows.
    ///
    /// The sort is stable: equal sums keep the order of `accumulators`.
    pub fn from_accumulators(accumulators: Vec<CategoryAccumulator>) -> Self {
        let mut rows: Vec<CategoryStats> = accumulators
            .into_iter()
            .map(CategoryAccumulator::finalize)
            .collect();
        rows.sort_by(|a, b| b.sum_amount.cmp(&a.sum_amount));
        QueryResult { rows }
    }

    pub fn rows(&self) -> &[CategoryStats] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes the header and one line per category, `\n`-terminated.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(HEADER)?;
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Renders the result as a CSV string.
    pub fn to_csv_string(&self) -> Result<String> {
        let mut output = Vec::new();
        self.write_csv(&mut output)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}
