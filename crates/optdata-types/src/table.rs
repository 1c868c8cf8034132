//! Combined options table.

use serde_json::{Map, Value};

/// Order book statistics for one instrument, exactly as the exchange sent them.
///
/// No schema is enforced: prices, implied volatilities, greeks and the bid/ask
/// ladders are whatever the upstream returned for this call, in field order.
pub type OrderBookStat = Map<String, Value>;

/// One row of the options table: instrument columns followed by order book
/// columns, with duplicate names collapsed to their first occurrence.
pub type CombinedRecord = Map<String, Value>;

/// Table of combined records with a stable column list.
///
/// The column list is the union of every row's columns in order of first
/// appearance, so rows whose order book payloads differ still line up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsTable {
    columns: Vec<String>,
    rows: Vec<CombinedRecord>,
}

impl OptionsTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Builds a table from records, deriving the column list.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = CombinedRecord>) -> Self {
        let mut table = Self::new();
        for record in records {
            table.push(record);
        }
        table
    }

    /// Appends a record, extending the column list with any new names.
    pub fn push(&mut self, record: CombinedRecord) {
        for key in record.keys() {
            if !self.columns.iter().any(|c| c == key) {
                self.columns.push(key.clone());
            }
        }
        self.rows.push(record);
    }

    /// Returns the column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the rows.
    #[must_use]
    pub fn rows(&self) -> &[CombinedRecord] {
        &self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the cell at `row` and `column`, if both exist.
    #[must_use]
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row)?.get(column)
    }

    /// Returns every row's value for a column; `None` where a row lacks it.
    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = Option<&'a Value>> + 'a {
        self.rows.iter().map(move |row| row.get(name))
    }
}
