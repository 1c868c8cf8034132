//! Column-wise record merge.

use optdata_types::{CombinedRecord, Instrument, OrderBookStat};

/// Merges an instrument with its order book stats into one record.
///
/// Instrument columns come first. A stat column whose name is already
/// present is dropped, so the instrument's value wins.
#[must_use]
pub fn merge_record(instrument: &Instrument, stat: OrderBookStat) -> CombinedRecord {
    let mut record = instrument.to_record();
    for (column, value) in stat {
        record.entry(column).or_insert(value);
    }
    record
}
