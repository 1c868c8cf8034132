//! Pairing instruments with their order book stats.

use std::collections::HashMap;

use optdata_types::{AssemblyError, Instrument, OptionsTable, OrderBookStat};
use tracing::info;

use crate::merge_record;

/// Assembles a table by pairing instrument `i` with stat `i`.
///
/// The stats must be in the same order as the instruments they were fetched
/// for. Results gathered in completion order break that assumption; use
/// [`assemble_keyed`] for those.
///
/// # Errors
///
/// Returns [`AssemblyError::LengthMismatch`] if the sequences differ in length.
pub fn assemble(
    instruments: &[Instrument],
    stats: Vec<OrderBookStat>,
) -> Result<OptionsTable, AssemblyError> {
    if instruments.len() != stats.len() {
        return Err(AssemblyError::LengthMismatch {
            instruments: instruments.len(),
            stats: stats.len(),
        });
    }

    let table = OptionsTable::from_records(
        instruments
            .iter()
            .zip(stats)
            .map(|(instrument, stat)| merge_record(instrument, stat)),
    );
    info!(
        rows = table.len(),
        columns = table.columns().len(),
        "assembled options table"
    );
    Ok(table)
}

/// Assembles a table by matching stats to instruments by name.
///
/// Rows follow the instrument list order whatever order `stats` arrive in.
///
/// # Errors
///
/// Returns an error if an instrument has no stats, a stat names an unknown
/// instrument, or an instrument receives two stats.
pub fn assemble_keyed(
    instruments: Vec<Instrument>,
    stats: impl IntoIterator<Item = (String, OrderBookStat)>,
) -> Result<OptionsTable, AssemblyError> {
    let mut assembler = KeyedAssembler::new(instruments);
    for (name, stat) in stats {
        assembler.insert(name, stat)?;
    }
    assembler.finish()
}

/// Incremental keyed assembler.
///
/// Accepts order book stats one at a time, in any order, and produces the
/// table once every instrument has been matched. A name listed more than
/// once expects one stat per listing; stats fill its rows in list order.
#[derive(Debug)]
pub struct KeyedAssembler {
    instruments: Vec<Instrument>,
    index: HashMap<String, Vec<usize>>,
    stats: Vec<Option<OrderBookStat>>,
    received: usize,
}

impl KeyedAssembler {
    /// Creates an assembler expecting one stat per instrument.
    #[must_use]
    pub fn new(instruments: Vec<Instrument>) -> Self {
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, instrument) in instruments.iter().enumerate() {
            index.entry(instrument.name().to_string()).or_default().push(i);
        }
        let stats = vec![None; instruments.len()];
        Self {
            instruments,
            index,
            stats,
            received: 0,
        }
    }

    /// Returns the number of instruments expected.
    #[must_use]
    pub const fn expected(&self) -> usize {
        self.instruments.len()
    }

    /// Returns the number of stats received so far.
    #[must_use]
    pub const fn received(&self) -> usize {
        self.received
    }

    /// Records the stats for one instrument.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not in the instrument list or every
    /// listing of it already has stats.
    pub fn insert(&mut self, name: String, stat: OrderBookStat) -> Result<(), AssemblyError> {
        let Some(slots) = self.index.get(&name) else {
            return Err(AssemblyError::UnknownInstrument(name));
        };
        let Some(&slot) = slots.iter().find(|&&i| self.stats[i].is_none()) else {
            return Err(AssemblyError::DuplicateStats(name));
        };
        self.stats[slot] = Some(stat);
        self.received += 1;
        Ok(())
    }

    /// Finishes assembly, returning rows in instrument-list order.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::MissingStats`] naming the first instrument
    /// that never received stats.
    pub fn finish(self) -> Result<OptionsTable, AssemblyError> {
        let mut table = OptionsTable::new();
        for (instrument, stat) in self.instruments.iter().zip(self.stats) {
            let stat =
                stat.ok_or_else(|| AssemblyError::MissingStats(instrument.name().to_string()))?;
            table.push(merge_record(instrument, stat));
        }
        info!(
            rows = table.len(),
            columns = table.columns().len(),
            "assembled options table"
        );
        Ok(table)
    }
}
