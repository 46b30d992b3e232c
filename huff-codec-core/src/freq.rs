use crate::codec::CodecError;
use std::io::{ErrorKind, Read};

const READ_CHUNK: usize = 4096;

/// Per-byte occurrence counts for one input stream.
///
/// Dense 256-entry table of 64-bit counts. Iteration only visits nonzero
/// entries, in ascending symbol order, so downstream consumers see a stable
/// order regardless of how the input was chunked.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    counts: [u64; 256],
    total: u64,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            counts: [0; 256],
            total: 0,
        }
    }

    /// Build a table by reading `reader` to exhaustion.
    ///
    /// This is the first of the two passes over the input; the caller must
    /// rewind the source before the packing pass.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, CodecError> {
        let mut table = Self::new();
        let mut buf = [0u8; READ_CHUNK];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => table.count_bytes(&buf[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(table)
    }

    /// Fold a chunk of input into the counts.
    pub fn count_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.counts[usize::from(b)] += 1;
        }
        self.total += bytes.len() as u64;
    }

    /// Occurrence count for one byte value.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[usize::from(symbol)]
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct byte values observed.
    pub fn distinct_count(&self) -> usize {
        self.counts.iter().filter(|&&c| c != 0).count()
    }

    /// True if no bytes have been counted.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Nonzero entries as `(symbol, count)`, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c != 0)
            .map(|(i, &c)| (i as u8, c))
    }
}
