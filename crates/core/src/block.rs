//! Block records and the immutable dataset the engine runs over.

use crate::algo::Algo;
use crate::error::{StatsError, StatsResult};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Mask selecting the top byte of a block version.
pub const VERSION_TOP_MASK: u32 = 0xFF00_0000;
/// Top byte pattern of a version that carries soft-fork signal bits.
pub const VERSION_SIGNAL_MARKER: u32 = 0x2000_0000;
/// Mask selecting the signal bits of a signaling version.
pub const VERSION_SIGNAL_MASK: u32 = 0x0000_00FF;

/// Signal bits carried by a block version, if any.
///
/// The engine sees these through [`SignalBits::as_value`], which maps the
/// absent case to the `-1` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SignalBits(pub Option<u8>);

impl SignalBits {
    /// No signaling data present.
    pub const NONE: SignalBits = SignalBits(None);
    /// Integer form of the "no signal" sentinel.
    pub const SENTINEL: i64 = -1;

    /// Decodes the signal bits from a raw block version.
    pub fn from_version(version: u32) -> Self {
        if version & VERSION_TOP_MASK == VERSION_SIGNAL_MARKER {
            SignalBits(Some((version & VERSION_SIGNAL_MASK) as u8))
        } else {
            SignalBits::NONE
        }
    }

    /// Returns the low byte, or `-1` when the version did not signal.
    pub fn as_value(&self) -> i64 {
        self.0.map_or(Self::SENTINEL, i64::from)
    }

}

/// One block as consumed by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// Block height
    pub height: i64,
    /// Mining algorithm
    pub algo: Algo,
    /// Difficulty for the block's algorithm
    pub difficulty: f64,
    /// Raw version field
    pub version: u32,
    /// Serialized size in bytes
    pub size: u64,
    /// Block timestamp (unix seconds)
    pub time: u64,
    /// Number of transactions
    pub tx_count: u32,
}

impl BlockRecord {
    /// Soft-fork signal bits carried by this block's version.
    pub fn signal_bits(&self) -> SignalBits {
        SignalBits::from_version(self.version)
    }

    /// Low byte of the version, regardless of signaling.
    pub fn version_low_byte(&self) -> u8 {
        (self.version & VERSION_SIGNAL_MASK) as u8
    }
}

/// Look-back span and number of output points for a run.
///
/// Only constructed through [`WindowParams::new`], so both values are
/// positive and `block_window + block_domain + 1` fits in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowParams {
    block_window: usize,
    block_domain: usize,
}

impl WindowParams {
    /// Creates validated window parameters.
    pub fn new(block_window: usize, block_domain: usize) -> StatsResult<Self> {
        if block_window == 0 {
            return Err(StatsError::invalid_window("block_window must be greater than 0"));
        }
        if block_domain == 0 {
            return Err(StatsError::invalid_window("block_domain must be greater than 0"));
        }
        let required = block_window
            .checked_add(block_domain)
            .and_then(|span| span.checked_add(1))
            .filter(|&len| i64::try_from(len).is_ok());
        if required.is_none() {
            return Err(StatsError::invalid_window(format!(
                "block_window + block_domain exceeds {}",
                i64::MAX - 1
            )));
        }
        Ok(Self {
            block_window,
            block_domain,
        })
    }

    /// Look-back span in blocks.
    pub fn block_window(&self) -> usize {
        self.block_window
    }

    /// Number of output points requested.
    pub fn block_domain(&self) -> usize {
        self.block_domain
    }

    /// Number of records a run needs: `block_window + block_domain + 1`.
    pub fn required_len(&self) -> usize {
        self.block_window + self.block_domain + 1
    }

    /// Look-back as a height delta.
    pub fn lookback(&self) -> i64 {
        i64::try_from(self.block_window).unwrap_or(i64::MAX)
    }

    /// Height range to fetch for a chain whose tip is at `tip`.
    pub fn fetch_range(&self, tip: i64) -> RangeInclusive<i64> {
        let span = i64::try_from(self.block_window + self.block_domain).unwrap_or(i64::MAX);
        tip.saturating_sub(span).max(0)..=tip
    }
}

/// Immutable snapshot of the fetched block range.
///
/// Built once per run and shared read-only by every series computation.
#[derive(Debug, Clone, Default)]
pub struct BlockDataset {
    records: Vec<BlockRecord>,
}

impl BlockDataset {
    /// Wraps records, rejecting any decrease in height.
    pub fn new(records: Vec<BlockRecord>) -> StatsResult<Self> {
        for (index, pair) in records.windows(2).enumerate() {
            if pair[1].height < pair[0].height {
                return Err(StatsError::UnorderedHeights {
                    index: index + 1,
                    previous: pair[0].height,
                    current: pair[1].height,
                });
            }
        }
        Ok(Self { records })
    }

    /// All records in height order.
    pub fn records(&self) -> &[BlockRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Height of the last record.
    pub fn tip_height(&self) -> Option<i64> {
        self.records.last().map(|r| r.height)
    }

    /// Height column.
    pub fn heights(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.height).collect()
    }

    /// Algorithm column.
    pub fn algos(&self) -> Vec<Algo> {
        self.records.iter().map(|r| r.algo).collect()
    }

    /// Difficulty column.
    pub fn difficulties(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.difficulty).collect()
    }

    /// Signal-bit column in integer form (`-1` where the block did not signal).
    pub fn signal_values(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.signal_bits().as_value()).collect()
    }

    /// Fails with [`StatsError::InsufficientHistory`] if the dataset is
    /// shorter than `params` require.
    pub fn ensure_covers(&self, params: &WindowParams) -> StatsResult<()> {
        let required = params.required_len();
        if self.records.len() < required {
            return Err(StatsError::InsufficientHistory {
                required,
                available: self.records.len(),
            });
        }
        Ok(())
    }
}
