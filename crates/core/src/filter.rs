//! Extraction of one algorithm's sub-sequence from the full block range.

use crate::algo::Algo;
use crate::block::BlockRecord;
use crate::error::{ensure_aligned, StatsResult};

/// Anything that knows which algorithm mined it.
pub trait AlgoTagged {
    /// Mining algorithm of the item.
    fn algo(&self) -> Algo;
}

impl AlgoTagged for BlockRecord {
    fn algo(&self) -> Algo {
        self.algo
    }
}

impl AlgoTagged for Algo {
    fn algo(&self) -> Algo {
        *self
    }
}

/// Returns, in original order, the `values` whose record was mined with `algo`,
/// considering only positions `start..records.len()`.
///
/// `records` and `values` are index-aligned; differing lengths are rejected
/// rather than truncated.
pub fn filter_by_algo<R, V>(
    algo: Algo,
    records: &[R],
    values: &[V],
    start: usize,
) -> StatsResult<Vec<V>>
where
    R: AlgoTagged,
    V: Clone,
{
    ensure_aligned("filter_by_algo", records.len(), values.len())?;

    Ok(records
        .iter()
        .zip(values)
        .skip(start)
        .filter(|(record, _)| record.algo() == algo)
        .map(|(_, value)| value.clone())
        .collect())
}
