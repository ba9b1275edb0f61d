// Copyright (C) 2017-2026 cryptapus.
//
// index_window.rs file belongs to the myrstat project and is free
// software distributed under the GNU Lesser General Public License,
// version 2.1 or (at your option) any later version, see
// https://www.gnu.org/licenses/lgpl-2.1.html for more details.
//
// This software is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.

//! Fixed-count (index-based) moving average and its output axis.
//!
//! Unlike [`crate::window`], these look back a fixed number of positions and
//! assume a dense, gapless sequence. Output index `i` runs from
//! `block_window` to `block_window + block_domain` inclusive.

use crate::error::{StatsError, StatsResult};

fn check_history(len: usize, block_window: usize, block_domain: usize) -> StatsResult<()> {
    if block_window == 0 {
        return Err(StatsError::invalid_window("block_window must be greater than 0"));
    }
    let required = block_window
        .checked_add(block_domain)
        .and_then(|span| span.checked_add(1))
        .ok_or_else(|| StatsError::invalid_window("block_window + block_domain overflows"))?;
    if len < required {
        return Err(StatsError::InsufficientHistory {
            required,
            available: len,
        });
    }
    Ok(())
}

/// For each output index `i`, the percentage of `raw[i-k]` (`k` in
/// `0..block_window`) equal to `target`. Always `block_domain + 1` points.
pub fn moving_average_pct<T>(
    raw: &[T],
    target: &T,
    block_window: usize,
    block_domain: usize,
) -> StatsResult<Vec<f64>>
where
    T: PartialEq,
{
    check_history(raw.len(), block_window, block_domain)?;

    Ok((block_window..=block_window + block_domain)
        .map(|i| {
            let count = raw[i + 1 - block_window..=i]
                .iter()
                .filter(|v| *v == target)
                .count();
            count as f64 / block_window as f64 * 100.0
        })
        .collect())
}

/// Heights at output indices `block_window..=block_window + block_domain`.
pub fn block_window_axis(
    heights: &[i64],
    block_window: usize,
    block_domain: usize,
) -> StatsResult<Vec<i64>> {
    check_history(heights.len(), block_window, block_domain)?;
    Ok(heights[block_window..=block_window + block_domain].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::Algo;

    #[test]
    fn test_trailing_window_excludes_oldest() {
        // window of 2 at i=2 looks at raw[1] and raw[2], never raw[0]
        let raw = [7, 0, 0, 7];
        let pct = moving_average_pct(&raw, &7, 2, 1).unwrap();
        assert_eq!(pct, vec![0.0, 50.0]);
    }

    #[test]
    fn test_alternating_algos() {
        let raw: Vec<Algo> = (0..10)
            .map(|i| if i % 2 == 0 { Algo::Sha256d } else { Algo::Scrypt })
            .collect();
        let pct = moving_average_pct(&raw, &Algo::Sha256d, 2, 3).unwrap();
        assert_eq!(pct, vec![50.0; 4]);
    }

    #[test]
    fn test_axis_slice() {
        let heights: Vec<i64> = (100..110).collect();
        assert_eq!(block_window_axis(&heights, 2, 3).unwrap(), vec![102, 103, 104, 105]);
    }

    #[test]
    fn test_short_history_is_rejected() {
        let err = moving_average_pct(&[1, 2, 3], &1, 2, 1).unwrap_err();
        assert_eq!(
            err,
            StatsError::InsufficientHistory {
                required: 4,
                available: 3
            }
        );
        assert!(block_window_axis(&[1, 2, 3], 0, 1).is_err());
    }

    #[test]
    fn test_oversized_window_is_rejected() {
        let err = moving_average_pct(&[1, 2, 3], &1, usize::MAX, 1).unwrap_err();
        assert!(matches!(err, StatsError::InvalidWindow(_)));

        let err = block_window_axis(&[1, 2, 3], 1, usize::MAX).unwrap_err();
        assert!(matches!(err, StatsError::InvalidWindow(_)));
    }
}
