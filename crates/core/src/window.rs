// Copyright (C) 2017-2026 cryptapus.
//
// window.rs file belongs to the myrstat project and is free
// software distributed under the GNU Lesser General Public License,
// version 2.1 or (at your option) any later version, see
// https://www.gnu.org/licenses/lgpl-2.1.html for more details.
//
// This software is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.

//! Height-windowed match percentages.
//!
//! A window for target height `t` and look-back `n` covers every entry whose
//! height lies in `t - n ..= t`; both ends are inclusive, so the target block
//! itself is part of its own window. Heights must be sorted ascending; the
//! engine locates window bounds by binary search and never sorts.

use crate::algo::Algo;
use crate::criterion::{BitField, Criterion};
use crate::error::{ensure_aligned, StatsResult};
use crate::filter::{filter_by_algo, AlgoTagged};

/// Percentage (0–100) of entries in the window ending at `target_height`
/// that satisfy `criterion`.
///
/// An empty window yields `0.0`.
pub fn window_match_percentage<T>(
    heights: &[i64],
    values: &[T],
    target_height: i64,
    lookback: i64,
    criterion: &Criterion<T>,
) -> StatsResult<f64>
where
    T: PartialEq + BitField,
{
    ensure_aligned("window_match_percentage", heights.len(), values.len())?;
    Ok(percentage_in_window(
        heights,
        values,
        target_height,
        lookback,
        criterion,
    ))
}

fn percentage_in_window<T>(
    heights: &[i64],
    values: &[T],
    target_height: i64,
    lookback: i64,
    criterion: &Criterion<T>,
) -> f64
where
    T: PartialEq + BitField,
{
    let from = target_height.saturating_sub(lookback);
    let lo = heights.partition_point(|h| *h < from);
    let hi = heights.partition_point(|h| *h <= target_height);
    if hi <= lo {
        return 0.0;
    }

    let window = &values[lo..hi];
    let matched = window.iter().filter(|v| criterion.matches(v)).count();
    matched as f64 / window.len() as f64 * 100.0
}

/// For every entry, the match percentage over the window ending at that
/// entry's height. One output per input.
pub fn moving_average<T>(
    heights: &[i64],
    values: &[T],
    criterion: &Criterion<T>,
    block_window: usize,
) -> StatsResult<Vec<f64>>
where
    T: PartialEq + BitField,
{
    ensure_aligned("moving_average", heights.len(), values.len())?;
    let lookback = i64::try_from(block_window).unwrap_or(i64::MAX);

    Ok(heights
        .iter()
        .map(|&h| percentage_in_window(heights, values, h, lookback, criterion))
        .collect())
}

/// [`moving_average`] restricted to blocks mined with `algo`.
///
/// Both the height axis and the values are filtered first, so each point is
/// the share of the same-algo blocks inside the height window that match.
/// Returns the filtered heights alongside the percentages.
pub fn moving_average_for_algo<R, T>(
    algo: Algo,
    heights_all: &[i64],
    records_all: &[R],
    values: &[T],
    criterion: &Criterion<T>,
    block_window: usize,
) -> StatsResult<(Vec<i64>, Vec<f64>)>
where
    R: AlgoTagged,
    T: PartialEq + BitField + Clone,
{
    let heights = filter_by_algo(algo, records_all, heights_all, 0)?;
    let filtered = filter_by_algo(algo, records_all, values, 0)?;
    let pct = moving_average(&heights, &filtered, criterion, block_window)?;
    Ok((heights, pct))
}
