//! Named output series assembled from the windowed engines.
//!
//! Each builder reads the shared [`BlockDataset`] and produces an ordered
//! [`SeriesSet`]; none of them mutate anything, so they can run in any order
//! or concurrently.

use crate::algo::Algo;
use crate::block::{BlockDataset, SignalBits, WindowParams};
use crate::criterion::Criterion;
use crate::error::{StatsError, StatsResult};
use crate::filter::filter_by_algo;
use crate::index_window::{block_window_axis, moving_average_pct};
use crate::window::{moving_average, moving_average_for_algo};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Percentage of signaling blocks at which a soft fork locks in.
pub const ACTIVATION_THRESHOLD_PCT: f64 = 75.0;

/// One plotted line: x values (heights) against y values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Semantic name, e.g. `sha256d_share`.
    pub name: String,
    /// Height axis.
    pub x: Vec<i64>,
    /// Values aligned with `x`.
    pub y: Vec<f64>,
}

impl Series {
    /// Creates a series. `x` and `y` are expected to have equal length.
    pub fn new(name: impl Into<String>, x: Vec<i64>, y: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

/// Ordered collection of series keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesSet {
    series: Vec<Series>,
}

impl SeriesSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a series, replacing any existing one with the same name.
    pub fn push(&mut self, series: Series) {
        debug!(name = %series.name, points = series.len(), "series built");
        match self.series.iter_mut().find(|s| s.name == series.name) {
            Some(existing) => *existing = series,
            None => self.series.push(series),
        }
    }

    /// Looks up a series by name.
    pub fn get(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Series in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.series.iter()
    }

    /// Number of series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Name of an algorithm's block-share series.
pub fn share_name(algo: Algo) -> String {
    format!("{algo}_share")
}

/// Name of an algorithm's difficulty series.
pub fn difficulty_name(algo: Algo) -> String {
    format!("{algo}_difficulty")
}

/// Name of a signal-bit series, optionally restricted to one algorithm.
pub fn signal_name(bit: u32, algo: Option<Algo>) -> String {
    match algo {
        Some(algo) => format!("bit{bit}_signal_pct_by_algo[{algo}]"),
        None => format!("bit{bit}_signal_pct"),
    }
}

/// Name of the non-signaling (legacy version) series.
pub fn legacy_name(algo: Option<Algo>) -> String {
    match algo {
        Some(algo) => format!("legacy_pct_by_algo[{algo}]"),
        None => "legacy_pct".to_string(),
    }
}

/// Block share per algorithm over the fixed-count window.
pub fn algo_share_series(dataset: &BlockDataset, params: &WindowParams) -> StatsResult<SeriesSet> {
    dataset.ensure_covers(params)?;
    let axis = block_window_axis(&dataset.heights(), params.block_window(), params.block_domain())?;
    let algos = dataset.algos();

    let mut set = SeriesSet::new();
    for algo in Algo::ALL {
        let pct = moving_average_pct(&algos, &algo, params.block_window(), params.block_domain())?;
        set.push(Series::new(share_name(algo), axis.clone(), pct));
    }
    Ok(set)
}

/// Raw difficulty per algorithm against that algorithm's own heights.
pub fn algo_difficulty_series(dataset: &BlockDataset) -> StatsResult<SeriesSet> {
    let records = dataset.records();
    let heights = dataset.heights();
    let difficulties = dataset.difficulties();

    let mut set = SeriesSet::new();
    for algo in Algo::ALL {
        let x = filter_by_algo(algo, records, &heights, 0)?;
        let y = filter_by_algo(algo, records, &difficulties, 0)?;
        set.push(Series::new(difficulty_name(algo), x, y));
    }
    Ok(set)
}

/// Legacy-version share and each requested signal bit, per algorithm.
pub fn signal_series_by_algo(
    dataset: &BlockDataset,
    params: &WindowParams,
    bits: &[u32],
) -> StatsResult<SeriesSet> {
    let records = dataset.records();
    let heights = dataset.heights();
    let signals = dataset.signal_values();

    let mut set = SeriesSet::new();
    for algo in Algo::ALL {
        let legacy = Criterion::Exact(SignalBits::SENTINEL);
        let (x, y) = moving_average_for_algo(
            algo,
            &heights,
            records,
            &signals,
            &legacy,
            params.block_window(),
        )?;
        set.push(Series::new(legacy_name(Some(algo)), x, y));

        for &bit in bits {
            let (x, y) = moving_average_for_algo(
                algo,
                &heights,
                records,
                &signals,
                &Criterion::SignalBit(bit),
                params.block_window(),
            )?;
            set.push(Series::new(signal_name(bit, Some(algo)), x, y));
        }
    }
    Ok(set)
}

/// Legacy-version share and each requested signal bit across all blocks,
/// plus the activation threshold line and the current window marker.
pub fn signal_series(
    dataset: &BlockDataset,
    params: &WindowParams,
    bits: &[u32],
) -> StatsResult<SeriesSet> {
    let heights = dataset.heights();
    let signals = dataset.signal_values();

    let mut set = SeriesSet::new();
    let legacy = moving_average(
        &heights,
        &signals,
        &Criterion::Exact(SignalBits::SENTINEL),
        params.block_window(),
    )?;
    set.push(Series::new(legacy_name(None), heights.clone(), legacy));

    for &bit in bits {
        let pct = moving_average(
            &heights,
            &signals,
            &Criterion::SignalBit(bit),
            params.block_window(),
        )?;
        set.push(Series::new(signal_name(bit, None), heights.clone(), pct));
    }

    set.push(Series::new(
        "activation_threshold",
        heights.clone(),
        vec![ACTIVATION_THRESHOLD_PCT; heights.len()],
    ));

    if let Some(tip) = dataset.tip_height() {
        set.push(block_window_marker(tip, params.lookback())?);
    }
    Ok(set)
}

/// Closed rectangle spanning the last retarget-aligned window before `tip`.
///
/// `block_window` must be positive.
pub fn block_window_marker(tip: i64, block_window: i64) -> StatsResult<Series> {
    if block_window <= 0 {
        return Err(StatsError::invalid_window("block_window must be greater than 0"));
    }
    let end = tip - tip.rem_euclid(block_window);
    let start = end.saturating_sub(block_window);
    Ok(Series::new(
        "block_window_marker",
        vec![end, end, start, start, end],
        vec![0.0, 100.0, 100.0, 0.0, 0.0],
    ))
}
