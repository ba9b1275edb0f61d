//! # Myrstat Core
//!
//! Rolling block statistics for multi-algorithm proof-of-work chains.
//!
//! The crate is pure computation: it takes an ordered run of [`BlockRecord`]s
//! and produces named numeric [`Series`] for a presentation layer. Nothing
//! here performs I/O.
//!
//! ## Windowing
//!
//! Two windowing schemes coexist and are intentionally kept separate:
//!
//! - [`window`]: height-range windows, inclusive at both ends, used for
//!   soft-fork signaling percentages (globally or per algorithm).
//! - [`index_window`]: fixed-count trailing windows over a dense sequence,
//!   used for per-algorithm block share.
//!
//! ## Example
//!
//! ```rust
//! use myr_core::{Criterion, window_match_percentage};
//!
//! let heights = [10, 11, 12, 13];
//! let bits = [5i64, -1, 4, 5];
//! let pct = window_match_percentage(&heights, &bits, 13, 3, &Criterion::SignalBit(3)).unwrap();
//! assert_eq!(pct, 75.0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Mining algorithm identifiers
pub mod algo;
/// Block records, window parameters and the immutable dataset
pub mod block;
/// Per-value match predicates
pub mod criterion;
/// Engine error types
pub mod error;
/// Per-algorithm sub-sequence extraction
pub mod filter;
/// Fixed-count moving average and output axis
pub mod index_window;
/// Named series builders
pub mod series;
/// Height-range windowed percentages
pub mod window;

pub use algo::Algo;
pub use block::{BlockDataset, BlockRecord, SignalBits, WindowParams};
pub use criterion::{BitField, Criterion};
pub use error::{StatsError, StatsResult};
pub use filter::{filter_by_algo, AlgoTagged};
pub use index_window::{block_window_axis, moving_average_pct};
pub use series::{
    algo_difficulty_series, algo_share_series, signal_series, signal_series_by_algo, Series,
    SeriesSet, ACTIVATION_THRESHOLD_PCT,
};
pub use window::{moving_average, moving_average_for_algo, window_match_percentage};
