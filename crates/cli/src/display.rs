//! Display metadata for the chart documents.
//!
//! Colours, titles and labels live here so the statistics crate stays free of
//! presentation concerns.

use myr_core::Algo;
use serde::Serialize;

/// X-axis label shared by every chart
pub const X_LABEL: &str = "Block Number";
/// Y range used by the signaling charts
pub const SIGNAL_Y_RANGE: [f64; 2] = [-10.0, 110.0];

/// Colour assigned to an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgoStyle {
    /// Algorithm
    pub algo: Algo,
    /// Hex colour
    pub color: &'static str,
}

/// Algorithm colours, in plotting order
pub const ALGO_STYLES: [AlgoStyle; 5] = [
    AlgoStyle {
        algo: Algo::Sha256d,
        color: "#8ecf1d",
    },
    AlgoStyle {
        algo: Algo::Scrypt,
        color: "#2db6db",
    },
    AlgoStyle {
        algo: Algo::Groestl,
        color: "#d7370c",
    },
    AlgoStyle {
        algo: Algo::Yescrypt,
        color: "#ffe21b",
    },
    AlgoStyle {
        algo: Algo::Argon2d,
        color: "#8f3c85",
    },
];

/// Line dash pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    /// Solid line
    Solid,
    /// Alternating dash and dot
    DashDot,
}

/// Colour used for an algorithm's lines
pub fn algo_color(algo: Algo) -> &'static str {
    ALGO_STYLES
        .iter()
        .find(|style| style.algo == algo)
        .map_or("black", |style| style.color)
}

/// Colour used for a signal-bit line
pub fn signal_color(bit: u32) -> &'static str {
    match bit {
        1 | 7 => "blue",
        2 | 6 => "magenta",
        3 => "cyan",
        5 => "red",
        4 => "olive",
        _ => "gray",
    }
}

/// Colour of the non-signaling line
pub const LEGACY_COLOR: &str = "red";
/// Colour of the activation threshold line
pub const THRESHOLD_COLOR: &str = "green";
/// Colour of the block window marker
pub const WINDOW_MARKER_COLOR: &str = "orange";
